//! # Validate Subcommand
//!
//! Validates one or more catalog documents against a single schema. The
//! schema is compiled once and reused for every document.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use catalint_core::CatalogKind;
use catalint_schema::{
    load_document, load_schema, CatalogValidator, EngineOptions, JsonSchemaEngine, SchemaDraft,
    ValidationResult,
};
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::{EXIT_INVALID, EXIT_OK};

/// Output format for validation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per message, prefixed with the document path.
    Text,
    /// One JSON object per document.
    Json,
}

/// JSON Schema draft selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DraftArg {
    /// Draft 4.
    Draft4,
    /// Draft 6.
    Draft6,
    /// Draft 7.
    Draft7,
    /// Draft 2019-09.
    #[value(name = "draft2019-09")]
    Draft201909,
    /// Draft 2020-12.
    #[value(name = "draft2020-12")]
    Draft202012,
}

impl From<DraftArg> for SchemaDraft {
    fn from(draft: DraftArg) -> Self {
        match draft {
            DraftArg::Draft4 => SchemaDraft::Draft4,
            DraftArg::Draft6 => SchemaDraft::Draft6,
            DraftArg::Draft7 => SchemaDraft::Draft7,
            DraftArg::Draft201909 => SchemaDraft::Draft201909,
            DraftArg::Draft202012 => SchemaDraft::Draft202012,
        }
    }
}

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog kind of the documents (`transformation` or `site`).
    #[arg(long, short = 'k')]
    pub kind: CatalogKind,

    /// Schema file, JSON or YAML.
    #[arg(long, short = 's')]
    pub schema: PathBuf,

    /// Directory of schemas for resolving external `$ref`s.
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,

    /// Force a JSON Schema draft instead of detecting it from `$schema`.
    #[arg(long, value_enum)]
    pub draft: Option<DraftArg>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Catalog documents to validate.
    #[arg(required = true)]
    pub documents: Vec<PathBuf>,
}

#[derive(Serialize)]
struct DocumentReport<'a> {
    document: String,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

/// Execute the validate subcommand.
///
/// Options from the `config` file are overridden by command-line flags.
/// Returns [`EXIT_OK`] when every document passes, [`EXIT_INVALID`]
/// otherwise.
pub fn run_validate(
    args: &ValidateArgs,
    config: Option<&Path>,
    out: &mut dyn Write,
) -> anyhow::Result<u8> {
    let mut options = match config {
        Some(path) => EngineOptions::from_yaml_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => EngineOptions::default(),
    };
    if let Some(draft) = args.draft {
        options.draft = Some(draft.into());
    }
    if let Some(dir) = &args.schema_dir {
        options.schema_dir = Some(dir.clone());
    }

    let validator = CatalogValidator::new(JsonSchemaEngine::with_options(options)?);
    let schema = load_schema(&args.schema)?;
    let compiled = validator
        .compile(&schema)
        .with_context(|| format!("compiling schema {}", args.schema.display()))?;

    let mut failed = 0usize;
    for path in &args.documents {
        let document = load_document(path)?;
        let result = validator
            .validate_compiled(&document, &compiled, args.kind)
            .with_context(|| format!("validating {}", path.display()))?;
        if !result.is_success() {
            failed += 1;
        }
        write_result(out, args.format, path, &result)?;
    }

    tracing::info!(
        kind = %args.kind,
        documents = args.documents.len(),
        failed,
        "validation complete"
    );

    Ok(if failed == 0 { EXIT_OK } else { EXIT_INVALID })
}

fn write_result(
    out: &mut dyn Write,
    format: OutputFormat,
    path: &Path,
    result: &ValidationResult,
) -> anyhow::Result<()> {
    let document = path.display().to_string();
    match format {
        OutputFormat::Text => {
            if result.is_success() {
                writeln!(out, "{document}: OK")?;
            } else if result.messages().is_empty() {
                writeln!(out, "{document}: invalid")?;
            }
            for message in result.messages() {
                writeln!(out, "{document}: {message}")?;
            }
        }
        OutputFormat::Json => {
            let report = DocumentReport { document, result };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        }
    }
    Ok(())
}
