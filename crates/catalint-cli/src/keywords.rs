//! # Keywords Subcommand
//!
//! Shows how a catalog kind's reserved-keyword registry classifies field
//! names. Useful when a message reads `property name -unknown` and you want
//! to know why.

use std::io::Write;

use catalint_core::{CatalogKind, KeywordRegistry};
use clap::Args;

use crate::EXIT_OK;

/// Arguments for the keywords subcommand.
#[derive(Args, Debug)]
pub struct KeywordsArgs {
    /// Catalog kind whose registry to query.
    #[arg(long, short = 'k')]
    pub kind: CatalogKind,

    /// Field names to classify.
    #[arg(required = true)]
    pub fields: Vec<String>,
}

/// Execute the keywords subcommand, printing `field: role (display name)`
/// per field.
pub fn run_keywords(args: &KeywordsArgs, out: &mut dyn Write) -> anyhow::Result<u8> {
    let registry = args.kind.registry();
    for field in &args.fields {
        let keyword = registry.role_of(field);
        writeln!(
            out,
            "{field}: {} ({})",
            keyword.role,
            registry.display_name_of(keyword)
        )?;
    }
    Ok(EXIT_OK)
}
