//! # Schema Validation Engine
//!
//! The seam between catalint and whatever actually checks a document
//! against a JSON Schema. An engine compiles a schema once and reports, for
//! each document, an ordered list of [`Violation`]s: where the document
//! breaks the schema, which keyword broke, how severe it is, and the
//! keyword-specific detail (unexpected fields, missing fields).
//!
//! [`JsonSchemaEngine`] is the engine shipped with catalint, backed by the
//! `jsonschema` crate.
//!
//! ## Schema Resolution
//!
//! External `$ref`s are resolved from an optional schema directory, loaded
//! once when the engine is built and indexed by filename and by each
//! schema's `$id`. A reference that does not resolve locally makes the
//! schema fail to compile. The engine never makes network requests.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use catalint_core::{CatalintError, InstancePath, PathSegment};
use jsonschema::error::ValidationErrorKind;
use jsonschema::{Retrieve, Uri, ValidationError, Validator};
use serde::Serialize;
use serde_json::Value;

use crate::config::EngineOptions;
use crate::document::load_schema;

/// Severity of a reported violation. Only errors are surfaced to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A rule violation that makes the document invalid.
    Error,
    /// An advisory note; never surfaced.
    Warning,
}

/// Keyword-specific data attached to a violation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationDetail {
    /// Fields present in the document but not allowed by the schema.
    AdditionalProperties {
        /// Offending field names, in document order.
        unwanted: Vec<String>,
    },
    /// Fields the schema requires but the document lacks.
    Required {
        /// Missing field names, in schema order.
        missing: Vec<String>,
    },
    /// No extra data.
    #[default]
    None,
}

/// A single schema rule failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Location of the failure in the document.
    pub pointer: InstancePath,
    /// Schema keyword that failed (`required`, `type`, ...).
    pub keyword: String,
    /// Severity.
    pub severity: Severity,
    /// Engine's default human-readable description.
    pub message: String,
    /// Keyword-specific detail.
    pub detail: ViolationDetail,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pointer.is_empty() {
            write!(f, "(root) [{}]: {}", self.keyword, self.message)
        } else {
            write!(f, "{} [{}]: {}", self.pointer, self.keyword, self.message)
        }
    }
}

/// Outcome of one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// The engine's own verdict.
    pub success: bool,
    /// Violations in the order the engine found them.
    pub violations: Vec<Violation>,
}

/// A JSON Schema validation engine.
///
/// `validate` fails only on engine faults. Ordinary rule violations are
/// returned as entries of the report.
pub trait SchemaEngine: Send + Sync {
    /// Compiled form of a schema.
    type Compiled: Send + Sync;

    /// Compile a schema document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalintError::SchemaCompilation`] for a malformed schema.
    fn compile(&self, schema: &Value) -> Result<Self::Compiled, CatalintError>;

    /// Validate a document against a compiled schema.
    ///
    /// # Errors
    ///
    /// Returns [`CatalintError::ValidationExecution`] if the engine faults.
    fn validate(
        &self,
        schema: &Self::Compiled,
        document: &Value,
    ) -> Result<ValidationReport, CatalintError>;
}

/// Resolves `$ref` URIs against schemas held in memory.
struct LocalSchemaRetriever {
    schemas_by_uri: Arc<HashMap<String, Value>>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        tracing::debug!(uri = uri_str, "unresolved $ref");
        Err(format!("schema '{uri_str}' not found in schema directory").into())
    }
}

/// [`SchemaEngine`] backed by the `jsonschema` crate.
///
/// Every `jsonschema` error is reported with [`Severity::Error`].
/// Consecutive `required` errors at the same location are merged into one
/// violation listing every missing field.
#[derive(Debug, Clone, Default)]
pub struct JsonSchemaEngine {
    options: EngineOptions,
    schemas_by_uri: Arc<HashMap<String, Value>>,
}

impl JsonSchemaEngine {
    /// Engine with draft auto-detection and no schema directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine configured by `options`, loading the schema directory if set.
    ///
    /// # Errors
    ///
    /// Returns [`CatalintError::SchemaLoad`] if the schema directory or any
    /// schema in it cannot be read.
    pub fn with_options(options: EngineOptions) -> Result<Self, CatalintError> {
        let schemas_by_uri = match &options.schema_dir {
            Some(dir) => load_schema_dir(dir)?,
            None => HashMap::new(),
        };
        Ok(Self {
            options,
            schemas_by_uri: Arc::new(schemas_by_uri),
        })
    }

    /// Number of schemas available for `$ref` resolution.
    pub fn schema_count(&self) -> usize {
        self.schemas_by_uri
            .keys()
            .filter(|k| !k.contains('/'))
            .count()
    }
}

/// Index every `*.json`/`*.yml`/`*.yaml` file in `dir` by filename and `$id`.
fn load_schema_dir(dir: &Path) -> Result<HashMap<String, Value>, CatalintError> {
    let entries = std::fs::read_dir(dir).map_err(|e| CatalintError::SchemaLoad {
        schema_name: dir.display().to_string(),
        reason: format!("cannot read schema directory: {e}"),
    })?;

    let mut schemas_by_uri = HashMap::new();
    for entry in entries {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let is_schema_file = [".json", ".yml", ".yaml"]
            .iter()
            .any(|ext| name.ends_with(ext));
        if !path.is_file() || !is_schema_file {
            continue;
        }
        let value = load_schema(&path)?;
        if let Some(id) = value.get("$id").and_then(Value::as_str) {
            schemas_by_uri.insert(id.to_string(), value.clone());
        }
        schemas_by_uri.insert(name.to_string(), value);
    }
    tracing::debug!(dir = %dir.display(), entries = schemas_by_uri.len(), "loaded schema directory");
    Ok(schemas_by_uri)
}

impl SchemaEngine for JsonSchemaEngine {
    type Compiled = Validator;

    fn compile(&self, schema: &Value) -> Result<Validator, CatalintError> {
        let mut opts = jsonschema::options();
        if let Some(draft) = self.options.draft {
            opts.with_draft(draft.to_jsonschema());
        }
        opts.with_retriever(LocalSchemaRetriever {
            schemas_by_uri: Arc::clone(&self.schemas_by_uri),
        });
        opts.build(schema)
            .map_err(|e| CatalintError::SchemaCompilation {
                reason: e.to_string(),
            })
    }

    fn validate(
        &self,
        schema: &Validator,
        document: &Value,
    ) -> Result<ValidationReport, CatalintError> {
        let mut violations: Vec<Violation> = Vec::new();
        for error in schema.iter_errors(document) {
            let violation = to_violation(&error);
            if let Some(last) = violations.last_mut() {
                if merge_required(last, &violation) {
                    continue;
                }
            }
            violations.push(violation);
        }
        Ok(ValidationReport {
            success: violations.is_empty(),
            violations,
        })
    }
}

fn to_violation(error: &ValidationError<'_>) -> Violation {
    let pointer = InstancePath::parse(&error.instance_path.to_string());
    let message = error.to_string();
    let (keyword, detail) = match &error.kind {
        ValidationErrorKind::AdditionalProperties { unexpected } => (
            "additionalProperties".to_string(),
            ViolationDetail::AdditionalProperties {
                unwanted: unexpected.clone(),
            },
        ),
        ValidationErrorKind::Required { property } => (
            "required".to_string(),
            ViolationDetail::Required {
                missing: vec![property_name(property)],
            },
        ),
        ValidationErrorKind::FalseSchema { .. } => ("false".to_string(), ViolationDetail::None),
        ValidationErrorKind::Type { .. } => ("type".to_string(), ViolationDetail::None),
        ValidationErrorKind::Enum { .. } => ("enum".to_string(), ViolationDetail::None),
        ValidationErrorKind::Constant { .. } => ("const".to_string(), ViolationDetail::None),
        _ => (
            keyword_from_schema_path(&error.schema_path.to_string()),
            ViolationDetail::None,
        ),
    };
    Violation {
        pointer,
        keyword,
        severity: Severity::Error,
        message,
        detail,
    }
}

fn property_name(property: &Value) -> String {
    match property {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// For kinds without a fixed keyword, the keyword is the last token of the
/// schema path: `/properties/site/minItems` failed on `minItems`.
fn keyword_from_schema_path(schema_path: &str) -> String {
    match InstancePath::parse(schema_path).segments().last() {
        Some(PathSegment::Field(name)) => name.clone(),
        Some(PathSegment::Index(i)) => i.to_string(),
        None => String::new(),
    }
}

/// Fold `next` into `last` when both are `required` failures of one object.
fn merge_required(last: &mut Violation, next: &Violation) -> bool {
    if last.pointer != next.pointer || last.keyword != next.keyword {
        return false;
    }
    match (&mut last.detail, &next.detail) {
        (
            ViolationDetail::Required { missing },
            ViolationDetail::Required { missing: more },
        ) => {
            missing.extend(more.iter().cloned());
            last.message = format!("{}; {}", last.message, next.message);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(schema: Value, doc: Value) -> ValidationReport {
        let engine = JsonSchemaEngine::new();
        let compiled = engine.compile(&schema).unwrap();
        engine.validate(&compiled, &doc).unwrap()
    }

    #[test]
    fn valid_document_has_no_violations() {
        let report = run(
            json!({"type": "object", "properties": {"a": {"type": "string"}}}),
            json!({"a": "x"}),
        );
        assert!(report.success);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn additional_properties_lists_unwanted() {
        let report = run(
            json!({"type": "object", "properties": {"a": {}}, "additionalProperties": false}),
            json!({"a": 1, "zzz": 2}),
        );
        assert!(!report.success);
        assert_eq!(report.violations.len(), 1);
        let v = &report.violations[0];
        assert_eq!(v.keyword, "additionalProperties");
        assert_eq!(
            v.detail,
            ViolationDetail::AdditionalProperties {
                unwanted: vec!["zzz".to_string()]
            }
        );
        assert!(v.pointer.is_empty());
    }

    #[test]
    fn required_failures_on_one_object_are_merged() {
        let report = run(
            json!({"type": "object", "required": ["name", "pfn"]}),
            json!({}),
        );
        assert_eq!(report.violations.len(), 1);
        assert_eq!(
            report.violations[0].detail,
            ViolationDetail::Required {
                missing: vec!["name".to_string(), "pfn".to_string()]
            }
        );
    }

    #[test]
    fn required_failures_on_different_objects_stay_apart() {
        let report = run(
            json!({"type": "array", "items": {"type": "object", "required": ["name"]}}),
            json!([{}, {}]),
        );
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.violations[0].pointer.as_str(), "/0");
        assert_eq!(report.violations[1].pointer.as_str(), "/1");
    }

    #[test]
    fn type_mismatch_reports_type_keyword() {
        let report = run(
            json!({"type": "object", "properties": {"site": {"type": "array", "items": {"type": "object"}}}}),
            json!({"site": ["nonexistent-site"]}),
        );
        assert_eq!(report.violations.len(), 1);
        let v = &report.violations[0];
        assert_eq!(v.keyword, "type");
        assert_eq!(v.pointer.as_str(), "/site/0");
        assert_eq!(v.severity, Severity::Error);
        assert!(v.message.contains("nonexistent-site"));
    }

    #[test]
    fn malformed_schema_fails_compilation() {
        let engine = JsonSchemaEngine::new();
        let err = engine
            .compile(&json!({"type": 12}))
            .err()
            .expect("schema with numeric type must not compile");
        assert!(matches!(err, CatalintError::SchemaCompilation { .. }));
    }

    #[test]
    fn external_refs_resolve_from_schema_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("name.json"),
            r#"{"$id": "https://example.org/name.json", "type": "string"}"#,
        )
        .unwrap();
        let engine = JsonSchemaEngine::with_options(EngineOptions {
            draft: None,
            schema_dir: Some(dir.path().to_path_buf()),
        })
        .unwrap();
        assert_eq!(engine.schema_count(), 1);

        let schema = json!({
            "$id": "https://example.org/root.json",
            "properties": {"name": {"$ref": "name.json"}}
        });
        let compiled = engine.compile(&schema).unwrap();
        let report = engine.validate(&compiled, &json!({"name": 5})).unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].keyword, "type");
    }

    #[test]
    fn dangling_external_ref_fails_compilation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("site.schema.json"), r#"{"type": "object"}"#).unwrap();
        let engine = JsonSchemaEngine::with_options(EngineOptions {
            draft: None,
            schema_dir: Some(dir.path().to_path_buf()),
        })
        .unwrap();

        let schema = json!({
            "properties": {"site": {"$ref": "site-typo.schema.json"}},
            "required": ["site"]
        });
        let err = engine
            .compile(&schema)
            .err()
            .expect("unresolvable $ref must not compile");
        assert!(matches!(err, CatalintError::SchemaCompilation { .. }));
    }

    #[test]
    fn dangling_external_ref_without_schema_dir_fails_compilation() {
        let err = JsonSchemaEngine::new()
            .compile(&json!({"properties": {"site": {"$ref": "site.schema.json"}}}))
            .err()
            .expect("unresolvable $ref must not compile");
        assert!(matches!(err, CatalintError::SchemaCompilation { .. }));
    }

    #[test]
    fn false_subschema_named_like_a_keyword_keeps_engine_message() {
        let report = run(
            json!({"properties": {"required": false, "additionalProperties": false}}),
            json!({"required": 1, "additionalProperties": 2}),
        );
        assert_eq!(report.violations.len(), 2);
        for v in &report.violations {
            assert_eq!(v.keyword, "false");
            assert_eq!(v.detail, ViolationDetail::None);
            assert!(v.message.contains("False schema"), "{}", v.message);
        }
    }

    #[test]
    fn missing_schema_dir_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonSchemaEngine::with_options(EngineOptions {
            draft: None,
            schema_dir: Some(dir.path().join("absent")),
        })
        .unwrap_err();
        assert!(matches!(err, CatalintError::SchemaLoad { .. }));
    }

    #[test]
    fn keyword_from_schema_path_takes_last_token() {
        assert_eq!(keyword_from_schema_path("/properties/site/type"), "type");
        assert_eq!(keyword_from_schema_path("/minItems"), "minItems");
        assert_eq!(keyword_from_schema_path(""), "");
    }

    #[test]
    fn violation_display() {
        let v = Violation {
            pointer: InstancePath::parse("/0/name"),
            keyword: "type".to_string(),
            severity: Severity::Error,
            message: "5 is not of type \"string\"".to_string(),
            detail: ViolationDetail::None,
        };
        assert_eq!(v.to_string(), "/0/name [type]: 5 is not of type \"string\"");
    }
}
