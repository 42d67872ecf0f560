//! # Catalog Validation
//!
//! Runs a schema engine over a catalog document and turns every error it
//! reports into one message naming the catalog entry responsible:
//!
//! ```text
//! Missing required fields [pfn] in transformations details - diamond,Site - condorpool
//! ```
//!
//! The message is the violation fragment from [`format_violation`] followed
//! by the location context from the catalog kind's [`LocationResolver`].
//! Warnings are dropped. Messages keep the engine's report order.
//!
//! ## Thread Safety
//!
//! [`CatalogValidator`] holds nothing but its engine. Every intermediate
//! value of a call is local to it, so one validator can serve concurrent
//! calls on independent documents.

use std::fmt;
use std::path::Path;

use catalint_core::{CatalintError, CatalogKind, DataNode};
use serde::Serialize;
use serde_json::Value;

use crate::document::{load_document, load_schema, yaml_to_json_value};
use crate::engine::{JsonSchemaEngine, SchemaEngine, Severity, ValidationReport};
use crate::format::format_violation;
use crate::resolve::resolver_for;

/// Outcome of validating one document.
///
/// `success` is true when `messages` is empty and the engine itself reported
/// success, so it can be false with no messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    success: bool,
    messages: Vec<String>,
}

impl ValidationResult {
    /// True when the document satisfied the schema.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// One message per schema error, in report order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Consumes self and returns the messages.
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            return f.write_str("OK");
        }
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

/// Combine an engine report into a [`ValidationResult`] for a document of
/// the given catalog kind.
pub fn aggregate(report: &ValidationReport, document: &Value, kind: CatalogKind) -> ValidationResult {
    let resolver = resolver_for(kind);
    let root = DataNode::new(document);

    let mut messages = Vec::new();
    for violation in &report.violations {
        if violation.severity != Severity::Error {
            tracing::trace!(pointer = %violation.pointer, keyword = %violation.keyword, "skipping warning");
            continue;
        }
        tracing::debug!(pointer = %violation.pointer, keyword = %violation.keyword, "schema violation");

        let mut message = format_violation(violation);
        message.push_str(&resolver.resolve(&violation.pointer, root));
        messages.push(message);
    }

    ValidationResult {
        success: messages.is_empty() && report.success,
        messages,
    }
}

/// Validates catalog documents against JSON Schemas.
#[derive(Debug, Clone, Default)]
pub struct CatalogValidator<E = JsonSchemaEngine> {
    engine: E,
}

impl<E: SchemaEngine> CatalogValidator<E> {
    /// Validator over `engine`.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Compile a schema for use with [`validate_compiled`](Self::validate_compiled).
    pub fn compile(&self, schema: &Value) -> Result<E::Compiled, CatalintError> {
        self.engine.compile(schema)
    }

    /// Validate any serializable document against `schema`.
    ///
    /// # Errors
    ///
    /// [`CatalintError::DataSerialization`] if the document has no JSON
    /// form, [`CatalintError::SchemaCompilation`] for a malformed schema,
    /// [`CatalintError::ValidationExecution`] on engine faults.
    pub fn validate<T>(
        &self,
        document: &T,
        schema: &Value,
        kind: CatalogKind,
    ) -> Result<ValidationResult, CatalintError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_value(document).map_err(|e| {
            CatalintError::DataSerialization {
                reason: e.to_string(),
            }
        })?;
        let compiled = self.engine.compile(schema)?;
        self.validate_compiled(&data, &compiled, kind)
    }

    /// Validate a parsed YAML tree against `schema`.
    ///
    /// Integer and boolean map keys are stringified, so a catalog written as
    /// `0: {...}` is addressed as `/0/...`.
    pub fn validate_yaml(
        &self,
        document: &serde_yaml::Value,
        schema: &Value,
        kind: CatalogKind,
    ) -> Result<ValidationResult, CatalintError> {
        let data = yaml_to_json_value(document)
            .map_err(|reason| CatalintError::DataSerialization { reason })?;
        let compiled = self.engine.compile(schema)?;
        self.validate_compiled(&data, &compiled, kind)
    }

    /// Validate a document against an already compiled schema.
    pub fn validate_compiled(
        &self,
        document: &Value,
        schema: &E::Compiled,
        kind: CatalogKind,
    ) -> Result<ValidationResult, CatalintError> {
        let report = self.engine.validate(schema, document)?;
        let result = aggregate(&report, document, kind);
        tracing::debug!(
            kind = %kind,
            violations = report.violations.len(),
            messages = result.messages.len(),
            "validated document"
        );
        Ok(result)
    }

    /// Load a document and a schema from disk and validate.
    pub fn validate_file(
        &self,
        document_path: &Path,
        schema_path: &Path,
        kind: CatalogKind,
    ) -> Result<ValidationResult, CatalintError> {
        let schema = load_schema(schema_path)?;
        let compiled = self.engine.compile(&schema)?;
        let document = load_document(document_path)?;
        self.validate_compiled(&document, &compiled, kind)
    }
}
