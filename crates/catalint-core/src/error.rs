//! # Error Types
//!
//! Defines the fatal error class surfaced by catalint. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Ordinary schema rule violations are *not* errors. They are collected
//!   as messages in a validation result and returned successfully.
//! - Traversal faults while resolving a violation's location are absorbed
//!   by the resolver and never reach this type.
//! - Everything here is fatal for the call that produced it and carries the
//!   original cause as text.

use thiserror::Error;

/// Top-level error type for catalint.
#[derive(Error, Debug)]
pub enum CatalintError {
    /// The schema document could not be read or parsed.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoad {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The schema document is structurally invalid for the validation engine.
    #[error("schema compilation error: {reason}")]
    SchemaCompilation {
        /// Engine-reported cause.
        reason: String,
    },

    /// The input document could not be converted into the engine's
    /// representation.
    #[error("data serialization error: {reason}")]
    DataSerialization {
        /// Conversion failure cause.
        reason: String,
    },

    /// The validation engine itself faulted while running.
    #[error("validation execution error: {reason}")]
    ValidationExecution {
        /// Engine-reported cause.
        reason: String,
    },

    /// A document file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
