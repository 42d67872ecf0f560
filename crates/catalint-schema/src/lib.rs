//! # catalint-schema — Catalog Schema Validation
//!
//! Validates YAML catalogs against JSON Schemas and explains every failure in
//! terms of the catalog entry that caused it.
//!
//! A JSON Schema engine only reports *where* a document breaks the schema,
//! as a pointer such as `/0/transformations/0/site/0`. This crate replays
//! the known layout of each catalog kind over that pointer to recover
//! *which* transformation, site or container it addresses.
//!
//! ## Pipeline
//!
//! - [`engine`] — the [`SchemaEngine`] seam and the `jsonschema`-backed
//!   [`JsonSchemaEngine`].
//! - [`format`] — keyword-specific message fragment for one violation.
//! - [`resolve`] — per-catalog-kind location resolvers.
//! - [`validate`] — [`CatalogValidator`], which runs the engine and
//!   aggregates messages into a [`ValidationResult`].
//! - [`document`] — schema and document loading from disk.
//! - [`config`] — engine options.
//!
//! ## Example
//!
//! ```
//! use catalint_core::CatalogKind;
//! use catalint_schema::CatalogValidator;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "required": ["site"],
//! });
//! let validator: CatalogValidator = CatalogValidator::default();
//! let result = validator.validate(&json!({}), &schema, CatalogKind::Site).unwrap();
//! assert_eq!(
//!     result.messages(),
//!     &["Missing required fields [site] in top level error".to_string()]
//! );
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod format;
pub mod resolve;
pub mod validate;

pub use config::{EngineOptions, SchemaDraft};
pub use document::{load_document, load_schema, yaml_to_json_value};
pub use engine::{
    JsonSchemaEngine, SchemaEngine, Severity, ValidationReport, Violation, ViolationDetail,
};
pub use format::format_violation;
pub use resolve::{resolver_for, LocationResolver, SiteResolver, TransformationResolver, TOP_LEVEL_ERROR};
pub use validate::{aggregate, CatalogValidator, ValidationResult};
