//! # catalint-core — Foundational Types for Catalog Validation
//!
//! This crate defines the vocabulary shared by every other catalint crate:
//! which catalog a document belongs to, what the reserved field names of
//! that catalog mean, how a violation locator is addressed, and how the
//! parsed document is walked. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed `CatalogKind` enum.** Every traversal policy and keyword
//!    registry is selected by exhaustive `match`. Adding a catalog kind forces
//!    every consumer to handle it.
//!
//! 2. **Typed instance paths.** A violation locator is an [`InstancePath`] of
//!    [`PathSegment::Index`] and [`PathSegment::Field`] values, never a raw
//!    string split on `/`.
//!
//! 3. **Total keyword lookup.** [`KeywordRegistry::role_of`] never fails: an
//!    unrecognized field name is [`KeywordRole::Other`].
//!
//! 4. **Missing is a value.** [`DataNode`] lookups return a missing sentinel
//!    instead of panicking, so traversal over an unexpected document shape
//!    degrades instead of aborting.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `catalint-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod catalog;
pub mod error;
pub mod keyword;
pub mod node;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use catalog::CatalogKind;
pub use error::CatalintError;
pub use keyword::{
    KeywordRegistry, KeywordRole, ReservedKeyword, SiteKeywords, TransformationKeywords,
};
pub use node::DataNode;
pub use path::{InstancePath, PathSegment};
