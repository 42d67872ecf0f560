//! # catalint-cli — Command-Line Interface
//!
//! Provides the `catalint` binary.
//!
//! ## Subcommands
//!
//! - `catalint validate` — validate catalog documents against a schema and
//!   print one message per failure, naming the catalog entry responsible.
//! - `catalint keywords` — show how a catalog kind classifies field names.
//!
//! ```bash
//! catalint validate --kind transformation --schema schemas/tc.schema.json catalogs/tc.yml
//! catalint validate --kind site --schema schemas/sc.schema.json --format json catalogs/*.yml
//! catalint keywords --kind transformation site containers profiles
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers, which write to any
//!   `io::Write` so they can be tested without a terminal.
//! - Handlers return the process exit code; fatal errors propagate as
//!   `anyhow::Error` with context.

pub mod keywords;
pub mod validate;

/// Exit code when every document passed.
pub const EXIT_OK: u8 = 0;
/// Exit code when at least one document failed validation.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for fatal errors (unreadable schema, malformed schema, ...).
pub const EXIT_FATAL: u8 = 2;
