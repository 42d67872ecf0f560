//! # Engine Configuration
//!
//! Options for the `jsonschema`-backed engine, deserializable from a YAML
//! configuration file:
//!
//! ```yaml
//! draft: draft7
//! schema-dir: schemas/
//! ```

use std::path::{Path, PathBuf};

use catalint_core::CatalintError;
use serde::{Deserialize, Serialize};

/// JSON Schema draft to compile schemas with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaDraft {
    /// Draft 4.
    #[serde(rename = "draft4")]
    Draft4,
    /// Draft 6.
    #[serde(rename = "draft6")]
    Draft6,
    /// Draft 7.
    #[serde(rename = "draft7")]
    Draft7,
    /// Draft 2019-09.
    #[serde(rename = "draft2019-09")]
    Draft201909,
    /// Draft 2020-12.
    #[serde(rename = "draft2020-12")]
    Draft202012,
}

impl SchemaDraft {
    pub(crate) fn to_jsonschema(self) -> jsonschema::Draft {
        match self {
            SchemaDraft::Draft4 => jsonschema::Draft::Draft4,
            SchemaDraft::Draft6 => jsonschema::Draft::Draft6,
            SchemaDraft::Draft7 => jsonschema::Draft::Draft7,
            SchemaDraft::Draft201909 => jsonschema::Draft::Draft201909,
            SchemaDraft::Draft202012 => jsonschema::Draft::Draft202012,
        }
    }
}

/// Engine options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EngineOptions {
    /// Draft override. When absent the draft is detected from `$schema`.
    pub draft: Option<SchemaDraft>,
    /// Directory of schemas used to resolve external `$ref`s offline.
    pub schema_dir: Option<PathBuf>,
}

impl EngineOptions {
    /// Parse options from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load options from a YAML file.
    ///
    /// A relative `schema-dir` is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`CatalintError::DocumentLoad`] if the file cannot be read or
    /// does not match the options layout.
    pub fn from_yaml_file(path: &Path) -> Result<Self, CatalintError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalintError::DocumentLoad {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;
        let mut options =
            Self::from_yaml_str(&content).map_err(|e| CatalintError::DocumentLoad {
                path: path.display().to_string(),
                reason: format!("invalid configuration: {e}"),
            })?;
        if let (Some(dir), Some(base)) = (&options.schema_dir, path.parent()) {
            if dir.is_relative() {
                options.schema_dir = Some(base.join(dir));
            }
        }
        Ok(options)
    }
}
