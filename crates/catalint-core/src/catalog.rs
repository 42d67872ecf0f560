//! # Catalog Kinds
//!
//! A catalog kind names the structural convention a document follows. It
//! decides how a violation locator is read back into catalog entries and
//! which reserved-keyword registry applies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::keyword::{KeywordRegistry, SiteKeywords, TransformationKeywords};

/// The catalog conventions catalint knows how to explain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// Transformation catalog: a list of entries, each holding nested
    /// transformations, sites and containers.
    Transformation,
    /// Site catalog: a top-level `site` list of site entries.
    Site,
}

impl CatalogKind {
    /// All catalog kinds, in declaration order.
    pub const ALL: [CatalogKind; 2] = [CatalogKind::Transformation, CatalogKind::Site];

    /// Lowercase name used on the command line and in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Transformation => "transformation",
            CatalogKind::Site => "site",
        }
    }

    /// The reserved-keyword registry for this catalog kind.
    pub fn registry(&self) -> &'static dyn KeywordRegistry {
        match self {
            CatalogKind::Transformation => &TransformationKeywords,
            CatalogKind::Site => &SiteKeywords,
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "transformation" => Ok(CatalogKind::Transformation),
            "site" => Ok(CatalogKind::Site),
            other => Err(format!(
                "unknown catalog kind '{other}', expected 'transformation' or 'site'"
            )),
        }
    }
}
