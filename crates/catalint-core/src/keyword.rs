//! # Reserved Keywords
//!
//! Field names with structural meaning inside a catalog. The location
//! resolver asks a [`KeywordRegistry`] what role the field it just walked
//! through plays, and picks the context fragment accordingly: the
//! transformation's namespace, the site entry, the container's name, or a
//! plain property label.
//!
//! Registries are static tables, built once and never mutated, so they are
//! shared freely across threads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic role of a reserved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordRole {
    /// The field holds transformation entries.
    Transformation,
    /// The field holds site entries.
    Site,
    /// The field holds container entries.
    Container,
    /// Any other field, known or not.
    Other,
}

impl KeywordRole {
    /// Lowercase role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordRole::Transformation => "transformation",
            KeywordRole::Site => "site",
            KeywordRole::Container => "container",
            KeywordRole::Other => "other",
        }
    }
}

impl fmt::Display for KeywordRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reserved field resolved by a registry: its role plus the canonical
/// display name of the keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReservedKeyword {
    /// Structural role.
    pub role: KeywordRole,
    /// Canonical display name.
    pub name: &'static str,
}

impl ReservedKeyword {
    /// The keyword every unrecognized field name resolves to.
    pub const UNKNOWN: ReservedKeyword = ReservedKeyword {
        role: KeywordRole::Other,
        name: "unknown",
    };

    const fn new(role: KeywordRole, name: &'static str) -> Self {
        Self { role, name }
    }
}

/// Maps catalog field names to reserved keywords.
///
/// Implementations must be total: [`role_of`](KeywordRegistry::role_of)
/// returns [`ReservedKeyword::UNKNOWN`] for names it does not recognize.
pub trait KeywordRegistry: Send + Sync {
    /// Resolve a field name to its reserved keyword.
    fn role_of(&self, field: &str) -> ReservedKeyword;

    /// Canonical display name of a resolved keyword.
    fn display_name_of(&self, keyword: ReservedKeyword) -> &'static str {
        keyword.name
    }
}

/// Look up `field` in a `(field name, keyword)` table.
fn lookup(table: &[(&str, ReservedKeyword)], field: &str) -> ReservedKeyword {
    table
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, keyword)| *keyword)
        .unwrap_or(ReservedKeyword::UNKNOWN)
}

use KeywordRole::{Container, Other, Site, Transformation};

const TRANSFORMATION_TABLE: &[(&str, ReservedKeyword)] = &[
    ("transformations", ReservedKeyword::new(Transformation, "transformations")),
    ("transformation", ReservedKeyword::new(Transformation, "transformations")),
    ("site", ReservedKeyword::new(Site, "sites")),
    ("sites", ReservedKeyword::new(Site, "sites")),
    ("containers", ReservedKeyword::new(Container, "containers")),
    ("container", ReservedKeyword::new(Container, "containers")),
    ("cont", ReservedKeyword::new(Container, "containers")),
    ("pegasus", ReservedKeyword::new(Other, "pegasus")),
    ("namespace", ReservedKeyword::new(Other, "namespace")),
    ("name", ReservedKeyword::new(Other, "name")),
    ("version", ReservedKeyword::new(Other, "version")),
    ("metadata", ReservedKeyword::new(Other, "metadata")),
    ("hooks", ReservedKeyword::new(Other, "hooks")),
    ("profiles", ReservedKeyword::new(Other, "profiles")),
    ("requires", ReservedKeyword::new(Other, "requires")),
    ("arch", ReservedKeyword::new(Other, "arch")),
    ("os.type", ReservedKeyword::new(Other, "os.type")),
    ("os.release", ReservedKeyword::new(Other, "os.release")),
    ("os.version", ReservedKeyword::new(Other, "os.version")),
    ("type", ReservedKeyword::new(Other, "type")),
    ("pfn", ReservedKeyword::new(Other, "pfn")),
    ("checksum", ReservedKeyword::new(Other, "checksum")),
    ("bypass", ReservedKeyword::new(Other, "bypass")),
    ("image", ReservedKeyword::new(Other, "image")),
    ("image.site", ReservedKeyword::new(Other, "image.site")),
    ("mounts", ReservedKeyword::new(Other, "mounts")),
];

const SITE_TABLE: &[(&str, ReservedKeyword)] = &[
    ("site", ReservedKeyword::new(Site, "sites")),
    ("sites", ReservedKeyword::new(Site, "sites")),
    ("pegasus", ReservedKeyword::new(Other, "pegasus")),
    ("name", ReservedKeyword::new(Other, "name")),
    ("arch", ReservedKeyword::new(Other, "arch")),
    ("os.type", ReservedKeyword::new(Other, "os.type")),
    ("os.release", ReservedKeyword::new(Other, "os.release")),
    ("os.version", ReservedKeyword::new(Other, "os.version")),
    ("directories", ReservedKeyword::new(Other, "directories")),
    ("grids", ReservedKeyword::new(Other, "grids")),
    ("profiles", ReservedKeyword::new(Other, "profiles")),
    ("file-servers", ReservedKeyword::new(Other, "file-servers")),
    ("shared-file-systems", ReservedKeyword::new(Other, "shared-file-systems")),
    ("type", ReservedKeyword::new(Other, "type")),
    ("path", ReservedKeyword::new(Other, "path")),
    ("url", ReservedKeyword::new(Other, "url")),
    ("operation", ReservedKeyword::new(Other, "operation")),
];

/// Reserved keywords of the transformation catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformationKeywords;

impl KeywordRegistry for TransformationKeywords {
    fn role_of(&self, field: &str) -> ReservedKeyword {
        lookup(TRANSFORMATION_TABLE, field)
    }
}

/// Reserved keywords of the site catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteKeywords;

impl KeywordRegistry for SiteKeywords {
    fn role_of(&self, field: &str) -> ReservedKeyword {
        lookup(SITE_TABLE, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transformation_roles() {
        let reg = TransformationKeywords;
        assert_eq!(reg.role_of("transformations").role, KeywordRole::Transformation);
        assert_eq!(reg.role_of("site").role, KeywordRole::Site);
        assert_eq!(reg.role_of("sites").role, KeywordRole::Site);
        assert_eq!(reg.role_of("containers").role, KeywordRole::Container);
        assert_eq!(reg.role_of("profiles").role, KeywordRole::Other);
    }

    #[test]
    fn known_other_keeps_its_display_name() {
        let reg = TransformationKeywords;
        let kw = reg.role_of("profiles");
        assert_eq!(reg.display_name_of(kw), "profiles");
    }

    #[test]
    fn unknown_field_is_total() {
        for reg in [&TransformationKeywords as &dyn KeywordRegistry, &SiteKeywords] {
            let kw = reg.role_of("definitely-not-reserved");
            assert_eq!(kw, ReservedKeyword::UNKNOWN);
            assert_eq!(reg.display_name_of(kw), "unknown");
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(
            TransformationKeywords.role_of("Transformations"),
            ReservedKeyword::UNKNOWN
        );
    }

    #[test]
    fn site_catalog_has_no_container_role() {
        assert_eq!(SiteKeywords.role_of("containers").role, KeywordRole::Other);
        assert_eq!(SiteKeywords.role_of("site").role, KeywordRole::Site);
    }

    #[test]
    fn tables_have_unique_field_names() {
        for table in [TRANSFORMATION_TABLE, SITE_TABLE] {
            let mut names: Vec<&str> = table.iter().map(|(n, _)| *n).collect();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len(), "duplicate reserved field name");
        }
    }
}
