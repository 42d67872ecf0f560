//! # Location Resolver
//!
//! A validation engine reports *where* a document breaks its schema as a
//! path of indices and field names. Users need to know *which catalog
//! entry* that is. The resolvers here replay the known layout of each
//! catalog kind over the violation's path and produce the location half of
//! the message.
//!
//! ## Transformation catalog
//!
//! Paths alternate index and field name below an entry:
//! `/<entry>/<field>/<index>/<field>/<index>/...`. At each index step the
//! role of the field just walked through (per [`TransformationKeywords`])
//! decides the fragment: the transformation's namespace, the site, the
//! container's name, or a property label. A field name in last position is
//! reported as the failing property.
//!
//! ## Site catalog
//!
//! Only the site entry is reported. Its index is read from the third path
//! segment and looked up under the top-level `site` list. Any path that
//! cannot be resolved that way is reported verbatim.

use catalint_core::{
    CatalogKind, DataNode, InstancePath, KeywordRegistry, KeywordRole, PathSegment,
    TransformationKeywords,
};

/// Context reported when a violation sits at (or directly below) the root.
pub const TOP_LEVEL_ERROR: &str = "top level error";

/// Maps a violation path to a description of where it is in the catalog.
///
/// Implementations never fail and never panic.
pub trait LocationResolver: Send + Sync {
    /// Describe the location of `path` within the document rooted at `root`.
    fn resolve(&self, path: &InstancePath, root: DataNode<'_>) -> String;
}

/// Resolver for transformation catalogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformationResolver;

/// Resolver for site catalogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteResolver;

static TRANSFORMATION_RESOLVER: TransformationResolver = TransformationResolver;
static SITE_RESOLVER: SiteResolver = SiteResolver;

/// The resolver for a catalog kind.
pub fn resolver_for(kind: CatalogKind) -> &'static dyn LocationResolver {
    match kind {
        CatalogKind::Transformation => &TRANSFORMATION_RESOLVER,
        CatalogKind::Site => &SITE_RESOLVER,
    }
}

impl LocationResolver for TransformationResolver {
    fn resolve(&self, path: &InstancePath, root: DataNode<'_>) -> String {
        let segments = path.segments();
        if segments.len() <= 2 {
            return TOP_LEVEL_ERROR.to_string();
        }

        let registry = TransformationKeywords;
        let last = segments.len() - 1;
        let mut field = segments[1].to_string();
        let mut current = root.child(&segments[0]).child(&segments[1]);
        let mut context = field.clone();

        let mut position = 2;
        while position <= last {
            current = current.child(&segments[position]);

            let keyword = registry.role_of(&field);
            match keyword.role {
                KeywordRole::Transformation => {
                    context.push_str(" details - ");
                    context.push_str(&serialized(current.key("namespace")));
                }
                KeywordRole::Site => {
                    context.push_str(",Site - ");
                    context.push_str(&current.to_string());
                }
                KeywordRole::Container => {
                    context.push_str(" details - ");
                    context.push_str(&serialized(current.key("name")));
                }
                KeywordRole::Other => {
                    context.push_str(",property name -");
                    context.push_str(registry.display_name_of(keyword));
                }
            }

            if let Some(name) = segments.get(position + 1) {
                if position + 1 == last {
                    context.push_str(",property name - ");
                    context.push_str(&name.to_string());
                } else {
                    current = current.child(name);
                    field = name.to_string();
                }
            }
            position += 2;
        }

        context
    }
}

/// YAML rendering of a node, falling back to its string form.
fn serialized(node: DataNode<'_>) -> String {
    let value = node.value().cloned().unwrap_or_default();
    match serde_yaml::to_string(&value) {
        Ok(yaml) => yaml.trim_end().to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "YAML rendering failed, using raw value");
            node.to_string()
        }
    }
}

impl LocationResolver for SiteResolver {
    fn resolve(&self, path: &InstancePath, root: DataNode<'_>) -> String {
        if path.len() <= 1 {
            return TOP_LEVEL_ERROR.to_string();
        }

        let entry = path
            .get(2)
            .and_then(PathSegment::as_index)
            .and_then(|index| root.key("site").element(index));

        match entry {
            Some(entry) => entry.to_string(),
            None => {
                tracing::debug!(pointer = %path, "site entry not resolvable, reporting raw pointer");
                path.as_str().to_string()
            }
        }
    }
}
