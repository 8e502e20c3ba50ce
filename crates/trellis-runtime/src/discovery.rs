//! # Discovery
//!
//! Walks a subtree in document (pre-)order and extracts module declarations
//! from annotated nodes. The traversal itself belongs to `shared-markup`;
//! this module only decides which nodes qualify and what they declare.

use shared_markup::NodeRef;
use tracing::debug;

use crate::config::AnnotationKeys;

/// A module declaration read off an annotated node.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// The declaring node.
    pub node: NodeRef,
    /// Declared module type name, as written (any supported case style).
    pub name: String,
    /// Declared decorator names, in listed order. Empty when none declared.
    pub decorators: Vec<String>,
    /// Declared dotted namespace path, if any.
    pub namespace: Option<String>,
}

/// Collect declarations from `root` and its descendants in document order.
///
/// A node qualifies if it carries the module annotation; the root itself is
/// eligible. Each qualifying node yields exactly one declaration.
#[must_use]
pub fn collect(root: &NodeRef, keys: &AnnotationKeys) -> Vec<Declaration> {
    let declarations: Vec<Declaration> = root
        .descendants()
        .into_iter()
        .filter_map(|node| {
            let name = node.attr(&keys.module)?;
            let decorators = node
                .attr(&keys.decorators)
                .map(|raw| parse_list(&raw))
                .unwrap_or_default();
            let namespace = node.attr(&keys.namespace);
            Some(Declaration {
                node,
                name,
                decorators,
                namespace,
            })
        })
        .collect();

    debug!(count = declarations.len(), "Declarations collected");
    declarations
}

/// Split a decorator-list annotation on commas and whitespace.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
