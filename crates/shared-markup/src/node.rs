//! # Markup Nodes
//!
//! `NodeRef` is a cheap, cloneable handle to a markup element. Attribute and
//! child storage sit behind locks so handles can be shared freely between the
//! engine, module instances, and event payloads.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

/// A handle to a markup element.
///
/// Handles compare by identity: two `NodeRef`s are equal iff they point to
/// the same underlying node. Content equality is not defined.
///
/// Callers are responsible for keeping the child structure a tree; the crate
/// does not detect cycles.
#[derive(Clone)]
pub struct NodeRef {
    inner: Arc<NodeInner>,
}

struct NodeInner {
    tag: String,
    attributes: RwLock<BTreeMap<String, String>>,
    children: RwLock<Vec<NodeRef>>,
}

impl NodeRef {
    /// Create a detached node with the given tag name.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                tag: tag.into(),
                attributes: RwLock::new(BTreeMap::new()),
                children: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Tag name of this node.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.inner.tag
    }

    /// Read an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<String> {
        self.inner.attributes.read().get(name).cloned()
    }

    /// Whether the attribute is present.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.inner.attributes.read().contains_key(name)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        debug!(tag = %self.inner.tag, attr = %name, value = %value, "Attribute set");
        self.inner.attributes.write().insert(name, value);
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&self, name: &str) -> Option<String> {
        self.inner.attributes.write().remove(name)
    }

    /// Snapshot of all attributes.
    #[must_use]
    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.inner.attributes.read().clone()
    }

    /// Append a child node.
    pub fn append_child(&self, child: NodeRef) {
        self.inner.children.write().push(child);
    }

    /// Snapshot of the direct children.
    #[must_use]
    pub fn children(&self) -> Vec<NodeRef> {
        self.inner.children.read().clone()
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.inner.children.read().len()
    }

    /// This node and all descendants in document (pre-)order.
    #[must_use]
    pub fn descendants(&self) -> Vec<NodeRef> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(&self, out: &mut Vec<NodeRef>) {
        out.push(self.clone());
        for child in self.inner.children.read().iter() {
            child.collect_into(out);
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child append.
    #[must_use]
    pub fn with_child(self, child: NodeRef) -> Self {
        self.append_child(child);
        self
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for NodeRef {}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("tag", &self.inner.tag)
            .field("attributes", &*self.inner.attributes.read())
            .field("children", &self.inner.children.read().len())
            .finish()
    }
}
