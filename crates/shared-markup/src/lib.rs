//! # Shared Markup - Document Primitives
//!
//! Node handles and traversal primitives for markup-annotated documents.
//!
//! The engine treats markup as an external collaborator: this crate owns node
//! creation, attribute storage, and document-order traversal, and nothing
//! else. What an annotation *means* is decided by the consumer.
//!
//! ## Node Model
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ NodeRef (cheap cloneable handle)            │
//! │                                             │
//! │   tag:        "div"                         │
//! │   attributes: data-module="Accordion" ...   │
//! │   children:   [NodeRef, NodeRef, ...]       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Two `NodeRef` values are equal when they refer to the same node, not when
//! their content matches. Traversal is pre-order (a node before its
//! children), which is the document order consumers rely on.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod node;

pub use node::NodeRef;
