//! # Module Model
//!
//! A module is a named, instantiable unit of behavior bound to exactly one
//! markup node for its lifetime. Instances are created by factories held in
//! a [`Namespace`](crate::resolver::Namespace), composed through decorator
//! chains, and tracked in the registry under an engine-assigned id.
//!
//! ## Start Protocol
//!
//! The start hook receives a single-shot [`Ready`] handle and must signal
//! completion by consuming it — synchronously inside the hook or later from
//! any task. The hook's own return value must be `None`; returning a value
//! is a protocol violation detected by the lifecycle coordinator. This
//! guards against modules that try to hand data back instead of signalling
//! through the callback.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use shared_markup::NodeRef;
use tokio::sync::oneshot;

use crate::sandbox::Sandbox;

/// Shared handle to a composed module instance.
pub type ModuleHandle = Arc<RwLock<Box<dyn Module>>>;

/// A batch of instances keyed by registry id.
///
/// Ordered by id, which for a single discovery sweep equals document order.
pub type ModuleSet = BTreeMap<u64, ModuleHandle>;

/// Receiving end of a [`Ready`] handle.
pub type ReadySignal = oneshot::Receiver<()>;

/// Single-shot completion handle for the start protocol.
///
/// Consumed by [`notify`](Ready::notify), so signalling more than once is
/// impossible by construction. Dropping the handle without notifying counts
/// as abandoned-but-complete startup; holding it forever leaves the start
/// sweep's aggregate future pending forever.
#[derive(Debug)]
pub struct Ready {
    tx: oneshot::Sender<()>,
}

impl Ready {
    /// Create a handle and its paired completion signal.
    #[must_use]
    pub fn channel() -> (Self, ReadySignal) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Signal that the holder has finished starting.
    pub fn notify(self) {
        let _ = self.tx.send(());
    }
}

/// Trait every module instance implements.
///
/// The fixed surface is the lifecycle (`start`/`stop`) plus identity and
/// binding accessors. The dynamic surface (`property`/`invoke`) is what
/// decorator layers override and cascade through; `serde_json::Value` is its
/// value vocabulary.
pub trait Module: Send + Sync {
    /// Canonical type key of the base module.
    ///
    /// Decorator layers delegate this through to the base, so a decorated
    /// instance keeps the base type's identity.
    fn kind(&self) -> &str;

    /// The markup node this instance is bound to.
    fn node(&self) -> &NodeRef;

    /// The capability handle injected at construction.
    fn sandbox(&self) -> &Sandbox;

    /// Start hook. The default implementation completes immediately.
    ///
    /// Must return `None`; completion is signalled only via `ready`.
    fn start(&mut self, ready: Ready) -> Option<Value> {
        ready.notify();
        None
    }

    /// Stop hook. The default implementation does nothing.
    fn stop(&mut self) {}

    /// Read a named property. Unknown keys are `None`.
    fn property(&self, _key: &str) -> Option<Value> {
        None
    }

    /// Invoke a named method. Unknown methods are `None`.
    fn invoke(&mut self, _method: &str, _args: &[Value]) -> Option<Value> {
        None
    }
}

/// Constructor context passed to every module factory.
///
/// Instances never build their own sandbox; the composition root injects it
/// here.
#[derive(Clone)]
pub struct ModuleCtx {
    /// The node the new instance will be bound to.
    pub node: NodeRef,
    /// The capability handle for the new instance.
    pub sandbox: Sandbox,
}

/// Convenience storage for the per-instance binding, for embedding in
/// concrete modules.
///
/// ```ignore
/// struct Accordion {
///     base: ModuleBase,
/// }
///
/// impl Module for Accordion {
///     fn kind(&self) -> &str { "Accordion" }
///     fn node(&self) -> &NodeRef { self.base.node() }
///     fn sandbox(&self) -> &Sandbox { self.base.sandbox() }
/// }
/// ```
pub struct ModuleBase {
    node: NodeRef,
    sandbox: Sandbox,
}

impl ModuleBase {
    /// Bind to the given constructor context.
    #[must_use]
    pub fn new(ctx: ModuleCtx) -> Self {
        Self {
            node: ctx.node,
            sandbox: ctx.sandbox,
        }
    }

    /// The owning node reference.
    #[must_use]
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    /// The injected capability handle.
    #[must_use]
    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }
}
