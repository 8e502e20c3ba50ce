//! # Decorator Composition
//!
//! Decorators are optional, order-sensitive behavioral overlays applied on
//! top of a module. Composition wraps the base instance once per decorator,
//! in listed order, so the **last listed decorator is outermost**:
//!
//! ```text
//! compose(Base, [D1, D2])  =>  D2( D1( Base ) )
//!
//! property lookup:  D2 first, then D1, then Base   ("last listed wins")
//! method cascade:   D2 runs first, delegates inward through D1 to Base
//! ```
//!
//! A decorator layer never stores a reference to what it wraps. The engine's
//! [`Decorated`] wrapper owns the inner layer and passes it into each hook
//! transiently, so the finished instance exposes no back-pointer to its
//! chain and is indistinguishable from a plain instance of the base type:
//! `kind()`, `node()`, and `sandbox()` all pass through to the base.

use serde_json::Value;
use shared_markup::NodeRef;
use tracing::debug;

use crate::module::{Module, ModuleCtx, Ready};
use crate::resolver::{NameResolver, NamespaceRef};
use crate::sandbox::Sandbox;

/// A behavioral overlay for a module.
///
/// Every hook receives the next-inner layer and defaults to pure delegation,
/// so a decorator only implements what it overrides. Absence of a hook on
/// any layer is tolerated silently — the call simply falls through to the
/// base module's default.
///
/// A cascading override calls into `inner` itself:
///
/// ```ignore
/// fn invoke(&mut self, inner: &mut dyn Module, method: &str, args: &[Value]) -> Option<Value> {
///     match method {
///         "label" => {
///             let wrapped = inner.invoke(method, args)?;
///             Some(format!("highlighted-{wrapped}").into())
///         }
///         _ => inner.invoke(method, args),
///     }
/// }
/// ```
pub trait Decorator: Send + Sync {
    /// Start hook override. Default: delegate to the wrapped layer.
    fn start(&mut self, inner: &mut dyn Module, ready: Ready) -> Option<Value> {
        inner.start(ready)
    }

    /// Stop hook override. Default: delegate to the wrapped layer.
    fn stop(&mut self, inner: &mut dyn Module) {
        inner.stop();
    }

    /// Property override. Default: delegate to the wrapped layer.
    fn property(&self, inner: &dyn Module, key: &str) -> Option<Value> {
        inner.property(key)
    }

    /// Method override. Default: delegate to the wrapped layer.
    fn invoke(&mut self, inner: &mut dyn Module, method: &str, args: &[Value]) -> Option<Value> {
        inner.invoke(method, args)
    }
}

/// One decorator layer bound to the layer it wraps.
///
/// Engine-owned: composition produces a chain of these, and only the
/// outermost is ever handed out.
pub struct Decorated {
    layer: Box<dyn Decorator>,
    inner: Box<dyn Module>,
}

impl Decorated {
    pub(crate) fn new(layer: Box<dyn Decorator>, inner: Box<dyn Module>) -> Self {
        Self { layer, inner }
    }
}

impl Module for Decorated {
    fn kind(&self) -> &str {
        self.inner.kind()
    }

    fn node(&self) -> &NodeRef {
        self.inner.node()
    }

    fn sandbox(&self) -> &Sandbox {
        self.inner.sandbox()
    }

    fn start(&mut self, ready: Ready) -> Option<Value> {
        self.layer.start(self.inner.as_mut(), ready)
    }

    fn stop(&mut self) {
        self.layer.stop(self.inner.as_mut());
    }

    fn property(&self, key: &str) -> Option<Value> {
        self.layer.property(self.inner.as_ref(), key)
    }

    fn invoke(&mut self, method: &str, args: &[Value]) -> Option<Value> {
        self.layer.invoke(self.inner.as_mut(), method, args)
    }
}

/// Composes a base module with an ordered decorator list.
pub struct DecoratorChain<'a> {
    resolver: &'a NameResolver,
}

impl<'a> DecoratorChain<'a> {
    /// Create a chain backed by the given resolver.
    #[must_use]
    pub fn new(resolver: &'a NameResolver) -> Self {
        Self { resolver }
    }

    /// Instantiate `name` and apply `decorators` in listed order.
    ///
    /// # Returns
    ///
    /// - `Some(instance)` - the fully composed instance
    /// - `None` - the base module name did not resolve; no decoration was
    ///   attempted
    ///
    /// Decorator names that do not resolve are skipped silently: decorators
    /// are additive enhancements and never fatal.
    #[must_use]
    pub fn compose(
        &self,
        ctx: ModuleCtx,
        name: &str,
        decorators: &[String],
        ns: &NamespaceRef,
    ) -> Option<Box<dyn Module>> {
        let factory = self.resolver.resolve_module(name, ns)?;
        let mut composed = factory(ctx);

        for decorator in decorators {
            match self.resolver.resolve_decorator(decorator, ns) {
                Some(factory) => {
                    composed = Box::new(Decorated::new(factory(), composed));
                }
                None => {
                    debug!(decorator = %decorator, "Unknown decorator skipped");
                }
            }
        }

        Some(composed)
    }
}
