//! # Name Resolution
//!
//! Maps declared type names to constructors. Declarations accept kebab-case,
//! lowerCamelCase, and UpperCamelCase spellings; all three normalize to one
//! canonical UpperCamelCase key, so `foo-start`, `fooStart`, and `FooStart`
//! resolve to the same factory.
//!
//! Constructors live in [`Namespace`] scopes. A lookup names its scope as
//! the default root namespace, a dotted path descended from the root
//! (`App.Components`), or a direct namespace reference. Lookup failure at
//! any step is `None`, never an error — a missing module is an expected,
//! observable outcome that callers decide how to handle.

use std::collections::HashMap;
use std::sync::Arc;

use heck::ToUpperCamelCase;
use tracing::debug;

use crate::decorator::Decorator;
use crate::module::{Module, ModuleCtx};

/// Factory producing a module instance bound to the given context.
pub type ModuleFactory = Arc<dyn Fn(ModuleCtx) -> Box<dyn Module> + Send + Sync>;

/// Factory producing a fresh decorator layer.
pub type DecoratorFactory = Arc<dyn Fn() -> Box<dyn Decorator> + Send + Sync>;

/// A constructor lookup scope.
///
/// Namespaces hold module factories, decorator factories, and child
/// namespaces, all keyed by canonical name. Registration normalizes names on
/// insert, so any supported spelling works on both sides of the mapping.
#[derive(Default)]
pub struct Namespace {
    modules: HashMap<String, ModuleFactory>,
    decorators: HashMap<String, DecoratorFactory>,
    children: HashMap<String, Arc<Namespace>>,
}

impl Namespace {
    /// Create an empty namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module factory under the canonical form of `name`.
    pub fn add_module<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(ModuleCtx) -> Box<dyn Module> + Send + Sync + 'static,
    {
        self.modules
            .insert(NameResolver::canonical(name), Arc::new(factory));
    }

    /// Register a decorator factory under the canonical form of `name`.
    pub fn add_decorator<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Decorator> + Send + Sync + 'static,
    {
        self.decorators
            .insert(NameResolver::canonical(name), Arc::new(factory));
    }

    /// Mount a child namespace under a path segment.
    pub fn add_child(&mut self, segment: &str, child: Namespace) {
        self.children.insert(segment.to_string(), Arc::new(child));
    }

    /// Builder-style [`add_module`](Self::add_module).
    #[must_use]
    pub fn with_module<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn(ModuleCtx) -> Box<dyn Module> + Send + Sync + 'static,
    {
        self.add_module(name, factory);
        self
    }

    /// Builder-style [`add_decorator`](Self::add_decorator).
    #[must_use]
    pub fn with_decorator<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Decorator> + Send + Sync + 'static,
    {
        self.add_decorator(name, factory);
        self
    }

    /// Builder-style [`add_child`](Self::add_child).
    #[must_use]
    pub fn with_child(mut self, segment: &str, child: Namespace) -> Self {
        self.add_child(segment, child);
        self
    }

    /// Look up a child namespace by path segment.
    #[must_use]
    pub fn child(&self, segment: &str) -> Option<Arc<Namespace>> {
        self.children.get(segment).cloned()
    }

    fn module(&self, key: &str) -> Option<ModuleFactory> {
        self.modules.get(key).cloned()
    }

    fn decorator(&self, key: &str) -> Option<DecoratorFactory> {
        self.decorators.get(key).cloned()
    }
}

impl std::fmt::Debug for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Namespace")
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .field("decorators", &self.decorators.keys().collect::<Vec<_>>())
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Which namespace a lookup should search.
#[derive(Clone)]
pub enum NamespaceRef {
    /// The application root namespace.
    Default,
    /// A dotted path descended from the root (`App.Components`).
    Path(String),
    /// A direct reference to a namespace.
    Direct(Arc<Namespace>),
}

impl From<&str> for NamespaceRef {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<Arc<Namespace>> for NamespaceRef {
    fn from(ns: Arc<Namespace>) -> Self {
        Self::Direct(ns)
    }
}

/// Resolves declared names to constructors.
pub struct NameResolver {
    root: Arc<Namespace>,
}

impl NameResolver {
    /// Create a resolver rooted at the given namespace.
    #[must_use]
    pub fn new(root: Arc<Namespace>) -> Self {
        Self { root }
    }

    /// Normalize a declared name to its canonical UpperCamelCase key.
    ///
    /// Hyphenated names are camelized; names without a separator only have
    /// their first character uppercased, so an already-canonical name passes
    /// through byte-for-byte.
    #[must_use]
    pub fn canonical(raw: &str) -> String {
        let raw = raw.trim();
        if raw.contains('-') {
            return raw.to_upper_camel_case();
        }
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Resolve a module constructor.
    #[must_use]
    pub fn resolve_module(&self, raw: &str, ns: &NamespaceRef) -> Option<ModuleFactory> {
        let key = Self::canonical(raw);
        let factory = self.scope(ns)?.module(&key);
        if factory.is_none() {
            debug!(module = %key, "Module name did not resolve");
        }
        factory
    }

    /// Resolve a decorator constructor.
    #[must_use]
    pub fn resolve_decorator(&self, raw: &str, ns: &NamespaceRef) -> Option<DecoratorFactory> {
        let key = Self::canonical(raw);
        self.scope(ns)?.decorator(&key)
    }

    /// Resolve the namespace a lookup should search.
    fn scope(&self, ns: &NamespaceRef) -> Option<Arc<Namespace>> {
        match ns {
            NamespaceRef::Default => Some(Arc::clone(&self.root)),
            NamespaceRef::Direct(direct) => Some(Arc::clone(direct)),
            NamespaceRef::Path(path) => {
                let mut current = Arc::clone(&self.root);
                for segment in path.split('.').filter(|s| !s.is_empty()) {
                    current = current.child(segment)?;
                }
                Some(current)
            }
        }
    }
}
