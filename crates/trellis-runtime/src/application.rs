//! # Application - Composition Root
//!
//! Owns the shared infrastructure (root namespace, module registry, event
//! bus, sandbox prototype) and exposes the engine's public surface:
//! discovery, registration, unregistration, strict id lookup, and the
//! start/stop lifecycle sweeps.
//!
//! ## Data Flow
//!
//! ```text
//! register_modules(root)
//!   │ walk subtree in document order          (discovery)
//!   │ per declaration:
//!   │     resolve name + namespace            (resolver)
//!   │     compose decorator chain             (decorator)
//!   │     assign id, annotate node, store     (registry)
//!   └─ return id -> instance mapping
//!
//! start(modules) ──► aggregate future        (lifecycle)
//! stop(modules)  ──► synchronous sweep
//! ```

use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;
use shared_bus::{EventPublisher, InMemoryEventBus, LifecycleEvent};
use shared_markup::NodeRef;
use tracing::{debug, info, warn};

use crate::config::{AnnotationKeys, AppConfig};
use crate::decorator::DecoratorChain;
use crate::discovery;
use crate::error::EngineError;
use crate::lifecycle::LifecycleCoordinator;
use crate::module::{ModuleCtx, ModuleHandle, ModuleSet};
use crate::registry::ModuleRegistry;
use crate::resolver::{NameResolver, Namespace, NamespaceRef};
use crate::sandbox::Sandbox;

/// The engine's composition root.
///
/// One `Application` owns one registry and one id counter; both live exactly
/// as long as it does. All mutation of the registry passes through the
/// methods below.
pub struct Application {
    resolver: NameResolver,
    registry: ModuleRegistry,
    lifecycle: LifecycleCoordinator,
    bus: Arc<InMemoryEventBus>,
    sandbox: Sandbox,
    keys: AnnotationKeys,
    config: Arc<AppConfig>,
}

impl Application {
    /// Create an application with the default configuration.
    #[must_use]
    pub fn new(namespace: Namespace) -> Self {
        Self::with_config(namespace, AppConfig::default())
    }

    /// Create an application with an explicit configuration.
    #[must_use]
    pub fn with_config(namespace: Namespace, config: AppConfig) -> Self {
        info!("Initializing trellis application");

        let config = Arc::new(config);
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus.channel_capacity));
        let sandbox = Sandbox::new(Arc::clone(&bus), Arc::clone(&config));
        let keys = AnnotationKeys::from_prefix(&config.markup.annotation_prefix);

        debug!(prefix = %config.markup.annotation_prefix, "Annotation contract derived");

        Self {
            resolver: NameResolver::new(Arc::new(namespace)),
            registry: ModuleRegistry::new(),
            lifecycle: LifecycleCoordinator::new(Arc::clone(&bus)),
            bus,
            sandbox,
            keys,
            config,
        }
    }

    // =========================================================================
    // DISCOVERY & REGISTRATION
    // =========================================================================

    /// Register every annotated node in the subtree rooted at `root`.
    ///
    /// Walks in document (pre-)order; the root itself is eligible. Emits
    /// `register.start` before the first registration and `register.end`
    /// after the last one.
    ///
    /// # Returns
    ///
    /// The newly registered instances keyed by their assigned ids. Failed
    /// registrations (missing module) contribute no entry.
    pub fn register_modules(&self, root: &NodeRef) -> ModuleSet {
        self.bus.emit(LifecycleEvent::RegisterStart);

        let mut registered = ModuleSet::new();
        for declaration in discovery::collect(root, &self.keys) {
            let namespace = declaration
                .namespace
                .map(NamespaceRef::Path)
                .unwrap_or(NamespaceRef::Default);

            if let Some((id, handle)) = self.register_composed(
                &declaration.node,
                &declaration.name,
                &declaration.decorators,
                &namespace,
            ) {
                registered.insert(id, handle);
            }
        }

        self.bus.emit(LifecycleEvent::RegisterEnd);
        info!(count = registered.len(), "Registration sweep finished");
        registered
    }

    /// Register a single node.
    ///
    /// # Returns
    ///
    /// - `Some(handle)` - the composed instance, stored under a fresh id
    /// - `None` - the module name did not resolve; a `missing` notification
    ///   was emitted and no id was consumed
    pub fn register_module(
        &self,
        node: &NodeRef,
        name: &str,
        decorators: &[String],
        namespace: &NamespaceRef,
    ) -> Option<ModuleHandle> {
        self.register_composed(node, name, decorators, namespace)
            .map(|(_, handle)| handle)
    }

    fn register_composed(
        &self,
        node: &NodeRef,
        name: &str,
        decorators: &[String],
        namespace: &NamespaceRef,
    ) -> Option<(u64, ModuleHandle)> {
        let ctx = ModuleCtx {
            node: node.clone(),
            sandbox: self.sandbox.clone(),
        };

        let chain = DecoratorChain::new(&self.resolver);
        let Some(instance) = chain.compose(ctx, name, decorators, namespace) else {
            warn!(module = %name, "Declared module did not resolve");
            self.bus.emit(LifecycleEvent::Missing {
                node: node.clone(),
                module: name.to_string(),
                decorators: decorators.to_vec(),
            });
            return None;
        };

        // The instance is fully composed before it becomes observable.
        let id = self.registry.next_id();
        node.set_attr(&self.keys.id, id.to_string());

        let handle: ModuleHandle = Arc::new(RwLock::new(instance));
        self.registry.insert(id, Arc::clone(&handle));

        debug!(id, module = %NameResolver::canonical(name), "Module registered");
        Some((id, handle))
    }

    // =========================================================================
    // UNREGISTRATION
    // =========================================================================

    /// Remove every instance currently in the registry.
    ///
    /// Emits `unregister.start`/`unregister.end` around the operation. The id
    /// counter is not reset.
    pub fn unregister_all(&self) {
        self.bus.emit(LifecycleEvent::UnregisterStart);
        self.registry.clear();
        self.bus.emit(LifecycleEvent::UnregisterEnd);
    }

    /// Remove exactly the ids present in `modules`; others are untouched.
    ///
    /// Idempotent: ids not present in the registry are a no-op. Emits
    /// `unregister.start`/`unregister.end` even for an empty set.
    pub fn unregister_modules(&self, modules: &ModuleSet) {
        self.bus.emit(LifecycleEvent::UnregisterStart);
        for id in modules.keys() {
            self.registry.remove(*id);
        }
        debug!(count = modules.len(), "Unregistration sweep finished");
        self.bus.emit(LifecycleEvent::UnregisterEnd);
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Strict lookup by the raw id annotation value.
    ///
    /// Callers of this path are expected to hold a valid id (typically read
    /// back from the node's id annotation), so failure is an error, not an
    /// absence.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidIdentifier`] when `raw` is absent, does not
    /// parse as an id, or does not correspond to a stored instance.
    pub fn module_by_id(&self, raw: Option<&str>) -> Result<ModuleHandle, EngineError> {
        let id: u64 = raw
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(|| EngineError::InvalidIdentifier {
                raw: raw.map(str::to_string),
            })?;

        self.registry
            .get(id)
            .ok_or_else(|| EngineError::InvalidIdentifier {
                raw: raw.map(str::to_string),
            })
    }

    /// Snapshot of every registered instance, keyed by id.
    #[must_use]
    pub fn modules(&self) -> ModuleSet {
        self.registry.snapshot()
    }

    /// Number of registered instances.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.registry.len()
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Start every instance in `modules`. See [`LifecycleCoordinator::start`].
    ///
    /// # Errors
    ///
    /// [`EngineError::ProtocolViolation`] if a start hook returns a value.
    pub fn start(
        &self,
        modules: &ModuleSet,
    ) -> Result<impl Future<Output = ()> + Send + 'static, EngineError> {
        self.lifecycle.start(modules)
    }

    /// Stop every instance in `modules`. See [`LifecycleCoordinator::stop`].
    pub fn stop(&self, modules: &ModuleSet) {
        self.lifecycle.stop(modules)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Get the event bus for subscribing to lifecycle notifications.
    #[must_use]
    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.bus)
    }

    /// Get the sandbox prototype injected into instances.
    #[must_use]
    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    /// Get the runtime configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the annotation keys derived from the configured prefix.
    #[must_use]
    pub fn annotation_keys(&self) -> &AnnotationKeys {
        &self.keys
    }
}
