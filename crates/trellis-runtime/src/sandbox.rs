//! # Sandbox
//!
//! The capability handle injected into every module instance. Modules never
//! construct their own sandbox and never reach around it: the event bus and
//! the shared configuration are the only facilities an instance gets.

use std::sync::Arc;

use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus, LifecycleEvent, Subscription};

use crate::config::AppConfig;

/// Capability object granting a module access to the event bus and the
/// runtime configuration. Cheap to clone; all clones share the same bus.
#[derive(Clone)]
pub struct Sandbox {
    event_bus: Arc<InMemoryEventBus>,
    config: Arc<AppConfig>,
}

impl Sandbox {
    pub(crate) fn new(event_bus: Arc<InMemoryEventBus>, config: Arc<AppConfig>) -> Self {
        Self { event_bus, config }
    }

    /// Get the event bus.
    #[must_use]
    pub fn event_bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.event_bus)
    }

    /// Get the runtime configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Emit an event on behalf of the holder.
    pub fn emit(&self, event: LifecycleEvent) -> usize {
        self.event_bus.emit(event)
    }

    /// Subscribe to events matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.event_bus.subscribe(filter)
    }
}

impl std::fmt::Debug for Sandbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sandbox")
            .field("subscribers", &self.event_bus.subscriber_count())
            .finish()
    }
}
