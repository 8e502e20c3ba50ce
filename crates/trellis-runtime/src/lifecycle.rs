//! # Lifecycle Coordinator
//!
//! Drives start/stop sweeps across a set of registered instances.
//!
//! ## Start Protocol
//!
//! ```text
//! start(modules)
//!   │ emit "start"                      (synchronous)
//!   │ for each instance, in id order:
//!   │     hand out a Ready handle
//!   │     invoke the start hook         (must return None)
//!   │ emit "sync"                       (synchronous)
//!   └─ return aggregate future          (resolves when every Ready fired)
//! ```
//!
//! The caller is never blocked: the future is returned immediately and
//! resolves later, driven by whichever tasks the instances use to signal
//! completion. An instance that holds its `Ready` forever leaves the future
//! pending forever — timeout policy belongs to the caller.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use shared_bus::{EventPublisher, InMemoryEventBus, LifecycleEvent};
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::module::{ModuleSet, Ready};

/// Start/stop orchestration over module sets.
pub struct LifecycleCoordinator {
    bus: Arc<InMemoryEventBus>,
}

impl LifecycleCoordinator {
    /// Create a coordinator emitting on the given bus.
    #[must_use]
    pub fn new(bus: Arc<InMemoryEventBus>) -> Self {
        Self { bus }
    }

    /// Start every instance in `modules`.
    ///
    /// Emits `start`, invokes each start hook with a fresh [`Ready`] handle,
    /// emits `sync`, and returns the aggregate future. The empty set yields
    /// an immediately ready future.
    ///
    /// # Errors
    ///
    /// [`EngineError::ProtocolViolation`] if any start hook returns a value
    /// instead of `None`. The sweep fails synchronously and no aggregate
    /// future is produced; `sync` is not emitted.
    pub fn start(
        &self,
        modules: &ModuleSet,
    ) -> Result<impl Future<Output = ()> + Send + 'static, EngineError> {
        self.bus.emit(LifecycleEvent::Start);

        let mut signals = Vec::with_capacity(modules.len());
        for (id, handle) in modules {
            let (ready, signal) = Ready::channel();
            let returned = handle.write().start(ready);
            if returned.is_some() {
                warn!(id = *id, "Start hook returned a value; aborting sweep");
                return Err(EngineError::ProtocolViolation { id: *id });
            }
            signals.push(signal);
        }

        self.bus.emit(LifecycleEvent::Sync);
        debug!(count = signals.len(), "Start sweep initiated");

        Ok(async move {
            // A closed channel means the instance dropped its Ready without
            // notifying; the sweep treats that as abandoned-but-complete.
            let _ = join_all(signals).await;
        })
    }

    /// Stop every instance in `modules`.
    ///
    /// Emits `stop` and invokes each stop hook synchronously. Fire-and-forget:
    /// there is no aggregation and no future.
    pub fn stop(&self, modules: &ModuleSet) {
        self.bus.emit(LifecycleEvent::Stop);

        for handle in modules.values() {
            handle.write().stop();
        }
        debug!(count = modules.len(), "Stop sweep executed");
    }
}
