//! # Trellis Runtime
//!
//! A declarative component-lifecycle manager for markup-annotated documents.
//!
//! Nodes declare that they should be backed by a named module instance,
//! optionally enhanced by decorators, optionally resolved inside a
//! namespace. The runtime discovers such nodes, composes instances, tracks
//! them in a registry keyed by engine-assigned ids, and drives their
//! start/stop lifecycle with asynchronous completion aggregation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Application                              │
//! │                                                                 │
//! │  ┌──────────┐   ┌──────────────┐   ┌────────────────────────┐   │
//! │  │ Resolver │──▶│ DecoratorCh. │──▶│     ModuleRegistry     │   │
//! │  └──────────┘   └──────────────┘   │  id ──▶ instance       │   │
//! │        ▲                           └───────────┬────────────┘   │
//! │        │ discovery (pre-order walk)            │ start/stop     │
//! │        │                                       ▼                │
//! │  ┌──────────┐                      ┌────────────────────────┐   │
//! │  │  Markup  │                      │ LifecycleCoordinator   │   │
//! │  └──────────┘                      └───────────┬────────────┘   │
//! │                                                │ notifications  │
//! │                                                ▼                │
//! │                                    ┌────────────────────────┐   │
//! │                                    │  Event Bus (shared)    │   │
//! │                                    └────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Policy
//!
//! Expected absences (unknown module name, unknown decorator, unregistering
//! an absent id) are lenient: skipped or no-op, observable through the bus.
//! Contract violations (strict lookup with a bad id, a start hook returning
//! a value) surface as [`EngineError`].

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod application;
pub mod config;
pub mod decorator;
pub mod discovery;
pub mod error;
pub mod lifecycle;
pub mod module;
pub mod registry;
pub mod resolver;
pub mod sandbox;

// Re-export the public surface
pub use application::Application;
pub use config::{AnnotationKeys, AppConfig, BusConfig, MarkupConfig};
pub use decorator::{Decorator, DecoratorChain};
pub use discovery::Declaration;
pub use error::EngineError;
pub use lifecycle::LifecycleCoordinator;
pub use module::{Module, ModuleBase, ModuleCtx, ModuleHandle, ModuleSet, Ready, ReadySignal};
pub use registry::ModuleRegistry;
pub use resolver::{DecoratorFactory, ModuleFactory, NameResolver, Namespace, NamespaceRef};
pub use sandbox::Sandbox;
