//! # Shared Bus - Event Bus for Lifecycle Notifications
//!
//! In-process publish/subscribe channel between the engine and anything that
//! wants to observe it.
//!
//! ## Notification Pattern
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │   Engine     │                    │  Observer    │
//! │              │      emit()        │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! ## Guarantees
//!
//! - **Synchronous emission:** `emit` enqueues for every subscriber before it
//!   returns, so notification points stay fixed relative to the engine call
//!   that triggered them.
//! - **Fixed payload shapes:** most events carry no payload; `missing`
//!   carries `(node, module name, decorator list)`.
//! - **Topic filtering:** subscribers receive only what their filter matches.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, LifecycleEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
