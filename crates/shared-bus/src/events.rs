//! # Lifecycle Events
//!
//! Defines all notifications the engine emits through the shared bus.
//!
//! Every event has a fixed payload shape. Most carry nothing at all: they
//! mark well-defined points of the registration and start/stop sweeps. The
//! one exception is [`LifecycleEvent::Missing`], which reports an annotated
//! node whose declared module could not be resolved.

use shared_markup::NodeRef;

/// All events that can be published to the event bus.
///
/// Wire names follow the dotted convention of the markup contract
/// (`register.start`, `missing`, ...); see [`LifecycleEvent::name`].
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// A registration sweep is about to begin.
    RegisterStart,

    /// A registration sweep finished, including failed registrations.
    RegisterEnd,

    /// An unregistration sweep is about to begin.
    UnregisterStart,

    /// An unregistration sweep finished.
    UnregisterEnd,

    /// A declared module name did not resolve to a registered factory.
    ///
    /// Deliberately a notification rather than an error: a missing module is
    /// an expected, observable event the caller may react to.
    Missing {
        /// The node carrying the unresolved declaration.
        node: NodeRef,
        /// The declared module name, as written in the markup.
        module: String,
        /// The declared decorator names (empty when none were declared).
        decorators: Vec<String>,
    },

    /// A start sweep was initiated.
    Start,

    /// All start hooks of the current sweep have been invoked.
    ///
    /// Emitted before any asynchronous completion resolves; it signals that
    /// the sweep was initiated, not that it finished.
    Sync,

    /// A stop sweep was executed.
    Stop,
}

impl LifecycleEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::RegisterStart | Self::RegisterEnd => EventTopic::Registration,
            Self::UnregisterStart | Self::UnregisterEnd => EventTopic::Unregistration,
            Self::Missing { .. } => EventTopic::Missing,
            Self::Start | Self::Sync | Self::Stop => EventTopic::Lifecycle,
        }
    }

    /// Get the dotted wire name of this event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegisterStart => "register.start",
            Self::RegisterEnd => "register.end",
            Self::UnregisterStart => "unregister.start",
            Self::UnregisterEnd => "unregister.end",
            Self::Missing { .. } => "missing",
            Self::Start => "start",
            Self::Sync => "sync",
            Self::Stop => "stop",
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTopic {
    /// `register.start` / `register.end`.
    Registration,
    /// `unregister.start` / `unregister.end`.
    Unregistration,
    /// `missing`.
    Missing,
    /// `start` / `sync` / `stop`.
    Lifecycle,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &LifecycleEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
