//! # Test Fixtures
//!
//! Shared modules, decorators, and document builders used across the
//! integration suite.
//!
//! The fixture namespace registers:
//!
//! | Name | Kind | Behavior |
//! |------|------|----------|
//! | `Chip` | module | sync start, `get` = 1, `m()` = `"chip"` |
//! | `StatusLight` | module | sync start, used for spelling tests |
//! | `Deferred` | module | notifies ready after 50ms from a spawned task |
//! | `Rogue` | module | returns a value from its start hook |
//! | `Outline` | decorator | `get` = 2, cascades `m()` with `\|outline` |
//! | `Shadow` | decorator | `get` = 3, cascades `m()` with `\|shadow` |

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use shared_markup::NodeRef;
use trellis_runtime::{
    Decorator, Module, ModuleBase, ModuleCtx, Namespace, Ready, Sandbox,
};

/// Delay used by the `Deferred` fixture module.
pub const DEFERRED_DELAY: Duration = Duration::from_millis(50);

/// Shared start/stop counters observed by the fixture modules.
#[derive(Clone, Default)]
pub struct Tracker {
    started: Arc<AtomicUsize>,
    stopped: Arc<AtomicUsize>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn stopped(&self) -> usize {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Baseline module: synchronous start, small dynamic surface.
pub struct Chip {
    base: ModuleBase,
    tracker: Tracker,
}

impl Module for Chip {
    fn kind(&self) -> &str {
        "Chip"
    }

    fn node(&self) -> &NodeRef {
        self.base.node()
    }

    fn sandbox(&self) -> &Sandbox {
        self.base.sandbox()
    }

    fn start(&mut self, ready: Ready) -> Option<Value> {
        self.tracker.started.fetch_add(1, Ordering::SeqCst);
        ready.notify();
        None
    }

    fn stop(&mut self) {
        self.tracker.stopped.fetch_add(1, Ordering::SeqCst);
    }

    fn property(&self, key: &str) -> Option<Value> {
        (key == "get").then(|| json!(1))
    }

    fn invoke(&mut self, method: &str, _args: &[Value]) -> Option<Value> {
        (method == "m").then(|| json!("chip"))
    }
}

/// Module used by the name-spelling tests.
pub struct StatusLight {
    base: ModuleBase,
}

impl Module for StatusLight {
    fn kind(&self) -> &str {
        "StatusLight"
    }

    fn node(&self) -> &NodeRef {
        self.base.node()
    }

    fn sandbox(&self) -> &Sandbox {
        self.base.sandbox()
    }
}

/// Module that completes startup from a spawned task after a delay.
pub struct Deferred {
    base: ModuleBase,
    tracker: Tracker,
}

impl Module for Deferred {
    fn kind(&self) -> &str {
        "Deferred"
    }

    fn node(&self) -> &NodeRef {
        self.base.node()
    }

    fn sandbox(&self) -> &Sandbox {
        self.base.sandbox()
    }

    fn start(&mut self, ready: Ready) -> Option<Value> {
        self.tracker.started.fetch_add(1, Ordering::SeqCst);
        tokio::spawn(async move {
            tokio::time::sleep(DEFERRED_DELAY).await;
            ready.notify();
        });
        None
    }

    fn stop(&mut self) {
        self.tracker.stopped.fetch_add(1, Ordering::SeqCst);
    }
}

/// Module that misuses the start protocol by returning a value.
pub struct Rogue {
    base: ModuleBase,
}

impl Module for Rogue {
    fn kind(&self) -> &str {
        "Rogue"
    }

    fn node(&self) -> &NodeRef {
        self.base.node()
    }

    fn sandbox(&self) -> &Sandbox {
        self.base.sandbox()
    }

    fn start(&mut self, _ready: Ready) -> Option<Value> {
        Some(json!({"protocol": "broken"}))
    }
}

/// Decorator overriding `get` and cascading `m()`.
pub struct Outline;

impl Decorator for Outline {
    fn property(&self, _inner: &dyn Module, key: &str) -> Option<Value> {
        (key == "get").then(|| json!(2))
    }

    fn invoke(&mut self, inner: &mut dyn Module, method: &str, args: &[Value]) -> Option<Value> {
        match method {
            "m" => {
                let wrapped = inner.invoke(method, args)?;
                Some(json!(format!("{}|outline", wrapped.as_str()?)))
            }
            _ => inner.invoke(method, args),
        }
    }
}

/// Decorator overriding `get` and cascading `m()`.
pub struct Shadow;

impl Decorator for Shadow {
    fn property(&self, _inner: &dyn Module, key: &str) -> Option<Value> {
        (key == "get").then(|| json!(3))
    }

    fn invoke(&mut self, inner: &mut dyn Module, method: &str, args: &[Value]) -> Option<Value> {
        match method {
            "m" => {
                let wrapped = inner.invoke(method, args)?;
                Some(json!(format!("{}|shadow", wrapped.as_str()?)))
            }
            _ => inner.invoke(method, args),
        }
    }
}

/// Build the fixture namespace wired to the given tracker.
pub fn fixture_namespace(tracker: &Tracker) -> Namespace {
    let chip_tracker = tracker.clone();
    let deferred_tracker = tracker.clone();

    Namespace::new()
        .with_module("Chip", move |ctx: ModuleCtx| {
            Box::new(Chip {
                base: ModuleBase::new(ctx),
                tracker: chip_tracker.clone(),
            })
        })
        .with_module("StatusLight", |ctx: ModuleCtx| {
            Box::new(StatusLight {
                base: ModuleBase::new(ctx),
            })
        })
        .with_module("Deferred", move |ctx: ModuleCtx| {
            Box::new(Deferred {
                base: ModuleBase::new(ctx),
                tracker: deferred_tracker.clone(),
            })
        })
        .with_module("Rogue", |ctx: ModuleCtx| {
            Box::new(Rogue {
                base: ModuleBase::new(ctx),
            })
        })
        .with_decorator("Outline", || Box::new(Outline))
        .with_decorator("Shadow", || Box::new(Shadow))
}

/// A node annotated with a module declaration.
pub fn annotated(name: &str) -> NodeRef {
    NodeRef::new("div").with_attr("data-module", name)
}

/// A node annotated with a module declaration and a decorator list.
pub fn annotated_with_decorators(name: &str, decorators: &str) -> NodeRef {
    annotated(name).with_attr("data-decorators", decorators)
}
