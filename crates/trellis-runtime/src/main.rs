//! # Trellis Runtime Binary
//!
//! Demonstration entry point: wires a namespace, assembles a small annotated
//! document, runs a discovery sweep, starts the registered instances, and
//! tears everything down again. Lifecycle notifications are logged as they
//! arrive on the bus.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use shared_bus::EventFilter;
use shared_markup::NodeRef;
use trellis_runtime::{
    AppConfig, Application, Decorator, Module, ModuleBase, ModuleCtx, Namespace, Ready, Sandbox,
};

/// A content region that simulates asynchronous startup work.
struct Panel {
    base: ModuleBase,
    delay: Duration,
}

impl Module for Panel {
    fn kind(&self) -> &str {
        "Panel"
    }

    fn node(&self) -> &NodeRef {
        self.base.node()
    }

    fn sandbox(&self) -> &Sandbox {
        self.base.sandbox()
    }

    fn start(&mut self, ready: Ready) -> Option<Value> {
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            ready.notify();
        });
        None
    }

    fn invoke(&mut self, method: &str, _args: &[Value]) -> Option<Value> {
        (method == "label").then(|| json!("panel"))
    }
}

/// Marks a panel as collapsible by wrapping its label.
struct Collapsible;

impl Decorator for Collapsible {
    fn invoke(&mut self, inner: &mut dyn Module, method: &str, args: &[Value]) -> Option<Value> {
        match method {
            "label" => {
                let wrapped = inner.invoke(method, args)?;
                Some(json!(format!("collapsible-{}", wrapped.as_str()?)))
            }
            _ => inner.invoke(method, args),
        }
    }
}

fn demo_namespace() -> Namespace {
    Namespace::new()
        .with_module("Panel", |ctx: ModuleCtx| {
            Box::new(Panel {
                base: ModuleBase::new(ctx),
                delay: Duration::from_millis(150),
            })
        })
        .with_decorator("Collapsible", || Box::new(Collapsible))
}

fn demo_document() -> NodeRef {
    NodeRef::new("main")
        .with_child(NodeRef::new("section").with_attr("data-module", "Panel"))
        .with_child(
            NodeRef::new("section")
                .with_attr("data-module", "panel")
                .with_attr("data-decorators", "Collapsible"),
        )
        // Declares a module nobody registered; reported, never fatal.
        .with_child(NodeRef::new("aside").with_attr("data-module", "Sidebar"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TRELLIS_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app = Arc::new(Application::with_config(
        demo_namespace(),
        AppConfig::from_env(),
    ));

    // Observe every lifecycle notification.
    let mut events = app.bus().subscribe(EventFilter::all());
    let observer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            info!(event = event.name(), "Lifecycle notification");
        }
    });

    let document = demo_document();
    let modules = app.register_modules(&document);
    info!(registered = modules.len(), "Discovery sweep complete");

    for (id, handle) in &modules {
        let mut module = handle.write();
        let label = module
            .invoke("label", &[])
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        info!(id = *id, kind = module.kind(), label = %label, "Registered instance");
    }

    let started = app.start(&modules)?;
    started.await;
    info!("All instances reported ready");

    app.stop(&modules);
    app.unregister_all();
    info!(remaining = app.module_count(), "Teardown complete");

    // Dropping the last bus handles closes the channel, which ends the
    // observer. Module sandboxes hold one each, so the set goes first.
    drop(modules);
    drop(app);
    let _ = observer.await;
    Ok(())
}
