//! # Engine Benchmarks
//!
//! Hot paths: the registration sweep, name normalization, and event bus
//! fan-out.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus, LifecycleEvent};
use shared_markup::NodeRef;
use trellis_runtime::{Application, NameResolver};
use trellis_tests::support::{annotated, fixture_namespace, Tracker};

/// A flat document with `n` annotated siblings.
fn document(n: usize) -> NodeRef {
    let root = NodeRef::new("main");
    for _ in 0..n {
        root.append_child(annotated("Chip"));
    }
    root
}

fn bench_registration_sweep(c: &mut Criterion) {
    c.bench_function("register_100_nodes", |b| {
        b.iter_batched(
            || {
                (
                    Application::new(fixture_namespace(&Tracker::new())),
                    document(100),
                )
            },
            |(app, root)| black_box(app.register_modules(&root)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_name_normalization(c: &mut Criterion) {
    c.bench_function("canonicalize_kebab_case", |b| {
        b.iter(|| NameResolver::canonical(black_box("status-indicator-light")));
    });

    c.bench_function("canonicalize_upper_camel_case", |b| {
        b.iter(|| NameResolver::canonical(black_box("StatusIndicatorLight")));
    });
}

fn bench_bus_fanout(c: &mut Criterion) {
    c.bench_function("emit_to_16_subscribers", |b| {
        let bus = InMemoryEventBus::new();
        let _subs: Vec<_> = (0..16)
            .map(|_| bus.subscribe(EventFilter::all()))
            .collect();

        b.iter(|| black_box(bus.emit(LifecycleEvent::Sync)));
    });
}

criterion_group!(
    benches,
    bench_registration_sweep,
    bench_name_normalization,
    bench_bus_fanout
);
criterion_main!(benches);
