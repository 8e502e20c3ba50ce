//! # Lifecycle Flows
//!
//! End-to-end start/stop sweeps: discovery through teardown, with the event
//! sequence and aggregate-future behavior asserted along the way.

#[cfg(test)]
mod tests {
    use crate::support::{annotated, fixture_namespace, Tracker, DEFERRED_DELAY};
    use shared_bus::{EventFilter, LifecycleEvent};
    use shared_markup::NodeRef;
    use std::time::Duration;
    use tokio::time::timeout;
    use trellis_runtime::{Application, EngineError, ModuleSet};

    fn app_with_tracker() -> (Application, Tracker) {
        let tracker = Tracker::new();
        let app = Application::new(fixture_namespace(&tracker));
        (app, tracker)
    }

    #[tokio::test]
    async fn test_full_lifecycle_end_to_end() {
        let (app, tracker) = app_with_tracker();
        let mut sub = app.bus().subscribe(EventFilter::all());

        // Discovery over a document with one sync and one async module.
        let document = NodeRef::new("main")
            .with_child(annotated("Chip"))
            .with_child(annotated("Deferred"));
        let modules = app.register_modules(&document);
        assert_eq!(modules.len(), 2);

        // Start and await the aggregate.
        let future = app.start(&modules).expect("start");
        timeout(Duration::from_secs(1), future)
            .await
            .expect("aggregate resolves");
        assert_eq!(tracker.started(), 2);

        // Stop and tear down.
        app.stop(&modules);
        assert_eq!(tracker.stopped(), 2);
        app.unregister_all();
        assert_eq!(app.module_count(), 0);

        let events = sub.drain();
        assert_eq!(
            events,
            vec![
                LifecycleEvent::RegisterStart,
                LifecycleEvent::RegisterEnd,
                LifecycleEvent::Start,
                LifecycleEvent::Sync,
                LifecycleEvent::Stop,
                LifecycleEvent::UnregisterStart,
                LifecycleEvent::UnregisterEnd,
            ]
        );
    }

    #[tokio::test]
    async fn test_start_without_modules_resolves_immediately() {
        let (app, _tracker) = app_with_tracker();

        let future = app.start(&ModuleSet::new()).expect("start");
        timeout(Duration::from_millis(100), future)
            .await
            .expect("no external callback needed");
    }

    #[tokio::test]
    async fn test_aggregate_waits_for_the_slowest_instance() {
        let (app, tracker) = app_with_tracker();

        let document = NodeRef::new("main")
            .with_child(annotated("Chip"))
            .with_child(annotated("Deferred"));
        let modules = app.register_modules(&document);

        let future = app.start(&modules).expect("start");
        tokio::pin!(future);

        // Both hooks ran synchronously, but the deferred completion is
        // still outstanding: the aggregate must not resolve early.
        assert_eq!(tracker.started(), 2);
        assert!(
            timeout(Duration::from_millis(10), future.as_mut())
                .await
                .is_err(),
            "aggregate resolved before the delayed instance completed"
        );

        timeout(DEFERRED_DELAY * 4, future)
            .await
            .expect("aggregate resolves after the delayed completion");
    }

    #[tokio::test]
    async fn test_protocol_violation_fails_the_sweep() {
        let (app, _tracker) = app_with_tracker();
        let mut sub = app.bus().subscribe(EventFilter::all());

        let document = NodeRef::new("main").with_child(annotated("Rogue"));
        let modules = app.register_modules(&document);
        sub.drain();

        let err = app
            .start(&modules)
            .err()
            .expect("misbehaving start hook must fail the sweep");
        assert_eq!(err, EngineError::ProtocolViolation { id: 1 });

        // The sweep was initiated but never reached its sync point.
        assert_eq!(sub.drain(), vec![LifecycleEvent::Start]);
    }

    #[tokio::test]
    async fn test_start_and_sync_precede_async_completion() {
        let (app, _tracker) = app_with_tracker();
        let mut sub = app.bus().subscribe(EventFilter::all());

        let document = NodeRef::new("main").with_child(annotated("Deferred"));
        let modules = app.register_modules(&document);
        sub.drain();

        let future = app.start(&modules).expect("start");

        // Both notifications observable before the aggregate resolves.
        assert_eq!(
            sub.drain(),
            vec![LifecycleEvent::Start, LifecycleEvent::Sync]
        );

        timeout(Duration::from_secs(1), future)
            .await
            .expect("aggregate resolves");
    }

    #[tokio::test]
    async fn test_stop_is_fire_and_forget() {
        let (app, tracker) = app_with_tracker();

        let document = NodeRef::new("main")
            .with_child(annotated("Chip"))
            .with_child(annotated("Chip"));
        let modules = app.register_modules(&document);

        // No future, no aggregation: hooks have run by the time stop returns.
        app.stop(&modules);
        assert_eq!(tracker.stopped(), 2);
    }

    #[tokio::test]
    async fn test_restart_after_stop_reuses_instances() {
        let (app, tracker) = app_with_tracker();

        let modules = app.register_modules(&annotated("Chip"));

        let first = app.start(&modules).expect("start");
        first.await;
        app.stop(&modules);

        let second = app.start(&modules).expect("restart");
        second.await;

        assert_eq!(tracker.started(), 2);
        assert_eq!(tracker.stopped(), 1);
    }
}
