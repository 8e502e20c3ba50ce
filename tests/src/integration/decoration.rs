//! # Decoration Flows
//!
//! The observable composition laws, exercised end to end through markup
//! annotations rather than direct chain construction.

#[cfg(test)]
mod tests {
    use crate::support::{annotated_with_decorators, fixture_namespace, Tracker};
    use serde_json::json;
    use trellis_runtime::{Application, ModuleHandle};

    fn registered(decorators: &str) -> (Application, ModuleHandle) {
        let app = Application::new(fixture_namespace(&Tracker::new()));
        let node = annotated_with_decorators("Chip", decorators);
        let registered = app.register_modules(&node);
        assert_eq!(registered.len(), 1);
        let handle = registered.values().next().cloned().unwrap();
        (app, handle)
    }

    #[test]
    fn test_property_override_last_listed_wins() {
        // Base get = 1, Outline get = 2, Shadow get = 3.
        let (_app, handle) = registered("Outline, Shadow");
        assert_eq!(handle.read().property("get"), Some(json!(3)));

        let (_app, handle) = registered("Shadow, Outline");
        assert_eq!(handle.read().property("get"), Some(json!(2)));
    }

    #[test]
    fn test_cascade_direction_is_outermost_first() {
        // Each layer delegates inward, then appends its marker on unwind:
        // the base contributes first, the last listed decorator last.
        let (_app, handle) = registered("Outline, Shadow");
        assert_eq!(
            handle.write().invoke("m", &[]),
            Some(json!("chip|outline|shadow"))
        );

        let (_app, handle) = registered("Shadow, Outline");
        assert_eq!(
            handle.write().invoke("m", &[]),
            Some(json!("chip|shadow|outline"))
        );
    }

    #[test]
    fn test_unknown_decorators_never_fail_registration() {
        let (_app, handle) = registered("Ghost, Outline, AlsoMissing");

        // Registration succeeded and the resolvable decorator still applies.
        assert_eq!(handle.read().property("get"), Some(json!(2)));
        assert_eq!(handle.write().invoke("m", &[]), Some(json!("chip|outline")));
    }

    #[test]
    fn test_decorated_instance_keeps_base_identity_and_binding() {
        let app = Application::new(fixture_namespace(&Tracker::new()));
        let node = annotated_with_decorators("Chip", "Outline, Shadow");
        let registered = app.register_modules(&node);
        let handle = registered.values().next().cloned().unwrap();

        let module = handle.read();
        assert_eq!(module.kind(), "Chip");
        assert_eq!(*module.node(), node);

        // The id annotation landed on the bound node.
        assert_eq!(node.attr("data-module-id"), Some("1".to_string()));
    }

    #[test]
    fn test_no_residual_chain_exposure() {
        let (_app, handle) = registered("Outline, Shadow");

        // Nothing on the dynamic surface reveals the wrapped layers.
        for probe in ["parent", "inner", "wrapped", "chain"] {
            assert_eq!(handle.read().property(probe), None);
            assert_eq!(handle.write().invoke(probe, &[]), None);
        }
    }

    #[test]
    fn test_decorator_names_normalize_like_module_names() {
        // Kebab and lowerCamel spellings resolve the same decorator.
        let (_app, handle) = registered("outline");
        assert_eq!(handle.read().property("get"), Some(json!(2)));
    }

    #[test]
    fn test_decorated_start_falls_through_to_base() {
        let tracker = Tracker::new();
        let app = Application::new(fixture_namespace(&tracker));
        let node = annotated_with_decorators("Chip", "Outline, Shadow");
        let modules = app.register_modules(&node);

        // Neither decorator overrides start; the base hook still runs.
        let future = app.start(&modules).expect("start");
        futures::executor::block_on(future);

        assert_eq!(tracker.started(), 1);
    }
}
