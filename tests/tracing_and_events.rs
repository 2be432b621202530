//! Integration tests for tracing and event monitoring.
//!
//! Registry operations are logged through `tracing` and reported to an optional
//! per-registry callback, which is useful for debugging a dependency graph.

use singleton_injector::{named, positional, Dependencies, Registry, RegistryEvent};
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Installs a test subscriber once so registry logs show up with `--nocapture`.
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("singleton_injector=trace")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn collect_events(registry: &Registry) -> Arc<Mutex<Vec<RegistryEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    registry.set_trace_callback(move |event| {
        events_clone.lock().unwrap().push(event.clone());
    });

    events
}

#[test]
fn test_basic_tracing() {
    init_test_logger();
    let registry = Registry::new();
    let events = collect_events(&registry);

    registry.register("answer", || 42i32).unwrap();
    let _: Arc<i32> = registry.resolve("answer").unwrap();
    let _ = registry.contains("answer");

    let captured = events.lock().unwrap();
    assert_eq!(
        *captured,
        vec![
            RegistryEvent::Register {
                token: "answer".into()
            },
            RegistryEvent::Instantiate {
                token: "answer".into()
            },
            RegistryEvent::Resolve {
                token: "answer".into(),
                found: true
            },
            RegistryEvent::Contains {
                token: "answer".into(),
                found: true
            },
        ]
    );
}

#[test]
fn test_trace_resolve_found_and_not_found() {
    init_test_logger();
    let registry = Registry::new();
    let events = collect_events(&registry);

    registry.register("present", || 1u8).unwrap();
    let _ = registry.resolve::<u8>("present");
    let _ = registry.resolve::<u8>("absent");

    let captured: Vec<String> = events.lock().unwrap().iter().map(|e| e.to_string()).collect();
    assert_eq!(captured.len(), 4);
    assert_eq!(captured[2], "resolve { token: present, found: true }");
    assert_eq!(captured[3], "resolve { token: absent, found: false }");
}

#[test]
fn test_instantiate_emitted_once_per_token() {
    init_test_logger();
    let registry = Registry::new();
    let events = collect_events(&registry);

    registry.register("config", || "debug".to_string()).unwrap();
    registry
        .register_with(
            "logger",
            |deps: &Dependencies| deps.get::<String>("level").map(|level| level.len()),
            named! { level => "config" },
        )
        .unwrap();
    registry
        .register_with("service", |_: Arc<Option<usize>>| (), positional!["logger"])
        .unwrap();

    for _ in 0..3 {
        registry.resolve::<()>("service").unwrap();
    }

    let instantiated: Vec<String> = events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|event| match event {
            RegistryEvent::Instantiate { token } => Some(token.to_string()),
            _ => None,
        })
        .collect();

    assert_eq!(instantiated, vec!["config", "logger", "service"]);
}

#[test]
fn test_failed_registration_is_not_traced() {
    init_test_logger();
    let registry = Registry::new();
    let events = collect_events(&registry);

    registry.register("token", || 1u8).unwrap();
    assert!(registry.register("token", || 2u8).is_err());
    assert!(registry.register(5u8, || 3u8).is_err());

    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn test_clear_trace_callback() {
    init_test_logger();
    let registry = Registry::new();
    let events = collect_events(&registry);

    registry.register("first", || 1u8).unwrap();

    registry.clear_trace_callback();

    registry.register("second", || 2u8).unwrap();
    let _: Arc<u8> = registry.resolve("second").unwrap();

    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn test_trace_callback_replacement() {
    let registry = Registry::new();

    let events1 = collect_events(&registry);
    registry.register("a", || 100usize).unwrap();

    let events2 = collect_events(&registry);
    registry.register("b", || 200usize).unwrap();

    assert_eq!(events1.lock().unwrap().len(), 1);
    assert_eq!(events2.lock().unwrap().len(), 1);
}

#[test]
fn test_callback_can_use_registry() {
    let registry = Arc::new(Registry::new());
    let inner = Arc::downgrade(&registry);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();

    registry.set_trace_callback(move |event| {
        if let (RegistryEvent::Register { token }, Some(registry)) = (event, inner.upgrade()) {
            let found = registry.contains(token).unwrap_or(false);
            seen_clone.lock().unwrap().push(found);
        }
    });

    registry.register("x", || 1u8).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![true]);
}
