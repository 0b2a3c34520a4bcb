// tagdispatch-core - Shared registry integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for the lock-guarded registry and the process-wide instance.

mod common;

use std::thread;

use common::*;
use tagdispatch_core::global;

#[test]
fn test_shared_dispatch_sees_registrations() {
    let shared = SharedRegistry::new();
    shared.register("score", "alpha", |_| Ok(Value::Integer(1))).unwrap();
    shared.register_default("score", |_| Ok(Value::Integer(-1)));

    assert_eq!(
        shared.dispatch("score", &classed(&["alpha"]), &[]).unwrap(),
        Value::Integer(1)
    );
    assert_eq!(
        shared.dispatch("score", &classed(&["beta"]), &[]).unwrap(),
        Value::Integer(-1)
    );

    shared.unregister("score", "alpha");
    assert_eq!(
        shared.dispatch("score", &classed(&["alpha"]), &[]).unwrap(),
        Value::Integer(-1)
    );
}

#[test]
fn test_frozen_dispatcher_ignores_later_changes() {
    let shared = SharedRegistry::from_registry(scenario_registry());
    let frozen = shared.dispatcher(DispatchConfig::default());

    shared.unregister("score", "alpha");
    shared.unregister_default("score");

    assert_eq!(
        frozen.dispatch("score", &classed(&["alpha"]), &[]).unwrap(),
        Value::Integer(1)
    );
    assert!(matches!(
        shared.dispatch("score", &classed(&["alpha"]), &[]),
        Err(Error::NoMethod { .. })
    ));
}

#[test]
fn test_concurrent_registration() {
    let shared = SharedRegistry::new();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let shared = shared.clone();
            thread::spawn(move || {
                let tag = format!("class{}", i);
                shared.register("score", tag.as_str(), move |_| Ok(Value::Integer(i))).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shared.methods("score").len(), 8);
    for i in 0..8 {
        let value = classed(&[format!("class{}", i).as_str()]);
        assert_eq!(shared.dispatch("score", &value, &[]).unwrap(), Value::Integer(i));
    }
}

#[test]
fn test_concurrent_dispatch_from_one_dispatcher() {
    let dispatcher = SharedRegistry::from_registry(scenario_registry())
        .dispatcher(DispatchConfig::default());

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert_eq!(
                        dispatcher.dispatch("score", &classed(&["alpha"]), &[]).unwrap(),
                        Value::Integer(1)
                    );
                }
            });
        }
    });
}

#[test]
fn test_handler_may_register_during_dispatch() {
    let shared = SharedRegistry::new();
    let inner = shared.clone();
    shared.register_default("score", move |_| {
        inner.register("score", "late", |_| Ok(Value::Integer(7))).unwrap();
        Ok(Value::Integer(-1))
    });

    assert_eq!(
        shared.dispatch("score", &classed(&["late"]), &[]).unwrap(),
        Value::Integer(-1)
    );
    assert_eq!(
        shared.dispatch("score", &classed(&["late"]), &[]).unwrap(),
        Value::Integer(7)
    );
}

#[test]
fn test_lookup_and_clear() {
    let shared = SharedRegistry::from_registry(scenario_registry());
    let tags = [Tag::new("beta").unwrap()];

    assert!(shared.lookup("score", &tags).is_some_and(|r| r.resolution.is_default()));
    assert_eq!(shared.clear_methods("score"), 2);
    assert!(shared.lookup("score", &tags).is_none());
}

#[test]
fn test_global_registry_is_process_wide() {
    global().register("global_test_generic", "alpha", |_| Ok(Value::Integer(42))).unwrap();

    let seen = thread::spawn(|| {
        global()
            .dispatch("global_test_generic", &classed(&["alpha"]), &[])
            .unwrap()
    })
    .join()
    .unwrap();

    assert_eq!(seen, Value::Integer(42));
    global().clear_methods("global_test_generic");
}

#[test]
fn test_shared_register_rejects_invalid_tag() {
    let shared = SharedRegistry::new();
    assert!(matches!(
        shared.register("score", " ", |_| Ok(Value::Integer(1))),
        Err(Error::Value(ValueError::InvalidTag { .. }))
    ));
    assert!(shared.methods("score").is_empty());
}
