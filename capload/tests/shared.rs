//! Dispatchers shared across threads.

use capload::{Args, DispatchError, Registry, Value};
use std::{sync::Arc, thread};

mod common;
use common::counting_dispatcher;

#[test]
fn test_concurrent_invocations_import_once() {
    let registry = Registry::new();
    registry.register("greet", "examples.mod", "say_hello").unwrap();
    let (dispatcher, importer) = counting_dispatcher(registry);
    let dispatcher = Arc::new(dispatcher);

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let dispatcher = Arc::clone(&dispatcher);
            thread::spawn(move || dispatcher.invoke("greet", Args::new()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), Value::from("hi"));
    }
    assert_eq!(importer.count("examples.mod"), 1);
}

#[test]
fn test_registration_while_dispatching() {
    let (dispatcher, _) = counting_dispatcher(Registry::new());
    let dispatcher = Arc::new(dispatcher);

    thread::scope(|scope| {
        let writer = Arc::clone(&dispatcher);
        scope.spawn(move || {
            for i in 0..50 {
                writer
                    .register(format!("greet-{i}"), "examples.mod", "say_hello")
                    .unwrap();
            }
        });

        let reader = Arc::clone(&dispatcher);
        scope.spawn(move || {
            for i in 0..50 {
                match reader.invoke(&format!("greet-{i}"), Args::new()) {
                    Ok(value) => assert_eq!(value, Value::from("hi")),
                    Err(DispatchError::NotFound(_)) => {}
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }
        });
    });

    let names = dispatcher.registry().list_names();
    assert_eq!(names.len(), 50);
    assert_eq!(names.iter().next(), Some("greet-0"));
}
