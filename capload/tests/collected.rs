//! Capabilities exported with `#[capability]` and imported at link time.
#![cfg(feature = "macros")]

use capload::{
    Args, BoxError, DispatchError, Dispatcher, Loader, Registry, Value, args, capability,
    import::CollectedImporter,
};

#[capability(module = "tests.collected")]
fn say_hello(_args: Args) -> Result<Value, BoxError> {
    Ok(Value::from("hi"))
}

#[capability(module = "tests.collected", attribute = "add")]
fn add_numbers(args: Args) -> Result<Value, BoxError> {
    let a: i64 = args.get(0)?;
    let b: i64 = args.get(1)?;
    Ok(Value::from(a + b))
}

fn dispatcher() -> Dispatcher {
    let registry = Registry::new();
    registry.register("greet", "tests.collected", "say_hello").unwrap();
    registry.register("sum", "tests.collected", "add").unwrap();
    registry.register("orphan", "tests.collected", "add_numbers").unwrap();
    Dispatcher::new(registry, Loader::new(CollectedImporter::new()))
}

#[test]
fn test_collected_exports_dispatch() {
    let dispatcher = dispatcher();

    assert_eq!(dispatcher.invoke("greet", Args::new()).unwrap(), Value::from("hi"));
    assert_eq!(dispatcher.invoke("sum", args![2, 40]).unwrap(), Value::from(42));
}

#[test]
fn test_renamed_export_hides_function_name() {
    let dispatcher = dispatcher();

    assert!(matches!(
        dispatcher.invoke("orphan", args![1, 2]),
        Err(DispatchError::Resolution(_))
    ));
}

#[test]
fn test_exported_functions_stay_callable() {
    assert_eq!(add_numbers(args![1, 1]).unwrap(), Value::from(2));
    assert!(CollectedImporter::new().module_paths().contains(&"tests.collected"));
}
