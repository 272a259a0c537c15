#![allow(dead_code)]

use capload::{Args, BoxError, Dispatcher, Loader, Module, ModuleTable, Registry, Value};
use capload::testing::CountingImporter;
use thiserror::Error;

// ============================================================================
// Test Errors
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValueError(pub String);

// ============================================================================
// Test Modules
// ============================================================================

pub fn say_hello(_args: Args) -> Result<Value, BoxError> {
    Ok(Value::from("hi"))
}

pub fn greet(args: Args) -> Result<Value, BoxError> {
    let who: String = args.get(0)?;
    let shout = args.kwarg_opt::<bool>("shout")?.unwrap_or(false);
    let text = format!("hello {who}");
    Ok(Value::from(if shout { text.to_uppercase() } else { text }))
}

pub fn parse_int(args: Args) -> Result<Value, BoxError> {
    let raw: String = args.get(0)?;
    let parsed: i64 = raw
        .parse()
        .map_err(|_| ValueError(raw.clone()))?;
    Ok(Value::from(parsed))
}

/// `examples.mod` with `say_hello`, `greet` and `parse_int`.
pub fn examples_table() -> ModuleTable {
    ModuleTable::new().define("examples.mod", || {
        Ok(Module::new()
            .export("say_hello", say_hello)
            .export("greet", greet)
            .export("parse_int", parse_int))
    })
}

/// A dispatcher over [`examples_table`], plus a handle on its import counts.
pub fn counting_dispatcher(registry: Registry) -> (Dispatcher, CountingImporter<ModuleTable>) {
    let importer = CountingImporter::new(examples_table());
    let dispatcher = Dispatcher::new(registry, Loader::new(importer.clone()));
    (dispatcher, importer)
}
