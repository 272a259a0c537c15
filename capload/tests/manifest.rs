//! Manifest-driven dispatchers over an import search path.

use capload::{
    Args, DispatchError, Dispatcher, ImportPath, Loader, Manifest, ManifestError, Module,
    ModuleTable, Value, args,
};
use std::io::Write;

mod common;
use common::examples_table;

const MANIFEST: &str = r#"{
    "duplicates": "overwrite",
    "capabilities": [
        { "name": "greet", "module": "examples.mod", "attribute": "say_hello" },
        { "name": "state", "module": "plugins.state", "attribute": "current" },
        { "name": "greet", "module": "examples.mod", "attribute": "greet" }
    ]
}"#;

fn plugins() -> ModuleTable {
    ModuleTable::new().define("plugins.state", || {
        Ok(Module::new().export("current", |args: Args| {
            let verbose = args.kwarg_opt::<bool>("verbose")?.unwrap_or(false);
            Ok(if verbose {
                serde_json::json!({ "state": "running", "commands": 2 })
            } else {
                Value::from("running")
            })
        }))
    })
}

#[test]
fn test_manifest_dispatcher() {
    let registry = Manifest::from_json(MANIFEST).unwrap().into_registry().unwrap();
    let importer = ImportPath::new().push(examples_table()).push(plugins());
    let dispatcher = Dispatcher::new(registry, Loader::new(importer));

    let names = dispatcher.registry().list_names();
    assert_eq!(names.iter().collect::<Vec<_>>(), vec!["greet", "state"]);

    assert_eq!(
        dispatcher.invoke("greet", args!["manifest"]).unwrap(),
        Value::from("hello manifest")
    );
    assert_eq!(
        dispatcher.invoke("state", args![; verbose = true]).unwrap()["state"],
        Value::from("running")
    );
    assert_eq!(
        dispatcher.loader().imported_modules(),
        vec!["examples.mod".to_string(), "plugins.state".to_string()]
    );
}

#[test]
fn test_manifest_file_with_unknown_module() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{ "capabilities": [ {{ "name": "sync", "module": "plugins.sync", "attribute": "run" }} ] }}"#
    )
    .unwrap();

    let registry = Manifest::from_path(file.path()).unwrap().into_registry().unwrap();
    let dispatcher = Dispatcher::new(registry, Loader::new(plugins()));

    assert!(matches!(
        dispatcher.invoke("sync", Args::new()),
        Err(DispatchError::Resolution(_))
    ));
}

#[test]
fn test_manifest_rejects_duplicates_by_default() {
    let json = MANIFEST.replace(r#""duplicates": "overwrite","#, "");
    let err = Manifest::from_json(&json).unwrap().into_registry().unwrap_err();

    assert!(matches!(err, ManifestError::Duplicate(ref d) if d.name == "greet"));
}
