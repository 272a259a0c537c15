//! Ordered import search path.

use capload_core::{ImportError, Importer, Module};
use std::{fmt, sync::Arc};

/// Tries several importers in order.
///
/// The first importer that does not answer [`ImportError::NotFound`] wins,
/// including when it fails to initialize the module: a broken module shadows
/// later entries the same way it would on a module search path.
#[derive(Clone, Default)]
pub struct ImportPath {
    importers: Vec<Arc<dyn Importer>>,
}

impl ImportPath {
    /// Create an empty search path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an importer to the end of the search path.
    pub fn push<I: Importer + 'static>(mut self, importer: I) -> Self {
        self.importers.push(Arc::new(importer));
        self
    }

    /// Get the number of importers on the path.
    pub fn len(&self) -> usize {
        self.importers.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.importers.is_empty()
    }
}

impl Importer for ImportPath {
    fn import(&self, module_path: &str) -> Result<Module, ImportError> {
        for importer in &self.importers {
            match importer.import(module_path) {
                Err(ImportError::NotFound(_)) => continue,
                other => return other,
            }
        }
        Err(ImportError::NotFound(module_path.to_string()))
    }
}

impl fmt::Debug for ImportPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportPath")
            .field("importers", &self.importers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ImportPath;
    use crate::import::ModuleTable;
    use capload_core::{Args, ImportError, Importer, Module, Value};

    fn module(reply: &'static str) -> Module {
        Module::new().export("run", move |_args: Args| Ok(Value::from(reply)))
    }

    #[test]
    fn test_first_match_wins() {
        let path = ImportPath::new()
            .push(ModuleTable::new().define_module("app.cmd", module("first")))
            .push(
                ModuleTable::new()
                    .define_module("app.cmd", module("second"))
                    .define_module("app.extra", module("extra")),
            );

        let cmd = path.import("app.cmd").unwrap();
        let run = cmd.attribute("run").unwrap();
        assert_eq!(run.call(Args::new()).unwrap(), Value::from("first"));

        assert!(path.import("app.extra").is_ok());
        assert!(path.import("app.none").unwrap_err().is_not_found());
    }

    #[test]
    fn test_broken_module_shadows_later_entries() {
        let path = ImportPath::new()
            .push(ModuleTable::new().define("app.cmd", || Err("boom".into())))
            .push(ModuleTable::new().define_module("app.cmd", module("fallback")));

        assert!(matches!(path.import("app.cmd"), Err(ImportError::Init { .. })));
    }

    #[test]
    fn test_empty_path() {
        assert!(ImportPath::new().import("anything").unwrap_err().is_not_found());
    }
}
