//! Runtime module table.

use capload_core::{BoxError, ImportError, Importer, Module};
use std::{collections::HashMap, fmt, sync::Arc};

type Initializer = Arc<dyn Fn() -> Result<Module, BoxError> + Send + Sync>;

/// An importer backed by a table of module initializers.
///
/// Each import runs the module's initializer afresh; caching is the
/// loader's job.
///
/// # Example
///
/// ```rust,ignore
/// let table = ModuleTable::new()
///     .define("examples.mod", || {
///         Ok(Module::new().export("say_hello", |_args: Args| Ok(Value::from("hi"))))
///     });
/// ```
#[derive(Clone, Default)]
pub struct ModuleTable {
    modules: HashMap<String, Initializer>,
}

impl ModuleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a module, replacing any earlier definition under the same path.
    pub fn define<F>(mut self, module_path: impl Into<String>, init: F) -> Self
    where
        F: Fn() -> Result<Module, BoxError> + Send + Sync + 'static,
    {
        self.modules.insert(module_path.into(), Arc::new(init));
        self
    }

    /// Define a module whose contents are fixed up front.
    pub fn define_module(self, module_path: impl Into<String>, module: Module) -> Self {
        self.define(module_path, move || Ok(module.clone()))
    }

    /// Check if a module path is defined.
    pub fn contains(&self, module_path: &str) -> bool {
        self.modules.contains_key(module_path)
    }

    /// Get the number of defined modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Importer for ModuleTable {
    fn import(&self, module_path: &str) -> Result<Module, ImportError> {
        let init = self
            .modules
            .get(module_path)
            .ok_or_else(|| ImportError::NotFound(module_path.to_string()))?;

        init().map_err(|source| ImportError::Init {
            module_path: module_path.to_string(),
            source,
        })
    }
}

impl fmt::Debug for ModuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<&String> = self.modules.keys().collect();
        paths.sort_unstable();
        f.debug_struct("ModuleTable").field("modules", &paths).finish()
    }
}
