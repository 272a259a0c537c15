//! Link-time collected exports.
//!
//! Crates submit [`Export`] records through `inventory` (usually via the
//! `#[capability(module = "...")]` attribute); [`CollectedImporter`] groups
//! them into modules by path when a module is imported.

use capload_core::{Handler, ImportError, Importer, Module};
use std::collections::BTreeSet;

/// A capability exported under `module_path::attribute` at link time.
#[derive(Debug)]
pub struct Export {
    module_path: &'static str,
    attribute: &'static str,
    factory: fn() -> Handler,
}

impl Export {
    /// Create an export record. `const` so it can be used in `inventory::submit!`.
    pub const fn new(module_path: &'static str, attribute: &'static str, factory: fn() -> Handler) -> Self {
        Self {
            module_path,
            attribute,
            factory,
        }
    }

    /// Path of the module this export belongs to.
    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    /// Attribute name inside the module.
    pub fn attribute(&self) -> &'static str {
        self.attribute
    }
}

inventory::collect!(Export);

/// Imports modules assembled from every submitted [`Export`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectedImporter;

impl CollectedImporter {
    /// Create a new collected importer.
    pub fn new() -> Self {
        Self
    }

    /// Paths of all modules that have at least one export, sorted.
    pub fn module_paths(&self) -> Vec<&'static str> {
        inventory::iter::<Export>
            .into_iter()
            .map(Export::module_path)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Importer for CollectedImporter {
    fn import(&self, module_path: &str) -> Result<Module, ImportError> {
        let mut module = Module::new();
        let mut found = false;

        for export in inventory::iter::<Export> {
            if export.module_path != module_path {
                continue;
            }
            found = true;

            #[cfg(feature = "tracing")]
            if module.attribute(export.attribute).is_some() {
                tracing::warn!(
                    module = module_path,
                    attribute = export.attribute,
                    "attribute exported twice, keeping the last submission"
                );
            }

            module = module.export_handler(export.attribute, (export.factory)());
        }

        if found {
            Ok(module)
        } else {
            Err(ImportError::NotFound(module_path.to_string()))
        }
    }
}
