//! Modules and importers.
//!
//! An [`Importer`] is the "dynamic import" seam: given a module path it
//! produces a [`Module`], a table of exported attributes. The loader looks
//! the descriptor's attribute up in that table.
//!
//! Importing runs the module's initializer. Initializers may do anything
//! (open files, read the environment, register globals), and that cost and
//! those side effects land on the first caller that resolves a capability
//! from the module.

use crate::{
    arguments::{Args, Value},
    capability::{Capability, Handler},
    error::{BoxError, ImportError},
};
use std::{collections::HashMap, fmt};

/// A table of exported capabilities.
#[derive(Clone, Default)]
pub struct Module {
    exports: HashMap<String, Handler>,
}

impl Module {
    /// Create an empty module.
    pub fn new() -> Self {
        Self::default()
    }

    /// Export a function or closure under `attribute`.
    pub fn export<F>(self, attribute: impl Into<String>, f: F) -> Self
    where
        F: Fn(Args) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.export_capability(attribute, f)
    }

    /// Export any [`Capability`] under `attribute`.
    pub fn export_capability<C: Capability>(self, attribute: impl Into<String>, capability: C) -> Self {
        self.export_handler(attribute, Handler::new(capability))
    }

    /// Export an existing handler under `attribute`, replacing a previous export.
    pub fn export_handler(mut self, attribute: impl Into<String>, handler: Handler) -> Self {
        self.exports.insert(attribute.into(), handler);
        self
    }

    /// Look up an exported attribute.
    pub fn attribute(&self, attribute: &str) -> Option<&Handler> {
        self.exports.get(attribute)
    }

    /// Names of all exported attributes, sorted.
    pub fn attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.exports.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of exports.
    pub fn len(&self) -> usize {
        self.exports.len()
    }

    /// Returns `true` if the module exports nothing.
    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("exports", &self.attributes())
            .finish()
    }
}

/// Turns a module path into a [`Module`].
///
/// Implementations must answer [`ImportError::NotFound`] for paths they do
/// not know, so importers can be chained into a search path.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot import modules",
    label = "missing `Importer` implementation",
    note = "Implement `Importer` to supply modules to a loader."
)]
pub trait Importer: Send + Sync {
    /// Import the module at `module_path`, running its initializer.
    fn import(&self, module_path: &str) -> Result<Module, ImportError>;
}

impl<I: Importer + ?Sized> Importer for Box<I> {
    fn import(&self, module_path: &str) -> Result<Module, ImportError> {
        (**self).import(module_path)
    }
}

impl<I: Importer + ?Sized> Importer for std::sync::Arc<I> {
    fn import(&self, module_path: &str) -> Result<Module, ImportError> {
        (**self).import(module_path)
    }
}
