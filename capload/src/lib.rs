//! # capload - Late-Bound Capability Loader
//!
//! `capload` resolves named capabilities lazily. A [`Registry`] maps names to
//! descriptors (`module_path` + `attribute`); a [`Loader`] imports the module
//! the first time a capability is needed and caches the handler; a
//! [`Dispatcher`] ties both together behind a single `invoke` call with
//! typed errors.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use capload::{Args, Dispatcher, Loader, Module, ModuleTable, Registry, Value};
//!
//! let table = ModuleTable::new().define("examples.mod", || {
//!     Ok(Module::new().export("say_hello", |_args: Args| Ok(Value::from("hi"))))
//! });
//!
//! let registry = Registry::new();
//! registry.register("greet", "examples.mod", "say_hello")?;
//!
//! let dispatcher = Dispatcher::new(registry, Loader::new(table));
//! assert_eq!(dispatcher.invoke("greet", Args::new())?, Value::from("hi"));
//! ```
//!
//! ## Errors
//!
//! [`DispatchError`] separates "never registered" ([`CapabilityNotFound`]),
//! "failed to load" ([`ResolutionError`]) and "failed while running"
//! ([`CapabilityExecutionError`]).
//!
//! ## Side Effects
//!
//! Importing a module runs its initializer on whichever call first resolves
//! a capability from it. Whatever the initializer does happens then.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dispatcher;

pub use dispatcher::{DispatchError, Dispatcher};

pub use capload_core::{
    // Arguments
    ArgError,
    Args,
    // Error types
    BoxError,
    // Capability
    Capability,
    // Descriptor
    CapabilityDescriptor,
    CapabilityExecutionError,
    CapabilityNotFound,
    DuplicateCapability,
    Handler,
    HandlerPanic,
    ImportError,
    // Modules
    Importer,
    Module,
    ResolutionError,
    Value,
    args,
};

pub use capload_std::{
    CapabilityEntry, CapabilityNames, DuplicatePolicy, ImportPath, LoadState, Loader, Manifest,
    ManifestError, ModuleTable, Registry,
};

/// Importer implementations.
pub mod import {
    pub use capload_std::import::{ImportPath, ModuleTable};

    #[cfg(feature = "inventory")]
    pub use capload_std::import::{CollectedImporter, Export};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use capload_std::testing::*;
}

/// Prelude module - common imports for capload.
///
/// # Usage
///
/// ```rust,ignore
/// use capload::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Args, BoxError, Capability, DispatchError, Dispatcher, Loader, Module, ModuleTable,
        Registry, Value, args,
    };
}

#[cfg(feature = "macros")]
pub use capload_macros::capability;

#[cfg(feature = "inventory")]
pub use inventory;
