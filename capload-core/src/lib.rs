//! # capload-core
//!
//! Core types for the capload capability loader.
//!
//! This crate has minimal dependencies and is meant to be imported by crates
//! that only *provide* capabilities (plugins, command sets) and don't need
//! the registry, loader or dispatcher from `capload-std`/`capload`.
//!
//! # Layers
//!
//! ## Descriptor ([`CapabilityDescriptor`])
//!
//! The immutable record naming a capability and the `module_path` /
//! `attribute` pair it resolves from. Registries store these; loaders cache
//! handlers by their value.
//!
//! ## Capability ([`Capability`], [`Handler`])
//!
//! The unit of work. Any `Fn(Args) -> Result<Value, BoxError>` is a
//! capability; [`Handler`] is the shared, resolved form.
//!
//! ## Module ([`Module`], [`Importer`])
//!
//! The late-binding seam. An importer turns a module path into a module, a
//! table of exported handlers.
//!
//! # Error Types
//!
//! - [`CapabilityNotFound`] - never registered
//! - [`ResolutionError`] - failed to load
//! - [`CapabilityExecutionError`] - failed while running

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod arguments;
mod capability;
mod descriptor;
mod error;
mod module;

// Re-exports
pub use arguments::{Args, Value};
pub use capability::{Capability, Handler};
pub use descriptor::CapabilityDescriptor;
pub use error::{
    ArgError, BoxError, CapabilityExecutionError, CapabilityNotFound, DuplicateCapability,
    HandlerPanic, ImportError, ResolutionError,
};
pub use module::{Importer, Module};
