//! # capload-std
//!
//! Standard implementations for the capload capability loader.
//!
//! This crate provides:
//! - **Registry**: [`Registry`], name to descriptor mapping with a [`DuplicatePolicy`]
//! - **Loader**: [`Loader`], lazy, cached resolution of descriptors into handlers
//! - **Importers**: [`ModuleTable`], [`ImportPath`] and, with the `inventory`
//!   feature, [`CollectedImporter`](import::CollectedImporter)
//! - **Manifests**: [`Manifest`], capabilities declared as JSON
//! - **Testing**: instrumented importers and capabilities

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use capload_core;

// Modules
pub mod import;
pub mod loader;
pub mod manifest;
pub mod registry;
pub mod testing;

pub use import::{ImportPath, ModuleTable};
pub use loader::{LoadState, Loader};
pub use manifest::{CapabilityEntry, Manifest, ManifestError};
pub use registry::{CapabilityNames, DuplicatePolicy, Registry};

#[cfg(feature = "inventory")]
pub use inventory;
