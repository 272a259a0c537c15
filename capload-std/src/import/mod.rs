//! Importers.
//!
//! Implementations of [`Importer`](capload_core::Importer), the mechanism a
//! loader uses to turn a module path into a module:
//!
//! - [`ModuleTable`]: modules defined at runtime from initializer closures
//! - [`ImportPath`]: an ordered search path over several importers
//! - [`CollectedImporter`]: modules assembled from `#[capability]` exports
//!   gathered at link time (feature `inventory`)

pub mod path;
pub mod table;

#[cfg(feature = "inventory")]
pub mod collected;

pub use path::ImportPath;
pub use table::ModuleTable;

#[cfg(feature = "inventory")]
pub use collected::{CollectedImporter, Export};
