//! Capability manifests.
//!
//! A manifest declares capabilities as data instead of code:
//!
//! ```json
//! {
//!   "duplicates": "reject",
//!   "capabilities": [
//!     { "name": "greet", "module": "examples.mod", "attribute": "say_hello" }
//!   ]
//! }
//! ```
//!
//! `duplicates` is optional and defaults to `"reject"`.

use crate::registry::{DuplicatePolicy, Registry};
use capload_core::{CapabilityDescriptor, DuplicateCapability};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Error type for manifest loading.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The manifest is not valid JSON or has the wrong shape.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two entries share a name and the manifest rejects duplicates.
    #[error(transparent)]
    Duplicate(#[from] DuplicateCapability),
}

/// One capability declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityEntry {
    /// Capability name.
    pub name: String,
    /// Module path to import.
    pub module: String,
    /// Attribute exported by the module.
    pub attribute: String,
}

impl From<CapabilityEntry> for CapabilityDescriptor {
    fn from(entry: CapabilityEntry) -> Self {
        CapabilityDescriptor::new(entry.name, entry.module, entry.attribute)
    }
}

/// A set of capability declarations plus the registry policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Policy for the registry built from this manifest.
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
    /// Declared capabilities, registered in order.
    #[serde(default)]
    pub capabilities: Vec<CapabilityEntry>,
}

impl Manifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Register every entry into an existing registry.
    ///
    /// Stops at the first rejected duplicate; entries before it stay registered.
    pub fn register_into(self, registry: &Registry) -> Result<(), ManifestError> {
        for entry in self.capabilities {
            registry.insert(entry.into())?;
        }
        Ok(())
    }

    /// Build a fresh registry using the manifest's duplicate policy.
    pub fn into_registry(self) -> Result<Registry, ManifestError> {
        let registry = Registry::with_policy(self.duplicates);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            capabilities = self.capabilities.len(),
            policy = ?self.duplicates,
            "building registry from manifest"
        );

        self.register_into(&registry)?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::{Manifest, ManifestError};
    use crate::registry::DuplicatePolicy;
    use std::io::Write;

    const MANIFEST: &str = r#"{
        "capabilities": [
            { "name": "greet", "module": "examples.mod", "attribute": "say_hello" },
            { "name": "state", "module": "app.commands.state", "attribute": "State" }
        ]
    }"#;

    #[test]
    fn test_parse_defaults_to_reject() {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        assert_eq!(manifest.duplicates, DuplicatePolicy::Reject);
        assert_eq!(manifest.capabilities.len(), 2);

        let registry = manifest.into_registry().unwrap();
        assert_eq!(registry.lookup("state").unwrap().attribute(), "State");
    }

    #[test]
    fn test_duplicate_entries() {
        let json = r#"{
            "capabilities": [
                { "name": "greet", "module": "a", "attribute": "one" },
                { "name": "greet", "module": "b", "attribute": "two" }
            ]
        }"#;

        let err = Manifest::from_json(json).unwrap().into_registry().unwrap_err();
        assert!(matches!(err, ManifestError::Duplicate(d) if d.name == "greet"));

        let overwrite = json.replacen('{', r#"{ "duplicates": "overwrite","#, 1);
        let registry = Manifest::from_json(&overwrite)
            .unwrap()
            .into_registry()
            .unwrap();
        assert_eq!(registry.lookup("greet").unwrap().module_path(), "b");
    }

    #[test]
    fn test_malformed_manifest() {
        let err = Manifest::from_json(r#"{ "capabilities": [ { "name": "x" } ] }"#).unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();

        let manifest = Manifest::from_path(file.path()).unwrap();
        assert_eq!(manifest.capabilities[0].name, "greet");

        let missing = Manifest::from_path(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ManifestError::Io(_))));
    }
}
