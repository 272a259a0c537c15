//! Capability descriptors.

use std::fmt;

/// Immutable record naming a capability and where to resolve it from.
///
/// Two descriptors are equal when all three fields are equal; that value is
/// the identity the loader caches handlers under.
///
/// # Example
///
/// ```rust,ignore
/// let descriptor = CapabilityDescriptor::new("greet", "examples.mod", "say_hello");
/// assert_eq!(descriptor.module_path(), "examples.mod");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapabilityDescriptor {
    name: String,
    module_path: String,
    attribute: String,
}

impl CapabilityDescriptor {
    /// Create a new descriptor.
    pub fn new(
        name: impl Into<String>,
        module_path: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            module_path: module_path.into(),
            attribute: attribute.into(),
        }
    }

    /// The unique capability name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the module exporting the handler.
    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    /// Name of the exported attribute inside the module.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

impl fmt::Display for CapabilityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}:{}", self.name, self.module_path, self.attribute)
    }
}
