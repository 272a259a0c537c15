//! Capability registry.
//!
//! Maps capability names to [`CapabilityDescriptor`]s. The registry is an
//! ordinary value: create one per application (or per test) and hand it to
//! a dispatcher. There is no process-wide instance.

use capload_core::{CapabilityDescriptor, CapabilityNotFound, DuplicateCapability};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock},
};

type Entries = BTreeMap<String, Arc<CapabilityDescriptor>>;

/// What [`Registry::register`] does when the name is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with [`DuplicateCapability`].
    #[default]
    Reject,
    /// Replace the existing descriptor (last writer wins).
    Overwrite,
}

/// A thread-safe map from capability name to descriptor.
///
/// All operations take `&self`, so a registry can be shared behind an `Arc`
/// and mutated while other threads look names up.
///
/// # Example
/// ```ignore
/// let registry = Registry::new();
/// registry.register("greet", "examples.mod", "say_hello")?;
///
/// let descriptor = registry.lookup("greet")?;
/// assert_eq!(descriptor.attribute(), "say_hello");
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    // Copy-on-write so `list_names` snapshots never hold the lock.
    entries: RwLock<Arc<Entries>>,
    policy: DuplicatePolicy,
}

impl Registry {
    /// Create an empty registry that rejects duplicate names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            entries: RwLock::default(),
            policy,
        }
    }

    /// Allow duplicate names (later registrations override earlier ones).
    pub fn allow_duplicates(mut self) -> Self {
        self.policy = DuplicatePolicy::Overwrite;
        self
    }

    /// The configured duplicate policy.
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register a capability.
    ///
    /// Returns the stored descriptor. Under [`DuplicatePolicy::Reject`] an
    /// existing name is an error and the registry is left unchanged.
    pub fn register(
        &self,
        name: impl Into<String>,
        module_path: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Result<Arc<CapabilityDescriptor>, DuplicateCapability> {
        self.insert(CapabilityDescriptor::new(name, module_path, attribute))
    }

    /// Register a prebuilt descriptor under its own name.
    pub fn insert(
        &self,
        descriptor: CapabilityDescriptor,
    ) -> Result<Arc<CapabilityDescriptor>, DuplicateCapability> {
        let descriptor = Arc::new(descriptor);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if self.policy == DuplicatePolicy::Reject && entries.contains_key(descriptor.name()) {
            return Err(DuplicateCapability::new(descriptor.name()));
        }

        let replaced = Arc::make_mut(&mut *entries)
            .insert(descriptor.name().to_string(), Arc::clone(&descriptor));

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                capability = descriptor.name(),
                module = descriptor.module_path(),
                attribute = descriptor.attribute(),
                replaced = replaced.is_some(),
                "registered capability"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = replaced;
        }

        Ok(descriptor)
    }

    /// Look a capability up by name.
    pub fn lookup(&self, name: &str) -> Result<Arc<CapabilityDescriptor>, CapabilityNotFound> {
        self.snapshot()
            .get(name)
            .cloned()
            .ok_or_else(|| CapabilityNotFound::new(name))
    }

    /// Remove a capability, returning its descriptor if it was registered.
    pub fn unregister(&self, name: &str) -> Option<Arc<CapabilityDescriptor>> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if !entries.contains_key(name) {
            return None;
        }
        Arc::make_mut(&mut *entries).remove(name)
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.snapshot().contains_key(name)
    }

    /// Snapshot of all registered names.
    ///
    /// The snapshot is taken once; iterating it is lazy, can be restarted any
    /// number of times, and always yields the names in sorted order.
    /// Registrations made afterwards are not visible through it.
    pub fn list_names(&self) -> CapabilityNames {
        CapabilityNames {
            entries: self.snapshot(),
        }
    }

    /// Get the number of registered capabilities.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    fn snapshot(&self) -> Arc<Entries> {
        Arc::clone(&*self.entries.read().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Names registered at the time of [`Registry::list_names`].
#[derive(Debug, Clone)]
pub struct CapabilityNames {
    entries: Arc<Entries>,
}

impl CapabilityNames {
    /// Iterate over the names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Number of names in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a CapabilityNames {
    type Item = &'a str;
    type IntoIter = std::iter::Map<
        std::collections::btree_map::Keys<'a, String, Arc<CapabilityDescriptor>>,
        fn(&'a String) -> &'a str,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .keys()
            .map(String::as_str as fn(&'a String) -> &'a str)
    }
}
