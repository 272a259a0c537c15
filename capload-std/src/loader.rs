//! Capability loader.
//!
//! Resolves descriptors into handlers through an [`Importer`], deferring the
//! import until a capability is first needed and caching the result.
//!
//! Two caches are kept:
//!
//! - **modules**, keyed by module path: each module is imported at most once
//!   per loader, however many descriptors name it;
//! - **handlers**, keyed by descriptor value: each descriptor is resolved at
//!   most once.
//!
//! Failures are never cached. A descriptor whose module failed to import
//! stays [`LoadState::NotLoaded`] and the next `resolve` retries. A panic in
//! an initializer counts as a failed import ([`ImportError::Init`] with a
//! [`HandlerPanic`] source).
//!
//! A missing attribute is a failed resolution too, but the module it was
//! looked up in imported fine and stays cached. Retrying looks the attribute
//! up again in that same module; it does not re-run the initializer.
//!
//! Neither cache shrinks on its own. [`Loader::evict`] drops the handler of
//! a descriptor that was unregistered or replaced.
//!
//! Importing runs the module's initializer while the loader's lock is held,
//! so concurrent first calls never import twice. An initializer must not
//! resolve capabilities through the same loader.

use capload_core::{
    CapabilityDescriptor, Handler, HandlerPanic, ImportError, Importer, Module, ResolutionError,
};
use std::{
    collections::HashMap,
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{Arc, Mutex, PoisonError},
};

/// Whether a descriptor has been resolved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Not resolved, or the last attempt failed.
    NotLoaded,
    /// Resolved and cached.
    Loaded,
}

#[derive(Default)]
struct Caches {
    modules: HashMap<String, Arc<Module>>,
    handlers: HashMap<CapabilityDescriptor, Handler>,
}

/// Lazily resolves descriptors into cached handlers.
///
/// # Example
///
/// ```rust,ignore
/// let table = ModuleTable::new()
///     .define("examples.mod", || Ok(Module::new().export("say_hello", say_hello)));
/// let loader = Loader::new(table);
///
/// let handler = loader.resolve(&descriptor)?;
/// ```
pub struct Loader {
    importer: Arc<dyn Importer>,
    caches: Mutex<Caches>,
}

impl Loader {
    /// Create a loader importing through `importer`.
    pub fn new<I: Importer + 'static>(importer: I) -> Self {
        Self::from_arc(Arc::new(importer))
    }

    /// Create a loader sharing an importer.
    pub fn from_arc(importer: Arc<dyn Importer>) -> Self {
        Self {
            importer,
            caches: Mutex::default(),
        }
    }

    /// Resolve a descriptor into its handler.
    ///
    /// The first call for a descriptor imports its module (unless another
    /// descriptor already did) and looks the attribute up; later calls return
    /// the cached handler.
    pub fn resolve(&self, descriptor: &CapabilityDescriptor) -> Result<Handler, ResolutionError> {
        let mut caches = self.caches.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(handler) = caches.handlers.get(descriptor) {
            #[cfg(feature = "tracing")]
            tracing::trace!(capability = descriptor.name(), "handler cache hit");
            return Ok(handler.clone());
        }

        let module = match caches.modules.get(descriptor.module_path()) {
            Some(module) => Arc::clone(module),
            None => {
                let module = Arc::new(self.import(descriptor)?);
                caches
                    .modules
                    .insert(descriptor.module_path().to_string(), Arc::clone(&module));
                module
            }
        };

        let handler = module
            .attribute(descriptor.attribute())
            .cloned()
            .ok_or_else(|| {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    capability = descriptor.name(),
                    module = descriptor.module_path(),
                    attribute = descriptor.attribute(),
                    "module has no such attribute"
                );
                ResolutionError::MissingAttribute {
                    name: descriptor.name().to_string(),
                    module_path: descriptor.module_path().to_string(),
                    attribute: descriptor.attribute().to_string(),
                }
            })?;

        caches.handlers.insert(descriptor.clone(), handler.clone());

        #[cfg(feature = "tracing")]
        tracing::info!(
            capability = descriptor.name(),
            module = descriptor.module_path(),
            attribute = descriptor.attribute(),
            loaded = caches.handlers.len(),
            "capability loaded"
        );

        Ok(handler)
    }

    fn import(&self, descriptor: &CapabilityDescriptor) -> Result<Module, ResolutionError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(module = descriptor.module_path(), "importing module");

        let module_path = descriptor.module_path();
        let outcome = catch_unwind(AssertUnwindSafe(|| self.importer.import(module_path)))
            .unwrap_or_else(|payload| {
                Err(ImportError::Init {
                    module_path: module_path.to_string(),
                    source: Box::new(HandlerPanic::from_payload(payload.as_ref())),
                })
            });

        outcome.map_err(|source: ImportError| {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                capability = descriptor.name(),
                module = descriptor.module_path(),
                error = %source,
                "module import failed"
            );
            ResolutionError::Import {
                name: descriptor.name().to_string(),
                module_path: descriptor.module_path().to_string(),
                source,
            }
        })
    }

    /// Current load state of a descriptor.
    pub fn state(&self, descriptor: &CapabilityDescriptor) -> LoadState {
        if self.is_loaded(descriptor) {
            LoadState::Loaded
        } else {
            LoadState::NotLoaded
        }
    }

    /// Drop the cached handler of a descriptor.
    ///
    /// Returns `true` if one was cached. The descriptor's module stays
    /// cached, so resolving it again does not re-import.
    pub fn evict(&self, descriptor: &CapabilityDescriptor) -> bool {
        let evicted = self.lock().handlers.remove(descriptor).is_some();

        #[cfg(feature = "tracing")]
        if evicted {
            tracing::debug!(capability = descriptor.name(), "evicted handler");
        }

        evicted
    }

    /// Check if a descriptor has a cached handler.
    pub fn is_loaded(&self, descriptor: &CapabilityDescriptor) -> bool {
        self.lock().handlers.contains_key(descriptor)
    }

    /// Number of cached handlers.
    pub fn loaded_count(&self) -> usize {
        self.lock().handlers.len()
    }

    /// Paths of all modules imported so far, sorted.
    pub fn imported_modules(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.lock().modules.keys().cloned().collect();
        paths.sort_unstable();
        paths
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Caches> {
        self.caches.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let caches = self.lock();
        f.debug_struct("Loader")
            .field("modules", &caches.modules.len())
            .field("handlers", &caches.handlers.len())
            .finish_non_exhaustive()
    }
}
