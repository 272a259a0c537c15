//! The dispatcher: one entry point over a [`Registry`] and a [`Loader`].
//!
//! `invoke` runs three steps and keeps their failures apart:
//!
//! 1. look the name up (`NotFound`, nothing is imported);
//! 2. resolve the descriptor (`Resolution`, the import error attached);
//! 3. call the handler inside an error boundary (`Execution`, the handler's
//!    own error or panic attached).
//!
//! Nothing is retried here. Callers that want retries or timeouts wrap
//! `invoke` themselves.

use capload_core::{
    Args, BoxError, CapabilityDescriptor, CapabilityExecutionError, CapabilityNotFound, DuplicateCapability,
    HandlerPanic, ResolutionError, Value,
};
use capload_std::{Loader, Registry};
use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};
use thiserror::Error;

/// Errors returned by [`Dispatcher::invoke`].
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The name was never registered.
    #[error(transparent)]
    NotFound(#[from] CapabilityNotFound),

    /// The capability is registered but could not be loaded.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The capability loaded but failed while running.
    #[error(transparent)]
    Execution(#[from] CapabilityExecutionError),
}

impl DispatchError {
    /// Name of the capability the failed invocation asked for.
    pub fn name(&self) -> &str {
        match self {
            DispatchError::NotFound(err) => &err.name,
            DispatchError::Resolution(err) => err.name(),
            DispatchError::Execution(err) => &err.name,
        }
    }
}

/// Looks capabilities up, loads them on first use and runs them.
///
/// # Example
///
/// ```rust,ignore
/// let registry = Registry::new();
/// registry.register("greet", "examples.mod", "say_hello")?;
///
/// let dispatcher = Dispatcher::new(registry, Loader::new(table));
/// assert_eq!(dispatcher.invoke("greet", Args::new())?, Value::from("hi"));
/// ```
#[derive(Debug)]
pub struct Dispatcher {
    registry: Registry,
    loader: Loader,
}

impl Dispatcher {
    /// Create a new dispatcher.
    pub fn new(registry: Registry, loader: Loader) -> Self {
        Self { registry, loader }
    }

    /// Get a reference to the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Get a reference to the loader.
    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    /// Register a capability with the underlying registry.
    ///
    /// When the registry overwrites an existing name, the handler cached for
    /// the replaced descriptor is evicted.
    pub fn register(
        &self,
        name: impl Into<String>,
        module_path: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Result<Arc<CapabilityDescriptor>, DuplicateCapability> {
        let name = name.into();
        let previous = self.registry.lookup(&name).ok();
        let descriptor = self.registry.register(name, module_path, attribute)?;

        if let Some(previous) = previous.filter(|previous| **previous != *descriptor) {
            self.loader.evict(&previous);
        }
        Ok(descriptor)
    }

    /// Remove a capability and evict its cached handler.
    pub fn unregister(&self, name: &str) -> Option<Arc<CapabilityDescriptor>> {
        let descriptor = self.registry.unregister(name)?;
        self.loader.evict(&descriptor);
        Some(descriptor)
    }

    /// Invoke a capability by name.
    pub fn invoke(&self, name: &str, args: Args) -> Result<Value, DispatchError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(capability = name, "invoking capability");

        let descriptor = self.registry.lookup(name)?;
        let handler = self.loader.resolve(&descriptor)?;

        let outcome = catch_unwind(AssertUnwindSafe(|| handler.call(args)));
        let source: BoxError = match outcome {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) => err,
            Err(payload) => Box::new(HandlerPanic::from_payload(payload.as_ref())),
        };

        #[cfg(feature = "tracing")]
        tracing::warn!(capability = name, error = %source, "capability failed");

        Err(CapabilityExecutionError::new(descriptor.name(), source).into())
    }
}
