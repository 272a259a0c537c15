//! # Capability (Handler layer)
//!
//! A capability is the terminal unit of work behind a registered name. It
//! receives the caller's [`Args`] and returns a [`Value`] or an error.
//!
//! # Usage Patterns
//!
//! 1. **Plain function or closure**: `fn(Args) -> Result<Value, BoxError>`
//! 2. **Struct implementation**: `impl Capability for MyCommand`
//!
//! Handlers never see the registry or the loader; the dispatcher wraps every
//! call in an error boundary, so a returned error or a panic is reported to
//! the caller as a `CapabilityExecutionError`.

use crate::{
    arguments::{Args, Value},
    error::BoxError,
};
use std::{fmt, sync::Arc};

/// A late-bound unit of functionality.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a capability",
    label = "missing `Capability` implementation",
    note = "Capabilities are `Fn(Args) -> Result<Value, BoxError>` or implement `Capability` directly."
)]
pub trait Capability: Send + Sync + 'static {
    /// Run the capability.
    fn call(&self, args: Args) -> Result<Value, BoxError>;
}

// Blanket impl for functions and closures
impl<F> Capability for F
where
    F: Fn(Args) -> Result<Value, BoxError> + Send + Sync + 'static,
{
    fn call(&self, args: Args) -> Result<Value, BoxError> {
        (self)(args)
    }
}

/// A resolved, shareable capability handler.
///
/// Cloning is cheap; all clones point at the same handler.
#[derive(Clone)]
pub struct Handler(Arc<dyn Capability>);

impl Handler {
    /// Wrap a capability.
    pub fn new<C: Capability>(capability: C) -> Self {
        Self(Arc::new(capability))
    }

    /// Invoke the handler.
    pub fn call(&self, args: Args) -> Result<Value, BoxError> {
        self.0.call(args)
    }

    /// Returns `true` if both handles point at the same handler.
    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").finish_non_exhaustive()
    }
}
