//! Error types for capload.
//!
//! This module provides a structured error hierarchy using `thiserror`.
//! Each failure kind a caller may need to tell apart gets its own type:
//!
//! - [`CapabilityNotFound`] - the name was never registered
//! - [`DuplicateCapability`] - registration rejected by the duplicate policy
//! - [`ImportError`] - the importer could not produce a module
//! - [`ResolutionError`] - a descriptor could not be turned into a handler
//! - [`CapabilityExecutionError`] - the handler itself failed
//! - [`ArgError`] - a handler could not extract its arguments

use std::any::Any;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The requested capability name was never registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no capability registered under `{name}`")]
pub struct CapabilityNotFound {
    /// The name that was looked up.
    pub name: String,
}

impl CapabilityNotFound {
    /// Create a new not-found error for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A capability with the same name is already registered and the registry
/// rejects duplicates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("capability `{name}` is already registered")]
pub struct DuplicateCapability {
    /// The name that was registered twice.
    pub name: String,
}

impl DuplicateCapability {
    /// Create a new duplicate error for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Errors produced by an [`Importer`](crate::Importer).
#[derive(Error, Debug)]
pub enum ImportError {
    /// No module exists under the given path.
    #[error("no module named `{0}`")]
    NotFound(String),

    /// The module exists but its initializer failed.
    #[error("module `{module_path}` failed to initialize")]
    Init {
        /// Path of the module whose initializer failed.
        module_path: String,
        /// The initializer's error.
        #[source]
        source: BoxError,
    },
}

impl ImportError {
    /// Returns `true` if the module does not exist at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ImportError::NotFound(_))
    }
}

/// A descriptor could not be resolved into a handler.
///
/// Failed resolutions are never cached; resolving again retries the import.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// Importing the descriptor's module failed.
    #[error("capability `{name}`: cannot import `{module_path}`")]
    Import {
        /// Capability being resolved.
        name: String,
        /// Module that failed to import.
        module_path: String,
        /// The underlying import failure.
        #[source]
        source: ImportError,
    },

    /// The module imported but does not export the attribute.
    #[error("capability `{name}`: module `{module_path}` has no attribute `{attribute}`")]
    MissingAttribute {
        /// Capability being resolved.
        name: String,
        /// Module that was imported.
        module_path: String,
        /// The attribute that was not found.
        attribute: String,
    },
}

impl ResolutionError {
    /// Name of the capability that failed to resolve.
    pub fn name(&self) -> &str {
        match self {
            ResolutionError::Import { name, .. } | ResolutionError::MissingAttribute { name, .. } => {
                name
            }
        }
    }
}

/// The handler of a capability failed while running.
///
/// The handler's own error is kept as the [`source`](std::error::Error::source)
/// and can be downcast through [`cause`](Self::cause).
#[derive(Error, Debug)]
#[error("capability `{name}` failed")]
pub struct CapabilityExecutionError {
    /// Capability whose handler failed.
    pub name: String,
    /// The error raised by the handler.
    #[source]
    pub source: BoxError,
}

impl CapabilityExecutionError {
    /// Wrap a handler failure.
    pub fn new(name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// The original error raised by the handler.
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.source
    }

    /// Consume the error, returning the handler's original error.
    pub fn into_cause(self) -> BoxError {
        self.source
    }
}

/// A handler or module initializer panicked instead of returning an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("panicked: {0}")]
pub struct HandlerPanic(pub String);

impl HandlerPanic {
    /// Build from a payload caught by [`std::panic::catch_unwind`].
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self(message)
    }
}

/// A handler could not extract one of its arguments.
#[derive(Error, Debug)]
pub enum ArgError {
    /// Fewer positional arguments were passed than the handler reads.
    #[error("missing positional argument {0}")]
    MissingPositional(usize),

    /// A required keyword argument was not passed.
    #[error("missing keyword argument `{0}`")]
    MissingKeyword(String),

    /// The argument was present but did not deserialize into the wanted type.
    #[error("invalid argument `{arg}`")]
    Invalid {
        /// Position or keyword of the offending argument.
        arg: String,
        /// The deserialization failure.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Error, Debug)]
    #[error("{0}")]
    struct ValueError(String);

    #[test]
    fn test_execution_error_keeps_cause() {
        let err = CapabilityExecutionError::new("parse", ValueError("x".into()));

        assert_eq!(err.to_string(), "capability `parse` failed");
        let cause = err.cause().downcast_ref::<ValueError>().unwrap();
        assert_eq!(cause.0, "x");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_resolution_error_chains_import_error() {
        let err = ResolutionError::Import {
            name: "broken".into(),
            module_path: "nonexistent.module".into(),
            source: ImportError::NotFound("nonexistent.module".into()),
        };

        assert_eq!(err.name(), "broken");
        let source = err.source().unwrap().downcast_ref::<ImportError>().unwrap();
        assert!(source.is_not_found());
    }

    #[test]
    fn test_panic_payload_message() {
        let formatted = std::panic::catch_unwind(|| panic!("bad {}", 1)).unwrap_err();
        let fixed = std::panic::catch_unwind(|| panic!("kaboom")).unwrap_err();
        let opaque = std::panic::catch_unwind(|| std::panic::panic_any(7_u8)).unwrap_err();

        assert_eq!(HandlerPanic::from_payload(formatted.as_ref()).0, "bad 1");
        assert_eq!(HandlerPanic::from_payload(fixed.as_ref()).0, "kaboom");
        assert_eq!(
            HandlerPanic::from_payload(opaque.as_ref()).to_string(),
            "panicked: non-string panic payload"
        );
    }
}
