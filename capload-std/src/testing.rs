//! Testing utilities for capload.
//!
//! This module provides instrumented importers and capabilities so tests can
//! observe what the loader and dispatcher actually did.
//!
//! # Features
//!
//! - [`CountingImporter`]: wraps an importer and counts imports per module path
//! - [`CountingCapability`]: a capability that counts calls and records arguments
//! - [`FailingCapability`]: a capability that always fails with a fixed message

use capload_core::{Args, BoxError, Capability, ImportError, Importer, Module, Value};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

// ============================================================================
// Counting Importer
// ============================================================================

/// An importer that counts how often each module path is imported.
///
/// Clones share their counters, so keep a clone after handing one to a loader.
///
/// # Example
///
/// ```rust,ignore
/// let importer = CountingImporter::new(table);
/// let loader = Loader::new(importer.clone());
///
/// loader.resolve(&descriptor)?;
/// loader.resolve(&descriptor)?;
/// assert_eq!(importer.count("examples.mod"), 1);
/// ```
pub struct CountingImporter<I> {
    inner: Arc<I>,
    counts: Arc<Mutex<HashMap<String, usize>>>,
}

impl<I: Importer> CountingImporter<I> {
    /// Wrap an importer.
    pub fn new(inner: I) -> Self {
        Self {
            inner: Arc::new(inner),
            counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of import attempts for `module_path`, failed ones included.
    pub fn count(&self, module_path: &str) -> usize {
        self.counts
            .lock()
            .unwrap()
            .get(module_path)
            .copied()
            .unwrap_or(0)
    }

    /// Number of import attempts across all module paths.
    pub fn total(&self) -> usize {
        self.counts.lock().unwrap().values().sum()
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.counts.lock().unwrap().clear();
    }
}

impl<I> Clone for CountingImporter<I> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            counts: self.counts.clone(),
        }
    }
}

impl<I: Importer> Importer for CountingImporter<I> {
    fn import(&self, module_path: &str) -> Result<Module, ImportError> {
        *self
            .counts
            .lock()
            .unwrap()
            .entry(module_path.to_string())
            .or_insert(0) += 1;
        self.inner.import(module_path)
    }
}

// ============================================================================
// Counting Capability
// ============================================================================

/// A capability that counts invocations and records the arguments it saw.
///
/// Returns a fixed value (`null` unless set with [`returning`](Self::returning)).
#[derive(Clone)]
pub struct CountingCapability {
    count: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<Args>>>,
    output: Value,
}

impl CountingCapability {
    /// Create a new counting capability returning `null`.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
            output: Value::Null,
        }
    }

    /// Return `output` from every call.
    pub fn returning(mut self, output: impl Into<Value>) -> Self {
        self.output = output.into();
        self
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Get the recorded arguments, in call order.
    pub fn calls(&self) -> Vec<Args> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for CountingCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl Capability for CountingCapability {
    fn call(&self, args: Args) -> Result<Value, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(args);
        Ok(self.output.clone())
    }
}

// ============================================================================
// Failing Capability
// ============================================================================

/// A capability that always fails with the same message.
#[derive(Debug, Clone)]
pub struct FailingCapability {
    message: String,
}

impl FailingCapability {
    /// Create a capability failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Capability for FailingCapability {
    fn call(&self, _args: Args) -> Result<Value, BoxError> {
        Err(self.message.clone().into())
    }
}
