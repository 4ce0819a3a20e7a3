//! Diagnostic observers for resolution events.
//!
//! Observers see every `resolve` call: when it starts, how long it took, and
//! whether it failed. [`TracingObserver`] forwards these events to `tracing`.

use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;

/// Observer trait for resolution events.
///
/// Calls are made synchronously on the resolving thread, nested resolutions
/// included. Keep implementations cheap.
///
/// # Examples
///
/// ```
/// use autowire::{Container, DiError, DiObserver, Strategy};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     seen: Mutex<Vec<String>>,
/// }
///
/// impl DiObserver for Recorder {
///     fn resolving(&self, id: &str) {
///         self.seen.lock().unwrap().push(id.to_string());
///     }
///
///     fn resolved(&self, _id: &str, _duration: Duration) {}
///
///     fn failed(&self, _id: &str, _error: &DiError, _duration: Duration) {}
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let container = Container::builder().observer(recorder.clone()).build();
/// container.register("answer", Strategy::value(42u32), false);
/// container.resolve("answer").unwrap();
///
/// assert_eq!(*recorder.seen.lock().unwrap(), vec!["answer".to_string()]);
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before an identifier is resolved.
    fn resolving(&self, id: &str);

    /// Called after an identifier resolved successfully.
    fn resolved(&self, id: &str, duration: Duration);

    /// Called when resolving an identifier failed.
    fn failed(&self, id: &str, error: &DiError, duration: Duration);
}

/// Observer that emits `tracing` events.
///
/// Starts and successes are logged at `TRACE`, failures at `DEBUG`, under the
/// `autowire` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl DiObserver for TracingObserver {
    fn resolving(&self, id: &str) {
        tracing::trace!(target: "autowire", id, "resolving");
    }

    fn resolved(&self, id: &str, duration: Duration) {
        tracing::trace!(target: "autowire", id, elapsed_us = duration.as_micros() as u64, "resolved");
    }

    fn failed(&self, id: &str, error: &DiError, duration: Duration) {
        tracing::debug!(target: "autowire", id, %error, elapsed_us = duration.as_micros() as u64, "resolution failed");
    }
}

/// Collection of observers notified in registration order.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn resolving(&self, id: &str) {
        for observer in &self.observers {
            observer.resolving(id);
        }
    }

    pub(crate) fn resolved(&self, id: &str, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(id, duration);
        }
    }

    pub(crate) fn failed(&self, id: &str, error: &DiError, duration: Duration) {
        for observer in &self.observers {
            observer.failed(id, error, duration);
        }
    }
}
