//! Process-wide readiness flag.

use std::sync::{Arc, PoisonError, RwLock};

/// Shared readiness boolean.
///
/// Written once per completed cycle by the aggregator, read by the readiness
/// handler. Clones share the same flag. Starts out not ready.
#[derive(Debug, Clone, Default)]
pub struct ReadinessState {
    ready: Arc<RwLock<bool>>,
}

impl ReadinessState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> bool {
        *self.ready.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the flag with the outcome of the latest cycle.
    pub fn write(&self, ready: bool) {
        *self.ready.write().unwrap_or_else(PoisonError::into_inner) = ready;
    }
}
