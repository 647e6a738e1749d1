//! Re-entry guard for login submissions.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Set of identifiers with a sign-in request currently pending.
///
/// A slot is held by an [`InFlightGuard`] and released when the guard drops,
/// including when the request future is cancelled mid-flight.
#[derive(Debug, Default)]
pub struct InFlight {
    active: Mutex<HashSet<String>>,
}

impl InFlight {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Claims the slot for `key`.
    ///
    /// Returns `None` while another submission for the same key is pending.
    pub fn try_begin(self: &Arc<Self>, key: &str) -> Option<InFlightGuard> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if !active.insert(key.to_string()) {
            return None;
        }

        Some(InFlightGuard {
            registry: Arc::clone(self),
            key: key.to_string(),
        })
    }

    #[cfg(test)]
    pub fn is_active(&self, key: &str) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

/// Holds an [`InFlight`] slot until dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    registry: Arc<InFlight>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
