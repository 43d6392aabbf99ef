//! Form-level error message slot.

use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    message: Option<String>,
}

/// The general (form-level) error message.
///
/// Cheap to clone; clones share the same slot, so the auto-clear task can
/// hold one. Every [`set`](Self::set) returns a new generation number, and
/// [`clear_if`](Self::clear_if) only clears the message of that generation.
#[derive(Debug, Clone, Default)]
pub struct GeneralError {
    inner: Arc<Mutex<Slot>>,
}

impl GeneralError {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get a clone of the current message.
    pub fn get(&self) -> Option<String> {
        self.lock().message.clone()
    }

    pub fn is_set(&self) -> bool {
        self.lock().message.is_some()
    }

    /// Replace the message, returning its generation.
    pub fn set(&self, message: impl Into<String>) -> u64 {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.message = Some(message.into());
        slot.generation
    }

    /// Clear the message unconditionally.
    pub fn clear(&self) {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.message = None;
    }

    /// Clear the message only if it is still the one from `generation`.
    pub fn clear_if(&self, generation: u64) -> bool {
        let mut slot = self.lock();
        if slot.generation != generation {
            return false;
        }
        slot.message = None;
        true
    }
}
