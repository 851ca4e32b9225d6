use std::sync::Arc;

use parking_lot::Mutex;

/// A shared slot that receives values observed inside a filter chain.
///
/// Clones share the same slot. Each write replaces the previous value.
#[derive(Debug)]
pub struct Capture<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for Capture<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Capture<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }
}

impl<T> Capture<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: T) {
        *self.slot.lock() = Some(value);
    }

    /// Removes and returns the stored value.
    pub fn take(&self) -> Option<T> {
        self.slot.lock().take()
    }

    pub fn is_set(&self) -> bool {
        self.slot.lock().is_some()
    }
}

impl<T: Clone> Capture<T> {
    /// Returns a copy of the stored value.
    pub fn get(&self) -> Option<T> {
        self.slot.lock().clone()
    }
}
