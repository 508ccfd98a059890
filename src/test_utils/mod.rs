//! Recording fakes for exercising decorators and cleanup paths without an engine.

use std::sync::{Arc, Mutex, MutexGuard};

mod recording;

pub use recording::{RecordingResultSet, RecordingStatement};

/// Shared, cloneable log of the calls a fake received, rendered as `name(args)`.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: String) {
        self.lock().push(call);
    }

    /// Snapshot of every call so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        match self.calls.lock() {
            Ok(guard) => guard,
            // A panicking test must not hide the calls made before it.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
