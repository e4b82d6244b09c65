//! Trigger control
//!
//! The generate button's disabled flag. The event handler acquires a
//! lease before starting a pipeline; dropping the lease re-enables the
//! control, so it is released on success, failure and early return alike.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const IDLE_LABEL: &str = "Generate";
pub const BUSY_LABEL: &str = "Processing...";

/// Shared disabled flag of one trigger control
#[derive(Debug, Clone, Default)]
pub struct Trigger {
    disabled: Arc<AtomicBool>,
}

/// Held for the duration of one pipeline run
#[derive(Debug)]
pub struct TriggerLease {
    disabled: Arc<AtomicBool>,
}

impl Trigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable the control. `None` if it is already disabled.
    pub fn try_acquire(&self) -> Option<TriggerLease> {
        self.disabled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TriggerLease {
                disabled: Arc::clone(&self.disabled),
            })
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    pub fn label(&self) -> &'static str {
        if self.is_disabled() {
            BUSY_LABEL
        } else {
            IDLE_LABEL
        }
    }
}

impl Drop for TriggerLease {
    fn drop(&mut self) {
        self.disabled.store(false, Ordering::Release);
    }
}
