use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Operation};

/// Re-entrancy guard for a single logical operation.
#[derive(Debug, Default)]
pub(crate) struct BusyFlag(AtomicBool);

impl BusyFlag {
    pub(crate) fn try_acquire(&self, operation: Operation) -> Result<BusyGuard<'_>, Error> {
        if self.0.swap(true, Ordering::AcqRel) {
            tracing::debug!(%operation, "Rejecting overlapping call");
            return Err(Error::Busy(operation));
        }
        Ok(BusyGuard(&self.0))
    }

    pub(crate) fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears the flag when the operation finishes or its future is dropped.
pub(crate) struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
