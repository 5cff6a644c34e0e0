mod doubt;
mod notes;
mod pyq;
mod tasks;

pub use doubt::{DEFAULT_SUBJECT, DoubtResolverPanel};
pub use notes::{MIN_SUMMARY_CONTENT_CHARS, NoteEditorPanel};
pub use pyq::{MIN_QUESTIONS_CHARS, PyqAnalyzerPanel};
pub use tasks::TaskManagerPanel;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Pending,
}

/// One AI action may be in flight per cell. `try_begin` either enters Pending
/// or refuses with `Busy`; the guard returns the cell to Idle when dropped,
/// on success and failure alike.
#[derive(Default)]
pub(crate) struct ActivityCell {
    pending: Arc<AtomicBool>,
}

impl ActivityCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Activity {
        if self.pending.load(Ordering::SeqCst) {
            Activity::Pending
        } else {
            Activity::Idle
        }
    }

    pub fn try_begin(&self) -> Result<ActivityGuard, AppError> {
        if self
            .pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            Ok(ActivityGuard {
                pending: Arc::clone(&self.pending),
            })
        } else {
            Err(AppError::Busy)
        }
    }
}

pub(crate) struct ActivityGuard {
    pending: Arc<AtomicBool>,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.pending.store(false, Ordering::SeqCst);
    }
}
