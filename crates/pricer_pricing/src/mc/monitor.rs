//! Cancellation and progress reporting for long-running pricing calls.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Callback invoked with `(completed, total)` trial counts.
///
/// Called from worker threads, possibly concurrently, after each chunk of
/// trials finishes.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Shared flag requesting that a running pricing call stop early.
///
/// Clones share the same flag. The engine checks it before every chunk of
/// trials, so a cancelled run stops within one chunk per worker.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any
    /// clone.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Per-run counter of finished trials that forwards to a
/// [`ProgressCallback`].
pub(crate) struct ProgressTracker {
    completed: AtomicUsize,
    total: usize,
    callback: Option<ProgressCallback>,
}

impl ProgressTracker {
    pub(crate) fn new(total: usize, callback: Option<ProgressCallback>) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
            callback,
        }
    }

    /// Records `trials` more finished trials and reports the running total.
    #[inline]
    pub(crate) fn advance(&self, trials: usize) {
        let completed = self.completed.fetch_add(trials, Ordering::AcqRel) + trials;
        if let Some(callback) = &self.callback {
            callback(completed, self.total);
        }
    }

    #[inline]
    pub(crate) fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("completed", &self.completed())
            .field("total", &self.total)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
