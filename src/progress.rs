//! Progress reporting for extraction runs.
//!
//! Methods take `&self` so reporters backed by thread-safe display
//! primitives (progress bars, atomics) can implement the trait without
//! interior locking in the extraction loop.

/// Progress reporting trait for extraction operations.
///
/// All methods have no-op defaults; implement only what the caller
/// needs. Returning `true` from [`on_bytes`](Self::on_bytes) continues
/// the run; `false` requests cancellation, as does
/// [`should_cancel`](Self::should_cancel).
pub trait ProgressReporter: Send {
    /// Called once before extraction with the total file bytes selected.
    fn on_total(&self, total_bytes: u64) {
        let _ = total_bytes;
    }

    /// Called when a new entry starts extracting.
    fn on_entry_start(&self, entry_path: &str, size: u64) {
        let _ = (entry_path, size);
    }

    /// Called periodically while an entry's bytes are copied.
    ///
    /// Returns `true` to continue or `false` to request cancellation.
    fn on_bytes(&self, bytes_written: u64, entry_size: u64) -> bool {
        let _ = (bytes_written, entry_size);
        true
    }

    /// Called when an entry finishes (successfully or not).
    fn on_entry_complete(&self, entry_path: &str, success: bool) {
        let _ = (entry_path, success);
    }

    /// Checked before each entry to allow early termination.
    fn should_cancel(&self) -> bool {
        false
    }
}

/// A reporter that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {}

/// Wraps a closure as a byte-level progress reporter.
///
/// The closure receives `(bytes_written, entry_size)` and returns `true`
/// to continue.
pub fn progress_fn<F>(f: F) -> impl ProgressReporter
where
    F: Fn(u64, u64) -> bool + Send,
{
    struct FnReporter<F>(F);

    impl<F: Fn(u64, u64) -> bool + Send> ProgressReporter for FnReporter<F> {
        fn on_bytes(&self, bytes_written: u64, entry_size: u64) -> bool {
            (self.0)(bytes_written, entry_size)
        }
    }

    FnReporter(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_no_progress_defaults() {
        let p = NoProgress;
        assert!(p.on_bytes(10, 100));
        assert!(!p.should_cancel());
    }

    #[test]
    fn test_progress_fn_observes_bytes() {
        let seen = AtomicU64::new(0);
        let reporter = progress_fn(|written, _total| {
            seen.store(written, Ordering::Relaxed);
            true
        });
        assert!(reporter.on_bytes(42, 100));
        assert_eq!(seen.load(Ordering::Relaxed), 42);
    }

    #[test]
    fn test_progress_fn_can_cancel() {
        let reporter = progress_fn(|_, _| false);
        assert!(!reporter.on_bytes(1, 2));
    }
}
