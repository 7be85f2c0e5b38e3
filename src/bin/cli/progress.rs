//! Progress bar and Ctrl-C handling for extraction.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use scdatapack::ProgressReporter;

/// Byte-level progress bar that also carries the Ctrl-C cancel flag.
pub struct CliProgress {
    bar: ProgressBar,
    entry_base: AtomicU64,
    cancelled: Arc<AtomicBool>,
}

impl CliProgress {
    /// Creates a progress reporter; `quiet` hides the bar but keeps
    /// cancellation working.
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::with_template(
                    "{bar:32.cyan/dim} {bytes}/{total_bytes} ({eta}) {wide_msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        };

        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        // Second Ctrl-C falls through to the default handler.
        if let Err(e) = ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        }) {
            log::warn!("could not install Ctrl-C handler: {}", e);
        }

        Self {
            bar,
            entry_base: AtomicU64::new(0),
            cancelled,
        }
    }

    /// Returns a handle to the underlying bar.
    ///
    /// The reporter itself is boxed into the extraction options; the
    /// handle lets the caller clear the bar afterwards (clones share
    /// state).
    pub fn bar_handle(&self) -> ProgressBar {
        self.bar.clone()
    }
}

impl ProgressReporter for CliProgress {
    fn on_total(&self, total_bytes: u64) {
        self.bar.set_length(total_bytes);
    }

    fn on_entry_start(&self, entry_path: &str, _size: u64) {
        self.entry_base.store(self.bar.position(), Ordering::Relaxed);
        self.bar.set_message(entry_path.to_string());
    }

    fn on_bytes(&self, bytes_written: u64, _entry_size: u64) -> bool {
        let base = self.entry_base.load(Ordering::Relaxed);
        self.bar.set_position(base + bytes_written);
        !self.cancelled.load(Ordering::SeqCst)
    }

    fn should_cancel(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
