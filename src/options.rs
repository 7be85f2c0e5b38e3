//! Extraction options and result reporting.

use crate::progress::ProgressReporter;

/// Policy for handling existing files during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Count the entry as failed if the file exists.
    #[default]
    Error,
    /// Skip files that already exist.
    Skip,
    /// Overwrite existing files.
    Overwrite,
}

/// Options for extraction operations.
///
/// # Example
///
/// ```rust,ignore
/// let options = ExtractOptions::new()
///     .overwrite(OverwritePolicy::Overwrite)
///     .preserve_mtime(true);
/// archive.extract("./Data_Extraction", &filter, &options)?;
/// ```
#[derive(Default)]
pub struct ExtractOptions {
    /// Policy for handling existing files.
    pub overwrite: OverwritePolicy,
    /// Restore each file's archived modification time after writing.
    pub preserve_mtime: bool,
    /// Progress reporter (optional).
    pub progress: Option<Box<dyn ProgressReporter>>,
}

impl std::fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("overwrite", &self.overwrite)
            .field("preserve_mtime", &self.preserve_mtime)
            .finish_non_exhaustive()
    }
}

impl ExtractOptions {
    /// Creates extraction options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overwrite policy.
    pub fn overwrite(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    /// Sets whether archived modification times are restored.
    pub fn preserve_mtime(mut self, preserve: bool) -> Self {
        self.preserve_mtime = preserve;
        self
    }

    /// Sets the progress reporter.
    pub fn progress(mut self, reporter: impl ProgressReporter + 'static) -> Self {
        self.progress = Some(Box::new(reporter));
        self
    }
}

/// Statistics from an extraction pass.
///
/// Per-entry failures do not abort the run; they are recorded here and
/// the pass continues with the next entry. Extraction is not
/// transactional: files written before a failure are left in place.
#[derive(Debug, Clone, Default)]
pub struct ExtractResult {
    /// Number of entries written (files and directories).
    pub entries_extracted: usize,
    /// Number of entries skipped under [`OverwritePolicy::Skip`].
    pub entries_skipped: usize,
    /// Number of entries that failed to extract.
    pub entries_failed: usize,
    /// Total file bytes written.
    pub bytes_extracted: u64,
    /// `(path, reason)` for each failed entry.
    pub failures: Vec<(String, String)>,
}

impl ExtractResult {
    /// Returns true if no entries failed.
    pub fn is_ok(&self) -> bool {
        self.entries_failed == 0
    }
}
