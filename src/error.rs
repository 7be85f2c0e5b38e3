//! Error types for the extraction pipeline.
//!
//! All fallible operations in this crate return [`Result<T>`], an alias
//! for `std::result::Result<T, Error>`. Errors are propagated with `?`;
//! per-entry extraction failures are collected in
//! [`ExtractResult`](crate::ExtractResult) instead of aborting the run.

use std::io;

/// A specialized `Result` type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for archive and pipeline operations.
///
/// Archive-level failures (unreadable archive, unwritable destination,
/// malformed listing) are fatal to a run. Per-entry copy failures are not
/// represented here; they are accumulated in
/// [`ExtractResult::failures`](crate::ExtractResult::failures).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred while reading the archive or writing the
    /// destination tree.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive container could not be parsed or an entry could not be
    /// decoded. Wraps the container library's error.
    #[error("archive container error: {0}")]
    Container(#[from] zip::result::ZipError),

    /// An entry in the archive listing carries a path that fails
    /// validation (absolute, traversal segments, NUL bytes, ...).
    ///
    /// The listing is rejected as a whole: a manifest with unsafe paths
    /// is a malformed input, not something to extract around.
    #[error("invalid entry path: {0}")]
    InvalidEntryPath(String),

    /// An entry's destination path would land outside the destination
    /// root after joining.
    #[error("entry {entry_index} ('{path}') escapes the destination directory")]
    PathTraversal {
        /// Index of the offending entry in the manifest.
        entry_index: usize,
        /// The path stored in the archive.
        path: String,
    },

    /// A named entry was requested but is not present in the manifest.
    #[error("entry not found in archive: {0}")]
    EntryNotFound(String),

    /// A required configuration key is missing or a value is malformed.
    #[error("configuration: {0}")]
    Config(String),

    /// A report step exited with a non-zero status.
    #[error("pipeline step '{name}' failed with exit code {code}")]
    StepFailed {
        /// Name of the failing step.
        name: String,
        /// The step's exit code (-1 when terminated by a signal).
        code: i32,
    },

    /// The operation was cancelled via a progress reporter.
    ///
    /// Files written before cancellation are left in place; extraction is
    /// not transactional.
    #[error("operation cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidEntryPath("../evil".into());
        assert_eq!(err.to_string(), "invalid entry path: ../evil");

        let err = Error::PathTraversal {
            entry_index: 3,
            path: "Data/../../x".into(),
        };
        assert!(err.to_string().contains("entry 3"));

        let err = Error::StepFailed {
            name: "ships".into(),
            code: 2,
        };
        assert_eq!(
            err.to_string(),
            "pipeline step 'ships' failed with exit code 2"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
