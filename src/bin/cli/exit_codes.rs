//! Stable process exit codes.
//!
//! Scripts calling this binary branch on these values, so they are part
//! of the CLI contract and must not be renumbered.

use scdatapack::Error;

/// Operation completed.
pub const SUCCESS: u8 = 0;
/// I/O failure reading the archive or writing the destination.
pub const IO: u8 = 2;
/// The archive container is malformed or an entry path failed
/// validation.
pub const BAD_ARCHIVE: u8 = 3;
/// A requested entry or report step does not exist.
pub const NOT_FOUND: u8 = 4;
/// Configuration is missing or malformed.
pub const CONFIG: u8 = 5;
/// A report step exited non-zero.
pub const STEP_FAILED: u8 = 6;
/// The run was cancelled.
pub const CANCELLED: u8 = 130;
/// Extraction finished but some entries failed.
pub const PARTIAL: u8 = 7;

/// Maps an error to its exit code.
pub fn for_error(error: &Error) -> u8 {
    match error {
        Error::Io(_) => IO,
        Error::Container(_) | Error::InvalidEntryPath(_) | Error::PathTraversal { .. } => {
            BAD_ARCHIVE
        }
        Error::EntryNotFound(_) => NOT_FOUND,
        Error::Config(_) => CONFIG,
        Error::StepFailed { .. } => STEP_FAILED,
        Error::Cancelled => CANCELLED,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert_eq!(for_error(&Error::Cancelled), CANCELLED);
        assert_eq!(for_error(&Error::Config("x".into())), CONFIG);
        assert_eq!(
            for_error(&Error::StepFailed {
                name: "ships".into(),
                code: 2
            }),
            STEP_FAILED
        );
    }
}
