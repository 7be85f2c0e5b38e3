//! Extraction of selected entries to a destination tree.
//!
//! Each selected entry is written to `destination_root` joined with its
//! archive path, creating intermediate directories as needed. The pass
//! is not transactional: a failing entry is recorded and the pass moves
//! on, leaving everything already written in place.

use std::fs::{self, File};
use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};

use crate::archive::Archive;
use crate::options::{ExtractOptions, ExtractResult, OverwritePolicy};
use crate::select::EntrySelector;
use crate::{Error, Result, READ_BUFFER_SIZE};

enum EntryOutcome {
    Written(u64),
    SkippedExisting,
}

impl<R: Read + Seek> Archive<R> {
    /// Extracts all entries accepted by `selector` under
    /// `destination_root`.
    ///
    /// Entries are written in manifest order. Per-entry I/O failures are
    /// collected in the returned [`ExtractResult`] rather than aborting
    /// the pass; only cancellation and destination-escape errors abort.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathTraversal`] if a joined output path would
    /// land outside `destination_root`, and [`Error::Cancelled`] if the
    /// progress reporter requests cancellation. Cancellation may leave a
    /// partially written file behind.
    pub fn extract(
        &mut self,
        destination_root: impl AsRef<Path>,
        selector: &impl EntrySelector,
        options: &ExtractOptions,
    ) -> Result<ExtractResult> {
        let destination_root = destination_root.as_ref();
        fs::create_dir_all(destination_root)?;

        // Selected (index, path, size, is_directory, mtime), copied out
        // of the manifest so the container can be borrowed mutably below.
        let selected: Vec<_> = self
            .entries
            .iter()
            .filter(|e| selector.select(e))
            .map(|e| {
                (
                    e.index,
                    e.path.clone(),
                    e.size,
                    e.is_directory,
                    e.modification_time,
                )
            })
            .collect();

        let total_bytes: u64 = selected
            .iter()
            .filter(|(_, _, _, is_dir, _)| !is_dir)
            .map(|(_, _, size, _, _)| *size)
            .sum();
        if let Some(progress) = &options.progress {
            progress.on_total(total_bytes);
        }

        let mut result = ExtractResult::default();

        for (index, path, size, is_directory, mtime) in selected {
            if let Some(progress) = &options.progress {
                if progress.should_cancel() {
                    return Err(Error::Cancelled);
                }
                progress.on_entry_start(path.as_str(), size);
            }

            let output_path = validate_destination(index, path.as_str(), destination_root)?;

            if is_directory {
                match fs::create_dir_all(&output_path) {
                    Ok(()) => result.entries_extracted += 1,
                    Err(e) => {
                        result.entries_failed += 1;
                        result.failures.push((path.to_string(), e.to_string()));
                    }
                }
                continue;
            }

            let outcome = self.extract_file(index, &output_path, options);
            let success = outcome.is_ok();
            match outcome {
                Ok(EntryOutcome::Written(bytes)) => {
                    result.entries_extracted += 1;
                    result.bytes_extracted += bytes;
                    if options.preserve_mtime {
                        if let Some(seconds) = mtime {
                            restore_mtime(&output_path, seconds);
                        }
                    }
                }
                Ok(EntryOutcome::SkippedExisting) => result.entries_skipped += 1,
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(e) => {
                    log::warn!("failed to extract {}: {}", path, e);
                    result.entries_failed += 1;
                    result.failures.push((path.to_string(), e.to_string()));
                }
            }

            if let Some(progress) = &options.progress {
                progress.on_entry_complete(path.as_str(), success);
            }
        }

        log::info!(
            "extracted {} entries ({} bytes), {} skipped, {} failed",
            result.entries_extracted,
            result.bytes_extracted,
            result.entries_skipped,
            result.entries_failed
        );
        Ok(result)
    }

    fn extract_file(
        &mut self,
        index: usize,
        output_path: &Path,
        options: &ExtractOptions,
    ) -> Result<EntryOutcome> {
        if output_path.exists() {
            match options.overwrite {
                OverwritePolicy::Error => {
                    return Err(Error::Io(std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        "destination file already exists",
                    )));
                }
                OverwritePolicy::Skip => return Ok(EntryOutcome::SkippedExisting),
                OverwritePolicy::Overwrite => {}
            }
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut source = self.container.by_index(index)?;
        let entry_size = source.size();
        let mut output = File::create(output_path)?;

        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        let mut written: u64 = 0;
        loop {
            let n = source.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            output.write_all(&buffer[..n])?;
            written += n as u64;

            if let Some(progress) = &options.progress {
                if !progress.on_bytes(written, entry_size) || progress.should_cancel() {
                    // Partial file stays on disk; the contract is
                    // best-effort, not transactional.
                    return Err(Error::Cancelled);
                }
            }
        }
        output.flush()?;

        Ok(EntryOutcome::Written(written))
    }
}

/// Joins `entry_path` under `destination_root` and confirms the result
/// stays inside it.
///
/// Listing-time validation already rejects absolute paths and `..`
/// segments, so this is the last line of defense against a path that
/// slipped through with platform-specific separators.
fn validate_destination(entry_index: usize, entry_path: &str, root: &Path) -> Result<PathBuf> {
    let mut output = root.to_path_buf();
    for segment in entry_path.split('/') {
        if segment == ".." || segment.contains(['/', '\\']) {
            return Err(Error::PathTraversal {
                entry_index,
                path: entry_path.to_string(),
            });
        }
        output.push(segment);
    }

    if !output.starts_with(root) {
        return Err(Error::PathTraversal {
            entry_index,
            path: entry_path.to_string(),
        });
    }

    Ok(output)
}

fn restore_mtime(path: &Path, unix_seconds: i64) {
    let mtime = filetime::FileTime::from_unix_time(unix_seconds, 0);
    if let Err(e) = filetime::set_file_mtime(path, mtime) {
        log::warn!("failed to set mtime on {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_destination_joins_under_root() {
        let root = Path::new("/tmp/out");
        let joined = validate_destination(0, "Data/Libs/a.xml", root).unwrap();
        assert_eq!(joined, Path::new("/tmp/out/Data/Libs/a.xml"));
    }

    #[test]
    fn test_validate_destination_rejects_dotdot() {
        let root = Path::new("/tmp/out");
        let err = validate_destination(3, "Data/../../etc/passwd", root).unwrap_err();
        match err {
            Error::PathTraversal { entry_index, path } => {
                assert_eq!(entry_index, 3);
                assert_eq!(path, "Data/../../etc/passwd");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
