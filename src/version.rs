//! Build version detection and the extraction stamp.
//!
//! Re-extracting a multi-gigabyte archive is expensive, so the pipeline
//! records which build it last extracted. The stamp lives in a
//! `.version` file at the output root and is compared before extraction;
//! a matching stamp means the output tree is current and the extraction
//! step is skipped.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// File name of the stamp inside the output directory.
pub const STAMP_FILE: &str = ".version";

/// Version reported when no manifest exists and the archive has no
/// usable parent directory name.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Detects the build version of the archive at `archive_path`.
///
/// Reads `build_manifest.id` next to the archive when present; otherwise
/// the archive's parent directory name (typically `LIVE`, `PTU`, or a
/// build number) stands in.
pub fn detect_build_version(archive_path: &Path) -> String {
    let parent = archive_path.parent();

    if let Some(dir) = parent {
        let manifest = dir.join("build_manifest.id");
        if let Ok(contents) = fs::read_to_string(&manifest) {
            let version = contents.trim();
            if !version.is_empty() {
                return version.to_string();
            }
        }
    }

    parent
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}

/// The `.version` stamp recording the last successfully extracted build.
#[derive(Debug, Clone)]
pub struct VersionStamp {
    path: PathBuf,
}

impl VersionStamp {
    /// Creates a stamp handle for the given output directory.
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            path: output_dir.as_ref().join(STAMP_FILE),
        }
    }

    /// Returns the recorded version, or `None` if no stamp exists.
    pub fn recorded(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let version = contents.trim();
        if version.is_empty() {
            None
        } else {
            Some(version.to_string())
        }
    }

    /// Returns true if the recorded version equals `version`.
    pub fn matches(&self, version: &str) -> bool {
        self.recorded().as_deref() == Some(version)
    }

    /// Records `version`, creating the output directory if needed.
    ///
    /// Called only after an extraction with zero failures; a partially
    /// extracted tree must not look current.
    pub fn record(&self, version: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, version)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_falls_back_to_parent_dir_name() {
        let dir = tempfile::tempdir().unwrap();
        let live = dir.path().join("LIVE");
        fs::create_dir(&live).unwrap();
        let archive = live.join("Data.p4k");

        assert_eq!(detect_build_version(&archive), "LIVE");
    }

    #[test]
    fn test_detect_prefers_build_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("build_manifest.id"), "4.2.1-9876543\n").unwrap();
        let archive = dir.path().join("Data.p4k");

        assert_eq!(detect_build_version(&archive), "4.2.1-9876543");
    }

    #[test]
    fn test_empty_manifest_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        let ptu = dir.path().join("PTU");
        fs::create_dir(&ptu).unwrap();
        fs::write(ptu.join("build_manifest.id"), "  \n").unwrap();

        assert_eq!(detect_build_version(&ptu.join("Data.p4k")), "PTU");
    }

    #[test]
    fn test_stamp_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let stamp = VersionStamp::new(dir.path().join("out"));

        assert_eq!(stamp.recorded(), None);
        assert!(!stamp.matches("4.2.1"));

        stamp.record("4.2.1").unwrap();
        assert_eq!(stamp.recorded().as_deref(), Some("4.2.1"));
        assert!(stamp.matches("4.2.1"));
        assert!(!stamp.matches("4.2.2"));
    }
}
