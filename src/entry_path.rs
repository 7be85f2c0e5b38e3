//! Validated entry paths for archive listings.
//!
//! Game archives are built on Windows, so raw listings mix `\` and `/`
//! separators. [`EntryPath`] normalizes everything to forward slashes and
//! validates against path traversal before any entry reaches the
//! filesystem.

use std::fmt;

use crate::{Error, Result};

/// Maximum length for entry paths (in bytes).
///
/// Well above any real listing; guards against a malformed central
/// directory specifying absurd path lengths.
const MAX_PATH_LENGTH: usize = 32768;

/// A validated, normalized path of an entry within a game archive.
///
/// `EntryPath` uses forward slashes exclusively and guarantees:
/// - no NUL bytes,
/// - not absolute (no leading `/`, no drive prefix like `C:`),
/// - no empty segments (`a//b`) and no trailing slash,
/// - no `.` or `..` segments.
///
/// Comparisons and prefix matching are byte-wise and case-sensitive:
/// `Data/Libs/` and `data/libs/` are different paths.
///
/// # Examples
///
/// ```
/// use scdatapack::EntryPath;
///
/// let path = EntryPath::parse("Data\\Libs\\Foundry\\a.xml").unwrap();
/// assert_eq!(path.as_str(), "Data/Libs/Foundry/a.xml");
///
/// assert!(EntryPath::parse("../escape").is_err());
/// assert!(EntryPath::parse("/absolute").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryPath(String);

impl EntryPath {
    /// Parses and validates an entry path, normalizing `\` to `/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntryPath`] if the path is empty, absolute,
    /// over-long, contains NUL bytes, empty segments, or `.`/`..`
    /// segments.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = if raw.contains('\\') {
            raw.replace('\\', "/")
        } else {
            raw.to_string()
        };
        Self::validate(&normalized)?;
        Ok(Self(normalized))
    }

    fn validate(s: &str) -> Result<()> {
        if s.is_empty() {
            return Err(Error::InvalidEntryPath("empty path".into()));
        }
        if s.contains('\0') {
            return Err(Error::InvalidEntryPath("contains NUL byte".into()));
        }
        if s.len() > MAX_PATH_LENGTH {
            return Err(Error::InvalidEntryPath(format!(
                "path exceeds maximum length of {} bytes",
                MAX_PATH_LENGTH
            )));
        }
        if s.starts_with('/') {
            return Err(Error::InvalidEntryPath(format!(
                "absolute path not allowed: {}",
                s
            )));
        }
        // Windows drive prefix ("C:/...", "D:...")
        if s.len() >= 2 && s.as_bytes()[1] == b':' {
            return Err(Error::InvalidEntryPath(format!(
                "drive-prefixed path not allowed: {}",
                s
            )));
        }
        if s.ends_with('/') {
            return Err(Error::InvalidEntryPath(format!(
                "trailing slash not allowed: {}",
                s
            )));
        }

        for segment in s.split('/') {
            if segment.is_empty() {
                return Err(Error::InvalidEntryPath(format!(
                    "empty segment (consecutive slashes): {}",
                    s
                )));
            }
            if segment == "." || segment == ".." {
                return Err(Error::InvalidEntryPath(format!(
                    "'{}' segment not allowed (path traversal): {}",
                    segment, s
                )));
            }
        }

        Ok(())
    }

    /// Returns the path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-sensitive byte-prefix test against `prefix`.
    ///
    /// The empty prefix matches every path.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.as_bytes().starts_with(prefix.as_bytes())
    }

    /// Returns the file name (last segment) of this path.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Returns the file extension, if any.
    ///
    /// Dotfiles such as `.version` have no extension.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => None,
            Some(pos) => Some(&name[pos + 1..]),
        }
    }

    /// Returns the parent directory path, or `None` for a single segment.
    pub fn parent(&self) -> Option<&str> {
        self.0.rfind('/').map(|idx| &self.0[..idx])
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EntryPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntryPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let p = EntryPath::parse("Data/Libs/Foundry/a.xml").unwrap();
        assert_eq!(p.as_str(), "Data/Libs/Foundry/a.xml");
        assert_eq!(p.file_name(), "a.xml");
        assert_eq!(p.extension(), Some("xml"));
        assert_eq!(p.parent(), Some("Data/Libs/Foundry"));
    }

    #[test]
    fn test_backslash_normalization() {
        let p = EntryPath::parse("Data\\Localization\\english\\global.ini").unwrap();
        assert_eq!(p.as_str(), "Data/Localization/english/global.ini");
    }

    #[test]
    fn test_rejects_traversal() {
        assert!(EntryPath::parse("../secret").is_err());
        assert!(EntryPath::parse("Data/../../../etc/passwd").is_err());
        assert!(EntryPath::parse("Data/./x").is_err());
        assert!(EntryPath::parse("..\\up").is_err());
    }

    #[test]
    fn test_rejects_absolute() {
        assert!(EntryPath::parse("/etc/passwd").is_err());
        assert!(EntryPath::parse("C:/Windows/system32").is_err());
        assert!(EntryPath::parse("C:\\Windows").is_err());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(EntryPath::parse("").is_err());
        assert!(EntryPath::parse("a//b").is_err());
        assert!(EntryPath::parse("dir/").is_err());
        assert!(EntryPath::parse("a\0b").is_err());
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        let p = EntryPath::parse("Data/Libs/Foundry/a.xml").unwrap();
        assert!(p.starts_with("Data/Libs/"));
        assert!(!p.starts_with("data/libs/"));
        assert!(p.starts_with(""));
    }

    #[test]
    fn test_extension_edge_cases() {
        assert_eq!(EntryPath::parse("dir/file").unwrap().extension(), None);
        assert_eq!(EntryPath::parse(".version").unwrap().extension(), None);
        assert_eq!(
            EntryPath::parse("a/b.tar.gz").unwrap().extension(),
            Some("gz")
        );
    }

    #[test]
    fn test_single_segment_has_no_parent() {
        assert_eq!(EntryPath::parse("global.ini").unwrap().parent(), None);
    }
}
