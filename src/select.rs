//! Entry selection: prefix filters and the selector seam.
//!
//! Selection is a pure filter over the manifest: it never touches the
//! container, is deterministic, and preserves the manifest's entry order.
//! An empty result is a valid outcome, not an error.

use crate::archive::{Archive, ArchiveEntry};

/// A selector for filtering manifest entries.
///
/// # Built-in implementations
///
/// | Type | Behavior |
/// |------|----------|
/// | `()` | Selects all entries |
/// | [`SelectAll`] | Selects all entries (explicit) |
/// | `&[&str]` | Selects entries matching any of the exact paths |
/// | `Fn(&ArchiveEntry) -> bool` | Custom predicate |
/// | [`PrefixFilter`] | Path-prefix membership test |
pub trait EntrySelector {
    /// Returns true if the entry should be selected.
    fn select(&self, entry: &ArchiveEntry) -> bool;
}

/// Selector that matches all entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectAll;

impl EntrySelector for SelectAll {
    fn select(&self, _entry: &ArchiveEntry) -> bool {
        true
    }
}

impl EntrySelector for () {
    fn select(&self, _entry: &ArchiveEntry) -> bool {
        true
    }
}

impl<F: Fn(&ArchiveEntry) -> bool> EntrySelector for F {
    fn select(&self, entry: &ArchiveEntry) -> bool {
        self(entry)
    }
}

impl EntrySelector for &[&str] {
    fn select(&self, entry: &ArchiveEntry) -> bool {
        self.iter().any(|name| entry.path == *name)
    }
}

/// An ordered set of path prefixes.
///
/// An entry matches if its path starts with at least one prefix. The
/// match is a byte-wise, case-sensitive prefix test; prefixes keep their
/// insertion order.
///
/// Two edge cases follow directly from the prefix test:
/// - an empty filter matches nothing,
/// - an empty-string prefix matches everything.
///
/// # Example
///
/// ```
/// use scdatapack::PrefixFilter;
///
/// let filter = PrefixFilter::new(["Data/Libs/Foundry/", "Data/Localization/"]);
/// assert!(filter.matches("Data/Localization/english/global.ini"));
/// assert!(!filter.matches("Data/Textures/b.dds"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrefixFilter {
    prefixes: Vec<String>,
}

impl PrefixFilter {
    /// Creates a filter from the given prefixes, preserving order.
    pub fn new<S: Into<String>>(prefixes: impl IntoIterator<Item = S>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the configured prefixes in insertion order.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns true if no prefixes are configured.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Returns true if `path` starts with any configured prefix.
    pub fn matches(&self, path: &str) -> bool {
        self.prefixes
            .iter()
            .any(|p| path.as_bytes().starts_with(p.as_bytes()))
    }
}

impl EntrySelector for PrefixFilter {
    fn select(&self, entry: &ArchiveEntry) -> bool {
        self.matches(entry.path.as_str())
    }
}

impl EntrySelector for &PrefixFilter {
    fn select(&self, entry: &ArchiveEntry) -> bool {
        self.matches(entry.path.as_str())
    }
}

/// The matched subset of a manifest, in original order.
///
/// Produced by [`select_entries`] or [`Archive::select`]; carries the
/// count and total size used for reporting to the invoking process.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Matched entries, in manifest order.
    pub entries: Vec<ArchiveEntry>,
}

impl Selection {
    /// Number of matched entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total uncompressed size of the matched file entries.
    pub fn total_size(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.is_file())
            .map(|e| e.size)
            .sum()
    }
}

/// Filters `entries` through `selector`, preserving order.
///
/// Returns exactly the entries the selector accepts: no duplicates, none
/// omitted, in the order given.
pub fn select_entries<'a>(
    entries: impl IntoIterator<Item = &'a ArchiveEntry>,
    selector: &impl EntrySelector,
) -> Selection {
    Selection {
        entries: entries
            .into_iter()
            .filter(|e| selector.select(e))
            .cloned()
            .collect(),
    }
}

impl<R: std::io::Read + std::io::Seek> Archive<R> {
    /// Filters the manifest through `selector` without extracting.
    ///
    /// Used for dry runs and for reporting what an extraction would
    /// touch.
    pub fn select(&self, selector: &impl EntrySelector) -> Selection {
        select_entries(self.entries.iter(), selector)
    }
}
