//! Archive opening and manifest listing.
//!
//! [`Archive`] wraps a zip-compatible game archive and builds its
//! manifest once at open time. The manifest preserves the container's
//! entry order; selection and extraction both operate over it.
//!
//! The container format itself (central directory layout, compression
//! methods, CRC validation) is delegated to the `zip` crate.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::{EntryPath, Error, Result};

/// Upper bound on the buffer preallocated from an entry's declared size.
const MAX_PREALLOC: u64 = 1 << 20;

/// A single entry in the archive manifest.
///
/// Entries are immutable and enumerated once per run when the archive is
/// opened. `index` ties the entry back to its slot in the container's
/// central directory.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Normalized path within the archive, relative to the archive root.
    pub path: EntryPath,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Compressed size in bytes as stored in the container.
    pub compressed_size: u64,
    /// Whether this entry is a directory marker.
    pub is_directory: bool,
    /// Modification time as unix seconds, when the container stores one.
    pub modification_time: Option<i64>,
    /// Index in the container's central directory.
    pub(crate) index: usize,
}

impl ArchiveEntry {
    /// Creates a synthetic manifest entry.
    ///
    /// Entries are normally produced by [`Archive::open`]; this
    /// constructor exists for building manifests in tests and for
    /// callers that filter listings obtained elsewhere.
    pub fn new(path: EntryPath, size: u64) -> Self {
        Self {
            path,
            size,
            compressed_size: size,
            is_directory: false,
            modification_time: None,
            index: 0,
        }
    }

    /// Returns the file name (last path segment).
    pub fn name(&self) -> &str {
        self.path.file_name()
    }

    /// Returns true if this is a file (not a directory marker).
    pub fn is_file(&self) -> bool {
        !self.is_directory
    }
}

/// A reader over a zip-compatible game archive.
///
/// # Example
///
/// ```rust,no_run
/// use scdatapack::{Archive, ExtractOptions, PrefixFilter, Result};
///
/// fn main() -> Result<()> {
///     let mut archive = Archive::open_path("Data.p4k")?;
///
///     for entry in archive.entries() {
///         println!("{}: {} bytes", entry.path, entry.size);
///     }
///
///     let filter = PrefixFilter::new(["Data/Localization/"]);
///     archive.extract("./Data_Extraction", &filter, &ExtractOptions::default())?;
///     Ok(())
/// }
/// ```
pub struct Archive<R> {
    pub(crate) container: zip::ZipArchive<R>,
    pub(crate) entries: Vec<ArchiveEntry>,
}

impl Archive<BufReader<File>> {
    /// Opens an archive from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Container`] if it is not a valid zip-compatible archive.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::open(BufReader::new(file))
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Opens an archive from any seekable reader and lists its entries.
    ///
    /// Listing happens once, here. Entry paths are normalized and
    /// validated; a listing containing an unsafe path fails with
    /// [`Error::InvalidEntryPath`] rather than being partially accepted.
    pub fn open(reader: R) -> Result<Self> {
        let mut container = zip::ZipArchive::new(reader)?;

        let mut entries = Vec::with_capacity(container.len());
        for index in 0..container.len() {
            let file = container.by_index_raw(index)?;
            let raw_name = file.name();

            // Directory markers carry a trailing slash in zip listings.
            let is_directory = file.is_dir();
            let trimmed = raw_name.trim_end_matches(['/', '\\']);
            if trimmed.is_empty() {
                return Err(Error::InvalidEntryPath(format!(
                    "entry {} has an empty name",
                    index
                )));
            }

            let path = EntryPath::parse(trimmed)?;
            let modification_time = file.last_modified().and_then(datetime_to_unix);

            entries.push(ArchiveEntry {
                path,
                size: file.size(),
                compressed_size: file.compressed_size(),
                is_directory,
                modification_time,
                index,
            });
        }

        log::debug!("listed {} entries", entries.len());
        Ok(Self { container, entries })
    }

    /// Returns the manifest in the container's entry order.
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Returns the number of entries in the manifest.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the total uncompressed size of all file entries.
    pub fn total_size(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.is_file())
            .map(|e| e.size)
            .sum()
    }

    /// Reads a single entry into memory by its archive path.
    ///
    /// The lookup is exact and case-sensitive against the normalized
    /// path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if no entry has the given path.
    pub fn read_to_vec(&mut self, path: &str) -> Result<Vec<u8>> {
        let index = self
            .entries
            .iter()
            .position(|e| e.path == path)
            .ok_or_else(|| Error::EntryNotFound(path.to_string()))?;

        let entry = &self.entries[index];
        if entry.is_directory {
            return Err(Error::EntryNotFound(format!("{} is a directory", path)));
        }

        // The declared size comes from the central directory and is
        // untrusted; cap the preallocation and let the read grow past it.
        let mut data = Vec::with_capacity(entry.size.min(MAX_PREALLOC) as usize);
        let mut file = self.container.by_index(entry.index)?;
        file.read_to_end(&mut data)?;
        Ok(data)
    }
}

/// Converts a container datetime (MS-DOS style, local calendar fields)
/// to unix seconds.
///
/// Returns `None` for field combinations that do not form a real date.
pub(crate) fn datetime_to_unix(dt: zip::DateTime) -> Option<i64> {
    let (year, month, day) = (dt.year() as i64, dt.month() as i64, dt.day() as i64);
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    let days = days_from_civil(year, month, day);
    Some(days * 86_400 + dt.hour() as i64 * 3_600 + dt.minute() as i64 * 60 + dt.second() as i64)
}

/// Days since 1970-01-01 for a proleptic Gregorian civil date.
fn days_from_civil(y: i64, m: i64, d: i64) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_from_civil_epoch() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1970, 1, 2), 1);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
    }

    #[test]
    fn test_days_from_civil_known_dates() {
        // 2000-03-01: leap-century boundary
        assert_eq!(days_from_civil(2000, 3, 1), 11017);
        // 2024-01-01
        assert_eq!(days_from_civil(2024, 1, 1), 19723);
    }

    #[test]
    fn test_entry_name_helpers() {
        let entry = ArchiveEntry::new(
            EntryPath::parse("Data/Localization/english/global.ini").unwrap(),
            42,
        );
        assert_eq!(entry.name(), "global.ini");
        assert!(entry.is_file());
    }
}
