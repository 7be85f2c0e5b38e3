//! Shared test fixtures: build small zip-compatible archives in memory.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Builder for in-memory test archives.
#[derive(Default)]
pub struct ArchiveBuilder {
    files: Vec<(String, Vec<u8>, Option<zip::DateTime>)>,
    directories: Vec<String>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file entry with the given contents.
    pub fn file(mut self, path: &str, contents: &[u8]) -> Self {
        self.files.push((path.to_string(), contents.to_vec(), None));
        self
    }

    /// Adds a file entry with an explicit archived modification time.
    #[allow(dead_code)]
    pub fn file_with_mtime(mut self, path: &str, contents: &[u8], mtime: zip::DateTime) -> Self {
        self.files
            .push((path.to_string(), contents.to_vec(), Some(mtime)));
        self
    }

    /// Adds an explicit directory entry.
    #[allow(dead_code)]
    pub fn directory(mut self, path: &str) -> Self {
        self.directories.push(path.to_string());
        self
    }

    /// Serializes the archive and returns a seekable reader over it.
    pub fn build(self) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        for dir in &self.directories {
            writer.add_directory(dir, options).unwrap();
        }
        for (path, contents, mtime) in &self.files {
            let options = match mtime {
                Some(dt) => options.last_modified_time(*dt),
                None => options,
            };
            writer.start_file(path, options).unwrap();
            writer.write_all(contents).unwrap();
        }

        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    /// Serializes the archive to a file on disk.
    #[allow(dead_code)]
    pub fn write_to(self, path: &std::path::Path) -> std::io::Result<()> {
        let cursor = self.build();
        std::fs::write(path, cursor.into_inner())
    }
}

/// A small archive shaped like a game data index: a few record files
/// under filterable prefixes plus unrelated asset entries.
#[allow(dead_code)]
pub fn sample_archive() -> Cursor<Vec<u8>> {
    ArchiveBuilder::new()
        .file("Data/Libs/Foundry/Records/Entities/Spaceships/aegis_gladius.xml", b"<ship/>")
        .file("Data/Textures/ui/button.dds", b"not a real texture")
        .file("Data/Localization/english/global.ini", b"greeting=hello")
        .file("Data/Libs/Foundry/Records/Damage/hull.xml", b"<damage/>")
        .file("Engine/config.cfg", b"r_width=1920")
        .build()
}
