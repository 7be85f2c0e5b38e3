//! Selective extraction pipeline for zip-compatible game archives.
//!
//! `scdatapack` opens a game archive (such as Star Citizen's `Data.p4k`),
//! lists its entries once, filters the listing by configured path
//! prefixes, and extracts only the matching entries to a destination
//! tree. A thin pipeline layer adds environment-driven configuration,
//! version-stamp gating, and orchestration of report generators as
//! external commands.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use scdatapack::{Archive, ExtractOptions, PrefixFilter, Result};
//!
//! fn main() -> Result<()> {
//!     let mut archive = Archive::open_path("Data.p4k")?;
//!
//!     let filter = PrefixFilter::new([
//!         "Data/Localization/",
//!         "Data/Libs/Foundry/Records/Entities/Spaceships/",
//!     ]);
//!
//!     let selection = archive.select(&filter);
//!     println!("{} entries, {} bytes", selection.count(), selection.total_size());
//!
//!     archive.extract("./Data_Extraction", &filter, &ExtractOptions::default())?;
//!     Ok(())
//! }
//! ```
//!
//! # Pipeline
//!
//! ```rust,no_run
//! use scdatapack::{Pipeline, PipelineConfig, RunOptions, Result};
//!
//! fn main() -> Result<()> {
//!     let config = PipelineConfig::from_env()?;
//!     let pipeline = Pipeline::from_config(config)?;
//!     let summary = pipeline.run(&RunOptions::default())?;
//!     println!("build {}", summary.version);
//!     Ok(())
//! }
//! ```
//!
//! # Design notes
//!
//! - Selection is deterministic and order-preserving: the matched subset
//!   comes back in the archive's own entry order.
//! - Extraction is sequential and non-transactional; per-entry failures
//!   are collected, not fatal.
//! - Entry paths are validated at listing time, before anything touches
//!   the filesystem.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod archive;
mod config;
mod entry_path;
mod error;
mod extract;
mod options;
mod pipeline;
mod progress;
mod select;
mod version;

pub use archive::{Archive, ArchiveEntry};
pub use config::{
    PipelineConfig, DEFAULT_PREFIXES, ENV_ARCHIVE, ENV_LOGS, ENV_OUTPUT, ENV_PREFIXES,
    ENV_REPORTS, ENV_REPORT_STEPS,
};
pub use entry_path::EntryPath;
pub use error::{Error, Result};
pub use options::{ExtractOptions, ExtractResult, OverwritePolicy};
pub use pipeline::{
    ExtractionSkipped, Pipeline, ReportStep, RunOptions, RunSummary, StepReport, ERROR_LOG_FILE,
};
pub use progress::{progress_fn, NoProgress, ProgressReporter};
pub use select::{select_entries, EntrySelector, PrefixFilter, SelectAll, Selection};
pub use version::{detect_build_version, VersionStamp, STAMP_FILE, UNKNOWN_VERSION};

/// Buffer size for streaming entry bytes to disk.
pub(crate) const READ_BUFFER_SIZE: usize = 8192;
