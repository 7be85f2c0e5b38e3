//! Pipeline configuration from environment variables.
//!
//! All paths come from the process environment, optionally seeded from a
//! `.env` file in the working directory. Only the archive path is
//! required; output, report, and log directories default to locations
//! derived from it, so a bare `SC_P4K_PATH=.../Data.p4k` is a complete
//! configuration.

use std::path::{Path, PathBuf};

use crate::select::PrefixFilter;
use crate::{Error, Result};

/// Environment key for the archive file (required).
pub const ENV_ARCHIVE: &str = "SC_P4K_PATH";
/// Environment key for the extraction output directory.
pub const ENV_OUTPUT: &str = "SC_OUTPUT_DIR";
/// Environment key for the report output directory.
pub const ENV_REPORTS: &str = "SC_REPORTS_DIR";
/// Environment key for the log directory.
pub const ENV_LOGS: &str = "SC_LOGS_DIR";
/// Environment key overriding the default extraction prefixes
/// (comma-separated).
pub const ENV_PREFIXES: &str = "SC_EXTRACT_PREFIXES";
/// Environment key listing report steps (`name=command`, separated by
/// `;`).
pub const ENV_REPORT_STEPS: &str = "SC_REPORT_STEPS";

/// Record prefixes extracted when [`ENV_PREFIXES`] is not set.
///
/// Covers localization plus the record families the reports consume.
pub const DEFAULT_PREFIXES: &[&str] = &[
    "Data/Localization/",
    "Data/Libs/Foundry/Records/Entities/Spaceships/",
    "Data/Libs/Foundry/Records/Entities/SCItem/",
    "Data/Libs/Foundry/Records/SCItemManufacturer/",
    "Data/Libs/Foundry/Records/Damage/",
    "Data/Libs/Foundry/Records/AmmoParams/",
];

/// Resolved pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path to the game archive.
    pub archive_path: PathBuf,
    /// Destination root for extracted entries.
    pub output_dir: PathBuf,
    /// Directory where report steps write their output.
    pub reports_dir: PathBuf,
    /// Directory for pipeline log files.
    pub logs_dir: PathBuf,
    /// Prefix filter applied during extraction.
    pub prefixes: PrefixFilter,
    /// Report steps in run order, as `name=command` strings.
    pub report_steps: Vec<String>,
}

impl PipelineConfig {
    /// Resolves configuration from the process environment, loading a
    /// `.env` file first if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if [`ENV_ARCHIVE`] is missing or empty.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine; a malformed one is not.
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(Error::Config(format!("failed to load .env: {}", e))),
        }
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    ///
    /// Separated from [`from_env`](Self::from_env) so resolution can be
    /// tested without mutating process-wide environment state.
    pub fn resolve(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let archive_path = match get(ENV_ARCHIVE) {
            Some(v) if !v.trim().is_empty() => PathBuf::from(v),
            _ => {
                return Err(Error::Config(format!(
                    "{} must point to the game archive",
                    ENV_ARCHIVE
                )));
            }
        };

        let archive_dir = archive_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let output_dir = get(ENV_OUTPUT)
            .map(PathBuf::from)
            .unwrap_or_else(|| archive_dir.join("Data_Extraction"));
        let reports_dir = get(ENV_REPORTS)
            .map(PathBuf::from)
            .unwrap_or_else(|| archive_dir.join("HTML"));
        let logs_dir = get(ENV_LOGS)
            .map(PathBuf::from)
            .unwrap_or_else(|| output_dir.join("logs"));

        let prefixes = match get(ENV_PREFIXES) {
            Some(raw) => PrefixFilter::new(split_list(&raw, ',')),
            None => PrefixFilter::new(DEFAULT_PREFIXES.iter().copied()),
        };

        let report_steps = get(ENV_REPORT_STEPS)
            .map(|raw| split_list(&raw, ';'))
            .unwrap_or_default();

        Ok(Self {
            archive_path,
            output_dir,
            reports_dir,
            logs_dir,
            prefixes,
            report_steps,
        })
    }
}

fn split_list(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_requires_archive_path() {
        let err = PipelineConfig::resolve(env(&[])).unwrap_err();
        assert!(err.to_string().contains(ENV_ARCHIVE));

        let err = PipelineConfig::resolve(env(&[(ENV_ARCHIVE, "  ")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_defaults_are_archive_siblings() {
        let config =
            PipelineConfig::resolve(env(&[(ENV_ARCHIVE, "/games/sc/LIVE/Data.p4k")])).unwrap();
        assert_eq!(config.output_dir, Path::new("/games/sc/LIVE/Data_Extraction"));
        assert_eq!(config.reports_dir, Path::new("/games/sc/LIVE/HTML"));
        assert_eq!(
            config.logs_dir,
            Path::new("/games/sc/LIVE/Data_Extraction/logs")
        );
        assert_eq!(config.prefixes.prefixes().len(), DEFAULT_PREFIXES.len());
    }

    #[test]
    fn test_explicit_dirs_win_over_defaults() {
        let config = PipelineConfig::resolve(env(&[
            (ENV_ARCHIVE, "/games/sc/LIVE/Data.p4k"),
            (ENV_OUTPUT, "/data/out"),
            (ENV_LOGS, "/data/logs"),
        ]))
        .unwrap();
        assert_eq!(config.output_dir, Path::new("/data/out"));
        assert_eq!(config.logs_dir, Path::new("/data/logs"));
        assert_eq!(config.reports_dir, Path::new("/games/sc/LIVE/HTML"));
    }

    #[test]
    fn test_prefix_override() {
        let config = PipelineConfig::resolve(env(&[
            (ENV_ARCHIVE, "Data.p4k"),
            (ENV_PREFIXES, "Data/Localization/, Data/Libs/"),
        ]))
        .unwrap();
        assert_eq!(
            config.prefixes.prefixes(),
            &["Data/Localization/".to_string(), "Data/Libs/".to_string()]
        );
    }

    #[test]
    fn test_report_steps_parsed_in_order() {
        let config = PipelineConfig::resolve(env(&[
            (ENV_ARCHIVE, "Data.p4k"),
            (ENV_REPORT_STEPS, "ships=gen-ships --html; items=gen-items"),
        ]))
        .unwrap();
        assert_eq!(
            config.report_steps,
            vec!["ships=gen-ships --html".to_string(), "items=gen-items".to_string()]
        );
    }

    #[test]
    fn test_bare_archive_name_defaults_to_cwd() {
        let config = PipelineConfig::resolve(env(&[(ENV_ARCHIVE, "Data.p4k")])).unwrap();
        assert_eq!(config.output_dir, Path::new("./Data_Extraction"));
    }
}
