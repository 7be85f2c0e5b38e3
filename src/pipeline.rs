//! Pipeline orchestration: extraction followed by report steps.
//!
//! Mirrors a one-shot batch run: open the archive, extract the
//! configured prefixes unless the output tree is already current, then
//! run each report generator as an external command. Steps run in order
//! and a failing step aborts the run with its name and exit code.

use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::process::Command;
use std::time::{Duration, Instant};

use crate::archive::Archive;
use crate::config::{PipelineConfig, ENV_OUTPUT, ENV_REPORTS};
use crate::options::{ExtractOptions, ExtractResult, OverwritePolicy};
use crate::version::{detect_build_version, VersionStamp};
use crate::{Error, Result};

/// File name for the per-entry extraction failure log.
pub const ERROR_LOG_FILE: &str = "extraction_errors.log";

/// One report-generation step, run as an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStep {
    /// Step name used in logs, summaries, and `--only`.
    pub name: String,
    /// Program followed by its arguments.
    pub command: Vec<String>,
}

impl ReportStep {
    /// Parses a `name=command args...` specification.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if either side of the `=` is empty.
    pub fn parse(raw: &str) -> Result<Self> {
        let (name, command) = raw
            .split_once('=')
            .ok_or_else(|| Error::Config(format!("report step '{}' is not name=command", raw)))?;
        let name = name.trim();
        let command: Vec<String> = command.split_whitespace().map(str::to_string).collect();
        if name.is_empty() || command.is_empty() {
            return Err(Error::Config(format!(
                "report step '{}' needs both a name and a command",
                raw
            )));
        }
        Ok(Self {
            name: name.to_string(),
            command,
        })
    }
}

/// Controls which pipeline stages run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Skip extraction and go straight to the report steps.
    pub skip_extract: bool,
    /// Run only the named report step. Extraction is skipped too: a
    /// single-report rerun works against the already-extracted tree.
    pub only: Option<String>,
}

/// Why the extraction stage did not write anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionSkipped {
    /// `--skip-extract` was requested.
    Requested,
    /// The `.version` stamp already matches the detected build.
    AlreadyCurrent,
}

/// Timing for one completed pipeline step.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Step name.
    pub name: String,
    /// Wall-clock duration.
    pub elapsed: Duration,
}

/// Summary of a full pipeline run.
#[derive(Debug)]
pub struct RunSummary {
    /// Detected build version.
    pub version: String,
    /// Extraction statistics, or the reason extraction was skipped.
    pub extraction: std::result::Result<ExtractResult, ExtractionSkipped>,
    /// Completed report steps in run order.
    pub steps: Vec<StepReport>,
}

/// The extraction-and-reports pipeline.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    report_steps: Vec<ReportStep>,
}

impl Pipeline {
    /// Builds a pipeline from resolved configuration, parsing its report
    /// step specifications.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        let report_steps = config
            .report_steps
            .iter()
            .map(|raw| ReportStep::parse(raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            config,
            report_steps,
        })
    }

    /// Returns the resolved configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the pipeline: extraction (unless skipped or already
    /// current), then the report steps in order.
    ///
    /// # Errors
    ///
    /// Returns the first archive-level or step-level error. Per-entry
    /// extraction failures do not abort the run; they are appended to
    /// `<logs>/extraction_errors.log` and reported in the summary. The
    /// version stamp is recorded only when extraction completes with
    /// zero failures.
    pub fn run(&self, options: &RunOptions) -> Result<RunSummary> {
        let version = detect_build_version(&self.config.archive_path);
        log::info!("pipeline run for build {}", version);

        let extraction = if options.skip_extract || options.only.is_some() {
            Err(ExtractionSkipped::Requested)
        } else {
            self.run_extraction(&version)?
        };

        let mut steps = Vec::new();
        for step in &self.report_steps {
            if let Some(only) = &options.only {
                if step.name != *only {
                    log::debug!("skipping report step {}", step.name);
                    continue;
                }
            }
            let started = Instant::now();
            self.run_step(step)?;
            let elapsed = started.elapsed();
            log::info!("step {} finished in {:.1?}", step.name, elapsed);
            steps.push(StepReport {
                name: step.name.clone(),
                elapsed,
            });
        }

        if let Some(only) = &options.only {
            if !steps.iter().any(|s| s.name == *only) {
                return Err(Error::Config(format!("no report step named '{}'", only)));
            }
        }

        Ok(RunSummary {
            version,
            extraction,
            steps,
        })
    }

    fn run_extraction(
        &self,
        version: &str,
    ) -> Result<std::result::Result<ExtractResult, ExtractionSkipped>> {
        let stamp = VersionStamp::new(&self.config.output_dir);
        if stamp.matches(version) {
            log::info!("build {} already extracted, skipping", version);
            return Ok(Err(ExtractionSkipped::AlreadyCurrent));
        }

        let mut archive = Archive::open_path(&self.config.archive_path)?;
        let extract_options = ExtractOptions::new()
            .overwrite(OverwritePolicy::Overwrite)
            .preserve_mtime(true);
        let result = archive.extract(
            &self.config.output_dir,
            &self.config.prefixes,
            &extract_options,
        )?;

        if !result.failures.is_empty() {
            self.append_error_log(&result)?;
        }
        if result.is_ok() {
            stamp.record(version)?;
        } else {
            log::warn!(
                "{} entries failed; version stamp not recorded",
                result.entries_failed
            );
        }

        Ok(Ok(result))
    }

    fn append_error_log(&self, result: &ExtractResult) -> Result<()> {
        fs::create_dir_all(&self.config.logs_dir)?;
        let log_path = self.config.logs_dir.join(ERROR_LOG_FILE);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        for (path, reason) in &result.failures {
            writeln!(file, "{}\t{}", path, reason)?;
        }
        log::warn!(
            "{} extraction failures appended to {}",
            result.failures.len(),
            log_path.display()
        );
        Ok(())
    }

    fn run_step(&self, step: &ReportStep) -> Result<()> {
        fs::create_dir_all(&self.config.reports_dir)?;

        let status = Command::new(&step.command[0])
            .args(&step.command[1..])
            .env(ENV_OUTPUT, &self.config.output_dir)
            .env(ENV_REPORTS, &self.config.reports_dir)
            .status()?;

        if !status.success() {
            return Err(Error::StepFailed {
                name: step.name.clone(),
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_step_parse() {
        let step = ReportStep::parse("ships=gen-ships --html --out reports").unwrap();
        assert_eq!(step.name, "ships");
        assert_eq!(step.command, vec!["gen-ships", "--html", "--out", "reports"]);
    }

    #[test]
    fn test_report_step_parse_rejects_malformed() {
        assert!(ReportStep::parse("no-equals-sign").is_err());
        assert!(ReportStep::parse("=command").is_err());
        assert!(ReportStep::parse("name=").is_err());
    }

    #[test]
    fn test_run_options_default() {
        let opts = RunOptions::default();
        assert!(!opts.skip_extract);
        assert!(opts.only.is_none());
    }
}
