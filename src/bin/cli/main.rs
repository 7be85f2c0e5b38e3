//! Command-line interface for the extraction pipeline.

mod commands;
mod exit_codes;
mod output;
mod progress;

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use scdatapack::OverwritePolicy;

#[derive(Parser)]
#[command(
    name = "scdatapack",
    version,
    about = "Selective game-data extraction from zip-compatible archives",
    propagate_version = true
)]
struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "human")]
    format: Format,

    /// Suppress progress output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable tables and summaries.
    Human,
    /// One JSON document on stdout.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OverwriteMode {
    /// Fail on existing files.
    Error,
    /// Skip existing files.
    Skip,
    /// Replace existing files.
    Overwrite,
}

impl From<OverwriteMode> for OverwritePolicy {
    fn from(mode: OverwriteMode) -> Self {
        match mode {
            OverwriteMode::Error => OverwritePolicy::Error,
            OverwriteMode::Skip => OverwritePolicy::Skip,
            OverwriteMode::Overwrite => OverwritePolicy::Overwrite,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the archive's entries.
    List {
        /// Path to the archive file.
        archive: String,
    },

    /// Show which entries a prefix filter would select, without writing.
    Select {
        /// Path to the archive file.
        archive: String,

        /// Path prefix to match (repeatable; matched case-sensitively).
        #[arg(short, long = "prefix", required = true)]
        prefixes: Vec<String>,
    },

    /// Extract entries matching the given prefixes.
    Extract {
        /// Path to the archive file.
        archive: String,

        /// Destination directory.
        #[arg(short, long, default_value = "./Data_Extraction")]
        output: String,

        /// Path prefix to match (repeatable; default: everything).
        #[arg(short, long = "prefix")]
        prefixes: Vec<String>,

        /// How to handle files that already exist.
        #[arg(long, value_enum, default_value = "overwrite")]
        overwrite: OverwriteMode,

        /// Restore archived modification times.
        #[arg(long)]
        preserve_mtime: bool,
    },

    /// Run the full pipeline from environment configuration.
    Run {
        /// Skip extraction and go straight to report steps.
        #[arg(long)]
        skip_extract: bool,

        /// Run only the named report step (implies skipping extraction).
        #[arg(long, value_name = "STEP")]
        only: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match commands::dispatch(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {}", console::style("error:").red().bold(), e);
            ExitCode::from(exit_codes::for_error(&e))
        }
    }
}
