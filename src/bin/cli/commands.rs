//! Subcommand handlers.

use clap::CommandFactory;

use scdatapack::{
    Archive, ExtractOptions, Pipeline, PipelineConfig, PrefixFilter, Result, RunOptions,
};

use crate::progress::CliProgress;
use crate::{exit_codes, output, Cli, Commands};

/// Runs the selected subcommand and returns the process exit code.
pub fn dispatch(cli: Cli) -> Result<u8> {
    match cli.command {
        Commands::List { ref archive } => {
            let archive = Archive::open_path(archive)?;
            output::print_listing(archive.entries(), archive.total_size(), cli.format);
            Ok(exit_codes::SUCCESS)
        }

        Commands::Select {
            ref archive,
            ref prefixes,
        } => {
            let archive = Archive::open_path(archive)?;
            let filter = PrefixFilter::new(prefixes.iter().cloned());
            let selection = archive.select(&filter);
            output::print_selection(&selection, prefixes, cli.format);
            Ok(exit_codes::SUCCESS)
        }

        Commands::Extract {
            ref archive,
            ref output,
            ref prefixes,
            overwrite,
            preserve_mtime,
        } => {
            let mut archive = Archive::open_path(archive)?;
            let filter = if prefixes.is_empty() {
                // No prefixes means everything: the empty-string prefix
                // matches every path.
                PrefixFilter::new([""])
            } else {
                PrefixFilter::new(prefixes.iter().cloned())
            };

            let progress = CliProgress::new(cli.quiet);
            let bar = progress.bar_handle();
            let options = ExtractOptions::new()
                .overwrite(overwrite.into())
                .preserve_mtime(preserve_mtime)
                .progress(progress);

            let result = archive.extract(output, &filter, &options);
            bar.finish_and_clear();
            let result = result?;

            output::print_extract_summary(&result, cli.format);
            if result.is_ok() {
                Ok(exit_codes::SUCCESS)
            } else {
                Ok(exit_codes::PARTIAL)
            }
        }

        Commands::Run { skip_extract, only } => {
            let config = PipelineConfig::from_env()?;
            let pipeline = Pipeline::from_config(config)?;
            let summary = pipeline.run(&RunOptions { skip_extract, only })?;
            output::print_run_summary(&summary, cli.format);
            let partial = matches!(&summary.extraction, Ok(r) if !r.is_ok());
            if partial {
                Ok(exit_codes::PARTIAL)
            } else {
                Ok(exit_codes::SUCCESS)
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}
