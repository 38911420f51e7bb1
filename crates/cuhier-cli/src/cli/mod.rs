//! CLI for cuhier.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cuhier_core::config;
use cuhier_core::list_path::{MAX_LEVEL, MIN_LEVEL};
use cuhier_core::sweep::Pass;

use commands::{run_config, run_parse_list_name, run_spaces, run_sweep, RunArgs};

/// Top-level CLI for cuhier.
#[derive(Debug, Parser)]
#[command(name = "cuhier")]
#[command(
    about = "Rebuild ClickUp subtask hierarchy and task status after an import",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Sweep the configured spaces.
    Run {
        /// Which pass to run: link, status or all.
        #[arg(long, default_value_t = Pass::Status, value_name = "PASS")]
        pass: Pass,
        /// Only process the space with this label (repeatable). Default: all configured spaces.
        #[arg(long = "space", value_name = "LABEL")]
        spaces: Vec<String>,
        /// Read from ClickUp but do not update tasks or delete lists.
        #[arg(long)]
        dry_run: bool,
        /// Keep lists that the linking pass finds empty.
        #[arg(long)]
        keep_empty_lists: bool,
    },

    /// List the spaces configured in the environment.
    Spaces,

    /// Show the config file path and the effective settings.
    Config,

    /// Show how a list name is read as a task path.
    ParseListName {
        /// List name, e.g. `Area\Project\Task\`.
        name: String,
        /// Level of the task being placed.
        #[arg(
            long,
            default_value_t = 7,
            value_parser = clap::value_parser!(u32).range(i64::from(MIN_LEVEL)..=i64::from(MAX_LEVEL))
        )]
        level: u32,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run {
                pass,
                spaces,
                dry_run,
                keep_empty_lists,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let args = RunArgs {
                    pass,
                    spaces,
                    dry_run,
                    keep_empty_lists,
                };
                run_sweep(cfg, args).await?;
            }
            CliCommand::Spaces => run_spaces()?,
            CliCommand::Config => run_config()?,
            CliCommand::ParseListName { name, level } => run_parse_list_name(&name, level),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
