pub mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::process::exit;

use crate::application::use_cases::SyncCommand;
use crate::common::error::PuppetError;
use crate::common::logging::LogConfig;
use crate::presentation::ui::{helpers, DisplayHelper};

use commands::{
    BranchesCommand, CommandContext, ForeachCommand, GetCommand, RemoveCommand, RunCommand,
    SaveCommand,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_DATE"),
    ")"
);

/// puppet - Run commands across the git repositories of a directory
#[derive(Parser)]
#[command(name = "puppet")]
#[command(about = "Run commands across the git repositories of a directory and snapshot their branches")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<String>,

    /// Directory holding configs.json (defaults to ~/.puppet)
    #[arg(long, global = true, env = "PUPPET_HOME")]
    pub config_dir: Option<PathBuf>,

    /// Kill a repository command after this many seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a command to all sub repos. Wrap the command in quotes
    #[command(visible_alias = "co")]
    Command {
        /// Command to run in every repository
        command: String,

        /// Only run in these repositories
        #[arg(short, long, num_args = 1..)]
        filter: Option<Vec<String>>,
    },

    /// Stash, pull the current branch and reinstall dependencies in every repo
    #[command(visible_alias = "up")]
    Update {
        /// Only update these repositories
        #[arg(short, long, num_args = 1..)]
        filter: Option<Vec<String>>,

        /// Command run after pulling (defaults to `npm i`)
        #[arg(long, conflicts_with = "no_deps")]
        deps: Option<String>,

        /// Skip the dependency command
        #[arg(long)]
        no_deps: bool,
    },

    /// Show the current branch of every repo
    #[command(visible_alias = "br")]
    Branches {
        /// Only show these repositories
        #[arg(short, long, num_args = 1..)]
        filter: Option<Vec<String>>,
    },

    /// Save the current branches under a name
    #[command(visible_alias = "sv")]
    Save {
        /// Configuration name
        name: String,

        /// Only save these repositories
        #[arg(short, long, num_args = 1..)]
        filter: Option<Vec<String>>,
    },

    /// Remove a saved configuration
    #[command(visible_alias = "rm")]
    Remove {
        /// Configuration name
        name: String,
    },

    /// Check out the branches of a saved configuration
    #[command(visible_alias = "rn")]
    Run {
        /// Configuration name
        name: String,
    },

    /// List saved configurations or show one
    #[command(visible_alias = "gt")]
    Get {
        /// Configuration name
        name: Option<String>,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig::new(self.cli.verbose)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let display = helpers::auto_display(self.cli.no_color);
        colored::control::set_override(display.use_color);

        match self.handle_command(display).await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                let missing_store = e
                    .downcast_ref::<PuppetError>()
                    .map_or(false, PuppetError::is_config_not_found);
                if missing_store {
                    eprintln!("Save a configuration with `puppet save <name>` first");
                }
                exit(1);
            }
        }
    }

    async fn handle_command(&self, display: DisplayHelper) -> anyhow::Result<()> {
        // Change directory if specified
        if let Some(ref dir) = self.cli.directory {
            env::set_current_dir(dir)
                .with_context(|| format!("Cannot change directory to {}", dir))?;
        }

        let ctx = CommandContext::new(
            env::current_dir()?,
            self.cli.config_dir.clone(),
            display,
            self.cli.verbose,
            self.cli.timeout,
        );

        match &self.cli.command {
            Commands::Command { command, filter } => {
                ForeachCommand::command(command.clone(), filter.clone())
                    .execute(&ctx)
                    .await
            }
            Commands::Update {
                filter,
                deps,
                no_deps,
            } => {
                let sync = if *no_deps {
                    SyncCommand::default().with_dependency_command(None)
                } else if let Some(deps) = deps {
                    SyncCommand::default().with_dependency_command(Some(deps.clone()))
                } else {
                    SyncCommand::default()
                };
                ForeachCommand::update(filter.clone(), sync)
                    .execute(&ctx)
                    .await
            }
            Commands::Branches { filter } => {
                BranchesCommand::new(filter.clone()).execute(&ctx).await
            }
            Commands::Save { name, filter } => {
                SaveCommand::new(name.clone(), filter.clone())
                    .execute(&ctx)
                    .await
            }
            Commands::Remove { name } => RemoveCommand::new(name.clone()).execute(&ctx).await,
            Commands::Run { name } => RunCommand::new(name.clone()).execute(&ctx).await,
            Commands::Get { name } => GetCommand::new(name.clone()).execute(&ctx).await,
        }
    }
}
