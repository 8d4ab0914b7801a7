use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use crate::application::use_cases::SyncCommand;
use crate::presentation::ui::TerminalProgress;

/// Handler for `command` and `update`
///
/// With no command every repository is synced to its current branch.
pub struct ForeachCommand {
    pub command: Option<String>,
    pub filter: Option<Vec<String>>,
    pub sync: SyncCommand,
}

impl ForeachCommand {
    /// Run `command` in every repository
    pub fn command(command: String, filter: Option<Vec<String>>) -> Self {
        Self {
            command: Some(command),
            filter,
            sync: SyncCommand::default(),
        }
    }

    /// Sync every repository with its remote
    pub fn update(filter: Option<Vec<String>>, sync: SyncCommand) -> Self {
        Self {
            command: None,
            filter,
            sync,
        }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let discovery = ctx.discover(self.filter.as_deref())?;
        tracing::debug!(command = ?self.command, "Resolved command");

        if discovery.is_empty() {
            return Ok(());
        }

        ctx.display.info("Running puppets...");

        let executor = ctx.executor(self.sync.clone());
        let mut progress = TerminalProgress::new(ctx.display.create_progress_bar());
        let result = executor
            .run_batch(self.command.as_deref(), &discovery.repos, &mut progress)
            .await;

        ctx.display.success("Puppets done!");

        if ctx.verbose {
            println!("  Repositories succeeded: {}", result.succeeded.len());
            if !result.is_success() {
                println!(
                    "  Repositories failed: {}",
                    result.failed_names().join(", ").red()
                );
            }
        }

        Ok(())
    }
}
