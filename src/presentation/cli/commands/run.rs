use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use crate::application::use_cases::SyncCommand;

/// Handler for the run command
pub struct RunCommand {
    pub name: String,
}

impl RunCommand {
    pub fn new(name: String) -> Self {
        Self { name }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let configs = ctx.configs()?;
        let Some(config) = configs.find(&self.name)? else {
            return Ok(());
        };

        ctx.display
            .info(&format!("running {} configuration", self.name));

        let executor = ctx.executor(SyncCommand::default());
        let result = configs.apply(&config, &ctx.root, &executor).await;

        ctx.display
            .success(&format!("running {} configuration done", self.name));

        if ctx.verbose && !result.is_success() {
            println!(
                "  Repositories failed: {}",
                result.failed_names().join(", ").red()
            );
        }

        Ok(())
    }
}
