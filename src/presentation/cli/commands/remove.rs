use anyhow::Result;

use super::CommandContext;

/// Handler for the remove command
pub struct RemoveCommand {
    pub name: String,
}

impl RemoveCommand {
    pub fn new(name: String) -> Self {
        Self { name }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        ctx.display
            .info(&format!("Removing {} configuration", self.name));

        if ctx.configs()?.remove(&self.name)? {
            ctx.display
                .success(&format!("Configuration {} was removed", self.name));
        }

        Ok(())
    }
}
