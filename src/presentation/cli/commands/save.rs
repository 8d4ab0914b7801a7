use anyhow::Result;

use super::CommandContext;
use crate::infrastructure::filesystem::SaveOutcome;

/// Handler for the save command
pub struct SaveCommand {
    pub name: String,
    pub filter: Option<Vec<String>>,
}

impl SaveCommand {
    pub fn new(name: String, filter: Option<Vec<String>>) -> Self {
        Self { name, filter }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        ctx.display.info(&format!("Saving config {}", self.name));

        let discovery = ctx.discover(self.filter.as_deref())?;
        let outcome = ctx.configs()?.save(&self.name, discovery.branches)?;

        match outcome {
            SaveOutcome::Created => ctx.display.success(&format!(
                ".puppet directory created and config {} saved",
                self.name
            )),
            SaveOutcome::Updated => ctx.display.success(&format!("config {} saved", self.name)),
        }

        Ok(())
    }
}
