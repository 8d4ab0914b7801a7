use anyhow::Result;

use super::CommandContext;
use crate::domain::entities::BranchSnapshot;
use crate::infrastructure::filesystem::ConfigLookup;

/// Handler for the get command
pub struct GetCommand {
    pub name: Option<String>,
}

impl GetCommand {
    pub fn new(name: Option<String>) -> Self {
        Self { name }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match ctx.configs()?.get(self.name.as_deref())? {
            ConfigLookup::Names(names) => {
                ctx.display.info("Here are the stored configs");
                let items: Vec<&str> = names.iter().map(String::as_str).collect();
                ctx.display.print_list(&items);
            }
            ConfigLookup::Found(config) => {
                ctx.display
                    .info(&format!("Here is the config for {}", config.name));
                let rows: Vec<Vec<String>> =
                    config.entries.iter().map(BranchSnapshot::to_row).collect();
                ctx.display.print_table(&["Repository", "Branch"], &rows);
            }
            ConfigLookup::Missing(_) => {}
        }

        Ok(())
    }
}
