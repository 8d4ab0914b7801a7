use anyhow::Result;

use super::CommandContext;
use crate::domain::entities::BranchSnapshot;

/// Handler for the branches command
pub struct BranchesCommand {
    pub filter: Option<Vec<String>>,
}

impl BranchesCommand {
    pub fn new(filter: Option<Vec<String>>) -> Self {
        Self { filter }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let discovery = ctx.discover(self.filter.as_deref())?;

        if discovery.branches.is_empty() {
            return Ok(());
        }

        ctx.display.section_header("Branches Info");
        let rows: Vec<Vec<String>> = discovery
            .branches
            .iter()
            .map(BranchSnapshot::to_row)
            .collect();
        ctx.display.print_table(&["Repository", "Branch"], &rows);

        Ok(())
    }
}
