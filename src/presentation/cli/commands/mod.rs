pub mod branches;
pub mod foreach;
pub mod get;
pub mod remove;
pub mod run;
pub mod save;

pub use branches::*;
pub use foreach::*;
pub use get::*;
pub use remove::*;
pub use run::*;
pub use save::*;

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::use_cases::{
    BatchExecutor, DiscoverReposUseCase, DiscoveryResult, ExecutorConfig, ManageConfigsUseCase,
    SyncCommand,
};
use crate::common::result::PuppetResult;
use crate::infrastructure::filesystem::ConfigStore;
use crate::infrastructure::git::{BranchInspector, GitBranchInspector};
use crate::infrastructure::process::{ShellExecutor, SystemShell};
use crate::presentation::ui::DisplayHelper;

/// Everything a command handler needs from the invocation
pub struct CommandContext {
    /// Directory whose children are the repositories
    pub root: PathBuf,
    /// Store directory override; `~/.puppet` when unset
    pub config_dir: Option<PathBuf>,
    pub display: DisplayHelper,
    pub verbose: bool,
    pub timeout_seconds: Option<u64>,
    inspector: Arc<dyn BranchInspector>,
}

impl CommandContext {
    pub fn new(
        root: PathBuf,
        config_dir: Option<PathBuf>,
        display: DisplayHelper,
        verbose: bool,
        timeout_seconds: Option<u64>,
    ) -> Self {
        Self {
            root,
            config_dir,
            display,
            verbose,
            timeout_seconds,
            inspector: Arc::new(GitBranchInspector::new()),
        }
    }

    /// Find the repositories under `root`, logging the resolved setup
    pub fn discover(&self, filter: Option<&[String]>) -> PuppetResult<DiscoveryResult> {
        let discovery = DiscoverReposUseCase::new(Arc::clone(&self.inspector));
        let result = discovery.execute(&self.root, filter)?;

        tracing::debug!(
            root = %self.root.display(),
            filter = ?filter,
            repos = ?result.repo_names(),
            "Puppet configuration"
        );

        Ok(result)
    }

    pub fn executor(&self, sync: SyncCommand) -> BatchExecutor {
        let config = ExecutorConfig::default()
            .with_verbose(self.verbose)
            .with_timeout(self.timeout_seconds)
            .with_sync(sync);
        let shell: Arc<dyn ShellExecutor> =
            Arc::new(SystemShell::new().with_timeout(config.timeout_seconds));
        BatchExecutor::new(shell, Arc::clone(&self.inspector), config)
    }

    /// Resolve the store only for commands that read or write it
    pub fn store(&self) -> PuppetResult<ConfigStore> {
        match &self.config_dir {
            Some(dir) => Ok(ConfigStore::new(dir)),
            None => ConfigStore::default_location(),
        }
    }

    pub fn configs(&self) -> PuppetResult<ManageConfigsUseCase> {
        Ok(ManageConfigsUseCase::new(self.store()?))
    }
}
