pub mod discover_repos;
pub mod manage_configs;
pub mod run_batch;

pub use discover_repos::{DiscoverReposUseCase, DiscoveryResult, RepoProbe, SkippedRepo};
pub use manage_configs::ManageConfigsUseCase;
pub use run_batch::{
    checkout_command, BatchExecutor, CommandPlan, ExecutorConfig, SyncCommand,
    DEFAULT_DEPENDENCY_COMMAND,
};
