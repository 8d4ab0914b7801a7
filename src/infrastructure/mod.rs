/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Git queries (current branch lookup)
/// - File system operations (the persisted configuration store)
/// - Process execution (shell commands inside a repository)
pub mod filesystem;
pub mod git;
pub mod process;

// Re-export commonly used types
pub use filesystem::{ConfigLookup, ConfigStore, SaveOutcome};
pub use git::{BranchInspector, GitBranchInspector};
pub use process::{CommandExecutorError, ShellExecutor, ShellOutput, SystemShell};
