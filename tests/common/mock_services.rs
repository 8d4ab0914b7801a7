//! Mock services for testing
//!
//! Hand-written fakes for the shell and branch seams so batch behaviour can be
//! checked without spawning processes.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

use puppet::common::error::PuppetError;
use puppet::common::result::PuppetResult;
use puppet::infrastructure::{BranchInspector, CommandExecutorError, ShellExecutor, ShellOutput};

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Shell that records every invocation instead of running it
#[derive(Clone, Default)]
pub struct RecordingShell {
    /// (repository directory name, command) pairs in call order
    call_history: Arc<Mutex<Vec<(String, String)>>>,
    /// Repositories whose command fails
    failing: Arc<Mutex<HashSet<String>>>,
}

impl RecordingShell {
    /// Create a new recording shell
    pub fn new() -> Self {
        Self::default()
    }

    /// Make commands in `repo` fail with exit code 1
    pub fn fail_in(self, repo: &str) -> Self {
        self.failing.lock().unwrap().insert(repo.to_string());
        self
    }

    /// Call history sorted by repository name
    pub fn get_call_history(&self) -> Vec<(String, String)> {
        let mut history = self.call_history.lock().unwrap().clone();
        history.sort();
        history
    }

    /// Commands run, ignoring which repository ran them
    pub fn commands(&self) -> Vec<String> {
        self.get_call_history().into_iter().map(|(_, c)| c).collect()
    }
}

#[async_trait]
impl ShellExecutor for RecordingShell {
    async fn execute(
        &self,
        working_dir: &Path,
        command: &str,
    ) -> Result<ShellOutput, CommandExecutorError> {
        let name = dir_name(working_dir);
        self.call_history
            .lock()
            .unwrap()
            .push((name.clone(), command.to_string()));

        if self.failing.lock().unwrap().contains(&name) {
            return Err(CommandExecutorError::CommandFailed {
                exit_code: 1,
                stdout: String::new(),
                stderr: format!("simulated failure in {}", name),
            });
        }

        Ok(ShellOutput {
            stdout: format!("ran in {}\n", name),
            stderr: String::new(),
            execution_time_ms: 0,
        })
    }
}

/// Branch inspector backed by a fixed map of directory name to branch
#[derive(Clone, Default)]
pub struct StaticBranches {
    branches: HashMap<String, String>,
}

impl StaticBranches {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            branches: pairs
                .iter()
                .map(|(repo, branch)| (repo.to_string(), branch.to_string()))
                .collect(),
        }
    }
}

impl BranchInspector for StaticBranches {
    fn current_branch(&self, repo_path: &Path) -> PuppetResult<String> {
        self.branches
            .get(&dir_name(repo_path))
            .cloned()
            .ok_or_else(|| PuppetError::vcs_query("unknown repository", repo_path))
    }
}
