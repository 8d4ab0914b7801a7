use git2::Repository as Git2Repository;
use std::path::Path;

use crate::common::error::PuppetError;
use crate::common::result::PuppetResult;

/// Answers "which branch is checked out here?" for a repository path
pub trait BranchInspector: Send + Sync {
    /// Current branch name of the repository at `repo_path`.
    ///
    /// Fails with [`PuppetError::VcsQuery`] when the path is not a repository,
    /// HEAD is unborn (no commits yet) or HEAD is detached.
    fn current_branch(&self, repo_path: &Path) -> PuppetResult<String>;
}

/// Branch inspector backed by libgit2
#[derive(Debug, Clone, Copy, Default)]
pub struct GitBranchInspector;

impl GitBranchInspector {
    pub fn new() -> Self {
        Self
    }
}

impl BranchInspector for GitBranchInspector {
    fn current_branch(&self, repo_path: &Path) -> PuppetResult<String> {
        let repo = Git2Repository::open(repo_path).map_err(|e| {
            PuppetError::vcs_query_with_source("Not a git repository", repo_path, e)
        })?;

        let head = repo.head().map_err(|e| {
            PuppetError::vcs_query_with_source("Cannot resolve HEAD", repo_path, e)
        })?;

        if !head.is_branch() {
            return Err(PuppetError::vcs_query("HEAD is detached", repo_path));
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| PuppetError::vcs_query("Branch name is not valid UTF-8", repo_path))
    }
}
