//! Test fixtures
//!
//! Builds throwaway workspaces whose children are real git repositories.

use git2::{Repository, RepositoryInitOptions, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory laid out the way puppet expects to be run in
pub struct WorkspaceFixture {
    temp_dir: TempDir,
}

impl WorkspaceFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a repository with one commit, checked out on `branch`
    pub fn add_repo(&self, name: &str, branch: &str) -> PathBuf {
        let path = self.root().join(name);
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(branch);
        let repo = Repository::init_opts(&path, &opts).unwrap();

        fs::write(path.join("README.md"), format!("# {}\n", name)).unwrap();
        let sig = Signature::now("Puppet Test", "test@example.com").unwrap();
        let tree_id = {
            let mut index = repo.index().unwrap();
            index.add_path(Path::new("README.md")).unwrap();
            index.write().unwrap();
            index.write_tree().unwrap()
        };
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();

        path
    }

    /// Create a directory that is not a repository
    pub fn add_plain_dir(&self, name: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::create_dir_all(&path).unwrap();
        path
    }
}
