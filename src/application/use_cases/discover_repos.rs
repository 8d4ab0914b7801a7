use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::common::result::{PuppetResult, ResultExt};
use crate::domain::entities::{BranchSnapshot, RepoRef};
use crate::infrastructure::git::BranchInspector;

/// Directory name that marks a child as a git repository
const VCS_METADATA_DIR: &str = ".git";

/// リポジトリがスキップされた理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRepo {
    /// ディレクトリ名
    pub name: String,
    /// ブランチ取得に失敗した理由
    pub reason: String,
}

/// 単一の候補ディレクトリに対する判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoProbe {
    /// ブランチが取得できたリポジトリ
    Found {
        repo: RepoRef,
        snapshot: BranchSnapshot,
    },
    /// ブランチが取得できず除外されたリポジトリ
    Skipped(SkippedRepo),
}

/// ディスカバリ結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryResult {
    /// 対象リポジトリ（ディレクトリ一覧順）
    pub repos: Vec<RepoRef>,
    /// 各リポジトリの現在のブランチ（`repos`と同じ順序）
    pub branches: Vec<BranchSnapshot>,
    /// フィルタに指定されたが見つからなかった名前
    pub missing_filters: Vec<String>,
    /// ブランチ取得に失敗して除外されたリポジトリ
    pub skipped: Vec<SkippedRepo>,
}

impl DiscoveryResult {
    /// 対象リポジトリ名の一覧
    pub fn repo_names(&self) -> Vec<&str> {
        self.repos.iter().map(|r| r.name.as_str()).collect()
    }

    /// 対象リポジトリがないか
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

/// ワークスペース直下のリポジトリを探索するユースケース
pub struct DiscoverReposUseCase {
    inspector: Arc<dyn BranchInspector>,
}

impl DiscoverReposUseCase {
    /// 新しいDiscoverReposUseCaseインスタンスを作成
    pub fn new(inspector: Arc<dyn BranchInspector>) -> Self {
        Self { inspector }
    }

    /// `root`直下のリポジトリを探索する
    ///
    /// `filter`が指定された場合はその名前のリポジトリのみを対象とし、
    /// 見つからなかった名前は警告としてまとめて報告する。
    pub fn execute(&self, root: &Path, filter: Option<&[String]>) -> PuppetResult<DiscoveryResult> {
        let mut result = DiscoveryResult::default();

        for candidate in Self::list_candidates(root)? {
            if let Some(names) = filter {
                if !names.contains(&candidate.name) {
                    continue;
                }
            }

            match self.probe(candidate) {
                RepoProbe::Found { repo, snapshot } => {
                    result.repos.push(repo);
                    result.branches.push(snapshot);
                }
                RepoProbe::Skipped(skipped) => {
                    tracing::warn!(
                        repo = %skipped.name,
                        "Skipping {}: {}",
                        skipped.name,
                        skipped.reason
                    );
                    result.skipped.push(skipped);
                }
            }
        }

        if let Some(names) = filter {
            for name in names {
                let found = result.repos.iter().any(|r| &r.name == name);
                if !found && !result.missing_filters.contains(name) {
                    result.missing_filters.push(name.clone());
                }
            }

            if !result.missing_filters.is_empty() {
                let listing: Vec<String> = result
                    .missing_filters
                    .iter()
                    .map(|name| format!("  - {}", name))
                    .collect();
                tracing::warn!(
                    "The following filtered repos were not found\n{}",
                    listing.join("\n")
                );
            }
        }

        if result.repos.is_empty() {
            tracing::warn!(
                "No repos found for puppet usage. Confirm that you are running puppet in the top directory."
            );
        }

        Ok(result)
    }

    /// ブランチを問い合わせて判定する
    pub fn probe(&self, repo: RepoRef) -> RepoProbe {
        match self.inspector.current_branch(&repo.path) {
            Ok(branch) => {
                let snapshot = BranchSnapshot::new(repo.name.clone(), branch);
                RepoProbe::Found { repo, snapshot }
            }
            Err(e) => RepoProbe::Skipped(SkippedRepo {
                name: repo.name,
                reason: e.to_string(),
            }),
        }
    }

    /// `.git`を持つ直下のディレクトリを名前順に列挙する（隠しディレクトリは除外）
    fn list_candidates(root: &Path) -> PuppetResult<Vec<RepoRef>> {
        let entries = fs::read_dir(root)
            .with_filesystem_error("Failed to list workspace directory", Some(root.to_path_buf()))?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = entry
                .with_filesystem_error("Failed to read directory entry", Some(root.to_path_buf()))?;

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir || !entry.path().join(VCS_METADATA_DIR).exists() {
                continue;
            }

            candidates.push(RepoRef::new(name, entry.path()));
        }

        candidates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::PuppetError;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// ディレクトリ名からブランチを返すテスト用のインスペクタ
    struct FakeInspector {
        branches: HashMap<String, String>,
    }

    impl FakeInspector {
        fn new(pairs: &[(&str, &str)]) -> Arc<Self> {
            Arc::new(Self {
                branches: pairs
                    .iter()
                    .map(|(r, b)| (r.to_string(), b.to_string()))
                    .collect(),
            })
        }
    }

    impl BranchInspector for FakeInspector {
        fn current_branch(&self, repo_path: &Path) -> PuppetResult<String> {
            let name = repo_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.branches
                .get(&name)
                .cloned()
                .ok_or_else(|| PuppetError::vcs_query("no branch", repo_path))
        }
    }

    fn workspace(repos: &[&str], plain_dirs: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for repo in repos {
            fs::create_dir_all(temp_dir.path().join(repo).join(".git")).unwrap();
        }
        for dir in plain_dirs {
            fs::create_dir_all(temp_dir.path().join(dir)).unwrap();
        }
        fs::write(temp_dir.path().join("README.md"), "# workspace").unwrap();
        temp_dir
    }

    #[test]
    fn test_discovers_all_repositories_in_listing_order() {
        let temp_dir = workspace(&["web", "api", "db"], &["docs"]);
        let use_case =
            DiscoverReposUseCase::new(FakeInspector::new(&[("web", "main"), ("api", "dev"), ("db", "main")]));

        let result = use_case.execute(temp_dir.path(), None).unwrap();

        assert_eq!(result.repo_names(), vec!["api", "db", "web"]);
        assert_eq!(
            result.branches,
            vec![
                BranchSnapshot::new("api", "dev"),
                BranchSnapshot::new("db", "main"),
                BranchSnapshot::new("web", "main"),
            ]
        );
        assert!(result.missing_filters.is_empty());
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_filter_keeps_only_named_repositories() {
        let temp_dir = workspace(&["web", "api", "db"], &[]);
        let use_case =
            DiscoverReposUseCase::new(FakeInspector::new(&[("web", "main"), ("api", "dev"), ("db", "main")]));
        let filter = vec!["web".to_string(), "db".to_string()];

        let result = use_case.execute(temp_dir.path(), Some(&filter)).unwrap();

        assert_eq!(result.repo_names(), vec!["db", "web"]);
        assert!(result.missing_filters.is_empty());
    }

    #[test]
    fn test_filter_reports_every_missing_name() {
        let temp_dir = workspace(&["web"], &["docs"]);
        let use_case = DiscoverReposUseCase::new(FakeInspector::new(&[("web", "main")]));
        let filter = vec![
            "web".to_string(),
            "docs".to_string(),
            "ghost".to_string(),
        ];

        let result = use_case.execute(temp_dir.path(), Some(&filter)).unwrap();

        assert_eq!(result.repo_names(), vec!["web"]);
        assert_eq!(
            result.missing_filters,
            vec!["docs".to_string(), "ghost".to_string()]
        );
    }

    #[test]
    fn test_repository_with_failing_branch_query_is_skipped() {
        let temp_dir = workspace(&["web", "broken"], &[]);
        let use_case = DiscoverReposUseCase::new(FakeInspector::new(&[("web", "main")]));

        let result = use_case.execute(temp_dir.path(), None).unwrap();

        assert_eq!(result.repo_names(), vec!["web"]);
        assert_eq!(result.branches, vec![BranchSnapshot::new("web", "main")]);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].name, "broken");
        assert!(result.skipped[0].reason.contains("no branch"));
    }

    #[test]
    fn test_skipped_repository_named_in_filter_is_reported_missing() {
        let temp_dir = workspace(&["broken"], &[]);
        let use_case = DiscoverReposUseCase::new(FakeInspector::new(&[]));
        let filter = vec!["broken".to_string()];

        let result = use_case.execute(temp_dir.path(), Some(&filter)).unwrap();

        assert!(result.is_empty());
        assert_eq!(result.missing_filters, vec!["broken".to_string()]);
    }

    #[test]
    fn test_hidden_directories_are_ignored() {
        let temp_dir = workspace(&[".hidden", "web"], &[]);
        let use_case =
            DiscoverReposUseCase::new(FakeInspector::new(&[(".hidden", "main"), ("web", "main")]));

        let result = use_case.execute(temp_dir.path(), None).unwrap();

        assert_eq!(result.repo_names(), vec!["web"]);
    }

    #[test]
    fn test_empty_workspace_is_not_an_error() {
        let temp_dir = workspace(&[], &["docs"]);
        let use_case = DiscoverReposUseCase::new(FakeInspector::new(&[]));

        let result = use_case.execute(temp_dir.path(), None).unwrap();

        assert!(result.is_empty());
        assert!(result.branches.is_empty());
    }

    #[test]
    fn test_missing_root_is_a_filesystem_error() {
        let temp_dir = TempDir::new().unwrap();
        let use_case = DiscoverReposUseCase::new(FakeInspector::new(&[]));

        let result = use_case.execute(&temp_dir.path().join("nowhere"), None);

        assert!(matches!(result, Err(PuppetError::FileSystemError { .. })));
    }
}
