use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// ワークスペース直下のgitリポジトリへの参照
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoRef {
    /// ディレクトリ名（ワークスペース内でのリポジトリ名）
    pub name: String,
    /// リポジトリの絶対パス
    pub path: PathBuf,
}

impl RepoRef {
    /// 新しいRepoRefインスタンスを作成
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// ルートディレクトリ直下の`name`を指すRepoRefを作成
    pub fn under(root: &Path, name: impl Into<String>) -> Self {
        let name = name.into();
        let path = root.join(&name);
        Self { name, path }
    }
}

/// スナップショット時点でチェックアウトされていたブランチ
///
/// 永続化形式は `["repo", "branch"]` の2要素配列。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchSnapshot {
    /// リポジトリ名
    pub repo: String,
    /// ブランチ名
    pub branch: String,
}

impl BranchSnapshot {
    /// 新しいBranchSnapshotインスタンスを作成
    pub fn new(repo: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    /// 表示用の行 `[repo, branch]`
    pub fn to_row(&self) -> Vec<String> {
        vec![self.repo.clone(), self.branch.clone()]
    }
}

impl Serialize for BranchSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.repo, &self.branch).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BranchSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (repo, branch) = <(String, String)>::deserialize(deserializer)?;
        Ok(Self { repo, branch })
    }
}
