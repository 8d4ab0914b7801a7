use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::repo::BranchSnapshot;

/// 名前付きのブランチ構成
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// 構成名
    pub name: String,
    /// 保存順（ディスカバリ順）のブランチスナップショット
    pub entries: Vec<BranchSnapshot>,
}

impl Configuration {
    /// 新しいConfigurationインスタンスを作成
    pub fn new(name: impl Into<String>, entries: Vec<BranchSnapshot>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }
}

/// 永続化される構成の集合
///
/// `configs.json` の中身そのもの。`{ "<name>": [["repo", "branch"], ...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationSet {
    configs: BTreeMap<String, Vec<BranchSnapshot>>,
}

impl ConfigurationSet {
    /// 空の集合を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 構成を追加または上書きする
    pub fn upsert(&mut self, name: impl Into<String>, entries: Vec<BranchSnapshot>) {
        self.configs.insert(name.into(), entries);
    }

    /// 構成を削除する。存在しなかった場合はfalse
    pub fn remove(&mut self, name: &str) -> bool {
        self.configs.remove(name).is_some()
    }

    /// 構成を取得
    pub fn get(&self, name: &str) -> Option<Configuration> {
        self.configs
            .get(name)
            .map(|entries| Configuration::new(name, entries.clone()))
    }

    /// 構成が存在するか
    pub fn contains(&self, name: &str) -> bool {
        self.configs.contains_key(name)
    }

    /// すべての構成名
    pub fn names(&self) -> Vec<String> {
        self.configs.keys().cloned().collect()
    }

    /// 構成の数
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
