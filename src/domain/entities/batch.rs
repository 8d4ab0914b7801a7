use std::collections::BTreeSet;

use super::repo::RepoRef;
use crate::common::error::PuppetError;

/// 単一リポジトリでの失敗
#[derive(Debug)]
pub struct RepoFailure {
    /// 失敗したリポジトリ
    pub repo: RepoRef,
    /// 捕捉したエラー
    pub error: PuppetError,
}

/// バッチ実行の結果。永続化はしない
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功したリポジトリ
    pub succeeded: BTreeSet<RepoRef>,
    /// 失敗したリポジトリ（完了順）
    pub failed: Vec<RepoFailure>,
}

impl BatchResult {
    /// 空の結果を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 成功を記録
    pub fn record_success(&mut self, repo: RepoRef) {
        self.succeeded.insert(repo);
    }

    /// 失敗を記録
    pub fn record_failure(&mut self, repo: RepoRef, error: PuppetError) {
        self.failed.push(RepoFailure { repo, error });
    }

    /// 全体として成功したか
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// 処理したリポジトリ数
    pub fn total_count(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// 失敗したリポジトリ名
    pub fn failed_names(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.repo.name.as_str()).collect()
    }

    /// 成功したリポジトリ名
    pub fn succeeded_names(&self) -> Vec<&str> {
        self.succeeded.iter().map(|r| r.name.as_str()).collect()
    }
}
