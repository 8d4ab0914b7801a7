use std::path::Path;

use crate::application::services::NoopProgress;
use crate::application::use_cases::run_batch::{checkout_command, BatchExecutor, CommandPlan};
use crate::common::error::PuppetError;
use crate::common::result::PuppetResult;
use crate::domain::entities::{BatchResult, BranchSnapshot, Configuration, RepoRef};
use crate::infrastructure::filesystem::{ConfigLookup, ConfigStore, SaveOutcome};

/// 保存済みブランチ構成を扱うユースケース
pub struct ManageConfigsUseCase {
    store: ConfigStore,
}

impl ManageConfigsUseCase {
    /// 新しいManageConfigsUseCaseインスタンスを作成
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// 使用しているストア
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// 現在のブランチ一覧を`name`として保存する
    pub fn save(&self, name: &str, entries: Vec<BranchSnapshot>) -> PuppetResult<SaveOutcome> {
        self.store.save(name, entries)
    }

    /// `name`を削除する。存在しない場合は警告のみ
    pub fn remove(&self, name: &str) -> PuppetResult<bool> {
        let removed = self.store.remove(name)?;
        if !removed {
            tracing::warn!("{}", PuppetError::config_key_not_found(name));
        }
        Ok(removed)
    }

    /// 構成名の一覧、または単一の構成を取得する
    pub fn get(&self, name: Option<&str>) -> PuppetResult<ConfigLookup> {
        let lookup = self.store.get(name)?;
        if let ConfigLookup::Missing(name) = &lookup {
            tracing::warn!("{}", PuppetError::config_key_not_found(name.as_str()));
        }
        Ok(lookup)
    }

    /// `name`の構成を探す。存在しない場合は警告して`None`
    pub fn find(&self, name: &str) -> PuppetResult<Option<Configuration>> {
        let config = self.store.load()?.get(name);
        if config.is_none() {
            tracing::warn!("{}", PuppetError::config_key_not_found(name));
        }
        Ok(config)
    }

    /// 構成の各エントリを`root`配下のチェックアウトコマンドに変換する
    pub fn checkout_plans(config: &Configuration, root: &Path) -> Vec<CommandPlan> {
        config
            .entries
            .iter()
            .map(|entry| {
                CommandPlan::new(
                    RepoRef::under(root, entry.repo.clone()),
                    checkout_command(&entry.branch),
                )
            })
            .collect()
    }

    /// 構成に記録されたブランチへ各リポジトリを切り替える
    pub async fn apply(
        &self,
        config: &Configuration,
        root: &Path,
        executor: &BatchExecutor,
    ) -> BatchResult {
        let plans = Self::checkout_plans(config, root);
        executor.run_plans(plans, &mut NoopProgress).await
    }
}
