use std::future::Future;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};

use crate::application::services::ProgressReporter;
use crate::common::error::PuppetError;
use crate::common::result::PuppetResult;
use crate::domain::entities::{BatchResult, RepoRef};
use crate::infrastructure::git::BranchInspector;
use crate::infrastructure::process::{CommandExecutorError, ShellExecutor, ShellOutput};

/// 依存関係インストールコマンドの既定値
pub const DEFAULT_DEPENDENCY_COMMAND: &str = "npm i";

/// Width of the progress scale handed to `ProgressReporter::start`
pub const PROGRESS_SCALE: u64 = 100;

/// ブランチ同期コマンドの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncCommand {
    /// pull後に実行するコマンド（Noneの場合は実行しない）
    pub dependency_command: Option<String>,
}

impl Default for SyncCommand {
    fn default() -> Self {
        Self {
            dependency_command: Some(DEFAULT_DEPENDENCY_COMMAND.to_string()),
        }
    }
}

impl SyncCommand {
    /// 依存関係コマンドを差し替え
    pub fn with_dependency_command(mut self, command: Option<String>) -> Self {
        self.dependency_command = command.filter(|c| !c.trim().is_empty());
        self
    }

    /// `branch`用の同期コマンドを組み立てる
    pub fn for_branch(&self, branch: &str) -> String {
        let branch = quote_ref(branch);
        let mut command = format!(
            "git stash && git checkout {b} && git pull origin {b}",
            b = branch
        );
        if let Some(deps) = &self.dependency_command {
            command.push_str(" && ");
            command.push_str(deps);
        }
        command
    }
}

/// `branch`をチェックアウトするコマンド
pub fn checkout_command(branch: &str) -> String {
    format!("git checkout {}", quote_ref(branch))
}

/// Quote a ref name for `sh -c` unless it only holds plain ref characters
fn quote_ref(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-'));
    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', r"'\''"))
    }
}

/// バッチ実行の設定
#[derive(Debug, Clone, Default)]
pub struct ExecutorConfig {
    /// 各リポジトリの出力をログに流すか
    pub verbose: bool,

    /// コマンドのタイムアウト（秒）。Noneの場合は無制限
    pub timeout_seconds: Option<u64>,

    /// コマンド未指定時の同期コマンド
    pub sync: SyncCommand,
}

impl ExecutorConfig {
    /// 詳細ログを有効化
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// タイムアウトを設定
    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// 同期コマンドを設定
    pub fn with_sync(mut self, sync: SyncCommand) -> Self {
        self.sync = sync;
        self
    }
}

/// 1リポジトリで実行するコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub repo: RepoRef,
    pub command: String,
}

impl CommandPlan {
    pub fn new(repo: RepoRef, command: impl Into<String>) -> Self {
        Self {
            repo,
            command: command.into(),
        }
    }
}

/// 複数リポジトリでコマンドを並行実行する
///
/// リポジトリごとに1タスクを起動し、完了したものから順に単一の
/// ループで結果を集約する。1つの失敗が他のリポジトリを止めることはない。
pub struct BatchExecutor {
    shell: Arc<dyn ShellExecutor>,
    inspector: Arc<dyn BranchInspector>,
    config: ExecutorConfig,
}

impl BatchExecutor {
    /// 新しいBatchExecutorインスタンスを作成
    pub fn new(
        shell: Arc<dyn ShellExecutor>,
        inspector: Arc<dyn BranchInspector>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            shell,
            inspector,
            config,
        }
    }

    /// 実行設定
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// `repo`で実行するコマンドを決める
    ///
    /// `command`が指定されていればそれを（改行を除いて）そのまま使い、
    /// 未指定の場合は現在のブランチを問い合わせて同期コマンドを組み立てる。
    pub fn resolve_command(&self, command: Option<&str>, repo: &RepoRef) -> PuppetResult<String> {
        match command {
            Some(command) => Ok(strip_newlines(command)),
            None => {
                let branch = self.inspector.current_branch(&repo.path)?;
                Ok(self.config.sync.for_branch(&branch))
            }
        }
    }

    /// `repos`全てで`command`（未指定なら同期コマンド）を実行する
    pub async fn run_batch(
        &self,
        command: Option<&str>,
        repos: &[RepoRef],
        progress: &mut dyn ProgressReporter,
    ) -> BatchResult {
        let mut plans = Vec::with_capacity(repos.len());
        let mut unresolved = Vec::new();

        for repo in repos {
            match self.resolve_command(command, repo) {
                Ok(command) => plans.push(CommandPlan::new(repo.clone(), command)),
                Err(e) => unresolved.push((repo.clone(), e)),
            }
        }

        self.execute(plans, unresolved, progress).await
    }

    /// 事前に組み立てたコマンドをそれぞれのリポジトリで実行する
    pub async fn run_plans(
        &self,
        plans: Vec<CommandPlan>,
        progress: &mut dyn ProgressReporter,
    ) -> BatchResult {
        self.execute(plans, Vec::new(), progress).await
    }

    async fn execute(
        &self,
        plans: Vec<CommandPlan>,
        unresolved: Vec<(RepoRef, PuppetError)>,
        progress: &mut dyn ProgressReporter,
    ) -> BatchResult {
        let mut result = BatchResult::new();

        let total = plans.len() + unresolved.len();
        if total == 0 {
            return result;
        }
        let step = PROGRESS_SCALE as f64 / total as f64;

        progress.start(PROGRESS_SCALE);

        for (repo, error) in unresolved {
            tracing::debug!(repo = %repo.name, "Could not build command: {}", error);
            progress.increment(step);
            result.record_failure(repo, error);
        }

        let mut pending: FuturesUnordered<_> =
            plans.into_iter().map(|plan| self.spawn(plan)).collect();

        while let Some((repo, outcome)) = pending.next().await {
            progress.increment(step);
            match outcome {
                Ok(output) => {
                    tracing::debug!(
                        repo = %repo.name,
                        "Finished in {} ms",
                        output.execution_time_ms
                    );
                    self.log_output(&repo, &output.stdout, &output.stderr);
                    result.record_success(repo);
                }
                Err(error) => {
                    tracing::debug!(repo = %repo.name, "Command failed: {}", error);
                    if let PuppetError::RepoCommand {
                        source: CommandExecutorError::CommandFailed { stdout, stderr, .. },
                        ..
                    } = &error
                    {
                        self.log_output(&repo, stdout, stderr);
                    }
                    result.record_failure(repo, error);
                }
            }
        }

        progress.stop();

        if !result.is_success() {
            let details: Vec<String> = result
                .failed
                .iter()
                .map(|f| format!("  - {}: {}", f.repo.name, f.error))
                .collect();
            tracing::warn!("Error in commands\n{}", details.join("\n"));
        }

        result
    }

    /// 1リポジトリ分のタスクを起動する
    fn spawn(
        &self,
        plan: CommandPlan,
    ) -> impl Future<Output = (RepoRef, PuppetResult<ShellOutput>)> {
        let shell = Arc::clone(&self.shell);
        let CommandPlan { repo, command } = plan;
        let repo_name = repo.name.clone();
        let working_dir = repo.path.clone();

        tracing::debug!(repo = %repo_name, "Running `{}`", command);

        let handle = tokio::spawn(async move {
            let outcome = shell.execute(&working_dir, &command).await;
            outcome.map_err(|e| PuppetError::repo_command(repo_name, command, e))
        });

        async move {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(PuppetError::internal_error(format!(
                    "Task for {} did not complete: {}",
                    repo.name, join_error
                ))),
            };
            (repo, outcome)
        }
    }

    fn log_output(&self, repo: &RepoRef, stdout: &str, stderr: &str) {
        if !self.config.verbose {
            return;
        }

        for (stream, line) in output_lines(stdout, stderr) {
            tracing::debug!(repo = %repo.name, stream, "{}", line);
        }
    }
}

/// 詳細ログに流す行（空行も含む）
fn output_lines<'a>(stdout: &'a str, stderr: &'a str) -> Vec<(&'static str, &'a str)> {
    let mut lines: Vec<_> = stdout.lines().map(|l| ("stdout", l)).collect();
    lines.extend(stderr.lines().map(|l| ("stderr", l)));
    lines
}

fn strip_newlines(command: &str) -> String {
    command.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}
