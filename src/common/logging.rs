use tracing_subscriber::EnvFilter;

/// ログ出力の設定
///
/// `RUST_LOG`が設定されている場合はそちらが優先される。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// デバッグログを出力するか
    pub verbose: bool,
}

impl LogConfig {
    /// 新しいLogConfigインスタンスを作成
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// `RUST_LOG`未設定時のフィルタ
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            "puppet=debug"
        } else {
            "puppet=info"
        }
    }

    /// 実際に使うフィルタ
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }

    /// グローバルなsubscriberを登録する。既に登録済みなら何もしない
    pub fn init(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .try_init();
    }
}
