use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Command executor errors
#[derive(Debug, Error)]
pub enum CommandExecutorError {
    #[error(
        "Command failed with exit code {exit_code}: {}",
        failure_output(stdout, stderr)
    )]
    CommandFailed {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("Command timed out after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Process spawn failed: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Process termination failed: {0}")]
    TerminationFailed(#[source] std::io::Error),
}

/// stdout and stderr of a failed command, joined for display
fn failure_output(stdout: &str, stderr: &str) -> String {
    [stdout, stderr]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    /// Standard output
    pub stdout: String,

    /// Standard error output
    pub stderr: String,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

/// Runs a shell command string inside a working directory.
///
/// A nonzero exit status is an error, so callers only ever see output from
/// commands that succeeded.
#[async_trait]
pub trait ShellExecutor: Send + Sync {
    /// Execute `command` with `working_dir` as the current directory
    async fn execute(
        &self,
        working_dir: &Path,
        command: &str,
    ) -> Result<ShellOutput, CommandExecutorError>;
}

/// Shell executor backed by the platform shell (`sh -c`, or `cmd /C` on Windows)
#[derive(Debug, Clone, Default)]
pub struct SystemShell {
    timeout_seconds: Option<u64>,
}

impl SystemShell {
    /// Create a shell executor that waits for every command to finish
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill commands that run longer than `timeout_seconds`
    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Build the shell program and arguments for a command string
    fn shell_invocation(command: &str) -> Result<(&'static str, Vec<String>), CommandExecutorError> {
        if command.trim().is_empty() {
            return Err(CommandExecutorError::InvalidCommand(
                "Command is empty".to_string(),
            ));
        }

        let (shell, shell_flag) = if cfg!(target_os = "windows") {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };

        Ok((shell, vec![shell_flag.to_string(), command.to_string()]))
    }
}

#[async_trait]
impl ShellExecutor for SystemShell {
    async fn execute(
        &self,
        working_dir: &Path,
        command: &str,
    ) -> Result<ShellOutput, CommandExecutorError> {
        let start_time = Instant::now();
        let (program, args) = Self::shell_invocation(command)?;

        let mut cmd = TokioCommand::new(program);
        cmd.args(&args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(CommandExecutorError::SpawnFailed)?;

        // Dropping the child on timeout kills it
        let output = match self.timeout_seconds {
            Some(timeout_secs) => {
                match timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await {
                    Ok(output) => output,
                    Err(_) => {
                        return Err(CommandExecutorError::Timeout {
                            timeout_seconds: timeout_secs,
                        })
                    }
                }
            }
            None => child.wait_with_output().await,
        }
        .map_err(CommandExecutorError::TerminationFailed)?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(CommandExecutorError::CommandFailed {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: stdout.trim_end().to_string(),
                stderr: stderr.trim_end().to_string(),
            });
        }

        Ok(ShellOutput {
            stdout,
            stderr,
            execution_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}
