use std::path::PathBuf;
use thiserror::Error;

use crate::infrastructure::process::CommandExecutorError;

#[derive(Error, Debug)]
pub enum PuppetError {
    #[error("VCS query failed for {}: {message}", path.display())]
    VcsQuery {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<git2::Error>,
    },

    #[error("Command `{command}` failed in {repo}: {source}")]
    RepoCommand {
        repo: String,
        command: String,
        #[source]
        source: CommandExecutorError,
    },

    #[error("Config file does not exist at {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration {name} does not exist")]
    ConfigKeyNotFound { name: String },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PuppetError {
    pub fn vcs_query(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::VcsQuery {
            message: message.into(),
            path: path.into(),
            source: None,
        }
    }

    pub fn vcs_query_with_source(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: git2::Error,
    ) -> Self {
        Self::VcsQuery {
            message: message.into(),
            path: path.into(),
            source: Some(source),
        }
    }

    pub fn repo_command(
        repo: impl Into<String>,
        command: impl Into<String>,
        source: CommandExecutorError,
    ) -> Self {
        Self::RepoCommand {
            repo: repo.into(),
            command: command.into(),
            source,
        }
    }

    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn config_key_not_found(name: impl Into<String>) -> Self {
        Self::ConfigKeyNotFound { name: name.into() }
    }

    pub fn filesystem_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            source: None,
        }
    }

    /// Whether the failure means the persisted store has never been created.
    pub fn is_config_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. })
    }
}

impl From<git2::Error> for PuppetError {
    fn from(error: git2::Error) -> Self {
        Self::VcsQuery {
            message: error.message().to_string(),
            path: PathBuf::new(),
            source: Some(error),
        }
    }
}

impl From<std::io::Error> for PuppetError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<serde_json::Error> for PuppetError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization_error_with_source("JSON serialization failed", error)
    }
}
