//! Error types for writelog

use std::path::{Path, PathBuf};

/// writelog error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to {op} '{}': {source}", .path.display())]
    IoFailure {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("LogPath is not set. Please set the LogPath as parameter or as an environment variable (LogPath)")]
    LogPathNotSet,

    #[error("LogPath '{}' is not valid. Please set the LogPath with a file extension such as .log or .txt", .0.display())]
    InvalidLogPath(PathBuf),

    #[error("Invalid logging mode: {0} (expected Default, KeepAlive or Close)")]
    InvalidMode(String),

    #[error("Invalid log type: {0}")]
    InvalidSeverity(String),

    #[error("Invalid preference value: {0}")]
    InvalidPreference(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Log session has not been started")]
    NotStarted,

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias for writelog
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }

    /// Build a `map_err` adapter that tags an io error with the failed operation
    pub fn io(op: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Error::IoFailure { op, path, source }
    }

    /// Whether this is a recoverable file-system failure
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Error::IoFailure { .. })
    }

    /// Whether this error stems from missing or malformed configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::LogPathNotSet
                | Error::InvalidLogPath(_)
                | Error::InvalidMode(_)
                | Error::InvalidSeverity(_)
                | Error::InvalidPreference(_)
                | Error::ConfigError(_)
                | Error::TomlError(_)
        )
    }
}
