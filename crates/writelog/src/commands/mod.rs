//! Command implementations

pub mod clear;
pub mod close;
pub mod hide;
pub mod open;
pub mod write;

use anyhow::Result;
use std::path::PathBuf;
use writelog_core::LogConfig;

/// Load the config file and environment, then let `path` override the log path
pub fn load_config(path: Option<PathBuf>) -> Result<LogConfig> {
    let mut config = LogConfig::load()?;
    if let Some(path) = path {
        config.log_path = Some(path);
    }
    Ok(config)
}

/// The validated log path of `config`
pub fn log_path(config: &LogConfig) -> Result<PathBuf> {
    Ok(config.validated_path()?.to_path_buf())
}
