//! Configuration for writelog
//!
//! Settings are layered, later layers win:
//! - built-in defaults
//! - the user config file (`~/.writelog/config.toml`)
//! - environment variables (`LogPath`, `LoggingMode`, `OutHost` and one
//!   variable per preference category)
//! - command line flags, applied by the caller

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::types::{LoggingMode, PreferenceState};

/// Configuration file structure (config.toml)
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub log_path: Option<String>,
    pub mode: Option<String>,
    pub out_host: Option<bool>,
    #[serde(default)]
    pub preferences: HashMap<String, String>,
}

/// Resolved logging configuration
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub log_path: Option<PathBuf>,
    pub mode: LoggingMode,
    pub out_host: bool,
    pub preferences: PreferenceState,
}

impl LogConfig {
    /// Load the user config file, then apply the process environment
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_path())?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load config from a specific file, defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        if !path.exists() {
            debug!("Config not found at {:?}, using defaults", path);
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(Error::io("read", path))?;
        let file: ConfigFile = toml::from_str(&content)?;
        config.apply_file(file)?;

        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) -> Result<()> {
        if let Some(path) = file.log_path {
            self.log_path = Some(PathBuf::from(path));
        }
        if let Some(mode) = file.mode {
            self.mode = mode.parse()?;
        }
        if let Some(out_host) = file.out_host {
            self.out_host = out_host;
        }
        for (category, value) in file.preferences {
            self.preferences.set(&category, value.parse()?);
        }
        Ok(())
    }

    /// Apply environment variables through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_LOG_PATH).filter(|p| !p.is_empty()) {
            self.log_path = Some(PathBuf::from(path));
        }
        if let Some(mode) = lookup(ENV_LOGGING_MODE).filter(|m| !m.is_empty()) {
            self.mode = mode.parse()?;
        }
        if let Some(out_host) = lookup(ENV_OUT_HOST) {
            self.out_host = self.out_host || parse_flag(&out_host);
        }
        for category in PREFERENCE_CATEGORIES {
            if let Some(value) = lookup(category).filter(|v| !v.is_empty()) {
                self.preferences.set(category, value.parse()?);
            }
        }
        Ok(())
    }

    /// The configured log path, or the configuration error preventing its use
    pub fn validated_path(&self) -> Result<&Path> {
        let path = self.log_path.as_deref().ok_or(Error::LogPathNotSet)?;
        validate_log_path(path)?;
        Ok(path)
    }
}

/// A log path must name a file with an extension
pub fn validate_log_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::LogPathNotSet);
    }
    if path.extension().is_none() {
        return Err(Error::InvalidLogPath(path.to_path_buf()));
    }
    Ok(())
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Preference;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = LogConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.log_path.is_none());
        assert_eq!(config.mode, LoggingMode::Default);
        assert!(!config.out_host);
        assert!(config.preferences.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
log_path = "/tmp/app/run.log"
mode = "keepalive"
out_host = true

[preferences]
DebugPreference = "SilentlyContinue"
"#,
        )
        .unwrap();

        let config = LogConfig::load_from(&path).unwrap();
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/app/run.log")));
        assert_eq!(config.mode, LoggingMode::KeepAlive);
        assert!(config.out_host);
        assert_eq!(
            config.preferences.get(DEBUG_PREFERENCE),
            Preference::SilentlyContinue
        );
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_path = [").unwrap();

        let err = LogConfig::load_from(&path).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = LogConfig {
            log_path: Some(PathBuf::from("file.log")),
            ..Default::default()
        };
        config
            .apply_env(env(&[
                ("LogPath", "/var/log/env.log"),
                ("LoggingMode", "Close"),
                ("OutHost", "True"),
                ("VerbosePreference", "Ignore"),
            ]))
            .unwrap();

        assert_eq!(config.log_path, Some(PathBuf::from("/var/log/env.log")));
        assert_eq!(config.mode, LoggingMode::Close);
        assert!(config.out_host);
        assert_eq!(config.preferences.get(VERBOSE_PREFERENCE), Preference::Ignore);
    }

    #[test]
    fn test_invalid_env_mode() {
        let mut config = LogConfig::default();
        let err = config
            .apply_env(env(&[("LoggingMode", "Sometimes")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMode(_)));
    }

    #[test]
    fn test_validated_path() {
        let mut config = LogConfig::default();
        assert!(matches!(config.validated_path(), Err(Error::LogPathNotSet)));

        config.log_path = Some(PathBuf::from("/var/log/app/run"));
        assert!(matches!(
            config.validated_path(),
            Err(Error::InvalidLogPath(_))
        ));

        config.log_path = Some(PathBuf::from("/var/log/app/run.txt"));
        assert_eq!(
            config.validated_path().unwrap(),
            Path::new("/var/log/app/run.txt")
        );
    }
}
