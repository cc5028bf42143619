//! Constants and default values for writelog

use std::path::PathBuf;

/// Default writelog home directory name
pub const WRITELOG_DIR: &str = ".writelog";

/// Default user config file name
pub const CONFIG_FILE: &str = "config.toml";

/// Timestamp format prefixed to detailed log lines
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Date format used in the session header
pub const HEADER_DATE_FORMAT: &str = "%d-%m-%Y";

/// Column width of the `<Severity>:` label in detailed lines
pub const SEVERITY_LABEL_WIDTH: usize = 14;

/// Column width of the header labels (`Date:`, `Computername:`, `Username:`)
pub const HEADER_LABEL_WIDTH: usize = 16;

/// Suffix appended to every fatal message
pub const FATAL_SUFFIX: &str = " --> Exited the script";

/// Countdown applied after a fatal entry when none was requested
pub const DEFAULT_FATAL_TERMINATE_SECS: u32 = 7;

/// Countdown message; `[seconds]` is replaced by the remaining seconds
pub const TERMINATE_MESSAGE: &str = "The script will terminate in [seconds] seconds";

/// Countdown refresh interval in milliseconds
pub const COUNTDOWN_TICK_MS: u64 = 100;

/// Environment variable holding the log path
pub const ENV_LOG_PATH: &str = "LogPath";

/// Environment variable holding the logging mode
pub const ENV_LOGGING_MODE: &str = "LoggingMode";

/// Environment variable enabling host mirroring
pub const ENV_OUT_HOST: &str = "OutHost";

/// Preference categories consulted by the write path
pub const INFORMATION_PREFERENCE: &str = "InformationActionPreference";
pub const ATTENTION_PREFERENCE: &str = "AttentionPreference";
pub const SUCCESS_PREFERENCE: &str = "SuccessPreference";
pub const DEBUG_PREFERENCE: &str = "DebugPreference";
pub const VERBOSE_PREFERENCE: &str = "VerbosePreference";

/// Every preference category that may be configured
pub const PREFERENCE_CATEGORIES: &[&str] = &[
    INFORMATION_PREFERENCE,
    ATTENTION_PREFERENCE,
    SUCCESS_PREFERENCE,
    DEBUG_PREFERENCE,
    VERBOSE_PREFERENCE,
];

/// Get the writelog home directory
pub fn writelog_home() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(WRITELOG_DIR))
        .unwrap_or_else(|| PathBuf::from(WRITELOG_DIR))
}

/// Get the user config file path
pub fn config_path() -> PathBuf {
    writelog_home().join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writelog_home() {
        let home = writelog_home();
        assert!(home.to_string_lossy().contains(".writelog"));
    }

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}
