//! Core types for writelog

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::str::FromStr;

use crate::constants::*;
use crate::error::{Error, Result};

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Information,
    Warning,
    Attention,
    Error,
    Success,
    Verbose,
    Debug,
    Fatal,
}

impl Severity {
    pub const ALL: [Severity; 8] = [
        Severity::Information,
        Severity::Warning,
        Severity::Attention,
        Severity::Error,
        Severity::Success,
        Severity::Verbose,
        Severity::Debug,
        Severity::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Information => "Information",
            Severity::Warning => "Warning",
            Severity::Attention => "Attention",
            Severity::Error => "Error",
            Severity::Success => "Success",
            Severity::Verbose => "Verbose",
            Severity::Debug => "Debug",
            Severity::Fatal => "Fatal",
        }
    }

    /// Preference category gating whether an entry of this severity is written.
    /// Only debug and verbose output can be suppressed from the file.
    pub fn write_category(&self) -> Option<&'static str> {
        match self {
            Severity::Debug => Some(DEBUG_PREFERENCE),
            Severity::Verbose => Some(VERBOSE_PREFERENCE),
            _ => None,
        }
    }

    /// Preference category gating whether an entry is shown on the host.
    /// `None` for severities routed straight to a dedicated host channel.
    pub fn mirror_category(&self) -> Option<&'static str> {
        match self {
            Severity::Information => Some(INFORMATION_PREFERENCE),
            Severity::Attention => Some(ATTENTION_PREFERENCE),
            Severity::Success => Some(SUCCESS_PREFERENCE),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidSeverity(s.to_string()))
    }
}

/// What happens to the log file when a session finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggingMode {
    /// Close the file
    #[default]
    Default,
    /// Keep the file open until it is closed explicitly
    KeepAlive,
    /// Append a blank closing entry, then close the file
    Close,
}

impl LoggingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoggingMode::Default => "Default",
            LoggingMode::KeepAlive => "KeepAlive",
            LoggingMode::Close => "Close",
        }
    }

    /// Whether the file is closed when the session finishes
    pub fn closes_file(&self) -> bool {
        !matches!(self, LoggingMode::KeepAlive)
    }
}

impl std::fmt::Display for LoggingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LoggingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(LoggingMode::Default),
            "keepalive" | "keep-alive" => Ok(LoggingMode::KeepAlive),
            "close" => Ok(LoggingMode::Close),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

/// Configured reaction to a message of some category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preference {
    #[default]
    Continue,
    SilentlyContinue,
    Ignore,
    Inquire,
    Stop,
    Break,
}

impl Preference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::Continue => "Continue",
            Preference::SilentlyContinue => "SilentlyContinue",
            Preference::Ignore => "Ignore",
            Preference::Inquire => "Inquire",
            Preference::Stop => "Stop",
            Preference::Break => "Break",
        }
    }
}

impl std::fmt::Display for Preference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Preference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "continue" => Ok(Preference::Continue),
            "silentlycontinue" => Ok(Preference::SilentlyContinue),
            "ignore" => Ok(Preference::Ignore),
            "inquire" => Ok(Preference::Inquire),
            "stop" => Ok(Preference::Stop),
            "break" => Ok(Preference::Break),
            _ => Err(Error::InvalidPreference(s.to_string())),
        }
    }
}

/// Read-only lookup from preference category to preference.
/// Category names are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceState {
    entries: HashMap<String, Preference>,
}

impl PreferenceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: &str, preference: Preference) -> Self {
        self.set(category, preference);
        self
    }

    pub fn set(&mut self, category: &str, preference: Preference) {
        self.entries.insert(category.to_lowercase(), preference);
    }

    /// Preference for a category, `Continue` when unset
    pub fn get(&self, category: &str) -> Preference {
        self.entries
            .get(&category.to_lowercase())
            .copied()
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply a `Category=Value` assignment
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<()> {
        let (category, value) = assignment.split_once('=').ok_or_else(|| {
            Error::config(format!(
                "Invalid preference '{}', expected CATEGORY=VALUE",
                assignment
            ))
        })?;
        let category = category.trim();
        if category.is_empty() {
            return Err(Error::config(format!(
                "Missing preference category in '{}'",
                assignment
            )));
        }
        self.set(category, value.parse()?);
        Ok(())
    }
}

/// A single entry to be written to the log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    timestamp: DateTime<Local>,
    severity: Severity,
    text: String,
    include_details: bool,
}

impl LogEntry {
    pub fn new(severity: Severity, text: impl Into<String>, include_details: bool) -> Self {
        Self::at(Local::now(), severity, text, include_details)
    }

    pub fn at(
        timestamp: DateTime<Local>,
        severity: Severity,
        text: impl Into<String>,
        include_details: bool,
    ) -> Self {
        Self {
            timestamp,
            severity,
            text: text.into(),
            include_details,
        }
    }

    /// An entry written verbatim, without timestamp or severity
    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(Severity::Information, text, false)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the entry as a log line, without line terminator
    pub fn render(&self) -> String {
        if !self.include_details {
            return self.text.clone();
        }

        let label = format!("{}:", self.severity);
        format!(
            "{} - {:<width$}{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            label,
            self.text,
            width = SEVERITY_LABEL_WIDTH
        )
    }
}
