//! Session header (date, computer name and user name banner)

use chrono::{DateTime, Local};
use std::path::Path;
use sysinfo::System;
use writelog_core::{Result, HEADER_DATE_FORMAT, HEADER_LABEL_WIDTH};

use crate::reader::LogReader;

/// The three banner lines written at the top of a logging session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHeader {
    date_line: String,
    host_line: String,
    user_line: String,
}

impl SessionHeader {
    pub fn new(date: DateTime<Local>, host: &str, user: &str) -> Self {
        Self {
            date_line: label_line("Date:", &date.format(HEADER_DATE_FORMAT).to_string()),
            host_line: label_line("Computername:", host),
            user_line: label_line("Username:", user),
        }
    }

    /// Header for today on this machine and account
    pub fn current() -> Self {
        Self::new(Local::now(), &host_name(), &user_name())
    }

    pub fn date_line(&self) -> &str {
        &self.date_line
    }

    pub fn host_line(&self) -> &str {
        &self.host_line
    }

    pub fn user_line(&self) -> &str {
        &self.user_line
    }

    /// Whether all three lines already occur in the log at `path`
    pub fn is_present_in(&self, path: &Path) -> Result<bool> {
        header_present(path, &self.date_line, &self.host_line, &self.user_line)
    }

    /// The header block as one detail-free entry, optionally preceded by a
    /// blank separator line
    pub fn block(&self, separated: bool) -> String {
        let lines = [
            self.date_line.as_str(),
            self.host_line.as_str(),
            self.user_line.as_str(),
        ];
        let block = lines.join(crate::log_file::LINE_ENDING);
        if separated {
            format!("{}{}", crate::log_file::LINE_ENDING, block)
        } else {
            block
        }
    }
}

/// Each line is looked up on its own; the header counts as present only
/// when all three are found somewhere in the file.
pub fn header_present(path: &Path, date_line: &str, host_line: &str, user_line: &str) -> Result<bool> {
    let reader = LogReader::new(path.to_path_buf());
    Ok(reader.contains_reverse(date_line)?
        && reader.contains_reverse(host_line)?
        && reader.contains_reverse(user_line)?)
}

fn label_line(label: &str, value: &str) -> String {
    format!("{:<width$}{}", label, value, width = HEADER_LABEL_WIDTH)
}

/// Name of this machine
pub fn host_name() -> String {
    System::host_name()
        .filter(|name| !name.is_empty())
        .or_else(|| std::env::var("COMPUTERNAME").ok())
        .or_else(|| std::env::var("HOSTNAME").ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Name of the account running this process
pub fn user_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|name| !name.is_empty())
        .or_else(account_name)
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(unix)]
fn account_name() -> Option<String> {
    use nix::unistd::{getuid, User};

    User::from_uid(getuid()).ok().flatten().map(|user| user.name)
}

#[cfg(not(unix))]
fn account_name() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn header() -> SessionHeader {
        let date = Local.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        SessionHeader::new(date, "build-01", "alice")
    }

    #[test]
    fn test_header_lines() {
        let header = header();
        assert_eq!(header.date_line(), "Date:           07-03-2024");
        assert_eq!(header.host_line(), "Computername:   build-01");
        assert_eq!(header.user_line(), "Username:       alice");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_header_block() {
        let header = header();
        assert_eq!(
            header.block(false),
            "Date:           07-03-2024\nComputername:   build-01\nUsername:       alice"
        );
        assert!(header.block(true).starts_with("\nDate:"));
    }

    #[test]
    fn test_header_present_requires_all_three() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        let header = header();

        fs::write(&path, format!("{}\n{}\n", header.date_line(), header.host_line())).unwrap();
        assert!(!header.is_present_in(&path).unwrap());

        fs::write(
            &path,
            format!(
                "{}\nsome entry\n{}\n{}\nlater entry\n",
                header.user_line(),
                header.host_line(),
                header.date_line()
            ),
        )
        .unwrap();
        assert!(header.is_present_in(&path).unwrap());
    }

    #[test]
    fn test_header_absent_from_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(!header().is_present_in(&dir.path().join("none.log")).unwrap());
    }

    #[test]
    fn test_names_are_never_empty() {
        assert!(!host_name().is_empty());
        assert!(!user_name().is_empty());
    }
}
