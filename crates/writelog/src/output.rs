//! Console and JSON output for command results

use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for JSON output mode
static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable JSON output mode
pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::SeqCst);
}

/// Check if JSON output mode is enabled
pub fn is_json_mode() -> bool {
    JSON_MODE.load(Ordering::SeqCst)
}

/// Outcome counts of a `write` run
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: String,
    pub written: usize,
    pub suppressed: usize,
    pub failed: usize,
}

impl WriteSummary {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            ..Default::default()
        }
    }
}

/// JSON wrapper for generic responses
#[derive(Serialize)]
pub struct ResponseJson<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print a success message, as a JSON response when enabled
pub fn print_success_json<T: Serialize>(message: &str, data: Option<T>) {
    if is_json_mode() {
        let response = ResponseJson {
            success: true,
            message: Some(message.to_string()),
            data,
        };
        match serde_json::to_string_pretty(&response) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing to JSON: {}", e),
        }
    } else {
        print_success(message);
    }
}

/// Print the summary of a `write` run. Plain mode stays silent unless
/// something was held back.
pub fn print_write_summary(summary: &WriteSummary) {
    if is_json_mode() {
        match serde_json::to_string_pretty(summary) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing to JSON: {}", e),
        }
        return;
    }

    if summary.suppressed > 0 {
        print_info(&format!(
            "{} message(s) suppressed by preference",
            summary.suppressed
        ));
    }
    if summary.failed > 0 {
        print_error(&format!(
            "{} message(s) could not be written to {}",
            summary.failed, summary.path
        ));
    }
}
