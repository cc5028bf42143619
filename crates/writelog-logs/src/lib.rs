//! writelog Logs - Log file lifecycle, header detection, and directory hiding

mod header;
mod hide;
mod log_file;
mod reader;
mod registry;

pub use header::{header_present, host_name, user_name, SessionHeader};
pub use hide::hide_directory;
pub use log_file::{clear, ensure_exists, LogFile};
pub use reader::LogReader;
pub use registry::LogRegistry;

use std::path::Path;
use writelog_core::Result;

/// Check whether the log file at `path` is empty
pub fn is_empty(path: &Path) -> Result<bool> {
    LogReader::new(path.to_path_buf()).is_empty()
}

/// Scan the log file from its last line backwards for `needle`
pub fn contains_reverse(path: &Path, needle: &str) -> Result<bool> {
    LogReader::new(path.to_path_buf()).contains_reverse(needle)
}
