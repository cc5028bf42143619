//! Log reader for lookups against existing log content

use std::fs;
use std::path::PathBuf;
use writelog_core::{Error, Result};

/// Read-only view of a log file
pub struct LogReader {
    path: PathBuf,
}

impl LogReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read all lines of the log file; a missing file has no lines
    pub fn lines(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let bytes = fs::read(&self.path).map_err(Error::io("read", &self.path))?;
        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect())
    }

    /// Whether any line contains `needle`, checking the most recent lines first
    pub fn contains_reverse(&self, needle: &str) -> Result<bool> {
        Ok(self
            .lines()?
            .iter()
            .rev()
            .any(|line| line.contains(needle)))
    }

    /// Whether the file has zero length
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.size()? == 0)
    }

    /// Get file size
    pub fn size(&self) -> Result<u64> {
        Ok(fs::metadata(&self.path)
            .map_err(Error::io("stat", &self.path))?
            .len())
    }
}
