//! Append-only log file handle

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use writelog_core::{Error, LogEntry, Result};

#[cfg(windows)]
pub(crate) const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub(crate) const LINE_ENDING: &str = "\n";

/// Create the parent directories and an empty file at `path` if missing
pub fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(Error::io("create directory", parent))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(Error::io("create", path))?;

    debug!("Created log file: {}", path.display());
    Ok(())
}

/// Truncate the file at `path` to zero length.
/// Callers holding an open handle on the path must close it first.
pub fn clear(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(Error::io("clear", path))?;

    debug!("Cleared log file: {}", path.display());
    Ok(())
}

/// Log file with an exclusively owned append-mode stream
pub struct LogFile {
    path: PathBuf,
    stream: Option<Box<dyn Write + Send>>,
}

impl LogFile {
    /// Create a closed handle for `path`
    pub fn new(path: PathBuf) -> Self {
        Self { path, stream: None }
    }

    /// Create an open handle that appends through `writer`
    pub fn with_writer(path: PathBuf, writer: impl Write + Send + 'static) -> Self {
        Self {
            path,
            stream: Some(Box::new(writer)),
        }
    }

    /// Open the file for appending, creating it when missing.
    /// Does nothing when the handle is already open and the file still exists.
    pub fn open(&mut self) -> Result<()> {
        if self.is_open() && self.path.exists() {
            return Ok(());
        }

        ensure_exists(&self.path)?;

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(Error::io("open", &self.path))?;

        self.stream = Some(Box::new(file));
        debug!("Opened log file: {}", self.path.display());
        Ok(())
    }

    /// Render and append an entry; false when it could not be written
    pub fn append(&mut self, entry: &LogEntry) -> bool {
        self.append_line(&entry.render())
    }

    /// Append `line` plus line terminator as a single write, then flush
    pub fn append_line(&mut self, line: &str) -> bool {
        let Some(stream) = self.stream.as_mut() else {
            warn!("Log file is not open: {}", self.path.display());
            return false;
        };

        let mut bytes = String::with_capacity(line.len() + LINE_ENDING.len());
        bytes.push_str(line);
        bytes.push_str(LINE_ENDING);

        match stream
            .write_all(bytes.as_bytes())
            .and_then(|_| stream.flush())
        {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to write to {}: {}", self.path.display(), e);
                false
            }
        }
    }

    /// Flush and release the stream; closing a closed handle succeeds
    pub fn close(&mut self) -> bool {
        let Some(mut stream) = self.stream.take() else {
            return true;
        };

        match stream.flush() {
            Ok(()) => {
                debug!("Closed log file: {}", self.path.display());
                true
            }
            Err(e) => {
                warn!("Failed to close {}: {}", self.path.display(), e);
                false
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Get the log file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for LogFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogFile")
            .field("path", &self.path)
            .field("is_open", &self.is_open())
            .finish()
    }
}

impl Drop for LogFile {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::TempDir;
    use writelog_core::Severity;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn test_ensure_exists_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("run.log");

        ensure_exists(&path).unwrap();
        assert!(path.exists());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);

        // Idempotent and non-destructive
        fs::write(&path, "kept\n").unwrap();
        ensure_exists(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept\n");
    }

    #[test]
    fn test_ensure_exists_reports_io_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = ensure_exists(&blocker.join("run.log")).unwrap_err();
        assert!(err.is_io_failure());
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");

        let mut log = LogFile::new(path.clone());
        log.open().unwrap();
        assert!(log.append_line("first"));
        log.open().unwrap();
        assert!(log.append_line("second"));

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_open_recreates_deleted_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");

        let mut log = LogFile::new(path.clone());
        log.open().unwrap();
        fs::remove_file(&path).unwrap();

        log.open().unwrap();
        assert!(path.exists());
        assert!(log.append_line("again"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "again\n");
    }

    #[test]
    fn test_append_is_immediately_visible() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");

        let mut log = LogFile::new(path.clone());
        log.open().unwrap();
        let entry = LogEntry::new(Severity::Warning, "low memory", true);
        assert!(log.append(&entry));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with(" - Warning:      low memory\n"));
    }

    #[test]
    fn test_append_when_closed_returns_false() {
        let dir = TempDir::new().unwrap();
        let mut log = LogFile::new(dir.path().join("run.log"));
        assert!(!log.append(&LogEntry::raw("nothing")));
    }

    #[test]
    fn test_append_failure_returns_false() {
        let mut log = LogFile::with_writer(PathBuf::from("full.log"), FailingWriter);
        assert!(log.is_open());
        assert!(!log.append(&LogEntry::raw("disk full")));
    }

    #[test]
    fn test_close_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut log = LogFile::new(dir.path().join("run.log"));
        log.open().unwrap();

        assert!(log.close());
        assert!(!log.is_open());
        assert!(log.close());
    }

    #[test]
    fn test_clear_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        fs::write(&path, "old content\n").unwrap();

        clear(&path).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);

        let mut log = LogFile::new(path.clone());
        log.open().unwrap();
        assert!(log.append_line("fresh"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_clear_missing_file_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.log");
        clear(&path).unwrap();
        assert!(!path.exists());
    }
}
