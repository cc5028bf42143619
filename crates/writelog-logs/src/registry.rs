//! Registry of open log files keyed by path

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use writelog_core::Result;

use crate::log_file::{self, LogFile};

/// Owns every log handle of the process. Keep-alive sessions leave their
/// handle here so the next session on the same path reuses it.
///
/// Paths are keyed in absolute, lexically normalized form, so `logs/run.log`,
/// `./logs/run.log` and the absolute spelling share one handle.
#[derive(Debug, Default)]
pub struct LogRegistry {
    files: HashMap<PathBuf, LogFile>,
    initialized: HashSet<PathBuf>,
}

impl LogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the log at `path`, reusing an already open handle
    pub fn open(&mut self, path: &Path) -> Result<&mut LogFile> {
        let key = registry_key(path);
        let file = self
            .files
            .entry(key.clone())
            .or_insert_with(|| LogFile::new(key));
        file.open()?;
        Ok(file)
    }

    /// Register an already constructed handle, closing any handle it replaces
    pub fn insert(&mut self, file: LogFile) {
        if let Some(mut previous) = self.files.insert(registry_key(file.path()), file) {
            previous.close();
        }
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut LogFile> {
        self.files.get_mut(&registry_key(path))
    }

    pub fn is_open(&self, path: &Path) -> bool {
        self.files
            .get(&registry_key(path))
            .is_some_and(LogFile::is_open)
    }

    /// Close the handle on `path`; succeeds trivially when none is open
    pub fn close(&mut self, path: &Path) -> bool {
        match self.files.remove(&registry_key(path)) {
            Some(mut file) => file.close(),
            None => true,
        }
    }

    /// Close every registered handle, returning false if any close failed
    pub fn close_all(&mut self) -> bool {
        self.files
            .drain()
            .fold(true, |ok, (_, mut file)| file.close() && ok)
    }

    /// Force-close any handle on `path` and truncate the file
    pub fn clear(&mut self, path: &Path) -> Result<()> {
        self.close(path);
        self.initialized.remove(&registry_key(path));
        log_file::clear(path)
    }

    /// Move the registration of `from` to `to` after the file was relocated,
    /// and open the handle at its new location
    pub fn relocate(&mut self, from: &Path, to: &Path) -> Result<&mut LogFile> {
        self.close(from);
        if self.initialized.remove(&registry_key(from)) {
            self.initialized.insert(registry_key(to));
        }
        debug!("Relocated log {} -> {}", from.display(), to.display());
        self.open(to)
    }

    /// Whether a session already wrote (or verified) the header for `path`
    pub fn is_initialized(&self, path: &Path) -> bool {
        self.initialized.contains(&registry_key(path))
    }

    pub fn mark_initialized(&mut self, path: &Path) {
        self.initialized.insert(registry_key(path));
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically. Symlinks are
/// not followed; the directory of a hidden log no longer exists under its old
/// name and must still map to the same key.
fn registry_key(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut key = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                key.pop();
            }
            other => key.push(other.as_os_str()),
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_twice_reuses_handle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        let mut registry = LogRegistry::new();

        assert!(registry.open(&path).unwrap().append_line("one"));
        assert!(registry.open(&path).unwrap().append_line("two"));

        assert!(registry.is_open(&path));
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_insert_keeps_custom_handle_on_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        fs::write(&path, "").unwrap();
        let mut registry = LogRegistry::new();

        registry.insert(LogFile::with_writer(path.clone(), Vec::new()));
        assert!(registry.open(&path).unwrap().append_line("buffered"));

        // Went to the in-memory writer, not to disk
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_close_unknown_path_succeeds() {
        let mut registry = LogRegistry::new();
        assert!(registry.close(Path::new("never-opened.log")));
    }

    #[test]
    fn test_clear_force_closes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        let mut registry = LogRegistry::new();
        registry.open(&path).unwrap().append_line("old");
        registry.mark_initialized(&path);

        registry.clear(&path).unwrap();

        assert!(!registry.is_open(&path));
        assert!(!registry.is_initialized(&path));
        assert!(crate::is_empty(&path).unwrap());

        registry.open(&path).unwrap().append_line("new");
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_relocate_moves_initialized_mark() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("logs").join("run.log");
        let to = dir.path().join(".logs").join("run.log");
        let mut registry = LogRegistry::new();
        registry.open(&from).unwrap();
        registry.mark_initialized(&from);

        registry.relocate(&from, &to).unwrap();

        assert!(!registry.is_open(&from));
        assert!(registry.is_open(&to));
        assert!(registry.is_initialized(&to));
        assert!(!registry.is_initialized(&from));
    }

    #[test]
    fn test_path_spellings_share_one_handle() {
        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("logs").join("run.log");
        let dotted = dir.path().join("logs").join(".").join("run.log");
        let detour = dir.path().join("logs").join("..").join("logs").join("run.log");
        let mut registry = LogRegistry::new();

        assert!(registry.open(&plain).unwrap().append_line("one"));
        assert!(registry.open(&dotted).unwrap().append_line("two"));
        registry.mark_initialized(&detour);

        assert!(registry.is_open(&detour));
        assert!(registry.is_initialized(&plain));
        assert_eq!(registry.files.len(), 1);

        assert!(registry.close(&dotted));
        assert!(!registry.is_open(&plain));
        assert_eq!(fs::read_to_string(&plain).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_relative_path_matches_absolute() {
        let relative = Path::new("logs").join("run.log");
        let absolute = std::env::current_dir().unwrap().join("logs").join("run.log");

        assert_eq!(registry_key(&relative), absolute);
        assert_eq!(registry_key(&Path::new(".").join(&relative)), absolute);
    }

    #[test]
    fn test_close_all() {
        let dir = TempDir::new().unwrap();
        let mut registry = LogRegistry::new();
        let a = dir.path().join("a.log");
        let b = dir.path().join("b.log");
        registry.open(&a).unwrap();
        registry.open(&b).unwrap();

        assert!(registry.close_all());
        assert!(!registry.is_open(&a));
        assert!(!registry.is_open(&b));
    }
}
