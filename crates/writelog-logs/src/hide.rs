//! Hiding the directory that holds a log file

use std::path::{Path, PathBuf};
use tracing::info;
use writelog_core::Result;

/// Hide the directory containing the log file at `path`.
///
/// On Unix-like systems the directory is renamed with a leading dot in a
/// single move and the relocated file path is returned. On Windows the hidden
/// attribute is set in place and `None` is returned. Paths without a named
/// parent directory, or whose directory is already dot-prefixed, are left
/// alone.
pub fn hide_directory(path: &Path) -> Result<Option<PathBuf>> {
    let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(None);
    };
    if !dir.is_dir() {
        return Ok(None);
    }

    hide(path, dir)
}

#[cfg(not(windows))]
fn hide(path: &Path, dir: &Path) -> Result<Option<PathBuf>> {
    use writelog_core::Error;

    let (Some(dir_name), Some(file_name)) = (dir.file_name(), path.file_name()) else {
        return Ok(None);
    };
    let dir_name = dir_name.to_string_lossy();
    if dir_name.starts_with('.') {
        return Ok(None);
    }

    let hidden_dir = dir.with_file_name(format!(".{}", dir_name));
    // rename(2) silently replaces an empty target directory
    if hidden_dir.exists() {
        return Err(Error::io("hide", dir)(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("'{}' already exists", hidden_dir.display()),
        )));
    }

    std::fs::rename(dir, &hidden_dir).map_err(Error::io("hide", dir))?;

    let hidden_path = hidden_dir.join(file_name);
    info!(
        "Log directory hidden, log file moved to {}",
        hidden_path.display()
    );
    Ok(Some(hidden_path))
}

#[cfg(windows)]
fn hide(_path: &Path, dir: &Path) -> Result<Option<PathBuf>> {
    use std::os::windows::ffi::OsStrExt;
    use windows::core::PCWSTR;
    use windows::Win32::Storage::FileSystem::{
        GetFileAttributesW, SetFileAttributesW, FILE_ATTRIBUTE_HIDDEN,
        FILE_FLAGS_AND_ATTRIBUTES, INVALID_FILE_ATTRIBUTES,
    };
    use writelog_core::Error;

    let wide: Vec<u16> = dir.as_os_str().encode_wide().chain(Some(0)).collect();

    let attributes = unsafe { GetFileAttributesW(PCWSTR(wide.as_ptr())) };
    if attributes == INVALID_FILE_ATTRIBUTES {
        return Err(Error::io("hide", dir)(std::io::Error::last_os_error()));
    }

    unsafe {
        SetFileAttributesW(
            PCWSTR(wide.as_ptr()),
            FILE_FLAGS_AND_ATTRIBUTES(attributes | FILE_ATTRIBUTE_HIDDEN.0),
        )
    }
    .map_err(|e| {
        Error::io("hide", dir)(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("SetFileAttributesW failed: {}", e.message()),
        ))
    })?;

    info!("Log directory hidden: {}", dir.display());
    Ok(None)
}
