//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::ExpenseError;

/// Read a whole file as UTF-8, returning `None` if it doesn't exist
pub fn read_optional<P: AsRef<Path>>(path: P) -> Result<Option<String>, ExpenseError> {
    let path = path.as_ref();

    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ExpenseError::Storage(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Replace `path` with `contents` via a sibling temp file and a rename
///
/// Readers see either the old contents or the new ones, never a mix.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<(), ExpenseError> {
    let path = path.as_ref();
    let fail = |what: &str, e: std::io::Error| {
        ExpenseError::Storage(format!("{} {}: {}", what, path.display(), e))
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| fail("Failed to create directory for", e))?;
    }

    // Same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let mut writer = BufWriter::new(
        File::create(&temp_path).map_err(|e| fail("Failed to create temp file for", e))?,
    );
    writer
        .write_all(contents)
        .and_then(|_| writer.flush())
        .and_then(|_| writer.get_ref().sync_all())
        .map_err(|e| fail("Failed to write", e))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(fail("Failed to replace", e));
    }
    Ok(())
}

/// Remove a file, treating "already gone" as success
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<(), ExpenseError> {
    let path = path.as_ref();

    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ExpenseError::Storage(format!(
            "Failed to remove {}: {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        assert_eq!(read_optional(&path).unwrap(), None);
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");

        write_atomic(&path, b"[]").unwrap();

        assert_eq!(read_optional(&path).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");

        write_atomic(&path, b"[1, 2]").unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("users.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("session.json");

        write_atomic(&path, b"{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_remove_if_exists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        remove_if_exists(&path).unwrap();

        write_atomic(&path, b"{}").unwrap();
        remove_if_exists(&path).unwrap();
        assert!(!path.exists());
    }
}
