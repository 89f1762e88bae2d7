//! Atomic write primitives
//!
//! Uses temp→rename pattern to ensure no partial writes

use crate::errors::{io_error, Result};
use std::fs;
use std::path::Path;

/// Atomically write bytes to a file
///
/// The content lands in a sibling temp file first and is renamed into
/// place, so readers see either the old file or the complete new one.
///
/// # Errors
///
/// `Io` if the parent directory, temp file, or rename fails.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_parent_dir", e))?;
    }

    let mut temp_name = target_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = target_path.with_file_name(temp_name);

    fs::write(&temp_path, content).map_err(|e| io_error("write_temp", e))?;
    fs::rename(&temp_path, target_path).map_err(|e| io_error("rename_temp", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("subdir").join("index.md");

        atomic_write(&target, b"# Report").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"# Report");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("result.json");
        atomic_write(&target, b"old").unwrap();

        atomic_write(&target, b"new").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn test_no_tmp_files_after_write() {
        let temp_dir = TempDir::new().unwrap();
        atomic_write(&temp_dir.path().join("a.zip"), b"clean").unwrap();

        let leftovers = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();

        assert_eq!(leftovers, 0);
    }
}
