//! Atomic file output for export documents.

use crate::domain::error::Result;
use std::path::Path;

/// Writes `contents` to `path` via a sibling temporary file and a rename, so a
/// reader never observes a partially written export.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the temporary file
/// cannot be written, or the rename fails.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
    std::fs::write(&tmp_path, contents)?;

    tracing::trace!(path = ?path, "renaming temporary file to final location");
    if let Err(error) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(error.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_existing_file_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("export.csv");

        write_atomic(&path, "a\n1\n").unwrap();
        write_atomic(&path, "a\n2\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\n2\n");
        let names: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("export.csv")]);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target path makes the rename fail.
        let target = dir.path().join("export.json");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "x").unwrap();

        assert!(write_atomic(&target, "{}").is_err());
        assert!(!dir.path().join("export.json.tmp").exists());
    }
}
