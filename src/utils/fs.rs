//! File helpers shared by all content editors.

use crate::utils::date::backup_stamp;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Read a UTF-8 text file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write a text file, creating missing parent directories.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Copy `path` to `<path>.bak.<YYYYmmdd-HHMMSS>` and return the backup path.
pub fn backup(path: &Path) -> Result<PathBuf> {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".bak.{}", backup_stamp()));
    let backup = PathBuf::from(name);
    fs::copy(path, &backup)
        .with_context(|| format!("Failed to back up {}", path.display()))?;
    Ok(backup)
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_text_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("_pages/nested/learning.md");
        write_text(&path, "hello\n").unwrap();
        assert_eq!(read_text(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_read_text_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let err = read_text(&dir.path().join("missing.yml")).unwrap_err();
        assert!(err.to_string().contains("missing.yml"));
    }

    #[test]
    fn test_backup_copies_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("navigation.yml");
        fs::write(&path, "main:\n").unwrap();

        let backup = backup(&path).unwrap();
        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("navigation.yml.bak."));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "main:\n");
    }

    #[test]
    fn test_expand_path_keeps_plain_paths() {
        assert_eq!(expand_path(Path::new("files/a.pdf")), PathBuf::from("files/a.pdf"));
        assert!(!expand_path(Path::new("~/a.pdf")).starts_with("~"));
    }
}
