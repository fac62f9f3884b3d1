//! Jekyll collection directories (`_publications`, `_talks`).
//!
//! Each entry is one Markdown file named `<date>-<slug>.md`. Two entries are
//! the same item when their front matter titles are equal.

use super::ContentError;
use crate::{
    log,
    utils::{front_matter, fs::read_text, slug::slugify},
};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// All Markdown files directly inside `dir`, sorted by name.
pub fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    files
}

/// Entries of `dir` whose `title:` equals `title` (both trimmed).
pub fn find_entries_by_title(dir: &Path, title: &str) -> Result<Vec<PathBuf>> {
    let title = title.trim();
    let mut found = Vec::new();
    for path in markdown_files(dir) {
        let text = read_text(&path)?;
        if front_matter::field(&text, "title").is_some_and(|t| t.trim() == title) {
            found.push(path);
        }
    }
    Ok(found)
}

/// File stem `<date>-<slug>` of a new entry.
pub fn entry_slug(date_iso: &str, title: &str, slug_hint: Option<&str>) -> String {
    format!("{date_iso}-{}", slugify(slug_hint.unwrap_or(title)))
}

/// Make room for a new entry titled `title`.
///
/// Existing entries with the same title are an error unless `replace` is
/// set, in which case they are deleted.
pub fn clear_duplicates(dir: &Path, kind: &'static str, title: &str, replace: bool) -> Result<()> {
    let existing = find_entries_by_title(dir, title)?;
    if let Some(first) = existing.first()
        && !replace
    {
        return Err(ContentError::Duplicate {
            kind,
            file: file_name(first),
        }
        .into());
    }

    for old in &existing {
        fs::remove_file(old).with_context(|| format!("Failed to remove {}", old.display()))?;
        log!("dedupe"; "removed duplicate {}: {}", kind.to_ascii_lowercase(), file_name(old));
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
