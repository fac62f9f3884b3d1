//! Copying user files into the site's asset directories.

use super::ContentError;
use crate::{config::SiteConfig, log, utils::fs::expand_path};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Asset directory a file is copied into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Downloads (PDFs, slides, certificates) under `files/`
    File,
    /// Images under `images/`
    Image,
}

impl AssetKind {
    fn dir(self, config: &SiteConfig) -> &Path {
        match self {
            Self::File => &config.paths.files,
            Self::Image => &config.paths.images,
        }
    }

    /// Site URL prefix of this directory
    pub const fn url_prefix(self) -> &'static str {
        match self {
            Self::File => "/files",
            Self::Image => "/images",
        }
    }
}

/// Fail with [`ContentError::MissingSource`] unless `source` is an existing file.
pub fn check_source(source: Option<&Path>) -> Result<()> {
    match source.map(expand_path) {
        Some(path) if !path.is_file() => Err(ContentError::MissingSource(path).into()),
        _ => Ok(()),
    }
}

/// Copy `source` into the asset directory and return its site URL.
///
/// `target_name` renames the copy; by default the source filename is kept.
/// Returns `None` when no source was given.
pub fn copy_asset(
    config: &SiteConfig,
    kind: AssetKind,
    source: Option<&Path>,
    target_name: Option<&str>,
) -> Result<Option<String>> {
    let Some(source) = source else {
        return Ok(None);
    };
    check_source(Some(source))?;
    let source = expand_path(source);

    let filename = match target_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_owned(),
        None => source
            .file_name()
            .context("Source path has no file name")?
            .to_string_lossy()
            .into_owned(),
    };

    let dir = kind.dir(config);
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let target = dir.join(&filename);
    if is_same_file(&source, &target) {
        log!("assets"; "{} already in place", target.display());
    } else {
        fs::copy(&source, &target)
            .with_context(|| format!("Failed to copy {} to {}", source.display(), target.display()))?;
        log!("assets"; "copied {} -> {}", source.display(), target.display());
    }

    Ok(Some(format!("{}/{filename}", kind.url_prefix())))
}

/// Copying a file onto itself would truncate it.
fn is_same_file(source: &Path, target: &Path) -> bool {
    match (source.canonicalize(), target.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
