//! Learning resources page (`_pages/learning.md`).

use crate::{
    config::SiteConfig,
    log,
    utils::fs::{read_text, write_text},
};
use anyhow::Result;

const HEADING: &str = "## Recommended Resources";

const PAGE: &str = "---
layout: archive
title: \"Learning\"
permalink: /learning/
author_profile: true
---

## Recommended Resources

";

/// Create the learning page if it does not exist yet.
pub fn ensure_learning_page(config: &SiteConfig) -> Result<bool> {
    let path = &config.paths.learning;
    if path.exists() {
        return Ok(false);
    }
    write_text(path, PAGE)?;
    log!("learning"; "created {}", path.display());
    Ok(true)
}

/// Append a resource entry, or `None` when the url is already listed.
pub fn append_resource(content: &str, title: &str, url: &str, note: Option<&str>) -> Option<String> {
    if content.contains(url) {
        return None;
    }

    let mut content = content.to_owned();
    if !content.contains(HEADING) {
        content = format!("{}\n\n{HEADING}\n", content.trim_end());
    }

    let mut entry = format!("- [{title}]({url})");
    if let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) {
        entry.push_str(&format!("\n  {note}"));
    }
    Some(format!("{}\n\n{entry}\n", content.trim_end()))
}

/// Add a resource to the learning page, creating the page when needed.
///
/// Returns `false` when the url is already on the page.
pub fn add_learning_resource(
    config: &SiteConfig,
    title: &str,
    url: &str,
    note: Option<&str>,
) -> Result<bool> {
    ensure_learning_page(config)?;
    let path = &config.paths.learning;
    let content = read_text(path)?;

    match append_resource(&content, title.trim(), url.trim(), note) {
        Some(updated) => {
            write_text(path, &updated)?;
            log!("learning"; "added learning resource: {}", title.trim());
            Ok(true)
        }
        None => {
            log!("learning"; "learning resource already exists: {url}");
            Ok(false)
        }
    }
}
