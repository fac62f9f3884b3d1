//! Group news page (`_pages/group-news.md`).
//!
//! Entries live under `## <year>` headings, newest year first:
//!
//! ```markdown
//! ## 2026
//!
//! - [2026.02] Added a new learning resource: [Rust Book](https://...).
//! ```

use super::{
    ContentError,
    assets::{AssetKind, copy_asset},
    nav::{NEWS_URL, ensure_news_nav},
};
use crate::{
    config::SiteConfig,
    log,
    utils::{
        date::{NewsDate, news_label},
        front_matter,
        fs::{read_text, write_text},
    },
};
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Front matter of a freshly created news page
pub const FRONT_MATTER: &str = "---
layout: archive
title: \"Group NEWs\"
permalink: /group-news/
author_profile: true
---
";

const DEFAULT_CERT_LABEL: &str = "Certificate";
const DEFAULT_IMAGE_ALT: &str = "News image";

static RE_YEAR_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+(\d{4})\s*$").unwrap());
static RE_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

/// Files attached to a news entry
#[derive(Debug, Clone, Default)]
pub struct NewsAssets {
    pub image_file: Option<PathBuf>,
    pub image_name: Option<String>,
    pub image_alt: Option<String>,
    pub cert_file: Option<PathBuf>,
    pub cert_name: Option<String>,
    pub cert_label: Option<String>,
}

/// Insert `- [<label>] <text>` under its year heading.
///
/// Returns `None` when the identical entry is already on the page.
pub fn insert_news_entry(content: &str, date: &NewsDate, text: &str) -> Option<String> {
    let entry = format!("- [{}] {}", date.label, text.trim());
    if content.contains(&entry) {
        return None;
    }

    let mut lines: Vec<String> = content.lines().map(str::to_owned).collect();
    let headings: Vec<(usize, u16)> = lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let caps = RE_YEAR_HEADING.captures(line.trim())?;
            Some((idx, caps[1].parse().ok()?))
        })
        .collect();

    if let Some(&(idx, _)) = headings.iter().find(|(_, year)| *year == date.year) {
        let mut insert_at = idx + 1;
        while insert_at < lines.len() && lines[insert_at].trim().is_empty() {
            insert_at += 1;
        }
        lines.splice(insert_at..insert_at, [String::new(), entry, String::new()]);
    } else {
        let insert_at = match headings.iter().find(|(_, year)| *year < date.year) {
            Some(&(idx, _)) => idx,
            None if headings.is_empty() => front_matter::end_line(&lines),
            None => lines.len(),
        };
        let section = [
            String::new(),
            format!("## {}", date.year),
            String::new(),
            entry,
            String::new(),
        ];
        lines.splice(insert_at..insert_at, section);
    }

    Some(format!("{}\n", lines.join("\n").trim_end()))
}

/// Add an entry to the news page.
///
/// `date_raw` accepts `YYYY.MM`, `YYYY-MM`, `YYYY-MM-DD`, `YYYYMM` or
/// `YYYY`. Returns `false` when the entry already exists.
pub fn add_group_news(config: &SiteConfig, date_raw: &str, text: &str) -> Result<bool> {
    let path = &config.paths.news;
    if !path.is_file() {
        return Err(ContentError::MissingFile(path.clone()).into());
    }

    let date = news_label(date_raw)?;
    let content = read_text(path)?;
    match insert_news_entry(&content, &date, text) {
        Some(updated) => {
            write_text(path, &updated)?;
            log!("news"; "added group news entry under ## {}", date.year);
            Ok(true)
        }
        None => {
            log!("news"; "news entry already exists");
            Ok(false)
        }
    }
}

/// Join the text with an optional certificate link and image.
///
/// Parts are separated by `<br>` so they render on separate lines.
pub fn compose_news_text(
    text: &str,
    cert_url: Option<&str>,
    cert_label: Option<&str>,
    image_url: Option<&str>,
    image_alt: Option<&str>,
) -> String {
    let or_default = |value: Option<&str>, default: &'static str| {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_owned()
    };

    let mut parts = Vec::new();
    let text = text.trim();
    if !text.is_empty() {
        parts.push(text.to_owned());
    }
    if let Some(url) = cert_url.filter(|u| !u.is_empty()) {
        parts.push(format!("[{}]({url})", or_default(cert_label, DEFAULT_CERT_LABEL)));
    }
    if let Some(url) = image_url.filter(|u| !u.is_empty()) {
        parts.push(format!("![{}]({url})", or_default(image_alt, DEFAULT_IMAGE_ALT)));
    }
    parts.join("<br>\n")
}

/// Copy the entry's image and certificate, then add the composed entry.
pub fn add_group_news_with_assets(
    config: &SiteConfig,
    date_raw: &str,
    text: &str,
    assets: &NewsAssets,
) -> Result<bool> {
    // fail on a bad date before any file is copied
    news_label(date_raw)?;

    let image_url = copy_asset(
        config,
        AssetKind::Image,
        assets.image_file.as_deref(),
        assets.image_name.as_deref(),
    )?;
    let cert_url = copy_asset(
        config,
        AssetKind::File,
        assets.cert_file.as_deref(),
        assets.cert_name.as_deref(),
    )?;

    let text = compose_news_text(
        text,
        cert_url.as_deref(),
        assets.cert_label.as_deref(),
        image_url.as_deref(),
        assets.image_alt.as_deref(),
    );
    add_group_news(config, date_raw, &text)
}

/// Turn every newline into a rendered line break.
///
/// A full-width bar `｜` also starts a new line.
pub fn force_breaks(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('｜', "<br>｜");
    RE_NEWLINES
        .replace_all(&text, |caps: &regex::Captures| "<br>\n".repeat(caps[0].len()))
        .into_owned()
}

/// One record of a news entries file
#[derive(Debug, Clone, Deserialize)]
pub struct NewsRecord {
    /// `YYYY.MM`
    pub date: String,
    pub text: String,
}

/// Render records as year sections, newest first.
///
/// Records of the same month keep their order.
pub fn render_news_grouped(records: &[NewsRecord]) -> Result<String> {
    let mut parsed = Vec::with_capacity(records.len());
    for record in records {
        let date = news_label(&record.date)?;
        let month: u8 = date
            .label
            .split_once('.')
            .and_then(|(_, month)| month.parse().ok())
            .unwrap_or(0);
        parsed.push((date.year, month, force_breaks(record.text.trim())));
    }
    parsed.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));

    let mut sections: Vec<String> = Vec::new();
    let mut current = None;
    for (year, _, text) in parsed {
        if current != Some(year) {
            sections.push(format!("## {year}"));
            current = Some(year);
        }
        sections.push(text);
    }

    if sections.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("{}\n", sections.join("\n\n")))
}

/// Create the news page, or repair its front matter.
///
/// A page that does not start with a front matter block, or whose block
/// lacks the news permalink, gets the canonical block instead.
pub fn ensure_news_page(config: &SiteConfig) -> Result<()> {
    let path = &config.paths.news;
    if !path.exists() {
        write_text(path, &format!("{FRONT_MATTER}\n"))?;
        log!("news"; "created {}", path.display());
        return Ok(());
    }

    let text = read_text(path)?;
    let permalink = format!("permalink: {NEWS_URL}");
    if !text.trim_start().starts_with(front_matter::DELIMITER) || !text.contains(&permalink) {
        let body = front_matter::strip(&text);
        write_text(path, &format!("{FRONT_MATTER}\n{body}"))?;
        log!("news"; "replaced front matter of {}", path.display());
    }
    Ok(())
}

/// Set up the news page and menu item.
///
/// With an entries file (a JSON list of `{"date", "text"}` objects), the
/// page body is rebuilt from it while the front matter is kept.
pub fn setup_news(config: &SiteConfig, entries: Option<&Path>) -> Result<()> {
    ensure_news_nav(config)?;
    ensure_news_page(config)?;

    let Some(entries) = entries else {
        log!("news"; "group news is set up at {NEWS_URL}");
        return Ok(());
    };

    let raw = read_text(entries)?;
    let records: Vec<NewsRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid news entries file {}", entries.display()))?;
    let body = render_news_grouped(&records)?;

    let path = &config.paths.news;
    let text = read_text(path)?;
    let front = front_matter::split(&text).map_or(FRONT_MATTER, |(front, _)| front);
    write_text(path, &format!("{}\n\n{body}", front.trim_end()))?;
    log!("news"; "rebuilt {} with {} entries", path.display(), records.len());
    Ok(())
}
