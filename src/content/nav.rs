//! Top navigation menu (`_data/navigation.yml`).
//!
//! The menu is edited line by line so comments, ordering and quoting of
//! untouched items survive. A menu item is recognized by its shape:
//!
//! ```yaml
//! main:
//!   - title: "Publications"
//!     url: /publications/
//! ```

use super::ContentError;
use crate::{
    config::SiteConfig,
    log,
    utils::{
        front_matter::unquote,
        fs::{backup, read_text, write_text},
        slug::normalize_url,
    },
};
use anyhow::{Context, Result};
use regex::Regex;
use std::{collections::HashSet, sync::LazyLock};

/// Title of the news menu item
pub const NEWS_TITLE: &str = "Group NEWs";
/// Permalink of the news page
pub const NEWS_URL: &str = "/group-news/";

static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*title:\s*(.*?)\s*$").unwrap());
static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*url:\s*(\S+)\s*$").unwrap());

static RE_MAIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)main\s*:\s*$").unwrap());
static RE_ITEM_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*-\s").unwrap());
static RE_BLOCK_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"title\s*:\s*(.+)").unwrap());
static RE_BLOCK_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"url\s*:\s*(.+)").unwrap());

static RE_PORTFOLIO_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?imR)title:[ \t]*["']?Portfolio["']?[ \t]*$"#).unwrap());
static RE_PORTFOLIO_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?imR)url:[ \t]*/portfolio/?[ \t]*$").unwrap());

/// A menu item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub title: String,
    pub url: String,
}

impl NavItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// A menu item together with the lines it was parsed from.
#[derive(Debug, Clone)]
pub struct NavEntry {
    pub item: NavItem,
    /// Index of the `- title:` line
    pub title_line: usize,
    /// Index of the `url:` line
    pub url_line: usize,
}

/// Every `- title:` line followed (blank lines aside) by a `url:` line.
pub fn parse_nav_items(content: &str) -> Vec<NavEntry> {
    let lines: Vec<&str> = content.lines().collect();
    let mut entries = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(caps) = RE_TITLE.captures(lines[i]) else {
            i += 1;
            continue;
        };
        let title = unquote(&caps[1]);

        let mut j = i + 1;
        while j < lines.len() && lines[j].trim().is_empty() {
            j += 1;
        }
        match lines.get(j).and_then(|line| RE_URL.captures(line)) {
            Some(url) => {
                entries.push(NavEntry {
                    item: NavItem::new(title.trim(), url[1].trim()),
                    title_line: i,
                    url_line: j,
                });
                i = j + 1;
            }
            // the next line may start another item
            None => i = j,
        }
    }
    entries
}

fn same_title(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Outcome of inserting a menu item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavInsert {
    /// An item with the same url or title is already there
    Exists(NavItem),
    /// The updated menu
    Inserted(String),
}

/// Insert `title -> url` after the item titled `after`, or at the end.
///
/// Titles compare case-insensitively.
pub fn insert_nav_item(content: &str, title: &str, url: &str, after: Option<&str>) -> NavInsert {
    let entries = parse_nav_items(content);
    if let Some(found) = entries
        .iter()
        .find(|e| e.item.url == url || same_title(&e.item.title, title))
    {
        return NavInsert::Exists(found.item.clone());
    }

    let mut lines: Vec<String> = content.lines().map(str::to_owned).collect();
    let insert_at = after
        .and_then(|after| {
            entries
                .iter()
                .find(|e| same_title(&e.item.title, after.trim()))
        })
        .map_or(lines.len(), |e| e.url_line + 1);

    let block = [
        String::new(),
        format!("  - title: \"{title}\""),
        format!("    url: {url}"),
    ];
    lines.splice(insert_at..insert_at, block);

    NavInsert::Inserted(format!("{}\n", lines.join("\n").trim_end()))
}

/// Add a menu item to the navigation file.
///
/// The url is normalized first. Returns `false` when an equivalent item
/// already exists.
pub fn add_nav_item(config: &SiteConfig, title: &str, url: &str, after: Option<&str>) -> Result<bool> {
    let path = &config.paths.nav;
    let url = normalize_url(url);
    let content = read_text(path)?;

    match insert_nav_item(&content, title.trim(), &url, after) {
        NavInsert::Exists(item) => {
            log!("nav"; "navigation item already exists: {} -> {}", item.title, item.url);
            Ok(false)
        }
        NavInsert::Inserted(updated) => {
            write_text(path, &updated)?;
            log!("nav"; "added nav item: {} -> {url}", title.trim());
            Ok(true)
        }
    }
}

/// Drop menu items of the `main:` list whose title or url is listed.
///
/// `titles` and `urls` must be lowercase. Returns the new content and the
/// removed items. Lines outside removed items are kept byte for byte.
pub fn remove_nav_items(
    content: &str,
    titles: &HashSet<String>,
    urls: &HashSet<String>,
) -> (String, Vec<NavItem>) {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let mut out = String::with_capacity(content.len());
    let mut removed = Vec::new();
    let mut main_end: Option<Regex> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        let Some(is_block_end) = &main_end else {
            if let Some(caps) = RE_MAIN.captures(line) {
                let indent = caps[1].len();
                main_end = Regex::new(&format!(r"^\s{{0,{indent}}}[a-zA-Z0-9_]+\s*:\s*$")).ok();
            }
            out.push_str(line);
            i += 1;
            continue;
        };

        if is_block_end.is_match(line) {
            main_end = None;
            out.push_str(line);
            i += 1;
            continue;
        }

        if !RE_ITEM_START.is_match(line) {
            out.push_str(line);
            i += 1;
            continue;
        }

        let start = i;
        i += 1;
        while i < lines.len() && !RE_ITEM_START.is_match(lines[i]) && !is_block_end.is_match(lines[i]) {
            i += 1;
        }
        let block = lines[start..i].concat();

        let value = |re: &Regex| {
            re.captures(&block)
                .map(|caps| unquote(&caps[1]).trim().to_lowercase())
                .unwrap_or_default()
        };
        let title = value(&RE_BLOCK_TITLE);
        let url = value(&RE_BLOCK_URL);

        if titles.contains(&title) || urls.contains(&url) {
            removed.push(NavItem::new(title, url));
        } else {
            out.push_str(&block);
        }
    }

    (out, removed)
}

/// Prune the navigation file.
///
/// Empty `titles`/`urls` fall back to `[nav.prune_titles]` and
/// `[nav.prune_urls]`. A timestamped backup is written before the file
/// changes unless `keep_backup` is false.
pub fn prune_nav(
    config: &SiteConfig,
    titles: &[String],
    urls: &[String],
    keep_backup: bool,
) -> Result<Vec<NavItem>> {
    let path = &config.paths.nav;
    if !path.is_file() {
        return Err(ContentError::MissingFile(path.clone()).into());
    }

    let lowercase = |values: &[String], fallback: &[String]| -> HashSet<String> {
        let values = if values.is_empty() { fallback } else { values };
        values.iter().map(|v| v.trim().to_lowercase()).collect()
    };
    let titles = lowercase(titles, &config.nav.prune_titles);
    let urls = lowercase(urls, &config.nav.prune_urls);

    let content = read_text(path)?;
    let (updated, removed) = remove_nav_items(&content, &titles, &urls);
    if removed.is_empty() {
        log!("nav"; "no matching menu items, nothing removed");
        return Ok(removed);
    }

    if keep_backup {
        let backup = backup(path)?;
        log!("nav"; "backup created: {}", backup.display());
    }
    for item in &removed {
        log!("nav"; "removing menu item: title='{}', url='{}'", or_na(&item.title), or_na(&item.url));
    }
    write_text(path, &updated)?;
    log!("nav"; "removed {} item(s) from main navigation", removed.len());

    Ok(removed)
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

/// Make sure the menu links to the news page.
///
/// A `Portfolio` item is renamed in place; otherwise the item is added after
/// `[nav.after]`. A missing navigation file is created.
pub fn ensure_news_nav(config: &SiteConfig) -> Result<()> {
    let path = &config.paths.nav;
    if !path.exists() {
        let content = format!("main:\n  - title: \"{NEWS_TITLE}\"\n    url: {NEWS_URL}\n");
        write_text(path, &content)?;
        log!("nav"; "created {} with {NEWS_TITLE}", path.display());
        return Ok(());
    }

    let content = read_text(path)?;
    let renamed = RE_PORTFOLIO_TITLE.replace_all(&content, format!("title: \"{NEWS_TITLE}\""));
    let renamed = RE_PORTFOLIO_URL
        .replace_all(&renamed, format!("url: {NEWS_URL}"))
        .into_owned();
    if renamed != content {
        write_text(path, &renamed)?;
        log!("nav"; "renamed Portfolio menu item to {NEWS_TITLE}");
    }

    let linked = parse_nav_items(&renamed)
        .iter()
        .any(|e| e.item.url == NEWS_URL);
    if !linked {
        add_nav_item(config, NEWS_TITLE, NEWS_URL, Some(config.nav.after.as_str()))
            .context("Failed to add the news menu item")?;
    }
    Ok(())
}
