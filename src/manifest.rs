//! Batch additions from a JSON manifest (`quick-add-all`).
//!
//! ```json
//! {
//!   "defaults": { "add_news": true, "replace_existing": false },
//!   "nav": { "title": "Learning", "url": "/learning/", "after": "Teaching" },
//!   "learning": [{ "title": "Rust Book", "url": "https://doc.rust-lang.org/book/" }],
//!   "papers": [{ "title": "...", "date": "2026-02-26", "venue": "...", "citation": "..." }],
//!   "talks": [{ "title": "...", "date": "2025-06-18", "venue": "...", "location": "..." }],
//!   "news": [{ "date": "2026.02", "text": "..." }]
//! }
//! ```
//!
//! Sections run in the order nav, learning, papers, talks, news. Relative
//! asset paths are resolved against the manifest's directory.

use crate::{
    config::SiteConfig,
    content::{
        ContentError,
        nav::add_nav_item,
        news::{NewsAssets, add_group_news_with_assets},
        publication::PublicationDraft,
        talk::TalkDraft,
    },
    log,
    utils::fs::{expand_path, read_text},
    workflow::{
        Announcement, LearningRequest, NavTarget, quick_add_learning, quick_add_paper,
        quick_add_talk,
    },
};
use anyhow::{Context, Result};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// A scalar as users write it in JSON: `"2026.02"`, `202602`, `true`, `"yes"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    fn text(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Str(s) => s.trim().to_owned(),
        }
    }

    fn flag(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(n) => Some(*n != 0),
            Self::Float(n) => Some(*n != 0.0),
            Self::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "y" | "on" => Some(true),
                "0" | "false" | "no" | "n" | "off" => Some(false),
                _ => None,
            },
        }
    }
}

type Field = Option<Scalar>;

fn optional(field: &Field) -> Option<String> {
    field.as_ref().map(Scalar::text).filter(|s| !s.is_empty())
}

fn required(field: &Field, key: &'static str, context: &str) -> Result<String, ContentError> {
    optional(field).ok_or_else(|| ContentError::MissingField {
        key,
        context: context.to_owned(),
    })
}

fn flag(field: &Field, default: bool) -> Result<bool, ContentError> {
    match field {
        None => Ok(default),
        Some(value) => value
            .flag()
            .ok_or_else(|| ContentError::Manifest(format!("invalid boolean value `{}`", value.text()))),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DefaultsSpec {
    add_news: Field,
    replace_existing: Field,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NavSpec {
    title: Field,
    url: Field,
    after: Field,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LearningSpec {
    title: Field,
    url: Field,
    note: Field,
    add_nav: Field,
    nav_title: Field,
    nav_url: Field,
    after: Field,
    add_news: Field,
    date: Field,
    news_text: Field,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PaperSpec {
    title: Field,
    date: Field,
    venue: Field,
    citation: Field,
    excerpt: Field,
    body: Field,
    category: Field,
    link: Field,
    paper_file: Field,
    paper_name: Field,
    paper_url: Field,
    slug: Field,
    keep_venue_year: Field,
    replace_existing: Field,
    add_news: Field,
    news_date: Field,
    news_text: Field,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TalkSpec {
    title: Field,
    date: Field,
    venue: Field,
    location: Field,
    #[serde(rename = "type")]
    talk_type: Field,
    excerpt: Field,
    body: Field,
    slides_file: Field,
    slides_name: Field,
    image_file: Field,
    image_name: Field,
    cert_file: Field,
    cert_name: Field,
    slug: Field,
    replace_existing: Field,
    add_news: Field,
    news_date: Field,
    news_text: Field,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NewsSpec {
    date: Field,
    text: Field,
    image_file: Field,
    image_name: Field,
    cert_file: Field,
    cert_name: Field,
    cert_label: Field,
    image_alt: Field,
}

/// Items added by a manifest run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestSummary {
    pub learning: usize,
    pub papers: usize,
    pub talks: usize,
    pub news: usize,
}

impl fmt::Display for ManifestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "learning={}, papers={}, talks={}, news={}",
            self.learning, self.papers, self.talks, self.news
        )
    }
}

/// A loaded manifest and the directory its relative paths resolve against
struct Manifest {
    root: Map<String, Value>,
    base_dir: PathBuf,
}

impl Manifest {
    fn load(config: &SiteConfig, path: &Path) -> Result<Self> {
        let path = expand_path(path);
        let path = if path.is_absolute() { path } else { config.root.join(path) };
        if !path.is_file() {
            return Err(ContentError::MissingFile(path).into());
        }

        let raw = read_text(&path)?;
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;
        let Value::Object(root) = value else {
            return Err(ContentError::Manifest("root must be a JSON object".into()).into());
        };
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self { root, base_dir })
    }

    /// Items of a list section; absent and `null` mean empty.
    fn section<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<(String, T)>> {
        let items = match self.root.get(key) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ContentError::Manifest(format!("field '{key}' must be a list")).into());
            }
        };

        items
            .iter()
            .enumerate()
            .map(|(idx, item)| -> Result<(String, T)> {
                let context = format!("{key}[{idx}]");
                if !item.is_object() {
                    return Err(
                        ContentError::Manifest(format!("field '{context}' must be an object")).into(),
                    );
                }
                let spec = T::deserialize(item).with_context(|| format!("Invalid {context}"))?;
                Ok((context, spec))
            })
            .collect()
    }

    /// An object field; absent, `null` and `{}` mean unset.
    fn object<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.root.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) if map.is_empty() => Ok(None),
            Some(value @ Value::Object(_)) => {
                let spec = T::deserialize(value).with_context(|| format!("Invalid {key}"))?;
                Ok(Some(spec))
            }
            Some(_) => Err(ContentError::Manifest(format!("field '{key}' must be an object")).into()),
        }
    }

    fn source(&self, field: &Field) -> Option<PathBuf> {
        optional(field).map(|raw| {
            let path = expand_path(Path::new(&raw));
            if path.is_absolute() { path } else { self.base_dir.join(path) }
        })
    }
}

/// Run every section of the manifest at `path`.
///
/// A relative `path` is resolved against the site root.
pub fn quick_add_all(config: &SiteConfig, path: &Path) -> Result<ManifestSummary> {
    let manifest = Manifest::load(config, path)?;
    let defaults: DefaultsSpec = manifest.object("defaults")?.unwrap_or_default();
    let default_news = flag(&defaults.add_news, true)?;
    let default_replace = flag(&defaults.replace_existing, false)?;
    let mut summary = ManifestSummary::default();

    if let Some(nav) = manifest.object::<NavSpec>("nav")? {
        let title = required(&nav.title, "title", "nav")?;
        let url = required(&nav.url, "url", "nav")?;
        let after = optional(&nav.after).unwrap_or_else(|| config.nav.after.clone());
        add_nav_item(config, &title, &url, Some(after.as_str()))?;
    }

    for (context, item) in manifest.section::<LearningSpec>("learning")? {
        let nav = flag(&item.add_nav, false)?.then(|| NavTarget {
            title: optional(&item.nav_title).unwrap_or_else(|| "Learning".into()),
            url: optional(&item.nav_url).unwrap_or_else(|| "/learning/".into()),
            after: optional(&item.after),
        });
        let add_news = flag(&item.add_news, default_news)?;
        let request = LearningRequest {
            title: required(&item.title, "title", &context)?,
            url: required(&item.url, "url", &context)?,
            note: optional(&item.note),
            nav,
            news: add_news.then(|| Announcement {
                date: optional(&item.date),
                text: optional(&item.news_text),
            }),
        };
        quick_add_learning(config, &request)?;
        summary.learning += 1;
        summary.news += usize::from(add_news);
    }

    for (context, item) in manifest.section::<PaperSpec>("papers")? {
        let draft = PublicationDraft {
            title: required(&item.title, "title", &context)?,
            date: required(&item.date, "date", &context)?,
            venue: required(&item.venue, "venue", &context)?,
            citation: required(&item.citation, "citation", &context)?,
            excerpt: optional(&item.excerpt),
            body: optional(&item.body),
            category: optional(&item.category).unwrap_or_else(|| "manuscripts".into()),
            link: optional(&item.link),
            paper_file: manifest.source(&item.paper_file),
            paper_name: optional(&item.paper_name),
            paper_url: optional(&item.paper_url),
            slug: optional(&item.slug),
            replace_existing: flag(&item.replace_existing, default_replace)?,
            keep_venue_year: flag(&item.keep_venue_year, false)?,
        };
        let news = announcement(&item.add_news, default_news, &item.news_date, &item.news_text)?;
        quick_add_paper(config, &draft, news.as_ref())?;
        summary.papers += 1;
        summary.news += usize::from(news.is_some());
    }

    for (context, item) in manifest.section::<TalkSpec>("talks")? {
        let draft = TalkDraft {
            title: required(&item.title, "title", &context)?,
            date: required(&item.date, "date", &context)?,
            venue: required(&item.venue, "venue", &context)?,
            location: required(&item.location, "location", &context)?,
            talk_type: optional(&item.talk_type).unwrap_or_else(|| "Talk".into()),
            excerpt: optional(&item.excerpt),
            body: optional(&item.body),
            slides_file: manifest.source(&item.slides_file),
            slides_name: optional(&item.slides_name),
            image_file: manifest.source(&item.image_file),
            image_name: optional(&item.image_name),
            cert_file: manifest.source(&item.cert_file),
            cert_name: optional(&item.cert_name),
            slug: optional(&item.slug),
            replace_existing: flag(&item.replace_existing, default_replace)?,
        };
        let news = announcement(&item.add_news, default_news, &item.news_date, &item.news_text)?;
        quick_add_talk(config, &draft, news.as_ref())?;
        summary.talks += 1;
        summary.news += usize::from(news.is_some());
    }

    for (context, item) in manifest.section::<NewsSpec>("news")? {
        let date = required(&item.date, "date", &context)?;
        let text = required(&item.text, "text", &context)?;
        let assets = NewsAssets {
            image_file: manifest.source(&item.image_file),
            image_name: optional(&item.image_name),
            image_alt: optional(&item.image_alt),
            cert_file: manifest.source(&item.cert_file),
            cert_name: optional(&item.cert_name),
            cert_label: optional(&item.cert_label),
        };
        add_group_news_with_assets(config, &date, &text, &assets)?;
        summary.news += 1;
    }

    log!("done"; "quick-add-all completed: {summary}");
    Ok(summary)
}

fn announcement(
    add_news: &Field,
    default: bool,
    date: &Field,
    text: &Field,
) -> Result<Option<Announcement>, ContentError> {
    Ok(flag(add_news, default)?.then(|| Announcement {
        date: optional(date),
        text: optional(text),
    }))
}
