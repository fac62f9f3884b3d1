//! Talk collection (`_talks/<date>-<slug>.md`).

use super::{
    assets::{AssetKind, check_source, copy_asset},
    collection::{clear_duplicates, entry_slug},
};
use crate::{
    config::SiteConfig,
    log,
    utils::{
        date::iso_date,
        front_matter::{DELIMITER, yaml_quote},
        fs::write_text,
    },
};
use anyhow::Result;
use std::path::PathBuf;

/// Everything needed to write a talk entry
#[derive(Debug, Clone, Default)]
pub struct TalkDraft {
    pub title: String,
    pub date: String,
    pub venue: String,
    pub location: String,
    /// e.g. `Talk`, `Invited Talk`, `Oral Presentation`
    pub talk_type: String,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub slides_file: Option<PathBuf>,
    pub slides_name: Option<String>,
    pub image_file: Option<PathBuf>,
    pub image_name: Option<String>,
    pub cert_file: Option<PathBuf>,
    pub cert_name: Option<String>,
    pub slug: Option<String>,
    pub replace_existing: bool,
}

/// A written talk entry and the URLs of its copied assets
#[derive(Debug, Clone)]
pub struct TalkRecord {
    pub path: PathBuf,
    /// Normalized `YYYY-MM-DD` date
    pub date_iso: String,
    pub slides_url: Option<String>,
    pub cert_url: Option<String>,
    pub teaser_url: Option<String>,
}

impl TalkRecord {
    /// `[Slides](..) | [Certificate](..)` style links, empty without assets.
    pub fn links(&self, slides_label: &str, cert_label: &str) -> String {
        let mut links = Vec::new();
        if let Some(url) = &self.slides_url {
            links.push(format!("[{slides_label}]({url})"));
        }
        if let Some(url) = &self.cert_url {
            links.push(format!("[{cert_label}]({url})"));
        }
        links.join(" | ")
    }
}

/// Write a talk entry and copy its slides, teaser image and certificate.
pub fn add_talk(config: &SiteConfig, draft: &TalkDraft) -> Result<TalkRecord> {
    let date_iso = iso_date(&draft.date)?;
    let slug = entry_slug(&date_iso, &draft.title, draft.slug.as_deref());
    let dir = &config.paths.talks;
    let path = dir.join(format!("{slug}.md"));

    for source in [&draft.slides_file, &draft.image_file, &draft.cert_file] {
        check_source(source.as_deref())?;
    }
    clear_duplicates(dir, "Talk", &draft.title, draft.replace_existing)?;

    let slides_url = copy_asset(
        config,
        AssetKind::File,
        draft.slides_file.as_deref(),
        draft.slides_name.as_deref(),
    )?;
    let teaser_url = copy_asset(
        config,
        AssetKind::Image,
        draft.image_file.as_deref(),
        draft.image_name.as_deref(),
    )?;
    let cert_url = copy_asset(
        config,
        AssetKind::File,
        draft.cert_file.as_deref(),
        draft.cert_name.as_deref(),
    )?;
    let record = TalkRecord {
        path,
        date_iso: date_iso.clone(),
        slides_url,
        cert_url,
        teaser_url,
    };

    let excerpt = draft.excerpt.clone().unwrap_or_else(|| draft.title.clone());
    let body = draft.body.clone().unwrap_or_else(|| {
        let links = record.links("Download Slides", "Download Certificate");
        if links.is_empty() {
            excerpt.clone()
        } else {
            format!("{excerpt}\n\n{links}")
        }
    });

    let talk_type = if draft.talk_type.is_empty() { "Talk" } else { &draft.talk_type };
    let mut lines = vec![
        DELIMITER.to_owned(),
        format!("title: {}", yaml_quote(&draft.title)),
        "collection: talks".to_owned(),
        format!("type: {}", yaml_quote(talk_type)),
        format!("permalink: /talks/{slug}"),
        format!("venue: {}", yaml_quote(&draft.venue)),
        format!("date: {date_iso}"),
        format!("location: {}", yaml_quote(&draft.location)),
        format!("excerpt: {}", yaml_quote(&excerpt)),
    ];
    if let Some(url) = &record.teaser_url {
        lines.push("header:".to_owned());
        lines.push(format!("  teaser: {url}"));
    }
    if let Some(url) = &record.slides_url {
        lines.push(format!("slidesurl: {}", yaml_quote(url)));
    }
    lines.push(DELIMITER.to_owned());

    write_text(&record.path, &format!("{}\n\n{body}\n", lines.join("\n")))?;
    log!("talk"; "created talk: {}", record.path.display());

    Ok(record)
}
