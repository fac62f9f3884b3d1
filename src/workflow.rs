//! Multi-step "quick" commands.
//!
//! Each workflow adds an item and, unless told otherwise, announces it in
//! the group news. The single-file steps live in [`crate::content`].

use crate::{
    config::SiteConfig,
    content::{
        learning::add_learning_resource,
        nav::add_nav_item,
        news::{add_group_news, compose_news_text},
        publication::{PublicationDraft, PublicationRecord, add_publication},
        talk::{TalkDraft, TalkRecord, add_talk},
    },
    utils::date::current_month,
};
use anyhow::Result;

/// News entry announcing a new item
#[derive(Debug, Clone, Default)]
pub struct Announcement {
    /// News date; defaults to the item's date
    pub date: Option<String>,
    /// News text; defaults to a generated sentence
    pub text: Option<String>,
}

/// Menu item pointing at the learning page
#[derive(Debug, Clone)]
pub struct NavTarget {
    pub title: String,
    pub url: String,
    pub after: Option<String>,
}

/// A learning resource and what to do besides adding it
#[derive(Debug, Clone)]
pub struct LearningRequest {
    pub title: String,
    pub url: String,
    pub note: Option<String>,
    pub nav: Option<NavTarget>,
    pub news: Option<Announcement>,
}

/// Default news text for a learning resource.
pub fn learning_news_text(title: &str, url: &str) -> String {
    format!("Added a new learning resource: [{title}]({url}).")
}

/// Default news text for a publication.
pub fn paper_news_text(title: &str, url: Option<&str>) -> String {
    match url.filter(|u| !u.is_empty()) {
        Some(url) => format!("New publication: [{title}]({url})."),
        None => format!("New publication: {title}."),
    }
}

/// Default news text for a talk, with slide and certificate links and the
/// teaser image.
pub fn talk_news_text(title: &str, record: &TalkRecord) -> String {
    let mut text = format!("New talk: {title}.");
    let links = record.links("Slides", "Certificate");
    if !links.is_empty() {
        text.push(' ');
        text.push_str(&links);
    }
    compose_news_text(&text, None, None, record.teaser_url.as_deref(), Some(title))
}

/// Menu item, learning resource and news entry in one go.
///
/// The news date defaults to the current month.
pub fn quick_add_learning(config: &SiteConfig, request: &LearningRequest) -> Result<()> {
    if let Some(nav) = &request.nav {
        let after = nav.after.as_deref().unwrap_or(&config.nav.after);
        add_nav_item(config, &nav.title, &nav.url, Some(after))?;
    }

    add_learning_resource(config, &request.title, &request.url, request.note.as_deref())?;

    if let Some(news) = &request.news {
        let date = news.date.clone().unwrap_or_else(current_month);
        let text = news
            .text
            .clone()
            .unwrap_or_else(|| learning_news_text(&request.title, &request.url));
        add_group_news(config, &date, &text)?;
    }
    Ok(())
}

/// Add a publication and optionally announce it.
pub fn quick_add_paper(
    config: &SiteConfig,
    draft: &PublicationDraft,
    news: Option<&Announcement>,
) -> Result<PublicationRecord> {
    let record = add_publication(config, draft)?;

    if let Some(news) = news {
        let date = news.date.as_deref().unwrap_or(&record.date_iso);
        let text = news
            .text
            .clone()
            .unwrap_or_else(|| paper_news_text(&draft.title, record.paper_url.as_deref()));
        add_group_news(config, date, &text)?;
    }
    Ok(record)
}

/// Add a talk and optionally announce it.
pub fn quick_add_talk(
    config: &SiteConfig,
    draft: &TalkDraft,
    news: Option<&Announcement>,
) -> Result<TalkRecord> {
    let record = add_talk(config, draft)?;

    if let Some(news) = news {
        let date = news.date.as_deref().unwrap_or(&record.date_iso);
        let text = news
            .text
            .clone()
            .unwrap_or_else(|| talk_news_text(&draft.title, &record));
        add_group_news(config, date, &text)?;
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::news::FRONT_MATTER;
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    fn setup() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::with_root(dir.path());
        fs::create_dir_all(config.paths.news.parent().unwrap()).unwrap();
        fs::write(&config.paths.news, format!("{FRONT_MATTER}\n")).unwrap();
        fs::create_dir_all(config.paths.nav.parent().unwrap()).unwrap();
        fs::write(
            &config.paths.nav,
            "main:\n  - title: \"Teaching\"\n    url: /teaching/\n\n  - title: \"CV\"\n    url: /cv/\n",
        )
        .unwrap();
        (dir, config)
    }

    fn news(config: &SiteConfig) -> String {
        fs::read_to_string(&config.paths.news).unwrap()
    }

    #[test]
    fn test_news_texts() {
        assert_eq!(
            learning_news_text("Rust Book", "https://doc.rust-lang.org/book/"),
            "Added a new learning resource: [Rust Book](https://doc.rust-lang.org/book/)."
        );
        assert_eq!(paper_news_text("P", Some("/files/p.pdf")), "New publication: [P](/files/p.pdf).");
        assert_eq!(paper_news_text("P", None), "New publication: P.");

        let record = TalkRecord {
            path: PathBuf::new(),
            date_iso: "2026-02-26".into(),
            slides_url: Some("/files/s.pdf".into()),
            cert_url: Some("/files/c.pdf".into()),
            teaser_url: Some("/images/t.png".into()),
        };
        assert_eq!(
            talk_news_text("T", &record),
            "New talk: T. [Slides](/files/s.pdf) | [Certificate](/files/c.pdf)<br>\n![T](/images/t.png)"
        );
    }

    #[test]
    fn test_quick_add_learning() {
        let (_dir, config) = setup();
        let request = LearningRequest {
            title: "Rust Book".into(),
            url: "https://doc.rust-lang.org/book/".into(),
            note: None,
            nav: Some(NavTarget {
                title: "Learning".into(),
                url: "/learning/".into(),
                after: None,
            }),
            news: Some(Announcement {
                date: Some("2026.02".into()),
                text: None,
            }),
        };
        quick_add_learning(&config, &request).unwrap();

        let nav = fs::read_to_string(&config.paths.nav).unwrap();
        assert!(nav.contains("url: /teaching/\n\n  - title: \"Learning\"\n    url: /learning/\n\n  - title: \"CV\""));
        assert!(config.paths.learning.is_file());
        assert!(news(&config).contains(
            "## 2026\n\n- [2026.02] Added a new learning resource: [Rust Book](https://doc.rust-lang.org/book/).\n"
        ));

        // repeating the workflow changes nothing
        let before = (fs::read_to_string(&config.paths.nav).unwrap(), news(&config));
        quick_add_learning(&config, &request).unwrap();
        assert_eq!(before, (fs::read_to_string(&config.paths.nav).unwrap(), news(&config)));
    }

    #[test]
    fn test_quick_add_paper_announces_with_link() {
        let (_dir, config) = setup();
        let draft = PublicationDraft {
            title: "A Paper".into(),
            date: "2026-02-26".into(),
            venue: "Journal Name".into(),
            citation: "Author. (2026). A Paper.".into(),
            category: "manuscripts".into(),
            link: Some("https://doi.org/10.1000/x".into()),
            ..Default::default()
        };
        quick_add_paper(&config, &draft, Some(&Announcement::default())).unwrap();
        assert!(news(&config).contains("- [2026.02] New publication: [A Paper](https://doi.org/10.1000/x).\n"));
    }

    #[test]
    fn test_quick_add_with_compact_date() {
        let (_dir, config) = setup();
        let paper = PublicationDraft {
            title: "Compact".into(),
            date: "20260226".into(),
            venue: "J".into(),
            citation: "Compact".into(),
            category: "manuscripts".into(),
            ..Default::default()
        };
        quick_add_paper(&config, &paper, Some(&Announcement::default())).unwrap();

        let talk = TalkDraft {
            title: "Compact Talk".into(),
            date: "20250618".into(),
            venue: "V".into(),
            location: "L".into(),
            ..Default::default()
        };
        quick_add_talk(&config, &talk, Some(&Announcement::default())).unwrap();

        let news = news(&config);
        assert!(news.contains("- [2026.02] New publication: Compact.\n"));
        assert!(news.contains("- [2025.06] New talk: Compact Talk.\n"));
    }

    #[test]
    fn test_quick_add_paper_without_news() {
        let (_dir, config) = setup();
        let draft = PublicationDraft {
            title: "Quiet".into(),
            date: "2026-02-26".into(),
            venue: "J".into(),
            citation: "Quiet".into(),
            category: "manuscripts".into(),
            ..Default::default()
        };
        quick_add_paper(&config, &draft, None).unwrap();
        assert_eq!(news(&config), format!("{FRONT_MATTER}\n"));
    }

    #[test]
    fn test_quick_add_talk_custom_news() {
        let (_dir, config) = setup();
        let draft = TalkDraft {
            title: "Talk".into(),
            date: "2025-06-18".into(),
            venue: "V".into(),
            location: "Valencia, Spain".into(),
            talk_type: "Talk".into(),
            ..Default::default()
        };
        let news_args = Announcement {
            date: Some("2025.07".into()),
            text: Some("Gave a talk in Valencia.".into()),
        };
        quick_add_talk(&config, &draft, Some(&news_args)).unwrap();
        assert!(news(&config).contains("## 2025\n\n- [2025.07] Gave a talk in Valencia.\n"));
    }
}
