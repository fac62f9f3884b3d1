//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::{
    content::{news::NewsAssets, publication::PublicationDraft, talk::TalkDraft},
    workflow::Announcement,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio: maintain a Jekyll academic homepage from the command line
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site root (default: enclosing git repository, else current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file name, relative to the site root
    #[arg(short = 'C', long, global = true, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Start the local preview after the command succeeded
#[derive(clap::Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Start local preview after adding
    #[arg(long)]
    pub preview: bool,

    /// Interface to bind on
    #[arg(long)]
    pub host: Option<String>,

    /// Port to serve on
    #[arg(long)]
    pub port: Option<u16>,
}

/// Arguments of `jekyll serve`
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Interface to bind on
    #[arg(long)]
    pub host: Option<String>,

    /// Port to serve on
    #[arg(long)]
    pub port: Option<u16>,

    /// Include draft posts
    #[arg(long)]
    pub drafts: bool,

    /// Enable incremental builds
    #[arg(long)]
    pub incremental: bool,
}

/// Publication metadata and assets
#[derive(clap::Args, Debug, Clone)]
pub struct PaperArgs {
    #[arg(long)]
    pub title: String,

    /// Publication date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    #[arg(long)]
    pub venue: String,

    #[arg(long)]
    pub citation: String,

    #[arg(long)]
    pub excerpt: Option<String>,

    #[arg(long)]
    pub body: Option<String>,

    #[arg(long, default_value = "manuscripts")]
    pub category: String,

    /// External link (journal page, DOI)
    #[arg(long)]
    pub link: Option<String>,

    /// Local PDF copied into files/
    #[arg(long)]
    pub paper_file: Option<PathBuf>,

    /// Target filename in files/
    #[arg(long)]
    pub paper_name: Option<String>,

    /// Explicit paperurl, wins over the copied file and the link
    #[arg(long)]
    pub paper_url: Option<String>,

    /// Slug source instead of the title
    #[arg(long)]
    pub slug: Option<String>,

    /// Replace publications with the same title
    #[arg(long)]
    pub replace_existing: bool,

    /// Do not normalize trailing year in venue
    #[arg(long)]
    pub keep_venue_year: bool,
}

/// Talk metadata and assets
#[derive(clap::Args, Debug, Clone)]
pub struct TalkArgs {
    #[arg(long)]
    pub title: String,

    /// Talk date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    #[arg(long)]
    pub venue: String,

    #[arg(long)]
    pub location: String,

    /// Talk type, e.g. "Invited Talk" or "Oral Presentation"
    #[arg(long = "type", default_value = "Talk")]
    pub talk_type: String,

    #[arg(long)]
    pub excerpt: Option<String>,

    #[arg(long)]
    pub body: Option<String>,

    /// Slides copied into files/
    #[arg(long)]
    pub slides_file: Option<PathBuf>,

    #[arg(long)]
    pub slides_name: Option<String>,

    /// Teaser image copied into images/
    #[arg(long)]
    pub image_file: Option<PathBuf>,

    #[arg(long)]
    pub image_name: Option<String>,

    /// Certificate copied into files/
    #[arg(long)]
    pub cert_file: Option<PathBuf>,

    #[arg(long)]
    pub cert_name: Option<String>,

    /// Slug source instead of the title
    #[arg(long)]
    pub slug: Option<String>,

    /// Replace talks with the same title
    #[arg(long)]
    pub replace_existing: bool,
}

/// Optional assets embedded in a news entry
#[derive(clap::Args, Debug, Clone)]
pub struct NewsAssetArgs {
    /// Optional image file to copy into images/ and embed in news
    #[arg(long)]
    pub image_file: Option<PathBuf>,

    /// Optional target filename in images/
    #[arg(long)]
    pub image_name: Option<String>,

    /// Alt text for embedded news image
    #[arg(long, default_value = "News image")]
    pub image_alt: String,

    /// Optional certificate/pdf file to copy into files/ and link in news
    #[arg(long)]
    pub cert_file: Option<PathBuf>,

    /// Optional target filename in files/
    #[arg(long)]
    pub cert_name: Option<String>,

    /// Link label for certificate
    #[arg(long, default_value = "Certificate")]
    pub cert_label: String,
}

/// News entry announcing a new paper or talk
#[derive(clap::Args, Debug, Clone)]
pub struct FollowupNewsArgs {
    /// Do not announce in group news
    #[arg(long)]
    pub no_news: bool,

    /// News date (default: the item's date)
    #[arg(long)]
    pub news_date: Option<String>,

    /// News text (default: generated)
    #[arg(long)]
    pub news_text: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add an item to top navigation
    AddNav {
        #[arg(long)]
        title: String,

        #[arg(long)]
        url: String,

        /// Insert after this nav title (default: [nav.after])
        #[arg(long)]
        after: Option<String>,
    },

    /// Remove items from top navigation by title or url
    RemoveNav {
        /// Title to remove, case-insensitive (default: [nav.prune_titles])
        #[arg(long = "title")]
        titles: Vec<String>,

        /// URL to remove, case-insensitive (default: [nav.prune_urls])
        #[arg(long = "url")]
        urls: Vec<String>,

        /// Do not write a timestamped backup first
        #[arg(long)]
        no_backup: bool,
    },

    /// Add a Learning resource
    AddLearning {
        #[arg(long)]
        title: String,

        #[arg(long)]
        url: String,

        #[arg(long)]
        note: Option<String>,
    },

    /// Add an entry to Group News
    AddNews {
        /// YYYY.MM or YYYY-MM or YYYY-MM-DD
        #[arg(long)]
        date: String,

        #[arg(long)]
        text: String,

        #[command(flatten)]
        assets: NewsAssetArgs,
    },

    /// Set up the Group News page and menu item, optionally rebuilding it
    SetupNews {
        /// JSON list of {"date": "YYYY.MM", "text": ...} entries to rebuild the page from
        #[arg(long)]
        entries: Option<PathBuf>,
    },

    /// Add publication markdown (+ optional pdf copy)
    AddPaper {
        #[command(flatten)]
        paper: PaperArgs,
    },

    /// Add talk markdown (+ optional assets copy)
    AddTalk {
        #[command(flatten)]
        talk: TalkArgs,
    },

    /// Check publication metadata consistency
    AuditPublications {
        /// Normalize trailing year in venue for all publications
        #[arg(long)]
        fix_venue_year: bool,
    },

    /// Run Jekyll build
    Build,

    /// Run local preview with Jekyll serve
    #[command(alias = "serve")]
    Preview {
        #[command(flatten)]
        serve: ServeArgs,
    },

    /// Git add/commit/push in one command
    Publish {
        #[arg(long)]
        message: String,

        /// Branch to push (default: [publish.branch])
        #[arg(long)]
        branch: Option<String>,

        /// Commit locally only
        #[arg(long)]
        no_push: bool,
    },

    /// One command: nav + learning + group news
    QuickAddLearning {
        #[arg(long)]
        title: String,

        #[arg(long)]
        url: String,

        #[arg(long)]
        note: Option<String>,

        /// News date, e.g. 2026.02 (default: current month)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        news_text: Option<String>,

        #[arg(long, default_value = "Learning")]
        nav_title: String,

        #[arg(long, default_value = "/learning/")]
        nav_url: String,

        /// Insert after this nav title (default: [nav.after])
        #[arg(long)]
        after: Option<String>,

        #[command(flatten)]
        preview: PreviewArgs,
    },

    /// One command: add group news (+ optional preview)
    QuickAddNews {
        /// YYYY.MM or YYYY-MM or YYYY-MM-DD
        #[arg(long)]
        date: String,

        #[arg(long)]
        text: String,

        #[command(flatten)]
        assets: NewsAssetArgs,

        #[command(flatten)]
        preview: PreviewArgs,
    },

    /// One command: add paper + optional group news + optional preview
    QuickAddPaper {
        #[command(flatten)]
        paper: PaperArgs,

        #[command(flatten)]
        news: FollowupNewsArgs,

        #[command(flatten)]
        preview: PreviewArgs,
    },

    /// One command: add talk + optional group news + optional preview
    QuickAddTalk {
        #[command(flatten)]
        talk: TalkArgs,

        #[command(flatten)]
        news: FollowupNewsArgs,

        #[command(flatten)]
        preview: PreviewArgs,
    },

    /// Batch add learning/papers/talks/news from a JSON manifest
    QuickAddAll {
        /// Path to JSON manifest file
        #[arg(long)]
        manifest: PathBuf,

        #[command(flatten)]
        preview: PreviewArgs,
    },
}

/// Trim an optional argument, treating blank values as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl PaperArgs {
    pub fn into_draft(self) -> PublicationDraft {
        PublicationDraft {
            title: self.title.trim().to_owned(),
            date: self.date.trim().to_owned(),
            venue: self.venue.trim().to_owned(),
            citation: self.citation.trim().to_owned(),
            excerpt: non_blank(self.excerpt),
            body: non_blank(self.body),
            category: self.category.trim().to_owned(),
            link: non_blank(self.link),
            paper_file: self.paper_file,
            paper_name: non_blank(self.paper_name),
            paper_url: non_blank(self.paper_url),
            slug: non_blank(self.slug),
            replace_existing: self.replace_existing,
            keep_venue_year: self.keep_venue_year,
        }
    }
}

impl TalkArgs {
    pub fn into_draft(self) -> TalkDraft {
        TalkDraft {
            title: self.title.trim().to_owned(),
            date: self.date.trim().to_owned(),
            venue: self.venue.trim().to_owned(),
            location: self.location.trim().to_owned(),
            talk_type: self.talk_type.trim().to_owned(),
            excerpt: non_blank(self.excerpt),
            body: non_blank(self.body),
            slides_file: self.slides_file,
            slides_name: non_blank(self.slides_name),
            image_file: self.image_file,
            image_name: non_blank(self.image_name),
            cert_file: self.cert_file,
            cert_name: non_blank(self.cert_name),
            slug: non_blank(self.slug),
            replace_existing: self.replace_existing,
        }
    }
}

impl NewsAssetArgs {
    pub fn into_assets(self) -> NewsAssets {
        NewsAssets {
            image_file: self.image_file,
            image_name: non_blank(self.image_name),
            image_alt: non_blank(Some(self.image_alt)),
            cert_file: self.cert_file,
            cert_name: non_blank(self.cert_name),
            cert_label: non_blank(Some(self.cert_label)),
        }
    }
}

impl FollowupNewsArgs {
    /// The news entry to add, `None` with `--no-news`.
    pub fn into_announcement(self) -> Option<Announcement> {
        (!self.no_news).then(|| Announcement {
            date: non_blank(self.news_date),
            text: non_blank(self.news_text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quick_add_paper() {
        let cli = Cli::try_parse_from([
            "folio",
            "quick-add-paper",
            "--title",
            "A Paper",
            "--date",
            "2026-02-26",
            "--venue",
            "Journal Name",
            "--citation",
            "Author. (2026).",
            "--paper-file",
            "paper.pdf",
            "--no-news",
            "--preview",
            "--port",
            "4001",
        ])
        .unwrap();

        let Commands::QuickAddPaper { paper, news, preview } = cli.command else {
            panic!("wrong subcommand");
        };
        assert!(news.into_announcement().is_none());
        assert!(preview.preview);
        assert_eq!(preview.port, Some(4001));

        let draft = paper.into_draft();
        assert_eq!(draft.title, "A Paper");
        assert_eq!(draft.category, "manuscripts");
        assert_eq!(draft.paper_file, Some(PathBuf::from("paper.pdf")));
        assert!(!draft.replace_existing);
    }

    #[test]
    fn test_serve_is_alias_of_preview() {
        let cli = Cli::try_parse_from(["folio", "serve", "--drafts"]).unwrap();
        assert!(matches!(cli.command, Commands::Preview { ref serve } if serve.drafts));
    }

    #[test]
    fn test_talk_type_flag() {
        let cli = Cli::try_parse_from([
            "folio", "add-talk", "--title", "T", "--date", "2025-06-18", "--venue", "V",
            "--location", "Valencia, Spain", "--type", "Oral Presentation",
        ])
        .unwrap();
        let Commands::AddTalk { talk } = cli.command else {
            panic!("wrong subcommand");
        };
        assert_eq!(talk.talk_type, "Oral Presentation");
    }

    #[test]
    fn test_remove_nav_repeated_flags() {
        let cli = Cli::try_parse_from([
            "folio", "remove-nav", "--title", "Guide", "--title", "Blog Posts", "--url", "/markdown/",
        ])
        .unwrap();
        let Commands::RemoveNav { titles, urls, no_backup } = cli.command else {
            panic!("wrong subcommand");
        };
        assert_eq!(titles, vec!["Guide", "Blog Posts"]);
        assert_eq!(urls, vec!["/markdown/"]);
        assert!(!no_backup);
    }

    #[test]
    fn test_followup_news_defaults() {
        let cli = Cli::try_parse_from([
            "folio", "quick-add-talk", "--title", "T", "--date", "2025-06-18", "--venue", "V",
            "--location", "L", "--news-date", "2025.07",
        ])
        .unwrap();
        let Commands::QuickAddTalk { news, .. } = cli.command else {
            panic!("wrong subcommand");
        };
        let news = news.into_announcement().unwrap();
        assert_eq!(news.date.as_deref(), Some("2025.07"));
        assert_eq!(news.text, None);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ".into())), Some("x".into()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_news_asset_defaults() {
        let cli = Cli::try_parse_from(["folio", "add-news", "--date", "2026.02", "--text", "Hi"]).unwrap();
        let Commands::AddNews { assets, .. } = cli.command else {
            panic!("wrong subcommand");
        };
        let assets = assets.into_assets();
        assert_eq!(assets.cert_label.as_deref(), Some("Certificate"));
        assert_eq!(assets.image_alt.as_deref(), Some("News image"));
        assert!(assets.image_file.is_none());
    }
}
