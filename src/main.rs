//! Folio - maintain a Jekyll academic homepage from the command line.

mod cli;
mod config;
mod content;
mod jekyll;
mod manifest;
mod publish;
mod utils;
mod workflow;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, PreviewArgs, non_blank};
use config::SiteConfig;
use content::{
    learning::add_learning_resource,
    nav::{add_nav_item, prune_nav},
    news::{add_group_news_with_assets, setup_news},
    publication::{add_publication, audit_publications},
    talk::add_talk,
};
use jekyll::{ServeOptions, build_site, serve_site};
use manifest::quick_add_all;
use publish::publish_site;
use utils::fs::expand_path;
use workflow::{Announcement, LearningRequest, NavTarget, quick_add_learning, quick_add_paper, quick_add_talk};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(SiteConfig::load(cli)?));

    match cli.command.clone() {
        Commands::AddNav { title, url, after } => {
            let after = after.as_deref().unwrap_or(&config.nav.after);
            add_nav_item(config, &title, &url, Some(after)).map(drop)
        }
        Commands::RemoveNav {
            titles,
            urls,
            no_backup,
        } => prune_nav(config, &titles, &urls, !no_backup).map(drop),
        Commands::AddLearning { title, url, note } => {
            add_learning_resource(config, &title, &url, non_blank(note).as_deref()).map(drop)
        }
        Commands::AddNews { date, text, assets } => {
            add_group_news_with_assets(config, &date, &text, &assets.into_assets()).map(drop)
        }
        Commands::SetupNews { entries } => {
            let entries = entries.map(|path| expand_path(&path));
            setup_news(config, entries.as_deref())
        }
        Commands::AddPaper { paper } => add_publication(config, &paper.into_draft()).map(drop),
        Commands::AddTalk { talk } => add_talk(config, &talk.into_draft()).map(drop),
        Commands::AuditPublications { fix_venue_year } => {
            audit_publications(config, fix_venue_year).map(drop)
        }
        Commands::Build => build_site(config),
        Commands::Preview { serve } => serve_site(
            config,
            ServeOptions {
                drafts: serve.drafts,
                incremental: serve.incremental,
            },
        ),
        Commands::Publish {
            message, no_push, ..
        } => publish_site(config, &message, no_push),
        Commands::QuickAddLearning {
            title,
            url,
            note,
            date,
            news_text,
            nav_title,
            nav_url,
            after,
            preview,
        } => {
            let request = LearningRequest {
                title: title.trim().to_owned(),
                url: url.trim().to_owned(),
                note: non_blank(note),
                nav: Some(NavTarget {
                    title: nav_title,
                    url: nav_url,
                    after: non_blank(after),
                }),
                news: Some(Announcement {
                    date: non_blank(date),
                    text: non_blank(news_text),
                }),
            };
            quick_add_learning(config, &request)?;
            preview_after(config, &preview)
        }
        Commands::QuickAddNews {
            date,
            text,
            assets,
            preview,
        } => {
            add_group_news_with_assets(config, &date, &text, &assets.into_assets())?;
            preview_after(config, &preview)
        }
        Commands::QuickAddPaper {
            paper,
            news,
            preview,
        } => {
            quick_add_paper(config, &paper.into_draft(), news.into_announcement().as_ref())?;
            preview_after(config, &preview)
        }
        Commands::QuickAddTalk {
            talk,
            news,
            preview,
        } => {
            quick_add_talk(config, &talk.into_draft(), news.into_announcement().as_ref())?;
            preview_after(config, &preview)
        }
        Commands::QuickAddAll { manifest, preview } => {
            quick_add_all(config, &manifest)?;
            preview_after(config, &preview)
        }
    }
}

/// Start the incremental preview when `--preview` was given.
fn preview_after(config: &SiteConfig, args: &PreviewArgs) -> Result<()> {
    if !args.preview {
        return Ok(());
    }
    serve_site(config, ServeOptions::incremental())
}
