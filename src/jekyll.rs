//! Jekyll build and local preview.
//!
//! Both run `[preview.command]` (by default `bundle exec jekyll`) in the
//! site root with the terminal attached, so Jekyll's own progress output
//! and Ctrl+C handling are untouched.

use crate::{config::SiteConfig, log, run, utils::command};
use anyhow::Result;
use std::ffi::OsString;

/// Options of a preview run
#[derive(Debug, Clone, Copy, Default)]
pub struct ServeOptions {
    pub drafts: bool,
    pub incremental: bool,
}

impl ServeOptions {
    /// Options used after quick commands.
    pub const fn incremental() -> Self {
        Self {
            drafts: false,
            incremental: true,
        }
    }
}

/// Run `jekyll build`.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    SiteConfig::check_command_installed("[preview.command]", &config.preview.command)?;
    log!("jekyll"; "building {}", config.root.display());
    run!(&config.root; &config.preview.command; "build")
}

/// Run `jekyll serve` until it exits.
pub fn serve_site(config: &SiteConfig, options: ServeOptions) -> Result<()> {
    SiteConfig::check_command_installed("[preview.command]", &config.preview.command)?;
    log!(
        "jekyll";
        "serving at http://{}:{}/",
        config.preview.host,
        config.preview.port
    );
    let args = serve_args(config, options);
    command::run(
        Some(config.root.as_path()),
        &command::to_cmd_vec(&config.preview.command),
        &command::filter_args(&args),
    )
}

fn serve_args(config: &SiteConfig, options: ServeOptions) -> Vec<OsString> {
    let flag = |on: bool, name: &str| OsString::from(if on { name } else { "" });
    vec![
        "serve".into(),
        "--livereload".into(),
        "--host".into(),
        config.preview.host.clone().into(),
        "--port".into(),
        config.preview.port.to_string().into(),
        flag(options.drafts, "--drafts"),
        flag(options.incremental, "--incremental"),
    ]
}
