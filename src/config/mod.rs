//! Site configuration management for `folio.toml`.
//!
//! The file is optional: a stock academicpages-style Jekyll site works with
//! the defaults.
//!
//! # Sections
//!
//! | Section     | Purpose                                       |
//! |-------------|-----------------------------------------------|
//! | `[paths]`   | Locations of menu, pages and collections      |
//! | `[preview]` | Local jekyll server (host, port, command)     |
//! | `[publish]` | Git remote and branch to push                 |
//! | `[nav]`     | Menu insertion point and prune lists          |
//!
//! # Example
//!
//! ```toml
//! [paths]
//! news = "_pages/news.md"
//!
//! [preview]
//! port = 4001
//!
//! [publish]
//! branch = "main"
//! ```

pub mod defaults;
mod error;
mod nav;
mod paths;
mod preview;
mod publish;

use nav::NavConfig;
use paths::PathsConfig;
use preview::PreviewConfig;
use publish::PublishConfig;

pub use error::ConfigError;

use crate::{
    cli::{Cli, Commands},
    utils::git,
};
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the site root (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site layout
    #[serde(default)]
    pub paths: PathsConfig,

    /// Local preview settings
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Git publishing settings
    #[serde(default)]
    pub publish: PublishConfig,

    /// Navigation menu defaults
    #[serde(default)]
    pub nav: NavConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content).with_context(|| format!("Invalid config `{}`", path.display()))
    }

    /// Default configuration rooted at `root`.
    pub fn with_root(root: &Path) -> Self {
        let mut config = Self::default();
        config.set_root(root);
        config
    }

    /// Load the configuration for a CLI invocation.
    ///
    /// The root is `--root`, else the enclosing git work tree, else the
    /// current directory. A missing config file means defaults.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = match &cli.root {
            Some(root) => root.clone(),
            None => {
                let cwd = std::env::current_dir().context("Failed to read current directory")?;
                git::discover_root(&cwd).unwrap_or(cwd)
            }
        };
        let root = Self::normalize_path(&root);
        if !root.is_dir() {
            bail!(ConfigError::Validation(format!(
                "site root `{}` is not a directory",
                root.display()
            )));
        }

        let config_path = root.join(&cli.config);
        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.config_path = config_path;
        config.set_root(&root);
        config.update_with_cli(cli);
        config
            .validate()
            .with_context(|| format!("Invalid config `{}`", config.config_path.display()))?;

        Ok(config)
    }

    fn set_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.paths.resolve(&root);
        self.root = root;
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let (host, port) = match &cli.command {
            Commands::Preview { serve } => (serve.host.as_ref(), serve.port.as_ref()),
            Commands::QuickAddLearning { preview, .. }
            | Commands::QuickAddNews { preview, .. }
            | Commands::QuickAddPaper { preview, .. }
            | Commands::QuickAddTalk { preview, .. }
            | Commands::QuickAddAll { preview, .. } => (preview.host.as_ref(), preview.port.as_ref()),
            _ => (None, None),
        };
        Self::update_option(&mut self.preview.host, host);
        Self::update_option(&mut self.preview.port, port);

        if let Commands::Publish { branch, .. } = &cli.command {
            Self::update_option(&mut self.publish.branch, branch.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.preview.port == 0 {
            bail!(ConfigError::Validation("[preview.port] must not be 0".into()));
        }
        if self.preview.host.trim().is_empty() {
            bail!(ConfigError::Validation("[preview.host] must not be empty".into()));
        }
        if self.preview.command.is_empty() {
            bail!(ConfigError::Validation(
                "[preview.command] must have at least one element".into()
            ));
        }
        if self.publish.remote.trim().is_empty() || self.publish.branch.trim().is_empty() {
            bail!(ConfigError::Validation(
                "[publish.remote] and [publish.branch] must not be empty".into()
            ));
        }
        Ok(())
    }

    /// Check if a command is installed and available
    pub fn check_command_installed(field: &str, command: &[String]) -> Result<()> {
        let Some(cmd) = command.first() else {
            bail!(ConfigError::Validation(format!(
                "{field} must have at least one element"
            )));
        };

        which::which(crate::utils::command::program_name(cmd))
            .with_context(|| format!("`{cmd}` not found. Please install it first."))?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
