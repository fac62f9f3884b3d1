//! `[paths]` section configuration.
//!
//! Locations of the Jekyll files this tool edits, relative to the site root.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `[paths]` section in folio.toml - site layout.
///
/// # Example
/// ```toml
/// [paths]
/// nav = "_data/navigation.yml"
/// news = "_pages/news.md"
/// publications = "_publications"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Navigation menu data file.
    #[serde(default = "defaults::paths::nav")]
    #[educe(Default = defaults::paths::nav())]
    pub nav: PathBuf,

    /// Learning resources page.
    #[serde(default = "defaults::paths::learning")]
    #[educe(Default = defaults::paths::learning())]
    pub learning: PathBuf,

    /// Group news page.
    #[serde(default = "defaults::paths::news")]
    #[educe(Default = defaults::paths::news())]
    pub news: PathBuf,

    /// Publications collection directory.
    #[serde(default = "defaults::paths::publications")]
    #[educe(Default = defaults::paths::publications())]
    pub publications: PathBuf,

    /// Talks collection directory.
    #[serde(default = "defaults::paths::talks")]
    #[educe(Default = defaults::paths::talks())]
    pub talks: PathBuf,

    /// Downloadable files, served under `/files/`.
    #[serde(default = "defaults::paths::files")]
    #[educe(Default = defaults::paths::files())]
    pub files: PathBuf,

    /// Images, served under `/images/`.
    #[serde(default = "defaults::paths::images")]
    #[educe(Default = defaults::paths::images())]
    pub images: PathBuf,
}

impl PathsConfig {
    /// Make every path absolute under `root`. Absolute entries are kept.
    pub fn resolve(&mut self, root: &Path) {
        for path in [
            &mut self.nav,
            &mut self.learning,
            &mut self.news,
            &mut self.publications,
            &mut self.talks,
            &mut self.files,
            &mut self.images,
        ] {
            *path = root.join(&*path);
        }
    }
}
