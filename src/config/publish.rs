//! `[publish]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[publish]` section in folio.toml - where `folio publish` pushes.
///
/// # Example
/// ```toml
/// [publish]
/// remote = "origin"
/// branch = "main"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PublishConfig {
    /// Remote to push to.
    #[serde(default = "defaults::publish::remote")]
    #[educe(Default = defaults::publish::remote())]
    pub remote: String,

    /// Branch GitHub Pages builds from.
    #[serde(default = "defaults::publish::branch")]
    #[educe(Default = defaults::publish::branch())]
    pub branch: String,
}
