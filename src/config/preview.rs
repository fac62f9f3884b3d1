//! `[preview]` section configuration.
//!
//! Contains local Jekyll server settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[preview]` section in folio.toml - local preview settings.
///
/// # Example
/// ```toml
/// [preview]
/// host = "0.0.0.0"  # Listen on all interfaces
/// port = 4001
/// command = ["jekyll"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PreviewConfig {
    /// Network interface to bind.
    #[serde(default = "defaults::preview::host")]
    #[educe(Default = defaults::preview::host())]
    pub host: String,

    /// HTTP port number (default: 4000).
    #[serde(default = "defaults::preview::port")]
    #[educe(Default = defaults::preview::port())]
    pub port: u16,

    /// Command prefix that runs jekyll (default: `bundle exec jekyll`).
    #[serde(default = "defaults::preview::command")]
    #[educe(Default = defaults::preview::command())]
    pub command: Vec<String>,
}
