//! `[nav]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[nav]` section in folio.toml - navigation menu defaults.
///
/// # Example
/// ```toml
/// [nav]
/// after = "Publications"
/// prune_titles = ["blog posts", "guide", "portfolio"]
/// prune_urls = ["/year-archive/"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct NavConfig {
    /// Menu title new items are inserted after.
    #[serde(default = "defaults::nav::after")]
    #[educe(Default = defaults::nav::after())]
    pub after: String,

    /// Titles removed by `remove-nav` when none are given (case-insensitive).
    #[serde(default = "defaults::nav::prune_titles")]
    #[educe(Default = defaults::nav::prune_titles())]
    pub prune_titles: Vec<String>,

    /// URLs removed by `remove-nav` when none are given (case-insensitive).
    #[serde(default = "defaults::nav::prune_urls")]
    #[educe(Default = defaults::nav::prune_urls())]
    pub prune_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_nav_config() {
        let config = r#"
            [nav]
            after = "Publications"
            prune_titles = ["Portfolio"]
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.nav.after, "Publications");
        assert_eq!(config.nav.prune_titles, vec!["Portfolio"]);
        assert_eq!(config.nav.prune_urls, vec!["/year-archive/", "/markdown/"]);
    }

    #[test]
    fn test_nav_config_defaults() {
        let config = SiteConfig::default();

        assert_eq!(config.nav.after, "Teaching");
        assert_eq!(config.nav.prune_titles, vec!["blog posts", "guide"]);
    }
}
