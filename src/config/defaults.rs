//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [paths] Section Defaults
// ============================================================================

pub mod paths {
    use std::path::PathBuf;

    pub fn nav() -> PathBuf {
        "_data/navigation.yml".into()
    }

    pub fn learning() -> PathBuf {
        "_pages/learning.md".into()
    }

    pub fn news() -> PathBuf {
        "_pages/group-news.md".into()
    }

    pub fn publications() -> PathBuf {
        "_publications".into()
    }

    pub fn talks() -> PathBuf {
        "_talks".into()
    }

    pub fn files() -> PathBuf {
        "files".into()
    }

    pub fn images() -> PathBuf {
        "images".into()
    }
}

// ============================================================================
// [preview] Section Defaults
// ============================================================================

pub mod preview {
    pub fn host() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        4000
    }

    pub fn command() -> Vec<String> {
        vec!["bundle".into(), "exec".into(), "jekyll".into()]
    }
}

// ============================================================================
// [publish] Section Defaults
// ============================================================================

pub mod publish {
    pub fn remote() -> String {
        "origin".into()
    }

    pub fn branch() -> String {
        "master".into()
    }
}

// ============================================================================
// [nav] Section Defaults
// ============================================================================

pub mod nav {
    pub fn after() -> String {
        "Teaching".into()
    }

    pub fn prune_titles() -> Vec<String> {
        vec!["blog posts".into(), "guide".into()]
    }

    pub fn prune_urls() -> Vec<String> {
        vec!["/year-archive/".into(), "/markdown/".into()]
    }
}
