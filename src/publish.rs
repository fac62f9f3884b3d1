//! Commit and push the site.

use crate::{config::SiteConfig, log, utils::git};
use anyhow::{Context, Result};

/// Stage everything, commit with `message` and push to `[publish]`.
///
/// The commit is skipped when nothing is staged; the push still runs so
/// earlier local commits go out.
pub fn publish_site(config: &SiteConfig, message: &str, no_push: bool) -> Result<()> {
    which::which("git").context("`git` not found. Please install it first.")?;
    let root = &config.root;
    let remote = &config.publish.remote;
    let branch = &config.publish.branch;

    git::add_all(root)?;
    if git::has_staged_changes(root)? {
        git::commit(root, message)?;
        log!("git"; "committed: {message}");
    } else {
        log!("git"; "nothing to commit, working tree clean");
    }

    if no_push {
        log!("git"; "committed locally, push skipped by --no-push");
        return Ok(());
    }

    if let Some(current) = git::current_branch(root)
        && current != *branch
    {
        log!("warn"; "current branch is {current}, pushing {branch}");
    }
    git::push(root, remote, branch)?;
    log!("done"; "pushed to {remote}/{branch}");
    Ok(())
}
