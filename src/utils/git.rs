//! Git operations for publishing the site.
//!
//! Repository discovery goes through gix; staging, committing and pushing
//! shell out to the `git` binary so that the user's credential helpers and
//! hooks keep working.

use crate::{exec, log};
use anyhow::{Result, anyhow, bail};
use gix::Repository;
use std::path::{Path, PathBuf};

/// Find the work tree root of the repository containing `start`.
///
/// Returns `None` when `start` is not inside a git repository.
pub fn discover_root(start: &Path) -> Option<PathBuf> {
    let repo = gix::discover(start).ok()?;
    get_repo_root(&repo).ok().map(Path::to_path_buf)
}

/// Short name of the checked-out branch, `None` on a detached HEAD.
pub fn current_branch(root: &Path) -> Option<String> {
    let repo = gix::open(root).ok()?;
    let head = repo.head_name().ok()??;
    Some(head.shorten().to_string())
}

/// Work tree of a repository; bare repositories have none.
fn get_repo_root(repo: &Repository) -> Result<&Path> {
    repo.workdir()
        .ok_or_else(|| anyhow!("Repository has no work tree"))
}

/// Stage every change in the work tree.
pub fn add_all(root: &Path) -> Result<()> {
    exec!(root; ["git"]; "add", "-A")?;
    Ok(())
}

/// Whether the index holds changes that are not yet committed.
pub fn has_staged_changes(root: &Path) -> Result<bool> {
    let output = exec!(root; ["git"]; "diff", "--cached", "--name-only")?;
    Ok(!output.stdout.trim_ascii().is_empty())
}

/// Commit staged changes.
pub fn commit(root: &Path, message: &str) -> Result<()> {
    if message.trim().is_empty() {
        bail!("Commit message cannot be empty");
    }
    exec!(root; ["git"]; "commit", "-m", message)?;
    Ok(())
}

/// Push a branch to a remote.
pub fn push(root: &Path, remote: &str, branch: &str) -> Result<()> {
    log!("git"; "pushing {branch} to {remote}");
    exec!(root; ["git"]; "push", remote, branch)?;
    Ok(())
}
