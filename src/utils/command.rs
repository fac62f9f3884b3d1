//! External command execution utilities.
//!
//! Two flavours are provided:
//! - [`exec!`] captures the output and logs it line by line (git plumbing)
//! - [`run!`] inherits the terminal, for long-running tools such as
//!   `jekyll serve` that print their own progress

use crate::log;
use anyhow::{Context, Result, bail};
use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Output},
};

// ============================================================================
// Macros
// ============================================================================

/// Run an external command with arguments and capture its output.
///
/// # Examples
/// ```ignore
/// // Without working directory
/// exec!(["git"]; "status", "--porcelain")?;
///
/// // With working directory
/// exec!(root; ["git"]; "commit", "-m", message)?;
/// ```
#[macro_export]
macro_rules! exec {
    ($cmd:expr; $($arg:expr),* $(,)?) => {{
        $crate::utils::command::exec(
            None,
            &$crate::utils::command::to_cmd_vec($cmd),
            &$crate::utils::command::filter_args(&[$($crate::utils::command::to_os($arg)),*]),
        )
    }};
    ($root:expr; $cmd:expr; $($arg:expr),* $(,)?) => {{
        $crate::utils::command::exec(
            Some(::std::convert::AsRef::<::std::path::Path>::as_ref($root)),
            &$crate::utils::command::to_cmd_vec($cmd),
            &$crate::utils::command::filter_args(&[$($crate::utils::command::to_os($arg)),*]),
        )
    }};
}

/// Run an external command attached to the current terminal.
///
/// Returns once the command exits. A non-zero exit status is an error.
#[macro_export]
macro_rules! run {
    ($root:expr; $cmd:expr; $($arg:expr),* $(,)?) => {{
        $crate::utils::command::run(
            Some(::std::convert::AsRef::<::std::path::Path>::as_ref($root)),
            &$crate::utils::command::to_cmd_vec($cmd),
            &$crate::utils::command::filter_args(&[$($crate::utils::command::to_os($arg)),*]),
        )
    }};
}

// ============================================================================
// Argument Conversion
// ============================================================================

/// Convert to OsString.
#[inline]
pub fn to_os<S: Into<OsString>>(s: S) -> OsString {
    s.into()
}

/// Trait for converting to command vector.
pub trait ToCmd {
    fn to_cmd(self) -> Vec<OsString>;
}

impl<const N: usize> ToCmd for [&str; N] {
    #[inline]
    fn to_cmd(self) -> Vec<OsString> {
        self.into_iter().map(OsString::from).collect()
    }
}

impl ToCmd for &[String] {
    #[inline]
    fn to_cmd(self) -> Vec<OsString> {
        self.iter().map(OsString::from).collect()
    }
}

impl ToCmd for &Vec<String> {
    #[inline]
    fn to_cmd(self) -> Vec<OsString> {
        self.iter().map(OsString::from).collect()
    }
}

/// Convert command to Vec<OsString>.
#[inline]
pub fn to_cmd_vec<C: ToCmd>(cmd: C) -> Vec<OsString> {
    cmd.to_cmd()
}

/// Filter out empty args.
#[inline]
pub fn filter_args(args: &[OsString]) -> Vec<OsString> {
    args.iter().filter(|a| !a.is_empty()).cloned().collect()
}

// ============================================================================
// Command Execution
// ============================================================================

/// Ruby tools installed through RubyInstaller are batch wrappers on Windows
const WINDOWS_WRAPPERS: &[(&str, &str)] = &[
    ("bundle", "bundle.bat"),
    ("jekyll", "jekyll.bat"),
    ("gem", "gem.bat"),
];

/// Resolve the program name to spawn on the current platform.
pub fn program_name(name: &str) -> &str {
    if cfg!(windows) {
        platform_program(name, true)
    } else {
        name
    }
}

fn platform_program(name: &str, windows: bool) -> &str {
    if !windows {
        return name;
    }
    WINDOWS_WRAPPERS
        .iter()
        .find(|(tool, _)| tool.eq_ignore_ascii_case(name))
        .map_or(name, |(_, wrapper)| *wrapper)
}

/// Execute a command and capture its output.
///
/// # Errors
/// Returns error if command fails to execute or returns non-zero exit code.
pub fn exec(root: Option<&Path>, cmd: &[OsString], args: &[OsString]) -> Result<Output> {
    let (name, mut command) = prepare(root, cmd, args)?;

    let output = command
        .output()
        .with_context(|| format!("Failed to execute `{name}`"))?;

    log_output(&name, &output)?;
    Ok(output)
}

/// Execute a command with inherited stdio and wait for it.
///
/// # Errors
/// Returns error if command fails to spawn or returns non-zero exit code.
pub fn run(root: Option<&Path>, cmd: &[OsString], args: &[OsString]) -> Result<()> {
    let (name, mut command) = prepare(root, cmd, args)?;

    let status = command
        .status()
        .with_context(|| format!("Failed to execute `{name}`"))?;

    if !status.success() {
        bail!("Command `{name}` failed with {status}");
    }
    Ok(())
}

/// Prepare a Command from components.
fn prepare(root: Option<&Path>, cmd: &[OsString], args: &[OsString]) -> Result<(String, Command)> {
    let name = cmd
        .first()
        .and_then(|s| s.to_str())
        .context("Empty command")?
        .to_owned();

    let mut command = Command::new(program_name(&name));
    command.args(&cmd[1..]).args(args);

    if let Some(dir) = root {
        command.current_dir(dir);
    }

    Ok((name, command))
}

// ============================================================================
// Output Filtering
// ============================================================================

/// Filter rule for CLI output noise.
///
/// Matches lines that start with a prefix AND contain all required keywords.
struct FilterRule {
    /// Line must start with one of these (case-insensitive, after trim).
    starts_with: &'static [&'static str],
    /// Line must also contain ALL of these keywords (case-insensitive).
    contains: &'static [&'static str],
}

impl FilterRule {
    const fn new(starts_with: &'static [&'static str], contains: &'static [&'static str]) -> Self {
        Self { starts_with, contains }
    }

    fn matches(&self, line: &str) -> bool {
        let lower = line.trim().to_ascii_lowercase();
        let has_prefix = self.starts_with.is_empty()
            || self.starts_with.iter().any(|p| lower.starts_with(p));
        let has_keywords = self.contains.iter().all(|kw| lower.contains(kw));
        has_prefix && has_keywords
    }
}

// Git example:
//   hint: Updates were rejected because the tip of your current branch is behind
//   warning: in the working copy of 'files/paper.pdf', LF will be replaced by CRLF
const NOISE: &[FilterRule] = &[
    FilterRule::new(&["hint:"], &[]),
    FilterRule::new(&["warning:"], &["will be replaced by"]),
];

fn is_noise(line: &str) -> bool {
    NOISE.iter().any(|r| r.matches(line))
}

/// Log non-filtered lines.
fn log_lines(name: &str, output: &str) {
    for line in output.lines() {
        if !line.trim().is_empty() && !is_noise(line) {
            log!(name; "{line}");
        }
    }
}

/// Extract error message, skipping filtered lines at start.
fn extract_error(stderr: &str) -> &str {
    stderr
        .lines()
        .find(|line| !line.trim().is_empty() && !is_noise(line))
        .map(|first| {
            let offset = first.as_ptr() as usize - stderr.as_ptr() as usize;
            &stderr[offset..]
        })
        .unwrap_or(stderr)
        .trim()
}

/// Log command output, filtering known noise.
fn log_output(name: &str, output: &Output) -> Result<()> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        let error_msg = extract_error(stderr.trim());
        if !error_msg.is_empty() {
            eprintln!("{error_msg}");
        }
        // git reports "nothing to commit" on stdout
        let stdout_msg = stdout.trim();
        if error_msg.is_empty() && !stdout_msg.is_empty() {
            eprintln!("{stdout_msg}");
        }
        bail!("Command `{name}` failed with {}", output.status);
    }

    log_lines(name, stdout.trim());
    log_lines(name, stderr.trim());

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_os() {
        assert_eq!(to_os("hello"), OsString::from("hello"));
        assert_eq!(to_os(String::from("world")), OsString::from("world"));
    }

    #[test]
    fn test_to_cmd_vec_array() {
        let cmd = to_cmd_vec(["bundle", "exec", "jekyll"]);
        assert_eq!(cmd.len(), 3);
        assert_eq!(cmd[0], OsString::from("bundle"));
        assert_eq!(cmd[2], OsString::from("jekyll"));
    }

    #[test]
    fn test_to_cmd_vec_vec() {
        let v = vec!["git".to_string(), "status".to_string()];
        let cmd = to_cmd_vec(&v);
        assert_eq!(cmd, vec![OsString::from("git"), OsString::from("status")]);
    }

    #[test]
    fn test_filter_args() {
        let args = [OsString::from("--drafts"), OsString::from(""), OsString::from("--incremental")];
        let filtered = filter_args(&args);
        assert_eq!(filtered, vec![OsString::from("--drafts"), OsString::from("--incremental")]);
    }

    #[test]
    fn test_prepare_empty() {
        assert!(prepare(None, &[], &[]).is_err());
    }

    #[test]
    fn test_prepare_valid() {
        let cmd = to_cmd_vec(["git"]);
        let args = filter_args(&[OsString::from("status")]);
        let (name, _) = prepare(None, &cmd, &args).unwrap();
        assert_eq!(name, "git");
    }

    #[test]
    fn test_platform_program_windows_wrappers() {
        assert_eq!(platform_program("bundle", true), "bundle.bat");
        assert_eq!(platform_program("Jekyll", true), "jekyll.bat");
        assert_eq!(platform_program("git", true), "git");
        assert_eq!(platform_program("bundle", false), "bundle");
    }

    #[test]
    fn test_noise_filter() {
        assert!(is_noise("hint: Updates were rejected"));
        assert!(is_noise("warning: in the working copy of 'a.md', LF will be replaced by CRLF"));
        assert!(!is_noise("error: failed to push some refs"));
    }

    #[test]
    fn test_extract_error_skips_hints() {
        let stderr = "hint: use --force\nerror: failed to push some refs\nmore";
        assert_eq!(extract_error(stderr), "error: failed to push some refs\nmore");
    }
}
