//! YAML front matter helpers.
//!
//! Jekyll pages start with a block delimited by `---` lines. Only the
//! handful of flat scalar fields this tool writes are ever read back, so
//! the helpers here work on lines instead of a full YAML parser: untouched
//! lines keep their exact formatting when a file is rewritten.

use regex::Regex;
use std::sync::LazyLock;

/// Front matter delimiter line
pub const DELIMITER: &str = "---";

/// Front matter block including trailing whitespace
static RE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)^---.*?---\s*").unwrap());

/// Index of the first line after the front matter, or 0 when there is none.
pub fn end_line<S: AsRef<str>>(lines: &[S]) -> usize {
    if lines.first().is_none_or(|l| l.as_ref().trim() != DELIMITER) {
        return 0;
    }
    lines
        .iter()
        .skip(1)
        .position(|l| l.as_ref().trim() == DELIMITER)
        .map_or(0, |idx| idx + 2)
}

/// Split a document into its front matter block (with trailing whitespace)
/// and the remaining body.
pub fn split(text: &str) -> Option<(&str, &str)> {
    RE_BLOCK
        .find(text)
        .map(|m| (&text[..m.end()], &text[m.end()..]))
}

/// Remove a leading front matter block, if any.
pub fn strip(text: &str) -> &str {
    split(text).map_or(text, |(_, body)| body)
}

/// Raw value of the first top-level `key:` line, trimmed but still quoted.
pub fn raw_field<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines().find_map(|line| {
        line.strip_prefix(key)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(str::trim)
    })
}

/// Unquoted value of the first top-level `key:` line.
pub fn field(text: &str, key: &str) -> Option<String> {
    raw_field(text, key).map(unquote)
}

/// Replace the value of the first top-level `key:` line.
///
/// Every other line, line endings included, is kept as is. Returns `None`
/// when the key is absent.
pub fn set_raw_field(text: &str, key: &str, raw_value: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len() + raw_value.len());
    let mut replaced = false;
    for line in text.split_inclusive('\n') {
        let is_key = line
            .strip_prefix(key)
            .is_some_and(|rest| rest.starts_with(':'));
        if replaced || !is_key {
            out.push_str(line);
            continue;
        }
        let ending = &line[line.trim_end_matches(['\r', '\n']).len()..];
        out.push_str(&format!("{key}: {raw_value}{ending}"));
        replaced = true;
    }
    replaced.then_some(out)
}

/// Quote style of a scalar as written in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
    Plain,
}

impl Quote {
    /// Detect the quote style of a raw scalar.
    pub fn of(raw: &str) -> Self {
        let quoted_with = |q: char| raw.len() >= 2 && raw.starts_with(q) && raw.ends_with(q);
        if quoted_with('\'') {
            Self::Single
        } else if quoted_with('"') {
            Self::Double
        } else {
            Self::Plain
        }
    }

    /// Render a value with this quote style.
    pub fn render(self, value: &str) -> String {
        match self {
            Self::Single => yaml_quote(value),
            Self::Double => format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\"")),
            Self::Plain => value.to_owned(),
        }
    }
}

/// Decode a raw YAML scalar written by this tool or by hand.
pub fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    match Quote::of(raw) {
        Quote::Single => raw[1..raw.len() - 1].replace("''", "'"),
        Quote::Double => raw[1..raw.len() - 1]
            .replace("\\\"", "\"")
            .replace("\\\\", "\\"),
        Quote::Plain => raw.to_owned(),
    }
}

/// Quote a value as a single-quoted YAML scalar.
pub fn yaml_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "---\nlayout: archive\ntitle: \"Group NEWs\"\npermalink: /group-news/\n---\n\n## 2026\n";

    #[test]
    fn test_end_line() {
        let lines: Vec<&str> = PAGE.lines().collect();
        assert_eq!(end_line(&lines), 5);
        assert_eq!(lines[end_line(&lines)], "");
    }

    #[test]
    fn test_end_line_without_front_matter() {
        assert_eq!(end_line(&["## 2026", "- entry"]), 0);
        assert_eq!(end_line::<&str>(&[]), 0);
        // unterminated block
        assert_eq!(end_line(&["---", "title: x"]), 0);
    }

    #[test]
    fn test_split_and_strip() {
        let (fm, body) = split(PAGE).unwrap();
        assert!(fm.starts_with("---\nlayout"));
        assert!(fm.ends_with("---\n\n"));
        assert_eq!(body, "## 2026\n");
        assert_eq!(strip(PAGE), "## 2026\n");
        assert_eq!(strip("no front matter"), "no front matter");
    }

    #[test]
    fn test_field_unquotes() {
        let text = "---\ntitle: 'It''s a \"test\"'\nvenue: \"Nano Letters\"\ndate: 2026-02-26\n---\n";
        assert_eq!(field(text, "title").unwrap(), "It's a \"test\"");
        assert_eq!(field(text, "venue").unwrap(), "Nano Letters");
        assert_eq!(field(text, "date").unwrap(), "2026-02-26");
        assert_eq!(field(text, "link"), None);
    }

    #[test]
    fn test_field_ignores_indented_and_prefixed_keys() {
        let text = "header:\n  title: nested\ntitles: no\ntitle: yes\n";
        assert_eq!(field(text, "title").unwrap(), "yes");
    }

    #[test]
    fn test_set_raw_field_replaces_first_line_only() {
        let text = "---\r\nvenue: 'Nano Letters 2024'\r\nvenue: second\r\n---\r\n";
        let updated = set_raw_field(text, "venue", "'Nano Letters'").unwrap();
        assert_eq!(
            updated,
            "---\r\nvenue: 'Nano Letters'\r\nvenue: second\r\n---\r\n"
        );
        assert_eq!(set_raw_field(text, "citation", "x"), None);
    }

    #[test]
    fn test_quote_roundtrip_styles() {
        assert_eq!(Quote::of("'a'"), Quote::Single);
        assert_eq!(Quote::of("\"a\""), Quote::Double);
        assert_eq!(Quote::of("a"), Quote::Plain);
        assert_eq!(Quote::of("'"), Quote::Plain);
        assert_eq!(Quote::Single.render("It's"), "'It''s'");
        assert_eq!(Quote::Double.render("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_yaml_quote() {
        assert_eq!(yaml_quote("Plain"), "'Plain'");
        assert_eq!(yaml_quote("Author's paper"), "'Author''s paper'");
    }
}
