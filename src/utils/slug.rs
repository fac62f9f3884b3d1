//! URL slugification and path utilities.
//!
//! Collection files are named `<date>-<slug>.md` and the slug also becomes
//! part of the permalink, so it must stay ASCII and URL-safe.

/// Slug used when nothing of the input survives slugification
const FALLBACK_SLUG: &str = "item";

/// Convert text to a lowercase ASCII slug.
///
/// Non-ASCII characters are transliterated (`é` → `e`, `₂` → `2`), then every
/// run of characters outside `[a-z0-9]` collapses into a single `-`.
///
/// # Examples
/// ```ignore
/// assert_eq!(slugify("Twisted Bilayer MoS₂"), "twisted-bilayer-mos2");
/// assert_eq!(slugify("!!!"), "item");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text).to_ascii_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for c in ascii.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_owned()
    } else {
        slug
    }
}

/// Normalize a site-relative URL to `/path/` form.
///
/// Absolute `http(s)://` URLs are returned unchanged.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_owned();
    }
    let mut out = String::with_capacity(url.len() + 2);
    if !url.starts_with('/') {
        out.push('/');
    }
    out.push_str(url);
    if !out.ends_with('/') {
        out.push('/');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_simple() {
        assert_eq!(slugify("An Invited Talk"), "an-invited-talk");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Hello,   World -- 2026!  "), "hello-world-2026");
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Çakıroğlu"), "cakiroglu");
        assert_eq!(
            slugify("CVD-Grown Twisted Bilayer MoS₂"),
            "cvd-grown-twisted-bilayer-mos2"
        );
    }

    #[test]
    fn test_slugify_strips_html_tags_text() {
        assert_eq!(slugify("WS<sub>2</sub> on paper"), "ws-sub-2-sub-on-paper");
    }

    #[test]
    fn test_slugify_fallback() {
        assert_eq!(slugify(""), "item");
        assert_eq!(slugify("!!! ---"), "item");
    }

    #[test]
    fn test_normalize_url_relative() {
        assert_eq!(normalize_url("learning"), "/learning/");
        assert_eq!(normalize_url("/learning"), "/learning/");
        assert_eq!(normalize_url("learning/"), "/learning/");
        assert_eq!(normalize_url("/learning/"), "/learning/");
    }

    #[test]
    fn test_normalize_url_absolute() {
        assert_eq!(
            normalize_url("https://missing.csail.mit.edu/2026"),
            "https://missing.csail.mit.edu/2026"
        );
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
    }
}
