//! Publication collection (`_publications/<date>-<slug>.md`).

use super::{
    assets::{AssetKind, check_source, copy_asset},
    collection::{clear_duplicates, entry_slug, markdown_files},
};
use crate::{
    config::SiteConfig,
    log,
    utils::{
        date::{iso_date, year_of},
        front_matter::{self, Quote, yaml_quote},
        fs::{read_text, write_text},
    },
};
use anyhow::{Result, bail};
use regex::Regex;
use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

static RE_TRAILING_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,;]+$").unwrap());
static RE_ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Everything needed to write a publication entry
#[derive(Debug, Clone, Default)]
pub struct PublicationDraft {
    pub title: String,
    /// Any format accepted by [`iso_date`]
    pub date: String,
    pub venue: String,
    pub citation: String,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub category: String,
    pub link: Option<String>,
    /// Local PDF copied into `files/`
    pub paper_file: Option<PathBuf>,
    pub paper_name: Option<String>,
    pub paper_url: Option<String>,
    /// Slug source used instead of the title
    pub slug: Option<String>,
    pub replace_existing: bool,
    pub keep_venue_year: bool,
}

/// A written publication entry
#[derive(Debug, Clone)]
pub struct PublicationRecord {
    pub path: PathBuf,
    /// Normalized `YYYY-MM-DD` date
    pub date_iso: String,
    /// `paperurl` as written, if any
    pub paper_url: Option<String>,
}

/// Strip a trailing publication year from a venue.
///
/// Handles `Venue (2026)`, `Venue [2026]` and `Venue, 2026`. Returns the
/// venue and whether it changed; a venue that would become empty is kept.
pub fn normalize_venue(venue: &str, date_iso: &str) -> (String, bool) {
    let original = venue.trim();
    let year = regex::escape(year_of(date_iso));
    let suffixes = [
        format!(r"[\s,;]*\(\s*{year}\s*\)\s*$"),
        format!(r"[\s,;]*\[\s*{year}\s*\]\s*$"),
        format!(r"[\s,;]+{year}\s*$"),
    ];

    let mut value = original.to_owned();
    for suffix in &suffixes {
        if let Ok(re) = Regex::new(suffix) {
            value = re.replace(&value, "").trim().to_owned();
        }
    }
    let value = RE_TRAILING_SEPARATORS.replace(&value, "").into_owned();

    if value.is_empty() {
        return (original.to_owned(), false);
    }
    let changed = value != original;
    (value, changed)
}

/// Non-fatal consistency problems of a publication.
pub fn check_metadata(title: &str, date_iso: &str, venue: &str, citation: &str) -> Vec<String> {
    let mut warnings = Vec::new();
    let year = year_of(date_iso);
    if venue.contains(year) {
        warnings.push(format!(
            "Venue already contains publication year {year}; keep venue format consistent."
        ));
    }
    if !title.is_empty()
        && !citation.is_empty()
        && !citation.to_lowercase().contains(&title.to_lowercase())
    {
        warnings.push("Citation does not contain the exact publication title.".to_owned());
    }
    warnings
}

/// Write a publication entry and copy its PDF.
pub fn add_publication(config: &SiteConfig, draft: &PublicationDraft) -> Result<PublicationRecord> {
    let date_iso = iso_date(&draft.date)?;
    let slug = entry_slug(&date_iso, &draft.title, draft.slug.as_deref());
    let dir = &config.paths.publications;
    let path = dir.join(format!("{slug}.md"));

    check_source(draft.paper_file.as_deref())?;
    clear_duplicates(dir, "Publication", &draft.title, draft.replace_existing)?;

    let copied = copy_asset(
        config,
        AssetKind::File,
        draft.paper_file.as_deref(),
        draft.paper_name.as_deref(),
    )?;
    let paper_url = draft
        .paper_url
        .clone()
        .or(copied)
        .or_else(|| draft.link.clone());

    let excerpt = draft
        .excerpt
        .clone()
        .or_else(|| draft.body.clone())
        .unwrap_or_else(|| draft.title.clone());
    let body = draft.body.clone().unwrap_or_else(|| excerpt.clone());

    let mut venue = draft.venue.trim().to_owned();
    if !draft.keep_venue_year {
        let (normalized, changed) = normalize_venue(&venue, &date_iso);
        if changed {
            log!("paper"; "normalized venue year suffix: '{venue}' -> '{normalized}'");
        }
        venue = normalized;
    }

    for warning in check_metadata(&draft.title, &date_iso, &venue, &draft.citation) {
        log!("warn"; "{warning}");
    }

    let mut lines = vec![
        front_matter::DELIMITER.to_owned(),
        format!("title: {}", yaml_quote(&draft.title)),
        "collection: publications".to_owned(),
        format!("category: {}", draft.category),
        format!("permalink: /publication/{slug}"),
        format!("excerpt: {}", yaml_quote(&excerpt)),
        format!("date: {date_iso}"),
        format!("venue: {}", yaml_quote(&venue)),
    ];
    if let Some(url) = &paper_url {
        lines.push(format!("paperurl: {}", yaml_quote(url)));
    }
    lines.push(format!("citation: {}", yaml_quote(&draft.citation)));
    if let Some(link) = &draft.link {
        lines.push(format!("link: {}", yaml_quote(link)));
    }
    lines.push(front_matter::DELIMITER.to_owned());

    write_text(&path, &format!("{}\n\n{body}\n", lines.join("\n")))?;
    log!("paper"; "created publication: {}", path.display());

    Ok(PublicationRecord {
        path,
        date_iso,
        paper_url,
    })
}

/// Totals of an audit run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub checked: usize,
    pub warnings: usize,
    pub fixed: usize,
}

/// Check every publication's metadata, optionally fixing venue years.
///
/// Entries without an ISO `date:` or a `venue:` are skipped.
pub fn audit_publications(config: &SiteConfig, fix_venue_year: bool) -> Result<AuditSummary> {
    let dir = &config.paths.publications;
    if !dir.is_dir() {
        bail!("Publication directory does not exist: {}", dir.display());
    }

    let mut summary = AuditSummary::default();
    for path in markdown_files(dir) {
        let text = read_text(&path)?;
        let Some(date_iso) = front_matter::field(&text, "date").filter(|d| RE_ISO_DATE.is_match(d))
        else {
            continue;
        };
        let Some(raw_venue) = front_matter::raw_field(&text, "venue") else {
            continue;
        };

        summary.checked += 1;
        let name = file_name(&path);
        let title = front_matter::field(&text, "title").unwrap_or_else(|| stem(&path));
        let venue = front_matter::unquote(raw_venue);
        let citation = front_matter::field(&text, "citation").unwrap_or_default();

        for warning in check_metadata(title.trim(), &date_iso, &venue, &citation) {
            summary.warnings += 1;
            log!("warn"; "[{name}] {warning}");
        }

        if !fix_venue_year {
            continue;
        }
        let (normalized, changed) = normalize_venue(&venue, &date_iso);
        if !changed {
            continue;
        }
        let quoted = Quote::of(raw_venue).render(&normalized);
        if let Some(updated) = front_matter::set_raw_field(&text, "venue", &quoted) {
            write_text(&path, &updated)?;
            summary.fixed += 1;
            log!("audit"; "fixed [{name}]: venue '{venue}' -> '{normalized}'");
        }
    }

    log!(
        "audit";
        "checked={}, warnings={}, fixed={}",
        summary.checked,
        summary.warnings,
        summary.fixed
    );
    Ok(summary)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentError;
    use std::fs;
    use tempfile::TempDir;

    fn draft() -> PublicationDraft {
        PublicationDraft {
            title: "WS2 Photodetectors on Paper".into(),
            date: "2022/12/9".into(),
            venue: "Opto-Electronic Advances (2022)".into(),
            citation: "Author, A. (2022). WS2 photodetectors on paper. OEA.".into(),
            category: "manuscripts".into(),
            ..Default::default()
        }
    }

    fn setup() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::with_root(dir.path());
        (dir, config)
    }

    #[test]
    fn test_normalize_venue_suffixes() {
        let date = "2026-02-26";
        assert_eq!(normalize_venue("Nano Letters (2026)", date), ("Nano Letters".into(), true));
        assert_eq!(normalize_venue("Small [ 2026 ]", date), ("Small".into(), true));
        assert_eq!(normalize_venue("MEMS 2026", date), ("MEMS".into(), true));
        assert_eq!(normalize_venue("Nature, 2026", date), ("Nature".into(), true));
        assert_eq!(normalize_venue("Science; (2026),", date), ("Science; (2026)".into(), true));
    }

    #[test]
    fn test_normalize_venue_keeps_other_years() {
        let date = "2026-02-26";
        assert_eq!(normalize_venue("MEMS 2025", date), ("MEMS 2025".into(), false));
        assert_eq!(normalize_venue(" Nano Letters ", date), ("Nano Letters".into(), false));
        assert_eq!(normalize_venue("2026", date), ("2026".into(), false));
    }

    #[test]
    fn test_check_metadata() {
        let warnings = check_metadata("A Paper", "2026-01-01", "Journal 2026", "Someone. A paper. 2026");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("2026"));

        let warnings = check_metadata("A Paper", "2026-01-01", "Journal", "Someone. Other.");
        assert_eq!(warnings, vec!["Citation does not contain the exact publication title."]);
    }

    #[test]
    fn test_add_publication_writes_front_matter() {
        let (_dir, config) = setup();
        let mut draft = draft();
        draft.link = Some("https://doi.org/10.29026/oea.2022.210000".into());

        let record = add_publication(&config, &draft).unwrap();
        assert_eq!(
            record.path,
            config.paths.publications.join("2022-12-09-ws2-photodetectors-on-paper.md")
        );
        assert_eq!(record.paper_url.as_deref(), Some("https://doi.org/10.29026/oea.2022.210000"));

        let text = fs::read_to_string(&record.path).unwrap();
        assert_eq!(
            text,
            "---\n\
             title: 'WS2 Photodetectors on Paper'\n\
             collection: publications\n\
             category: manuscripts\n\
             permalink: /publication/2022-12-09-ws2-photodetectors-on-paper\n\
             excerpt: 'WS2 Photodetectors on Paper'\n\
             date: 2022-12-09\n\
             venue: 'Opto-Electronic Advances'\n\
             paperurl: 'https://doi.org/10.29026/oea.2022.210000'\n\
             citation: 'Author, A. (2022). WS2 photodetectors on paper. OEA.'\n\
             link: 'https://doi.org/10.29026/oea.2022.210000'\n\
             ---\n\
             \n\
             WS2 Photodetectors on Paper\n"
        );
    }

    #[test]
    fn test_add_publication_copies_pdf_and_keeps_venue_year() {
        let (dir, config) = setup();
        let pdf = dir.path().join("paper.pdf");
        fs::write(&pdf, b"%PDF").unwrap();
        let mut draft = draft();
        draft.paper_file = Some(pdf);
        draft.paper_name = Some("2022-oea.pdf".into());
        draft.keep_venue_year = true;
        draft.body = Some("Abstract text".into());

        let record = add_publication(&config, &draft).unwrap();
        assert_eq!(record.paper_url.as_deref(), Some("/files/2022-oea.pdf"));

        let text = fs::read_to_string(&record.path).unwrap();
        assert!(text.contains("venue: 'Opto-Electronic Advances (2022)'\n"));
        assert!(text.contains("excerpt: 'Abstract text'\n"));
        assert!(text.ends_with("---\n\nAbstract text\n"));
        assert!(!text.contains("link:"));
    }

    #[test]
    fn test_missing_pdf_keeps_existing_entry() {
        let (dir, config) = setup();
        let first = add_publication(&config, &draft()).unwrap();

        let mut replace = draft();
        replace.replace_existing = true;
        replace.paper_file = Some(dir.path().join("missing.pdf"));
        let err = add_publication(&config, &replace).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::MissingSource(_))
        ));
        assert!(first.path.is_file());
    }

    #[test]
    fn test_add_publication_duplicates() {
        let (_dir, config) = setup();
        let first = add_publication(&config, &draft()).unwrap();

        let mut again = draft();
        again.date = "2023-01-01".into();
        let err = add_publication(&config, &again).unwrap_err();
        assert!(err.to_string().starts_with("Publication with same title already exists"));

        again.replace_existing = true;
        let second = add_publication(&config, &again).unwrap();
        assert!(!first.path.exists());
        assert!(second.path.exists());
    }

    #[test]
    fn test_add_publication_bad_date() {
        let (_dir, config) = setup();
        let mut draft = draft();
        draft.date = "December 2022".into();
        assert!(add_publication(&config, &draft).is_err());
        assert!(!config.paths.publications.exists());
    }

    #[test]
    fn test_audit_publications_fix_keeps_quote_style() {
        let (_dir, config) = setup();
        let dir = &config.paths.publications;
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join("a.md"),
            "---\ntitle: 'A'\ndate: 2024-02-20\nvenue: \"Nano Letters (2024)\"\ncitation: 'X. A. 2024'\n---\n",
        )
        .unwrap();
        fs::write(
            dir.join("b.md"),
            "---\ntitle: 'B'\ndate: 2023-01-10\nvenue: Small\ncitation: 'Other'\n---\n",
        )
        .unwrap();
        fs::write(dir.join("c.md"), "---\ntitle: 'No date'\nvenue: Small\n---\n").unwrap();

        let summary = audit_publications(&config, false).unwrap();
        assert_eq!(summary, AuditSummary { checked: 2, warnings: 2, fixed: 0 });

        let summary = audit_publications(&config, true).unwrap();
        assert_eq!(summary.fixed, 1);
        let text = fs::read_to_string(dir.join("a.md")).unwrap();
        assert!(text.contains("venue: \"Nano Letters\"\n"));

        let summary = audit_publications(&config, true).unwrap();
        assert_eq!(summary, AuditSummary { checked: 2, warnings: 1, fixed: 0 });
    }

    #[test]
    fn test_audit_publications_missing_dir() {
        let (_dir, config) = setup();
        assert!(audit_publications(&config, false).is_err());
    }
}
