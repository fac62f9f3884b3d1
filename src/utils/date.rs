//! Date normalization for front matter and news labels.
//!
//! | Input          | `iso_date`    | `news_label`         |
//! |----------------|---------------|----------------------|
//! | `2026-02-26`   | `2026-02-26`  | `(2026, "2026.02")`  |
//! | `2026/2/6`     | `2026-02-06`  | `(2026, "2026.02")`  |
//! | `20260226`     | `2026-02-26`  | error                |
//! | `2026.02`      | error         | `(2026, "2026.02")`  |
//! | `202602`       | error         | `(2026, "2026.02")`  |
//! | `2026`         | error         | `(2026, "2026")`     |

use crate::content::ContentError;
use chrono::{Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static RE_YMD_SEPARATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})$").unwrap());
static RE_YMD_COMPACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").unwrap());
static RE_YM_OPTIONAL_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})(?:[-/.](\d{1,2}))?$").unwrap());
static RE_YM_COMPACT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})(\d{2})$").unwrap());
static RE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})$").unwrap());

/// Normalize a calendar date to `YYYY-MM-DD`.
///
/// The date must exist: `2026-02-30` is rejected.
pub fn iso_date(raw: &str) -> Result<String, ContentError> {
    let s = raw.trim();
    let caps = RE_YMD_SEPARATED
        .captures(s)
        .or_else(|| RE_YMD_COMPACT.captures(s))
        .ok_or_else(|| ContentError::IsoDate(raw.to_owned()))?;

    let year: i32 = caps[1].parse().map_err(|_| ContentError::IsoDate(raw.to_owned()))?;
    let month: u32 = caps[2].parse().map_err(|_| ContentError::IsoDate(raw.to_owned()))?;
    let day: u32 = caps[3].parse().map_err(|_| ContentError::IsoDate(raw.to_owned()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .ok_or_else(|| ContentError::IsoDate(raw.to_owned()))
}

/// Year part of an ISO date produced by [`iso_date`].
pub fn year_of(date_iso: &str) -> &str {
    date_iso.get(..4).unwrap_or(date_iso)
}

/// A news date label such as `2026.02`, together with its year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDate {
    pub year: u16,
    pub label: String,
}

/// Normalize a news date to its `YYYY.MM` (or bare `YYYY`) label.
///
/// A day component is accepted and dropped.
pub fn news_label(raw: &str) -> Result<NewsDate, ContentError> {
    let s = raw.trim();
    let invalid = || ContentError::NewsDate(raw.to_owned());

    let caps = RE_YM_OPTIONAL_DAY
        .captures(s)
        .or_else(|| RE_YM_COMPACT.captures(s));

    if let Some(caps) = caps {
        let year: u16 = caps[1].parse().map_err(|_| invalid())?;
        let month: u8 = caps[2].parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        return Ok(NewsDate {
            year,
            label: format!("{year:04}.{month:02}"),
        });
    }

    let caps = RE_YEAR.captures(s).ok_or_else(invalid)?;
    let year: u16 = caps[1].parse().map_err(|_| invalid())?;
    Ok(NewsDate {
        year,
        label: year.to_string(),
    })
}

/// Current month as a news date (`YYYY.MM`).
pub fn current_month() -> String {
    Local::now().format("%Y.%m").to_string()
}

/// Timestamp suffix for backup files (`YYYYmmdd-HHMMSS`).
pub fn backup_stamp() -> String {
    Local::now().format("%Y%m%d-%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date_separators() {
        assert_eq!(iso_date("2026-02-26").unwrap(), "2026-02-26");
        assert_eq!(iso_date("2026/2/6").unwrap(), "2026-02-06");
        assert_eq!(iso_date("2026.12.01").unwrap(), "2026-12-01");
        assert_eq!(iso_date("  2022-12-09 ").unwrap(), "2022-12-09");
    }

    #[test]
    fn test_iso_date_compact() {
        assert_eq!(iso_date("20260226").unwrap(), "2026-02-26");
    }

    #[test]
    fn test_iso_date_rejects_unsupported() {
        let err = iso_date("Feb 26, 2026").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported date format: Feb 26, 2026. Use YYYY-MM-DD."
        );
        assert!(iso_date("2026-02").is_err());
    }

    #[test]
    fn test_iso_date_rejects_impossible_dates() {
        assert!(iso_date("2026-02-30").is_err());
        assert!(iso_date("2026-13-01").is_err());
        assert_eq!(iso_date("2024-02-29").unwrap(), "2024-02-29");
    }

    #[test]
    fn test_year_of() {
        assert_eq!(year_of("2026-02-26"), "2026");
        assert_eq!(year_of("26"), "26");
    }

    #[test]
    fn test_news_label_month_forms() {
        let expected = NewsDate {
            year: 2026,
            label: "2026.02".into(),
        };
        assert_eq!(news_label("2026.02").unwrap(), expected);
        assert_eq!(news_label("2026-2").unwrap(), expected);
        assert_eq!(news_label("2026/02/26").unwrap(), expected);
        assert_eq!(news_label("202602").unwrap(), expected);
    }

    #[test]
    fn test_news_label_year_only() {
        let date = news_label("2023").unwrap();
        assert_eq!(date.year, 2023);
        assert_eq!(date.label, "2023");
    }

    #[test]
    fn test_news_label_rejects_invalid() {
        assert_eq!(
            news_label("last week").unwrap_err().to_string(),
            "Unsupported date format: last week"
        );
        assert!(news_label("2026.13").is_err());
        assert!(news_label("2026.00").is_err());
    }

    #[test]
    fn test_current_month_shape() {
        let label = current_month();
        assert!(news_label(&label).is_ok());
        assert_eq!(label.len(), 7);
    }
}
