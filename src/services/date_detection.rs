//! Date detection for search result snippets.
//!
//! Uses deterministic strategies, tried in priority order:
//! - Month-name dates in the snippet ("Jan 5, 2024", "5 Jan 2024")
//! - ISO dates in the snippet ("2024-01-05")
//! - US slash dates in the snippet ("1/5/2024")
//! - Relative dates in the snippet ("3 weeks ago")
//! - Date-shaped URL paths ("/2024/01/05/")
//!
//! The first strategy that yields a valid calendar date wins. A candidate that
//! fails calendar validation falls through to the next strategy.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use regex::{Captures, Regex};
use serde::Serialize;

use crate::utils::extract_path_from_url;

/// Lowest year accepted from a URL path by default.
pub const DEFAULT_URL_MIN_YEAR: i32 = 2000;

/// Source of the date estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// An absolute date written in the snippet.
    Snippet,
    /// A relative expression ("2 days ago") resolved against the clock.
    Relative,
    /// A `/YYYY/MM/[DD/]` segment of the result URL.
    Url,
}

impl DateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateSource::Snippet => "snippet",
            DateSource::Relative => "relative",
            DateSource::Url => "url",
        }
    }
}

/// Result of date detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateFinding {
    pub date: DateTime<Utc>,
    pub source: DateSource,
}

impl DateFinding {
    fn snippet(date: NaiveDate) -> Option<Self> {
        Some(Self {
            date: date.and_hms_opt(0, 0, 0)?.and_utc(),
            source: DateSource::Snippet,
        })
    }
}

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

// Digits and word boundaries are ASCII-only ("2024-01-05に更新" matches).
// "Jan 5, 2024" / "Jan 05 2024"
static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?-u:\b)(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+([0-9]{1,2}),?\s+([0-9]{4})(?-u:\b)",
    )
    .unwrap()
});

// "5 Jan 2024"
static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?-u:\b)([0-9]{1,2})\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+([0-9]{4})(?-u:\b)",
    )
    .unwrap()
});

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)([0-9]{4})-([0-9]{2})-([0-9]{2})(?-u:\b)").unwrap());

// Month first, US convention.
static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})(?-u:\b)").unwrap());

static RELATIVE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s+(day|week|month|year)s?\s+ago").unwrap()
});

static URL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([0-9]{4})/([0-9]{2})(?:/([0-9]{2}))?").unwrap());

/// Detect the publication date of a search result.
///
/// Snippet-derived dates always take priority over the URL. Returns `None` if
/// nothing matches or every candidate fails calendar validation.
pub fn detect_date(snippet: &str, url: Option<&str>, now: DateTime<Utc>) -> Option<DateFinding> {
    detect_date_with_min_year(snippet, url, now, DEFAULT_URL_MIN_YEAR)
}

/// Same as [`detect_date`] with an explicit lower bound for URL years.
pub fn detect_date_with_min_year(
    snippet: &str,
    url: Option<&str>,
    now: DateTime<Utc>,
    url_min_year: i32,
) -> Option<DateFinding> {
    if let Some(finding) = extract_date_from_snippet(snippet, now) {
        return Some(finding);
    }

    url.and_then(|u| extract_date_from_url(u, now, url_min_year))
}

/// Run the snippet strategies in priority order.
fn extract_date_from_snippet(text: &str, now: DateTime<Utc>) -> Option<DateFinding> {
    let strategies: [(&str, fn(&str) -> Option<NaiveDate>); 3] = [
        ("month_name", parse_month_name),
        ("iso", parse_iso),
        ("slash", parse_slash),
    ];

    for (name, strategy) in strategies {
        if let Some(date) = strategy(text) {
            tracing::debug!("Snippet date matched {} pattern: {}", name, date);
            return DateFinding::snippet(date);
        }
    }

    extract_relative_date(text, now)
}

/// Both month-name layouts form one tier; the leftmost match is tried first.
fn parse_month_name(text: &str) -> Option<NaiveDate> {
    let mut candidates: Vec<(usize, Option<NaiveDate>)> = Vec::with_capacity(2);

    if let Some(caps) = MONTH_DAY_YEAR.captures(text) {
        let date = month_from_name(&caps[1]).and_then(|m| validated(&caps, m, &caps[2], &caps[3]));
        candidates.push((caps.get(0)?.start(), date));
    }
    if let Some(caps) = DAY_MONTH_YEAR.captures(text) {
        let date = month_from_name(&caps[2]).and_then(|m| validated(&caps, m, &caps[1], &caps[3]));
        candidates.push((caps.get(0)?.start(), date));
    }

    candidates.sort_by_key(|(start, _)| *start);
    candidates.into_iter().find_map(|(_, date)| date)
}

fn parse_iso(text: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE.captures(text)?;
    let month: u32 = caps[2].parse().ok()?;
    validated(&caps, month, &caps[3], &caps[1])
}

fn parse_slash(text: &str) -> Option<NaiveDate> {
    let caps = SLASH_DATE.captures(text)?;
    let month: u32 = caps[1].parse().ok()?;
    validated(&caps, month, &caps[2], &caps[3])
}

/// Build a calendar date from captured day/year strings, logging rejects.
fn validated(caps: &Captures, month: u32, day: &str, year: &str) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day);
    if date.is_none() {
        tracing::debug!("Rejected invalid calendar date: {}", &caps[0]);
    }
    date
}

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == lower)
        .map(|i| i as u32 + 1)
}

/// Resolve "<N> <unit>s ago" against `now`.
///
/// Month and year offsets use calendar arithmetic and clamp to the last valid
/// day of the target month (March 31 minus one month is February 28/29).
fn extract_relative_date(text: &str, now: DateTime<Utc>) -> Option<DateFinding> {
    let caps = RELATIVE_DATE.captures(text)?;
    let amount: u32 = caps[1].parse().ok()?;
    let unit = caps[2].to_ascii_lowercase();

    let date = match unit.as_str() {
        "day" => now.checked_sub_signed(Duration::try_days(i64::from(amount))?),
        "week" => now.checked_sub_signed(Duration::try_days(i64::from(amount) * 7)?),
        "month" => now.checked_sub_months(Months::new(amount)),
        "year" => now.checked_sub_months(Months::new(amount.checked_mul(12)?)),
        _ => None,
    };

    match date {
        Some(date) => {
            tracing::debug!("Relative date matched: {}", &caps[0]);
            Some(DateFinding {
                date,
                source: DateSource::Relative,
            })
        }
        None => {
            tracing::debug!("Relative date out of range: {}", &caps[0]);
            None
        }
    }
}

/// Extract a `/YYYY/MM/[DD/]` date from the URL path.
///
/// Only years in `[min_year, now.year() + 1]` are accepted, which keeps
/// version numbers and other digit runs from being read as dates.
fn extract_date_from_url(url: &str, now: DateTime<Utc>, min_year: i32) -> Option<DateFinding> {
    let path = extract_path_from_url(url)?;
    let caps = URL_DATE.captures(path)?;

    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = match caps.get(3) {
        Some(d) => d.as_str().parse().ok()?,
        None => 1,
    };

    if year < min_year || year > now.year() + 1 {
        tracing::debug!("URL year {} outside accepted range", year);
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(DateFinding {
        date: date.and_hms_opt(0, 0, 0)?.and_utc(),
        source: DateSource::Url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap()
    }

    fn ymd(finding: &DateFinding) -> String {
        finding.date.format("%Y-%m-%d").to_string()
    }

    #[test]
    fn test_month_day_year() {
        let est = detect_date("Posted Jan 5, 2024 by admin", None, now()).unwrap();
        assert_eq!(ymd(&est), "2024-01-05");
        assert_eq!(est.source, DateSource::Snippet);
    }

    #[test]
    fn test_month_name_case_insensitive_without_comma() {
        let est = detect_date("updated DEC 25 2023", None, now()).unwrap();
        assert_eq!(ymd(&est), "2023-12-25");
    }

    #[test]
    fn test_day_month_year() {
        let est = detect_date("14 Feb 2022 - release notes", None, now()).unwrap();
        assert_eq!(ymd(&est), "2022-02-14");
    }

    #[test]
    fn test_month_name_layouts_leftmost_wins() {
        let est = detect_date("5 Jan 2021, updated Feb 3, 2023", None, now()).unwrap();
        assert_eq!(ymd(&est), "2021-01-05");

        let est = detect_date("Feb 3, 2023 (first seen 5 Jan 2021)", None, now()).unwrap();
        assert_eq!(ymd(&est), "2023-02-03");
    }

    #[test]
    fn test_month_name_beats_iso() {
        let est = detect_date("2020-01-01 ... revised Mar 3, 2023", None, now()).unwrap();
        assert_eq!(ymd(&est), "2023-03-03");
    }

    #[test]
    fn test_iso() {
        let est = detect_date("build 2021-06-30 notes", None, now()).unwrap();
        assert_eq!(ymd(&est), "2021-06-30");
        assert_eq!(est.source, DateSource::Snippet);
    }

    #[test]
    fn test_slash_is_month_first() {
        let est = detect_date("on 3/4/2021 we shipped", None, now()).unwrap();
        assert_eq!(ymd(&est), "2021-03-04");
    }

    #[test]
    fn test_invalid_calendar_date_falls_through() {
        // Feb 30 is rejected; the ISO date is used instead.
        let est = detect_date("Feb 30, 2023 or 2022-11-02", None, now()).unwrap();
        assert_eq!(ymd(&est), "2022-11-02");

        assert!(detect_date("13/45/2020", None, now()).is_none());
    }

    #[test]
    fn test_iso_beats_slash() {
        let est = detect_date("1/2/2020, rebuilt 2021-06-30", None, now()).unwrap();
        assert_eq!(ymd(&est), "2021-06-30");
    }

    #[test]
    fn test_invalid_iso_falls_through_to_slash() {
        let est = detect_date("2022-13-40 then 1/2/2020", None, now()).unwrap();
        assert_eq!(ymd(&est), "2020-01-02");
        assert_eq!(est.source, DateSource::Snippet);
    }

    #[test]
    fn test_absolute_beats_relative() {
        let est = detect_date("3 days ago, 1/2/2020", None, now()).unwrap();
        assert_eq!(ymd(&est), "2020-01-02");
        assert_eq!(est.source, DateSource::Snippet);

        let est = detect_date("2 weeks ago (2024-08-09)", None, now()).unwrap();
        assert_eq!(ymd(&est), "2024-08-09");
    }

    #[test]
    fn test_dates_adjacent_to_cjk_text() {
        let cases = [
            ("2024-01-05に更新", "2024-01-05"),
            ("更新日2024-01-05", "2024-01-05"),
            ("Jan 5, 2024年", "2024-01-05"),
            ("1/5/2024に公開", "2024-01-05"),
            ("公開5 Jan 2024", "2024-01-05"),
        ];
        for (text, expected) in cases {
            let est = detect_date(text, None, now()).unwrap();
            assert_eq!(ymd(&est), expected, "{}", text);
            assert_eq!(est.source, DateSource::Snippet);
        }
    }

    #[test]
    fn test_non_ascii_digits_ignored() {
        assert!(detect_date("Jan \u{0665}, 2024", None, now()).is_none());
        assert!(detect_date("\u{0662}\u{0660}\u{0662}\u{0664}-01-05", None, now()).is_none());
    }

    #[test]
    fn test_relative_days_and_weeks() {
        let est = detect_date("3 days ago - some post", None, now()).unwrap();
        assert_eq!(est.source, DateSource::Relative);
        assert_eq!(est.date, now() - Duration::days(3));

        let est = detect_date("2 Weeks ago", None, now()).unwrap();
        assert_eq!(est.date, now() - Duration::days(14));
    }

    #[test]
    fn test_relative_month_clamps_day() {
        let est = detect_date("1 month ago", None, now()).unwrap();
        assert_eq!(ymd(&est), "2025-02-28");

        let est = detect_date("4 months ago", None, now()).unwrap();
        assert_eq!(ymd(&est), "2024-11-30");
    }

    #[test]
    fn test_relative_year_crosses_leap_day() {
        let leap = Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap();
        let est = detect_date("1 year ago", None, leap).unwrap();
        assert_eq!(ymd(&est), "2023-02-28");
    }

    #[test]
    fn test_relative_overflow_is_no_finding() {
        assert!(detect_date("99999999 years ago", None, now()).is_none());
    }

    #[test]
    fn test_url_date() {
        let est = detect_date("", Some("https://example.com/2023/07/15/post"), now()).unwrap();
        assert_eq!(ymd(&est), "2023-07-15");
        assert_eq!(est.source, DateSource::Url);
    }

    #[test]
    fn test_url_date_defaults_day() {
        let est = detect_date("", Some("https://blog.example.com/2024/02/title"), now()).unwrap();
        assert_eq!(ymd(&est), "2024-02-01");
    }

    #[test]
    fn test_url_year_window() {
        assert!(detect_date("", Some("https://example.com/1999/07/"), now()).is_none());
        assert!(detect_date("", Some("https://example.com/2027/01/"), now()).is_none());
        assert!(detect_date("", Some("https://example.com/2026/01/"), now()).is_some());
    }

    #[test]
    fn test_url_min_year_override() {
        let url = Some("https://example.com/1998/05/a");
        assert!(detect_date_with_min_year("", url, now(), 1990).is_some());
    }

    #[test]
    fn test_host_digits_are_not_a_date() {
        assert!(detect_date("", Some("https://2023.example.com/about"), now()).is_none());
    }

    #[test]
    fn test_snippet_beats_url() {
        let est = detect_date(
            "Jun 1, 2020",
            Some("https://example.com/2023/07/15/post"),
            now(),
        )
        .unwrap();
        assert_eq!(est.source, DateSource::Snippet);
    }

    #[test]
    fn test_no_date() {
        assert!(detect_date("nothing to see here", None, now()).is_none());
        assert!(detect_date("", Some("not a url"), now()).is_none());
    }
}
