//! Annotation composer: runs every detector once per result and assembles
//! the annotation record plus its ordered display entries.

use chrono::{DateTime, Utc};

use crate::config::Settings;
use crate::models::{Age, Annotation, AnnotationEntry, ResultInput};
use crate::services::age::{age_in_days, format_age, AgeThresholds};
use crate::services::date_detection::{detect_date_with_min_year, DateFinding, DEFAULT_URL_MIN_YEAR};
use crate::services::tech_detection::{scan_debt, scan_modern, TechFinding};
use crate::services::url_classification::{detect_platform, is_authority_domain, PlatformMatch};

const AUTHORITY_LABEL: &str = "Official Docs";
const MODERN_LABEL: &str = "Modern";

/// Composes annotations with a fixed set of thresholds.
///
/// Stateless apart from its settings, so one composer can be shared across
/// threads and called any number of times on the same input.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationComposer {
    thresholds: AgeThresholds,
    url_min_year: i32,
}

impl Default for AnnotationComposer {
    fn default() -> Self {
        Self {
            thresholds: AgeThresholds::default(),
            url_min_year: DEFAULT_URL_MIN_YEAR,
        }
    }
}

impl AnnotationComposer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            thresholds: settings.age_thresholds,
            url_min_year: settings.url_min_year,
        }
    }

    /// Annotate a single result as of `now`.
    pub fn compose(&self, input: &ResultInput, now: DateTime<Utc>) -> Annotation {
        let url = input.url();
        let scan_text = input.scan_text();

        let tech_debt = scan_debt(&scan_text);
        let modern_tech = scan_modern(&scan_text);
        let is_authority = url.is_some_and(is_authority_domain);
        let platform = detect_platform(url);
        let date = detect_date_with_min_year(&input.snippet, url, now, self.url_min_year);
        let age = date.map(|d| self.age_of(&d, now));

        let entries = display_entries(
            &tech_debt,
            &modern_tech,
            is_authority,
            platform,
            date.as_ref().zip(age.as_ref()),
        );

        tracing::debug!(
            "Composed annotation: {} debt, {} modern, authority={}, platform={:?}, date={:?}",
            tech_debt.len(),
            modern_tech.len(),
            is_authority,
            platform.map(|p| p.platform.as_str()),
            date.map(|d| d.source.as_str())
        );

        Annotation {
            tech_debt,
            modern_tech,
            is_authority,
            platform,
            date,
            age,
            entries,
        }
    }

    fn age_of(&self, finding: &DateFinding, now: DateTime<Utc>) -> Age {
        let days = age_in_days(finding.date, now).max(0);
        Age {
            days,
            label: format_age(days),
            bucket: self.thresholds.classify(days),
        }
    }
}

/// Annotate a single result with default settings.
pub fn compose(input: &ResultInput, now: DateTime<Utc>) -> Annotation {
    AnnotationComposer::default().compose(input, now)
}

/// Apply the display priority rules to the raw findings.
fn display_entries(
    tech_debt: &[TechFinding],
    modern_tech: &[TechFinding],
    is_authority: bool,
    platform: Option<PlatformMatch>,
    dated: Option<(&DateFinding, &Age)>,
) -> Vec<AnnotationEntry> {
    let mut entries = Vec::new();

    // Debt findings are sorted most severe first.
    if let Some(worst) = tech_debt.first() {
        if let Some(severity) = worst.severity {
            entries.push(AnnotationEntry::TechDebt {
                label: worst.label,
                severity,
                details: tech_debt.iter().map(|p| p.label).collect(),
            });
        }
    }

    if is_authority {
        entries.push(AnnotationEntry::Authority {
            label: AUTHORITY_LABEL,
        });
    } else if let Some(platform) = platform {
        entries.push(AnnotationEntry::Platform {
            platform: platform.platform,
            label: platform.label,
        });
    }

    if !modern_tech.is_empty() && tech_debt.is_empty() {
        entries.push(AnnotationEntry::Modern {
            label: MODERN_LABEL,
            details: modern_tech.iter().map(|p| p.label).collect(),
        });
    }

    if let Some((finding, age)) = dated {
        entries.push(AnnotationEntry::Age {
            label: age.label.clone(),
            bucket: age.bucket,
            date: finding.date.date_naive(),
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::age::AgeBucket;
    use crate::services::date_detection::DateSource;
    use crate::services::tech_detection::Severity;
    use crate::services::url_classification::Platform;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
    }

    fn kinds(annotation: &Annotation) -> Vec<&'static str> {
        annotation.entries.iter().map(|e| e.kind()).collect()
    }

    #[test]
    fn test_full_annotation_order() {
        let input = ResultInput::new(
            "Jan 5, 2024 - fetch data with XMLHttpRequest and eval(json)",
            "AJAX tutorial",
            Some("https://github.com/someone/ajax-demo"),
        );
        let annotation = compose(&input, now());

        assert_eq!(kinds(&annotation), vec!["tech_debt", "platform", "age"]);
        match &annotation.entries[0] {
            AnnotationEntry::TechDebt {
                label,
                severity,
                details,
            } => {
                assert_eq!(*label, "Security Risk");
                assert_eq!(*severity, Severity::Danger);
                assert_eq!(details, &vec!["Security Risk", "Pre-Fetch API"]);
            }
            other => panic!("unexpected entry {:?}", other),
        }

        let age = annotation.age.as_ref().unwrap();
        assert_eq!(age.days, 513);
        assert_eq!(age.label, "1y 4mo");
        assert_eq!(age.bucket, AgeBucket::Aging);
        assert_eq!(annotation.date.unwrap().source, DateSource::Snippet);
    }

    #[test]
    fn test_modern_suppressed_by_debt_but_recorded() {
        let input = ResultInput::new("const x = 1; var y = 2;", "", None::<String>);
        let annotation = compose(&input, now());

        assert!(!annotation.modern_tech.is_empty());
        assert_eq!(kinds(&annotation), vec!["tech_debt"]);
    }

    #[test]
    fn test_modern_entry_without_debt() {
        let input = ResultInput::new("Using useState and useEffect", "React hooks", None::<String>);
        let annotation = compose(&input, now());

        assert_eq!(
            annotation.entries,
            vec![AnnotationEntry::Modern {
                label: "Modern",
                details: vec!["React Hooks", "React Hooks"],
            }]
        );
    }

    #[test]
    fn test_authority_hides_platform() {
        // pypi.org is both an authority domain and a platform.
        let input = ResultInput::new("", "requests", Some("https://pypi.org/project/requests/"));
        let annotation = compose(&input, now());

        assert!(annotation.is_authority);
        assert_eq!(annotation.platform.unwrap().platform, Platform::Pypi);
        assert_eq!(kinds(&annotation), vec!["authority"]);
    }

    #[test]
    fn test_title_is_scanned_but_not_dated() {
        let input = ResultInput::new("", "jQuery tips from Mar 1, 2019", None::<String>);
        let annotation = compose(&input, now());

        assert_eq!(annotation.tech_debt.len(), 1);
        assert!(annotation.date.is_none());
    }

    #[test]
    fn test_url_date_fallback() {
        let input = ResultInput::new("", "", Some("https://example.com/2023/07/15/post"));
        let annotation = compose(&input, now());

        let date = annotation.date.unwrap();
        assert_eq!(date.source, DateSource::Url);
        assert_eq!(kinds(&annotation), vec!["age"]);
    }

    #[test]
    fn test_future_date_saturates() {
        let input = ResultInput::new("Dec 1, 2025", "", None::<String>);
        let annotation = compose(&input, now());

        let age = annotation.age.unwrap();
        assert_eq!(age.days, 0);
        assert_eq!(age.label, "0d");
        assert_eq!(age.bucket, AgeBucket::Fresh);
    }

    #[test]
    fn test_never_fails_on_garbage() {
        for url in [None, Some(""), Some("::not a url::"), Some("http://")] {
            let input = ResultInput::new("", "", url);
            let annotation = compose(&input, now());
            assert!(annotation.is_empty(), "{:?}", url);
            assert!(annotation.entries.is_empty());
        }
    }

    #[test]
    fn test_compose_is_idempotent() {
        let input = ResultInput::new(
            "3 weeks ago - componentWillMount is gone",
            "",
            Some("https://react.dev/reference"),
        );
        assert_eq!(compose(&input, now()), compose(&input, now()));
    }

    #[test]
    fn test_custom_thresholds() {
        let settings = Settings {
            age_thresholds: AgeThresholds {
                fresh_days: 7,
                aging_days: 30,
            },
            ..Settings::default()
        };
        let composer = AnnotationComposer::new(&settings);
        let input = ResultInput::new("2 weeks ago", "", None::<String>);

        let annotation = composer.compose(&input, now());
        assert_eq!(annotation.age.unwrap().bucket, AgeBucket::Aging);
    }
}
