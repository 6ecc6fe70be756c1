//! Composed annotation record consumed by renderers.

use chrono::NaiveDate;
use serde::Serialize;

use crate::services::age::AgeBucket;
use crate::services::date_detection::DateFinding;
use crate::services::tech_detection::{Severity, TechFinding};
use crate::services::url_classification::{Platform, PlatformMatch};

/// Age of a result at composition time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Age {
    /// Whole days between the detected date and `now`, never negative.
    pub days: i64,
    pub label: String,
    pub bucket: AgeBucket,
}

/// A display recommendation, in the order a renderer should show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationEntry {
    /// Headline warning for the most severe legacy finding.
    TechDebt {
        label: &'static str,
        severity: Severity,
        /// Labels of every legacy finding, most severe first.
        details: Vec<&'static str>,
    },
    /// The URL is an official documentation host.
    Authority { label: &'static str },
    Platform {
        platform: Platform,
        label: &'static str,
    },
    /// Modern technology and no legacy findings.
    Modern {
        label: &'static str,
        details: Vec<&'static str>,
    },
    Age {
        label: String,
        bucket: AgeBucket,
        date: NaiveDate,
    },
}

impl AnnotationEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            AnnotationEntry::TechDebt { .. } => "tech_debt",
            AnnotationEntry::Authority { .. } => "authority",
            AnnotationEntry::Platform { .. } => "platform",
            AnnotationEntry::Modern { .. } => "modern",
            AnnotationEntry::Age { .. } => "age",
        }
    }

    /// Short text a badge would carry.
    pub fn text(&self) -> &str {
        match self {
            AnnotationEntry::TechDebt { label, .. }
            | AnnotationEntry::Authority { label }
            | AnnotationEntry::Platform { label, .. }
            | AnnotationEntry::Modern { label, .. } => label,
            AnnotationEntry::Age { label, .. } => label,
        }
    }
}

/// All signals inferred for one search result.
///
/// Raw findings are always kept; `entries` is the rendering policy derived
/// from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub tech_debt: Vec<TechFinding>,
    pub modern_tech: Vec<TechFinding>,
    pub is_authority: bool,
    pub platform: Option<PlatformMatch>,
    pub date: Option<DateFinding>,
    pub age: Option<Age>,
    pub entries: Vec<AnnotationEntry>,
}

impl Annotation {
    /// True when nothing at all was inferred.
    pub fn is_empty(&self) -> bool {
        self.tech_debt.is_empty()
            && self.modern_tech.is_empty()
            && !self.is_authority
            && self.platform.is_none()
            && self.date.is_none()
    }
}
