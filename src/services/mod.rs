//! Inference services for verus.
//!
//! Pure functions over snippet text and URLs; no I/O and no shared mutable
//! state. The CLI and any other front end call into these.

pub mod age;
pub mod annotation;
pub mod date_detection;
pub mod tech_detection;
pub mod url_classification;

pub use age::{classify_age, format_age, AgeBucket, AgeThresholds};
pub use annotation::{compose, AnnotationComposer};
pub use date_detection::{detect_date, DateFinding, DateSource};
pub use tech_detection::{scan_debt, scan_modern, Severity, TechFinding, TechPattern};
pub use url_classification::{detect_platform, is_authority_domain, Platform, PlatformMatch};
