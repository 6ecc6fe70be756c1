//! Content age buckets and compact age labels.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Coarse freshness classification of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBucket {
    Fresh,
    Aging,
    Stale,
}

impl AgeBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBucket::Fresh => "fresh",
            AgeBucket::Aging => "aging",
            AgeBucket::Stale => "stale",
        }
    }
}

/// Inclusive upper bounds (in days) of the fresh and aging buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeThresholds {
    pub fresh_days: i64,
    pub aging_days: i64,
}

impl Default for AgeThresholds {
    fn default() -> Self {
        Self {
            fresh_days: 180,
            aging_days: 730,
        }
    }
}

impl AgeThresholds {
    /// Bucket an age. Negative ages count as zero.
    pub fn classify(&self, days: i64) -> AgeBucket {
        let days = days.max(0);
        if days <= self.fresh_days {
            AgeBucket::Fresh
        } else if days <= self.aging_days {
            AgeBucket::Aging
        } else {
            AgeBucket::Stale
        }
    }
}

/// Bucket an age using the default thresholds (180 / 730 days).
pub fn classify_age(days: i64) -> AgeBucket {
    AgeThresholds::default().classify(days)
}

/// Format an age in days as a compact label: `6d`, `4w`, `11mo`, `1y 1mo`.
///
/// Negative ages (future-dated findings) saturate to `0d`.
pub fn format_age(days: i64) -> String {
    let days = days.max(0);
    if days < 7 {
        return format!("{}d", days);
    }
    if days < 30 {
        return format!("{}w", days / 7);
    }
    if days < 365 {
        return format!("{}mo", days / 30);
    }

    let years = days / 365;
    let months = (days % 365) / 30;
    if months > 0 {
        format!("{}y {}mo", years, months)
    } else {
        format!("{}y", years)
    }
}

/// Whole days elapsed between `date` and `now`, rounded down.
pub fn age_in_days(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - date).num_seconds().div_euclid(86_400)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(classify_age(0), AgeBucket::Fresh);
        assert_eq!(classify_age(180), AgeBucket::Fresh);
        assert_eq!(classify_age(181), AgeBucket::Aging);
        assert_eq!(classify_age(730), AgeBucket::Aging);
        assert_eq!(classify_age(731), AgeBucket::Stale);
    }

    #[test]
    fn test_negative_age_is_fresh() {
        assert_eq!(classify_age(-42), AgeBucket::Fresh);
        assert_eq!(format_age(-42), "0d");
    }

    #[test]
    fn test_custom_thresholds() {
        let t = AgeThresholds {
            fresh_days: 30,
            aging_days: 90,
        };
        assert_eq!(t.classify(30), AgeBucket::Fresh);
        assert_eq!(t.classify(31), AgeBucket::Aging);
        assert_eq!(t.classify(91), AgeBucket::Stale);
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(0), "0d");
        assert_eq!(format_age(6), "6d");
        assert_eq!(format_age(7), "1w");
        assert_eq!(format_age(29), "4w");
        assert_eq!(format_age(30), "1mo");
        assert_eq!(format_age(364), "12mo");
        assert_eq!(format_age(365), "1y");
        assert_eq!(format_age(400), "1y 1mo");
        assert_eq!(format_age(730), "2y");
        assert_eq!(format_age(1000), "2y 9mo");
    }

    #[test]
    fn test_age_in_days_rounds_down() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(age_in_days(now - Duration::hours(36), now), 1);
        assert_eq!(age_in_days(now - Duration::days(10), now), 10);
        assert_eq!(age_in_days(now + Duration::hours(1), now), -1);
    }
}
