use serde::{Deserialize, Serialize};

/// Moderation urgency of a reported user. Variants are declared in ascending
/// order so `Ord` ranks `Critical` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Tier for `total` reports, the newest of which is `days_since_last`
    /// days old. Day thresholds are strict, count thresholds inclusive.
    pub fn classify(total: usize, days_since_last: f64) -> Self {
        if total >= 10 || (total >= 5 && days_since_last < 1.0) {
            Severity::Critical
        } else if total >= 5 || (total >= 3 && days_since_last < 3.0) {
            Severity::High
        } else if total >= 2 || days_since_last < 7.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_thresholds() {
        assert_eq!(Severity::classify(10, 400.0), Severity::Critical);
        assert_eq!(Severity::classify(5, 0.5), Severity::Critical);
        assert_eq!(Severity::classify(5, 1.0), Severity::High);
    }

    #[test]
    fn test_high_thresholds() {
        assert_eq!(Severity::classify(9, 30.0), Severity::High);
        assert_eq!(Severity::classify(3, 2.9), Severity::High);
        assert_eq!(Severity::classify(3, 3.0), Severity::Medium);
    }

    #[test]
    fn test_medium_and_low_thresholds() {
        assert_eq!(Severity::classify(2, 100.0), Severity::Medium);
        assert_eq!(Severity::classify(1, 6.99), Severity::Medium);
        assert_eq!(Severity::classify(1, 7.0), Severity::Low);
        assert_eq!(Severity::classify(0, 7.0), Severity::Low);
    }

    #[test]
    fn test_monotonic_in_total_for_fixed_recency() {
        for days in [0.0, 0.5, 1.0, 2.5, 3.0, 6.5, 7.0, 30.0] {
            let mut previous = Severity::Low;
            for total in 1..=15 {
                let current = Severity::classify(total, days);
                assert!(current >= previous, "total {} days {}", total, days);
                previous = current;
            }
        }
    }

    #[test]
    fn test_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }
}
