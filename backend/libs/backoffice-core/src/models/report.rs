use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::normalize_label;
use crate::error::ParseEnumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportReason {
    Harassment,
    Fraud,
    #[serde(rename = "Privacy Violation")]
    PrivacyViolation,
    Other,
}

impl ReportReason {
    pub const ALL: [ReportReason; 4] = [
        ReportReason::Harassment,
        ReportReason::Fraud,
        ReportReason::PrivacyViolation,
        ReportReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::Harassment => "Harassment",
            ReportReason::Fraud => "Fraud",
            ReportReason::PrivacyViolation => "Privacy Violation",
            ReportReason::Other => "Other",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            ReportReason::Harassment => 0,
            ReportReason::Fraud => 1,
            ReportReason::PrivacyViolation => 2,
            ReportReason::Other => 3,
        }
    }
}

impl FromStr for ReportReason {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "harassment" => Ok(ReportReason::Harassment),
            "fraud" => Ok(ReportReason::Fraud),
            "privacy violation" => Ok(ReportReason::PrivacyViolation),
            "other" => Ok(ReportReason::Other),
            _ => Err(ParseEnumError::new("report reason", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Investigating,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Investigating => "investigating",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Dismissed => "dismissed",
        }
    }
}

impl FromStr for ReportStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "pending" => Ok(ReportStatus::Pending),
            "investigating" => Ok(ReportStatus::Investigating),
            "resolved" => Ok(ReportStatus::Resolved),
            "dismissed" => Ok(ReportStatus::Dismissed),
            _ => Err(ParseEnumError::new("report status", s)),
        }
    }
}

/// A single complaint filed against a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub reported_user_id: String,
    pub reported_by: String,
    pub reported_by_email: String,
    pub reason: ReportReason,
    pub description: String,
    pub status: ReportStatus,
    pub reported_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_round_trips_through_label() {
        for reason in ReportReason::ALL {
            assert_eq!(reason.as_str().parse::<ReportReason>().unwrap(), reason);
        }
        assert_eq!(
            "privacy-violation".parse::<ReportReason>().unwrap(),
            ReportReason::PrivacyViolation
        );
    }

    #[test]
    fn test_reason_indices_are_distinct() {
        let mut seen = [false; 4];
        for reason in ReportReason::ALL {
            assert!(!seen[reason.index()]);
            seen[reason.index()] = true;
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Investigating".parse::<ReportStatus>().unwrap(), ReportStatus::Investigating);
        assert!("open".parse::<ReportStatus>().is_err());
    }
}
