use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{compare_text, normalize_label};
use crate::error::ParseEnumError;
use crate::list_view::Listable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessType {
    #[serde(rename = "Corporate Business")]
    Corporate,
    #[serde(rename = "Local Business")]
    Local,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Corporate => "Corporate Business",
            BusinessType::Local => "Local Business",
        }
    }
}

impl FromStr for BusinessType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "corporate business" | "corporate" => Ok(BusinessType::Corporate),
            "local business" | "local" => Ok(BusinessType::Local),
            _ => Err(ParseEnumError::new("business type", s)),
        }
    }
}

/// Document verification state of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        }
    }

    /// Only pending submissions can be approved or rejected.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, VerificationStatus::Pending)
    }
}

impl FromStr for VerificationStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "pending" => Ok(VerificationStatus::Pending),
            "approved" => Ok(VerificationStatus::Approved),
            "rejected" => Ok(VerificationStatus::Rejected),
            _ => Err(ParseEnumError::new("verification status", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college_name: String,
    pub year_of_passout: u16,
    pub business_type: BusinessType,
    pub status: VerificationStatus,
    pub submitted_at: DateTime<Utc>,
    pub document_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserFilter {
    BusinessType(Option<BusinessType>),
    Status(Option<VerificationStatus>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSort {
    Name,
    SubmittedAt,
}

impl FromStr for UserSort {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "name" => Ok(UserSort::Name),
            "date" | "submitted at" => Ok(UserSort::SubmittedAt),
            _ => Err(ParseEnumError::new("user sort key", s)),
        }
    }
}

impl Listable for User {
    type Filter = UserFilter;
    type SortKey = UserSort;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()]
    }

    fn matches_filter(&self, filter: &UserFilter) -> bool {
        match filter {
            UserFilter::BusinessType(wanted) => wanted.map_or(true, |b| self.business_type == b),
            UserFilter::Status(wanted) => wanted.map_or(true, |s| self.status == s),
        }
    }

    fn compare_by(&self, other: &Self, key: UserSort) -> Ordering {
        match key {
            UserSort::Name => compare_text(&self.name, &other.name),
            UserSort::SubmittedAt => self.submitted_at.cmp(&other.submitted_at),
        }
    }
}
