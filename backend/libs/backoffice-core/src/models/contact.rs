use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::normalize_label;
use crate::error::ParseEnumError;
use crate::list_view::Listable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportType {
    #[serde(rename = "General Inquiry")]
    GeneralInquiry,
    Support,
    Feedback,
    Other,
}

impl SupportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportType::GeneralInquiry => "General Inquiry",
            SupportType::Support => "Support",
            SupportType::Feedback => "Feedback",
            SupportType::Other => "Other",
        }
    }
}

impl FromStr for SupportType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "general inquiry" => Ok(SupportType::GeneralInquiry),
            "support" => Ok(SupportType::Support),
            "feedback" => Ok(SupportType::Feedback),
            "other" => Ok(SupportType::Other),
            _ => Err(ParseEnumError::new("support type", s)),
        }
    }
}

/// What an operator did with a contact request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactOperation {
    Acknowledged,
    Responded,
    Resolved,
}

impl ContactOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactOperation::Acknowledged => "acknowledged",
            ContactOperation::Responded => "responded",
            ContactOperation::Resolved => "resolved",
        }
    }
}

impl FromStr for ContactOperation {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "acknowledged" => Ok(ContactOperation::Acknowledged),
            "responded" => Ok(ContactOperation::Responded),
            "resolved" => Ok(ContactOperation::Resolved),
            _ => Err(ParseEnumError::new("contact operation", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub operation: ContactOperation,
    pub operated_at: DateTime<Utc>,
    pub operated_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub support_type: SupportType,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<OperationRecord>,
}

impl ContactRequest {
    pub fn is_unhandled(&self) -> bool {
        self.operation.is_none()
    }

    pub fn is_resolved(&self) -> bool {
        matches!(
            self.operation,
            Some(OperationRecord { operation: ContactOperation::Resolved, .. })
        )
    }

    pub fn operated_at(&self) -> Option<DateTime<Utc>> {
        self.operation.as_ref().map(|record| record.operated_at)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContactFilter {
    SupportType(Option<SupportType>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSort {
    CreatedAt,
    /// Requests without an operation sort before any operated one.
    OperatedAt,
}

impl FromStr for ContactSort {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "created" | "created at" | "date" => Ok(ContactSort::CreatedAt),
            "operated" | "operated at" => Ok(ContactSort::OperatedAt),
            _ => Err(ParseEnumError::new("contact sort key", s)),
        }
    }
}

impl Listable for ContactRequest {
    type Filter = ContactFilter;
    type SortKey = ContactSort;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.subject.as_str(),
            self.message.as_str(),
            self.name.as_str(),
            self.email.as_str(),
        ];
        if let Some(phone) = &self.phone {
            fields.push(phone.as_str());
        }
        fields
    }

    fn matches_filter(&self, filter: &ContactFilter) -> bool {
        match filter {
            ContactFilter::SupportType(wanted) => wanted.map_or(true, |t| self.support_type == t),
        }
    }

    fn compare_by(&self, other: &Self, key: ContactSort) -> Ordering {
        match key {
            ContactSort::CreatedAt => self.created_at.cmp(&other.created_at),
            ContactSort::OperatedAt => self.operated_at().cmp(&other.operated_at()),
        }
    }
}
