use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{normalize_label, BusinessType};
use crate::error::ParseEnumError;
use crate::list_view::Listable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketCategory {
    #[serde(rename = "Getting Started")]
    GettingStarted,
    #[serde(rename = "Billing and Subscription")]
    BillingAndSubscription,
    #[serde(rename = "Messaging and Communication")]
    MessagingAndCommunication,
    #[serde(rename = "Privacy and Security")]
    PrivacyAndSecurity,
    Safety,
    #[serde(rename = "Success Stories and Testimonials")]
    SuccessStories,
    #[serde(rename = "Feedback and Suggestions")]
    FeedbackAndSuggestions,
    #[serde(rename = "Forgot Password")]
    ForgotPassword,
    #[serde(rename = "Documentation Upload")]
    DocumentationUpload,
    #[serde(rename = "Technical Issue")]
    TechnicalIssue,
    Others,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 11] = [
        TicketCategory::GettingStarted,
        TicketCategory::BillingAndSubscription,
        TicketCategory::MessagingAndCommunication,
        TicketCategory::PrivacyAndSecurity,
        TicketCategory::Safety,
        TicketCategory::SuccessStories,
        TicketCategory::FeedbackAndSuggestions,
        TicketCategory::ForgotPassword,
        TicketCategory::DocumentationUpload,
        TicketCategory::TechnicalIssue,
        TicketCategory::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::GettingStarted => "Getting Started",
            TicketCategory::BillingAndSubscription => "Billing and Subscription",
            TicketCategory::MessagingAndCommunication => "Messaging and Communication",
            TicketCategory::PrivacyAndSecurity => "Privacy and Security",
            TicketCategory::Safety => "Safety",
            TicketCategory::SuccessStories => "Success Stories and Testimonials",
            TicketCategory::FeedbackAndSuggestions => "Feedback and Suggestions",
            TicketCategory::ForgotPassword => "Forgot Password",
            TicketCategory::DocumentationUpload => "Documentation Upload",
            TicketCategory::TechnicalIssue => "Technical Issue",
            TicketCategory::Others => "Others",
        }
    }
}

impl FromStr for TicketCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        TicketCategory::ALL
            .into_iter()
            .find(|category| normalize_label(category.as_str()) == wanted)
            .ok_or_else(|| ParseEnumError::new("ticket category", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    /// Resolved and closed tickets carry resolution metadata.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }
}

impl FromStr for TicketStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "open" => Ok(TicketStatus::Open),
            "in progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(ParseEnumError::new("ticket status", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorRole {
    Admin,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketComment {
    pub id: String,
    pub ticket_id: String,
    pub author: String,
    pub author_role: AuthorRole,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub subject: String,
    pub description: String,
    pub category: TicketCategory,
    pub business_type: BusinessType,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
    #[serde(default)]
    pub comments: Vec<TicketComment>,
}

impl SupportTicket {
    /// Moves the ticket to `status`, stamping resolution metadata when the new
    /// status is terminal.
    pub fn set_status(&mut self, status: TicketStatus, admin_id: &str, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
        if status.is_terminal() {
            self.resolved_at = Some(now);
            self.resolved_by = Some(admin_id.to_string());
        }
    }

    pub fn push_comment(&mut self, comment: TicketComment) {
        self.updated_at = comment.created_at;
        self.comments.push(comment);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TicketFilter {
    Status(Option<TicketStatus>),
    Category(Option<TicketCategory>),
    BusinessType(Option<BusinessType>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketSort {
    CreatedAt,
    UpdatedAt,
}

impl FromStr for TicketSort {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "created" | "created at" | "date" => Ok(TicketSort::CreatedAt),
            "updated" | "updated at" => Ok(TicketSort::UpdatedAt),
            _ => Err(ParseEnumError::new("ticket sort key", s)),
        }
    }
}

impl Listable for SupportTicket {
    type Filter = TicketFilter;
    type SortKey = TicketSort;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.subject.as_str(),
            self.description.as_str(),
            self.user_name.as_str(),
            self.user_email.as_str(),
        ]
    }

    fn matches_filter(&self, filter: &TicketFilter) -> bool {
        match filter {
            TicketFilter::Status(wanted) => wanted.map_or(true, |s| self.status == s),
            TicketFilter::Category(wanted) => wanted.map_or(true, |c| self.category == c),
            TicketFilter::BusinessType(wanted) => wanted.map_or(true, |b| self.business_type == b),
        }
    }

    fn compare_by(&self, other: &Self, key: TicketSort) -> Ordering {
        match key {
            TicketSort::CreatedAt => self.created_at.cmp(&other.created_at),
            TicketSort::UpdatedAt => self.updated_at.cmp(&other.updated_at),
        }
    }
}
