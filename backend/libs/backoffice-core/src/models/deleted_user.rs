use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{normalize_label, User};
use crate::error::ParseEnumError;
use crate::list_view::Listable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionType {
    UserInitiated,
    AdminInitiated,
}

impl DeletionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletionType::UserInitiated => "user_initiated",
            DeletionType::AdminInitiated => "admin_initiated",
        }
    }
}

impl FromStr for DeletionType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "user initiated" | "user" => Ok(DeletionType::UserInitiated),
            "admin initiated" | "admin" => Ok(DeletionType::AdminInitiated),
            _ => Err(ParseEnumError::new("deletion type", s)),
        }
    }
}

/// Who removed the account, and what they said about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "deletion_type", rename_all = "snake_case")]
pub enum Deletion {
    UserInitiated { user_message: String },
    AdminInitiated { admin_reason: String, deleted_by: String },
}

impl Deletion {
    pub fn kind(&self) -> DeletionType {
        match self {
            Deletion::UserInitiated { .. } => DeletionType::UserInitiated,
            Deletion::AdminInitiated { .. } => DeletionType::AdminInitiated,
        }
    }
}

/// Audit record for a removed account. The user snapshot is taken at
/// deletion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedUser {
    pub user_id: String,
    pub user: User,
    pub deleted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub deletion: Deletion,
}

impl DeletedUser {
    pub fn kind(&self) -> DeletionType {
        self.deletion.kind()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeletedUserFilter {
    Kind(Option<DeletionType>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletedUserSort {
    DeletedAt,
}

impl FromStr for DeletedUserSort {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "deleted" | "deleted at" | "date" => Ok(DeletedUserSort::DeletedAt),
            _ => Err(ParseEnumError::new("deleted user sort key", s)),
        }
    }
}

impl Listable for DeletedUser {
    type Filter = DeletedUserFilter;
    type SortKey = DeletedUserSort;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.user.name.as_str(), self.user.email.as_str()];
        match &self.deletion {
            Deletion::UserInitiated { user_message } => fields.push(user_message.as_str()),
            Deletion::AdminInitiated { admin_reason, deleted_by } => {
                fields.push(admin_reason.as_str());
                fields.push(deleted_by.as_str());
            }
        }
        fields
    }

    fn matches_filter(&self, filter: &DeletedUserFilter) -> bool {
        match filter {
            DeletedUserFilter::Kind(wanted) => wanted.map_or(true, |k| self.kind() == k),
        }
    }

    fn compare_by(&self, other: &Self, key: DeletedUserSort) -> Ordering {
        match key {
            DeletedUserSort::DeletedAt => self.deleted_at.cmp(&other.deleted_at),
        }
    }
}
