//! Domain types for the back-office screens.
//!
//! Every categorical value is a closed enum. `as_str` gives the form the UI
//! displays; `FromStr` accepts that form as well as snake/kebab-case variants
//! so query strings like `?business_type=local-business` resolve.

mod contact;
mod deleted_user;
mod report;
mod ticket;
mod user;

pub use contact::{ContactFilter, ContactOperation, ContactRequest, ContactSort, OperationRecord, SupportType};
pub use deleted_user::{DeletedUser, DeletedUserFilter, DeletedUserSort, Deletion, DeletionType};
pub use report::{Report, ReportReason, ReportStatus};
pub use ticket::{
    AuthorRole, SupportTicket, TicketCategory, TicketComment, TicketFilter, TicketSort, TicketStatus,
};
pub use user::{BusinessType, User, UserFilter, UserSort, VerificationStatus};

/// Lowercases and folds `_` / `-` into spaces so labels compare loosely.
pub(crate) fn normalize_label(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '_' | '-' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Case-insensitive ordering used for name columns.
pub(crate) fn compare_text(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
