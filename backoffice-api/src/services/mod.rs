mod auth_service;
mod contact_service;
mod dashboard_service;
mod deleted_user_service;
pub mod guard;
mod report_service;
mod ticket_service;
mod user_service;

pub use auth_service::*;
pub use contact_service::*;
pub use dashboard_service::*;
pub use deleted_user_service::*;
pub use guard::{Action, ActionOutcome, ProcessingGuard};
pub use report_service::*;
pub use ticket_service::*;
pub use user_service::*;

/// Operator recorded on every admin action.
pub const ACTING_ADMIN_ID: &str = "admin-001";
pub const ACTING_ADMIN_NAME: &str = "Admin User";
