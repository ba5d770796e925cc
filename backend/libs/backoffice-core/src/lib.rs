//! Back-office core
//!
//! Pure, synchronous transformations shared by every back-office screen:
//!
//! - [`reports`]: groups raw user reports into ranked per-user summaries with
//!   a severity tier derived from report volume and recency.
//! - [`list_view`]: the generic search / filter / sort / paginate controller
//!   behind every list screen (users, tickets, contact requests, deleted users,
//!   reported-user summaries).
//! - [`models`]: the closed domain types those screens operate on.
//!
//! Nothing in this crate performs I/O or suspends; callers own the data and
//! hand it in.

pub mod error;
pub mod list_view;
pub mod models;
pub mod reports;

pub use error::ParseEnumError;
pub use list_view::{ListView, Listable, Page, SortDirection};
pub use reports::{aggregate, Aggregation, ReportSummary, Severity, SummaryFilter, SummarySort, UserLookup};
