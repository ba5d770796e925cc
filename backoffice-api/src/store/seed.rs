//! Sample data the mock sources start from.

use std::sync::Arc;

use anyhow::Context;
use backoffice_core::models::{
    ContactRequest, DeletedUser, Report, ReportReason, ReportStatus, SupportTicket, User,
};
use chrono::{TimeZone, Utc};
use serde::de::DeserializeOwned;

const USERS: &str = include_str!("../../fixtures/users.json");
const TICKETS: &str = include_str!("../../fixtures/tickets.json");
const CONTACT_REQUESTS: &str = include_str!("../../fixtures/contact_requests.json");
const DELETED_USERS: &str = include_str!("../../fixtures/deleted_users.json");

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> anyhow::Result<Vec<T>> {
    serde_json::from_str(raw).with_context(|| format!("invalid {} fixture", name))
}

pub fn users() -> anyhow::Result<Vec<User>> {
    parse("users", USERS)
}

pub fn tickets() -> anyhow::Result<Vec<SupportTicket>> {
    parse("tickets", TICKETS)
}

pub fn contact_requests() -> anyhow::Result<Vec<ContactRequest>> {
    parse("contact requests", CONTACT_REQUESTS)
}

pub fn deleted_users() -> anyhow::Result<Vec<DeletedUser>> {
    parse("deleted users", DELETED_USERS)
}

/// Reports filed against whichever of users "1", "2" and "3" still exist.
///
/// User "1" gets seven reports on consecutive days cycling through the
/// reasons; users "2" and "3" get one each.
pub fn reports_for(users: &[User]) -> Vec<Arc<Report>> {
    let exists = |id: &str| users.iter().any(|user| user.id == id);
    let mut reports = Vec::new();

    if exists("1") {
        for i in 1..=7u32 {
            let reason = ReportReason::ALL[i as usize % ReportReason::ALL.len()];
            let reporter = format!("Reporter {}", i);
            let reporter_email = format!("reporter{}@example.com", i);
            reports.push(report(
                &format!("report-00{}", i),
                "1",
                (reporter.as_str(), reporter_email.as_str()),
                reason,
                format!(
                    "Report {}: User has been reported for {}.",
                    i,
                    reason.as_str().to_lowercase()
                ),
                ReportStatus::Pending,
                20 + i,
            ));
        }
    }

    if exists("2") {
        reports.push(report(
            "report-008",
            "2",
            ("Alice Reporter", "alice.reporter@example.com"),
            ReportReason::Fraud,
            "This user appears to be involved in fraudulent activities.".to_string(),
            ReportStatus::Investigating,
            18,
        ));
    }

    if exists("3") {
        reports.push(report(
            "report-009",
            "3",
            ("Bob Reporter", "bob.reporter@example.com"),
            ReportReason::PrivacyViolation,
            "User is violating privacy by sharing personal information without consent.".to_string(),
            ReportStatus::Pending,
            19,
        ));
    }

    reports
}

fn report(
    id: &str,
    user_id: &str,
    (reporter, reporter_email): (&str, &str),
    reason: ReportReason,
    description: String,
    status: ReportStatus,
    january_day: u32,
) -> Arc<Report> {
    Arc::new(Report {
        id: id.to_string(),
        reported_user_id: user_id.to_string(),
        reported_by: reporter.to_string(),
        reported_by_email: reporter_email.to_string(),
        reason,
        description,
        status,
        reported_at: Utc
            .with_ymd_and_hms(2024, 1, january_day, 0, 0, 0)
            .single()
            .unwrap_or_default(),
        resolved_at: None,
        resolved_by: None,
        resolution_notes: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::models::{DeletionType, TicketStatus, VerificationStatus};

    #[test]
    fn test_fixtures_parse() {
        let users = users().unwrap();
        assert_eq!(users.len(), 11);
        assert_eq!(
            users.iter().filter(|u| u.status == VerificationStatus::Pending).count(),
            5
        );

        let tickets = tickets().unwrap();
        assert_eq!(tickets.len(), 6);
        assert_eq!(
            tickets.iter().filter(|t| t.status == TicketStatus::Closed).count(),
            1
        );

        let contacts = contact_requests().unwrap();
        assert_eq!(contacts.len(), 9);
        assert_eq!(contacts.iter().filter(|c| c.is_unhandled()).count(), 6);

        let deleted = deleted_users().unwrap();
        assert_eq!(deleted.len(), 18);
        assert_eq!(
            deleted
                .iter()
                .filter(|d| d.kind() == DeletionType::AdminInitiated)
                .count(),
            4
        );
    }

    #[test]
    fn test_reports_follow_existing_users() {
        let users = users().unwrap();
        let reports = reports_for(&users);
        assert_eq!(reports.len(), 9);
        assert_eq!(reports[0].reason, ReportReason::Fraud);
        assert_eq!(reports[6].reported_at, Utc.with_ymd_and_hms(2024, 1, 27, 0, 0, 0).unwrap());

        let without_first: Vec<User> = users.into_iter().filter(|u| u.id != "1").collect();
        assert_eq!(reports_for(&without_first).len(), 2);
    }
}
