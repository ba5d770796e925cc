//! Report aggregation
//!
//! Folds a flat list of reports into one [`ReportSummary`] per reported user,
//! ranked by [`Severity`] and then by report volume.

mod severity;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::ParseEnumError;
use crate::list_view::Listable;
use crate::models::normalize_label;
use crate::models::{BusinessType, Report, ReportReason, ReportStatus, User};

pub use severity::Severity;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Resolves the subject of a report to a user record.
pub trait UserLookup {
    fn find_user(&self, id: &str) -> Option<&User>;
}

impl UserLookup for HashMap<String, User> {
    fn find_user(&self, id: &str) -> Option<&User> {
        self.get(id)
    }
}

impl UserLookup for [User] {
    fn find_user(&self, id: &str) -> Option<&User> {
        self.iter().find(|user| user.id == id)
    }
}

impl UserLookup for Vec<User> {
    fn find_user(&self, id: &str) -> Option<&User> {
        self.as_slice().find_user(id)
    }
}

/// Everything known about the reports filed against one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub user_id: String,
    pub user: User,
    pub total_reports: usize,
    /// Input order.
    pub reports: Vec<Arc<Report>>,
    pub first_reported_at: DateTime<Utc>,
    pub last_reported_at: DateTime<Utc>,
    pub most_common_reason: ReportReason,
    pub last_report_reason: ReportReason,
    pub last_report_description: String,
    pub last_reported_by: String,
    pub last_reported_by_email: String,
    pub status: ReportStatus,
    pub severity: Severity,
}

impl ReportSummary {
    /// Constituent reports, newest first. Equal timestamps keep input order.
    pub fn reports_newest_first(&self) -> Vec<Arc<Report>> {
        let mut reports = self.reports.clone();
        reports.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));
        reports
    }
}

/// Result of [`aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation {
    /// Ranked by severity, then total reports, both descending.
    pub summaries: Vec<ReportSummary>,
    /// Ids of reports whose subject could not be resolved. They contribute to
    /// no summary.
    pub orphaned: Vec<String>,
}

/// Groups `reports` by subject user and summarises each group as of `now`.
///
/// Groups appear in first-seen order before ranking, so the ranking sort
/// (which is stable) breaks full ties by the order users were first reported.
pub fn aggregate<U>(reports: &[Arc<Report>], users: &U, now: DateTime<Utc>) -> Aggregation
where
    U: UserLookup + ?Sized,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<Arc<Report>>> = Vec::new();

    for report in reports {
        let slot = *slots.entry(report.reported_user_id.as_str()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(Arc::clone(report));
    }

    let mut aggregation = Aggregation::default();
    for group in groups {
        let user_id = &group[0].reported_user_id;
        match users.find_user(user_id) {
            Some(user) => aggregation.summaries.push(summarize(user, group, now)),
            None => aggregation
                .orphaned
                .extend(group.iter().map(|report| report.id.clone())),
        }
    }

    aggregation.summaries.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.total_reports.cmp(&a.total_reports))
    });

    debug!(
        reports = reports.len(),
        summaries = aggregation.summaries.len(),
        orphaned = aggregation.orphaned.len(),
        "aggregated reports"
    );
    aggregation
}

// `reports` is never empty: groups are created on their first report.
fn summarize(user: &User, reports: Vec<Arc<Report>>, now: DateTime<Utc>) -> ReportSummary {
    let mut first = &reports[0];
    let mut latest = &reports[0];
    for report in &reports[1..] {
        if report.reported_at < first.reported_at {
            first = report;
        }
        if report.reported_at > latest.reported_at {
            latest = report;
        }
    }

    let days_since_last = (now - latest.reported_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
    let total = reports.len();

    ReportSummary {
        user_id: user.id.clone(),
        user: user.clone(),
        total_reports: total,
        first_reported_at: first.reported_at,
        last_reported_at: latest.reported_at,
        most_common_reason: most_common_reason(&reports),
        last_report_reason: latest.reason,
        last_report_description: latest.description.clone(),
        last_reported_by: latest.reported_by.clone(),
        last_reported_by_email: latest.reported_by_email.clone(),
        status: latest.status,
        severity: Severity::classify(total, days_since_last),
        reports,
    }
}

/// Mode of the reasons. On a tie the reason that reached the winning count
/// first in a forward scan wins.
fn most_common_reason(reports: &[Arc<Report>]) -> ReportReason {
    let mut counts = [0usize; ReportReason::ALL.len()];
    let mut best = reports[0].reason;
    let mut best_count = 0;

    for report in reports {
        let count = &mut counts[report.reason.index()];
        *count += 1;
        if *count > best_count {
            best_count = *count;
            best = report.reason;
        }
    }
    best
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryFilter {
    BusinessType(Option<BusinessType>),
    /// Matches the reason of the most recent report.
    Reason(Option<ReportReason>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySort {
    Severity,
    TotalReports,
    LastReportedAt,
}

impl FromStr for SummarySort {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "severity" => Ok(SummarySort::Severity),
            "total" | "total reports" | "reports" => Ok(SummarySort::TotalReports),
            "date" | "last reported" | "last reported at" => Ok(SummarySort::LastReportedAt),
            _ => Err(ParseEnumError::new("summary sort key", s)),
        }
    }
}

impl Listable for ReportSummary {
    type Filter = SummaryFilter;
    type SortKey = SummarySort;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.user.name.as_str(),
            self.user.email.as_str(),
            self.last_report_reason.as_str(),
        ]
    }

    fn matches_filter(&self, filter: &SummaryFilter) -> bool {
        match filter {
            SummaryFilter::BusinessType(wanted) => {
                wanted.map_or(true, |b| self.user.business_type == b)
            }
            SummaryFilter::Reason(wanted) => wanted.map_or(true, |r| self.last_report_reason == r),
        }
    }

    fn compare_by(&self, other: &Self, key: SummarySort) -> Ordering {
        match key {
            SummarySort::Severity => self.severity.cmp(&other.severity),
            SummarySort::TotalReports => self.total_reports.cmp(&other.total_reports),
            SummarySort::LastReportedAt => self.last_reported_at.cmp(&other.last_reported_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list_view::ListView;
    use crate::models::VerificationStatus;
    use chrono::{Duration, TimeZone};

    fn user(id: &str, name: &str, business_type: BusinessType) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "+1234567890".to_string(),
            college_name: "MIT".to_string(),
            year_of_passout: 2023,
            business_type,
            status: VerificationStatus::Approved,
            submitted_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            document_url: "https://example.com/doc.pdf".to_string(),
            remarks: None,
        }
    }

    fn report(
        id: &str,
        user_id: &str,
        reason: ReportReason,
        reported_at: DateTime<Utc>,
    ) -> Arc<Report> {
        Arc::new(Report {
            id: id.to_string(),
            reported_user_id: user_id.to_string(),
            reported_by: format!("Reporter {}", id),
            reported_by_email: format!("{}@example.com", id),
            reason,
            description: format!("Description {}", id),
            status: ReportStatus::Pending,
            reported_at,
            resolved_at: None,
            resolved_by: None,
            resolution_notes: None,
        })
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn users() -> Vec<User> {
        vec![
            user("1", "John Doe", BusinessType::Corporate),
            user("2", "Jane Smith", BusinessType::Local),
            user("3", "Bob Johnson", BusinessType::Corporate),
        ]
    }

    /// Seven reports against user 1 cycling through the reasons, plus one
    /// each against users 2 and 3.
    fn mock_reports() -> Vec<Arc<Report>> {
        const CYCLE: [ReportReason; 4] = [
            ReportReason::Harassment,
            ReportReason::Fraud,
            ReportReason::PrivacyViolation,
            ReportReason::Other,
        ];
        let mut reports: Vec<Arc<Report>> = (1..=7u32)
            .map(|i| report(&format!("report-00{}", i), "1", CYCLE[i as usize % 4], day(20 + i)))
            .collect();
        reports.push(report("report-008", "2", ReportReason::Fraud, day(18)));
        reports.push(report("report-009", "3", ReportReason::PrivacyViolation, day(19)));
        reports
    }

    #[test]
    fn test_seven_reports_scenario() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
        let aggregation = aggregate(&mock_reports(), users().as_slice(), now);

        assert!(aggregation.orphaned.is_empty());
        assert_eq!(aggregation.summaries.len(), 3);

        let top = &aggregation.summaries[0];
        assert_eq!(top.user_id, "1");
        assert_eq!(top.total_reports, 7);
        assert_eq!(top.severity, Severity::High);
        assert_eq!(top.most_common_reason, ReportReason::Fraud);
        assert_eq!(top.first_reported_at, day(21));
        assert_eq!(top.last_reported_at, day(27));
        assert_eq!(top.last_report_reason, ReportReason::Other);
        assert_eq!(top.last_reported_by, "Reporter report-007");

        assert!(aggregation.summaries[1..]
            .iter()
            .all(|summary| summary.severity == Severity::Low && summary.total_reports == 1));
    }

    #[test]
    fn test_recent_burst_is_critical() {
        let now = day(27) + Duration::hours(12);
        let aggregation = aggregate(&mock_reports(), users().as_slice(), now);
        let top = &aggregation.summaries[0];
        assert_eq!(top.severity, Severity::Critical);

        // user 3 was last reported 8.5 days before `now`, user 2 9.5 days
        assert_eq!(aggregation.summaries[1].severity, Severity::Low);
    }

    #[test]
    fn test_counts_match_input() {
        let reports = mock_reports();
        let aggregation = aggregate(&reports, users().as_slice(), day(28));

        let distinct: std::collections::HashSet<&str> =
            reports.iter().map(|r| r.reported_user_id.as_str()).collect();
        assert!(aggregation.summaries.len() <= distinct.len());

        for summary in &aggregation.summaries {
            let expected = reports
                .iter()
                .filter(|r| r.reported_user_id == summary.user_id)
                .count();
            assert_eq!(summary.total_reports, expected);
            assert_eq!(summary.reports.len(), expected);
        }
    }

    #[test]
    fn test_reports_are_shared_not_copied() {
        let reports = mock_reports();
        let aggregation = aggregate(&reports, users().as_slice(), day(28));
        let summary = aggregation
            .summaries
            .iter()
            .find(|s| s.user_id == "2")
            .unwrap();
        assert!(Arc::ptr_eq(&summary.reports[0], &reports[7]));
    }

    #[test]
    fn test_most_common_reason_prefers_first_to_reach_max() {
        let reports = vec![
            report("a", "1", ReportReason::Other, day(1)),
            report("b", "1", ReportReason::Fraud, day(2)),
            report("c", "1", ReportReason::Fraud, day(3)),
            report("d", "1", ReportReason::Other, day(4)),
        ];
        let aggregation = aggregate(&reports, users().as_slice(), day(5));
        // Fraud reaches two first
        assert_eq!(aggregation.summaries[0].most_common_reason, ReportReason::Fraud);

        let reports = vec![
            report("a", "1", ReportReason::Harassment, day(1)),
            report("b", "1", ReportReason::Fraud, day(2)),
        ];
        let aggregation = aggregate(&reports, users().as_slice(), day(5));
        assert_eq!(aggregation.summaries[0].most_common_reason, ReportReason::Harassment);
    }

    #[test]
    fn test_latest_report_tie_keeps_first() {
        let reports = vec![
            report("a", "1", ReportReason::Fraud, day(3)),
            report("b", "1", ReportReason::Other, day(3)),
        ];
        let aggregation = aggregate(&reports, users().as_slice(), day(5));
        let summary = &aggregation.summaries[0];
        assert_eq!(summary.last_report_reason, ReportReason::Fraud);
        assert_eq!(summary.last_report_description, "Description a");
    }

    #[test]
    fn test_orphaned_reports_are_surfaced() {
        let mut reports = mock_reports();
        reports.push(report("report-010", "ghost", ReportReason::Other, day(20)));
        reports.push(report("report-011", "ghost", ReportReason::Other, day(21)));

        let aggregation = aggregate(&reports, users().as_slice(), day(28));
        assert_eq!(aggregation.summaries.len(), 3);
        assert_eq!(aggregation.orphaned, vec!["report-010", "report-011"]);
    }

    #[test]
    fn test_ranking_ties_keep_first_seen_order() {
        let reports = vec![
            report("a", "3", ReportReason::Other, day(1)),
            report("b", "2", ReportReason::Other, day(1)),
        ];
        let aggregation = aggregate(&reports, users().as_slice(), day(20));
        let ids: Vec<&str> = aggregation.summaries.iter().map(|s| s.user_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[test]
    fn test_hash_map_lookup() {
        let lookup: HashMap<String, User> =
            users().into_iter().map(|u| (u.id.clone(), u)).collect();
        let aggregation = aggregate(&mock_reports(), &lookup, day(28));
        assert_eq!(aggregation.summaries.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let aggregation = aggregate(&[], users().as_slice(), day(28));
        assert!(aggregation.summaries.is_empty());
        assert!(aggregation.orphaned.is_empty());
    }

    #[test]
    fn test_reports_newest_first() {
        let aggregation = aggregate(&mock_reports(), users().as_slice(), day(28));
        let ids: Vec<String> = aggregation.summaries[0]
            .reports_newest_first()
            .iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(ids.first().map(String::as_str), Some("report-007"));
        assert_eq!(ids.last().map(String::as_str), Some("report-001"));
    }

    #[test]
    fn test_summary_list_filters() {
        let aggregation = aggregate(&mock_reports(), users().as_slice(), day(28));
        let mut view = ListView::new(aggregation.summaries);

        view.set_filter(SummaryFilter::BusinessType(Some(BusinessType::Corporate)));
        assert_eq!(view.filtered_count(), 2);

        view.set_filter(SummaryFilter::Reason(Some(ReportReason::PrivacyViolation)));
        assert_eq!(view.filtered_count(), 1);

        view.set_search_term("bob");
        assert_eq!(view.filtered_count(), 1);

        view.clear_filters();
        view.set_search_term("fraud");
        let ids: Vec<&str> = view.filtered_items().map(|s| s.user_id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn test_summary_sort_parsing() {
        assert_eq!("total_reports".parse::<SummarySort>().unwrap(), SummarySort::TotalReports);
        assert_eq!("Severity".parse::<SummarySort>().unwrap(), SummarySort::Severity);
        assert!("name".parse::<SummarySort>().is_err());
    }
}
