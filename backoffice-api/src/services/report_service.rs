// Report service - ranked reported-user summaries
use backoffice_core::models::ReportStatus;
use backoffice_core::{aggregate, ReportSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::store::Store;

pub struct ReportService {
    store: Store,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportCounts {
    pub pending: usize,
    pub investigating: usize,
    pub resolved: usize,
    pub dismissed: usize,
    pub total: usize,
}

impl ReportService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// One summary per reported user as of `now`, ranked by severity and
    /// then report volume.
    pub async fn summaries(&self, now: DateTime<Utc>) -> Vec<ReportSummary> {
        let (reports, users) = self.store.reports().await;
        let aggregation = aggregate(&reports, &users, now);

        if !aggregation.orphaned.is_empty() {
            warn!(
                count = aggregation.orphaned.len(),
                report_ids = ?aggregation.orphaned,
                "dropping reports against unknown users"
            );
        }
        debug!(summaries = aggregation.summaries.len(), "report summaries built");
        aggregation.summaries
    }

    /// The summary for one user with its reports ordered newest first.
    pub async fn summary(&self, user_id: &str, now: DateTime<Utc>) -> Result<ReportSummary> {
        let mut summary = self
            .summaries(now)
            .await
            .into_iter()
            .find(|summary| summary.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("No reports found for user {}", user_id)))?;
        summary.reports = summary.reports_newest_first();
        Ok(summary)
    }

    pub async fn reported_user_count(&self) -> usize {
        self.summaries(Utc::now()).await.len()
    }

    pub async fn counts(&self) -> ReportCounts {
        let (reports, _) = self.store.reports().await;
        let mut counts = ReportCounts {
            total: reports.len(),
            ..ReportCounts::default()
        };
        for report in &reports {
            match report.status {
                ReportStatus::Pending => counts.pending += 1,
                ReportStatus::Investigating => counts.investigating += 1,
                ReportStatus::Resolved => counts.resolved += 1,
                ReportStatus::Dismissed => counts.dismissed += 1,
            }
        }
        counts
    }
}
