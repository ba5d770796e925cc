use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use backoffice_core::models::{BusinessType, ReportReason};
use backoffice_core::{ListView, Page, ReportSummary, SummaryFilter};
use chrono::Utc;
use serde::Deserialize;

use super::list::{parse_optional, ListQuery};
use crate::error::Result;
use crate::services::{ReportCounts, ReportService};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summaries", get(list_summaries))
        .route("/summaries/:user_id", get(get_summary))
        .route("/counts", get(get_counts))
}

#[derive(Debug, Deserialize)]
pub struct ListSummariesQuery {
    pub business_type: Option<String>,
    pub reason: Option<String>,
    #[serde(flatten)]
    pub list: ListQuery,
}

/// Summaries arrive ranked; an explicit `sort` overrides the ranking.
async fn list_summaries(
    State(state): State<AppState>,
    Query(query): Query<ListSummariesQuery>,
) -> Result<Json<Page<ReportSummary>>> {
    let business_type = parse_optional::<BusinessType>(query.business_type.as_deref())?;
    let reason = parse_optional::<ReportReason>(query.reason.as_deref())?;

    let report_service = ReportService::new(state.store.clone());
    let mut view = ListView::new(report_service.summaries(Utc::now()).await);
    view.set_filter(SummaryFilter::BusinessType(business_type));
    view.set_filter(SummaryFilter::Reason(reason));

    let page = query.list.render(view, &state.config.list)?;
    Ok(Json(page))
}

async fn get_summary(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ReportSummary>> {
    let report_service = ReportService::new(state.store.clone());
    Ok(Json(report_service.summary(&user_id, Utc::now()).await?))
}

async fn get_counts(State(state): State<AppState>) -> Result<Json<ReportCounts>> {
    let report_service = ReportService::new(state.store.clone());
    Ok(Json(report_service.counts().await))
}
