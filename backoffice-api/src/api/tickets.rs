use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use backoffice_core::models::{BusinessType, SupportTicket, TicketCategory, TicketFilter, TicketStatus};
use backoffice_core::{ListView, Page};
use serde::Deserialize;
use validator::Validate;

use super::list::{parse_optional, ListQuery};
use crate::error::Result;
use crate::services::{ActionOutcome, TicketCounts, TicketService};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tickets))
        .route("/counts", get(get_counts))
        .route("/:id", get(get_ticket))
        .route("/:id/status", post(update_status))
        .route("/:id/comments", post(add_comment))
}

#[derive(Debug, Deserialize)]
pub struct ListTicketsQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub business_type: Option<String>,
    #[serde(flatten)]
    pub list: ListQuery,
}

async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<ListTicketsQuery>,
) -> Result<Json<Page<SupportTicket>>> {
    let status = parse_optional::<TicketStatus>(query.status.as_deref())?;
    let category = parse_optional::<TicketCategory>(query.category.as_deref())?;
    let business_type = parse_optional::<BusinessType>(query.business_type.as_deref())?;

    let ticket_service = TicketService::new(state.store.clone(), state.guard.clone());
    let mut view = ListView::new(ticket_service.list_tickets(status).await);
    view.set_filter(TicketFilter::Category(category));
    view.set_filter(TicketFilter::BusinessType(business_type));

    let page = query.list.render(view, &state.config.list)?;
    Ok(Json(page))
}

async fn get_counts(State(state): State<AppState>) -> Result<Json<TicketCounts>> {
    let ticket_service = TicketService::new(state.store.clone(), state.guard.clone());
    Ok(Json(ticket_service.ticket_counts().await))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SupportTicket>> {
    let ticket_service = TicketService::new(state.store.clone(), state.guard.clone());
    Ok(Json(ticket_service.get_ticket(&id).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ActionOutcome<SupportTicket>>> {
    let status: TicketStatus = payload.status.parse()?;

    let ticket_service = TicketService::new(state.store.clone(), state.guard.clone());
    let outcome = ticket_service.update_status(&id, status).await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddCommentRequest {
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AddCommentRequest>,
) -> Result<Json<ActionOutcome<SupportTicket>>> {
    payload.validate()?;

    let ticket_service = TicketService::new(state.store.clone(), state.guard.clone());
    let outcome = ticket_service.add_comment(&id, &payload.message).await?;
    Ok(Json(outcome))
}
