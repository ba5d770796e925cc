use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use backoffice_core::models::{ContactFilter, ContactOperation, ContactRequest, SupportType};
use backoffice_core::{ListView, Page};
use serde::Deserialize;

use super::list::{parse_optional, ListQuery};
use crate::error::Result;
use crate::services::{ActionOutcome, ContactCounts, ContactService, ContactTab};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contacts))
        .route("/counts", get(get_counts))
        .route("/:id", get(get_contact))
        .route("/:id/operation", post(set_operation).delete(clear_operation))
}

#[derive(Debug, Deserialize)]
pub struct ListContactsQuery {
    #[serde(default)]
    pub tab: ContactTab,
    pub support_type: Option<String>,
    #[serde(flatten)]
    pub list: ListQuery,
}

async fn list_contacts(
    State(state): State<AppState>,
    Query(query): Query<ListContactsQuery>,
) -> Result<Json<Page<ContactRequest>>> {
    let support_type = parse_optional::<SupportType>(query.support_type.as_deref())?;

    let contact_service = ContactService::new(state.store.clone(), state.guard.clone());
    let mut view = ListView::new(contact_service.list(query.tab).await);
    view.set_filter(ContactFilter::SupportType(support_type));

    let page = query.list.render(view, &state.config.list)?;
    Ok(Json(page))
}

async fn get_counts(State(state): State<AppState>) -> Result<Json<ContactCounts>> {
    let contact_service = ContactService::new(state.store.clone(), state.guard.clone());
    Ok(Json(contact_service.counts().await))
}

async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContactRequest>> {
    let contact_service = ContactService::new(state.store.clone(), state.guard.clone());
    Ok(Json(contact_service.get(&id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SetOperationRequest {
    pub operation: String,
}

async fn set_operation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SetOperationRequest>,
) -> Result<Json<ActionOutcome<ContactRequest>>> {
    let operation: ContactOperation = payload.operation.parse()?;

    let contact_service = ContactService::new(state.store.clone(), state.guard.clone());
    let outcome = contact_service.set_operation(&id, operation).await?;
    Ok(Json(outcome))
}

async fn clear_operation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActionOutcome<ContactRequest>>> {
    let contact_service = ContactService::new(state.store.clone(), state.guard.clone());
    let outcome = contact_service.clear_operation(&id).await?;
    Ok(Json(outcome))
}
