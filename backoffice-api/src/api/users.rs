use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use backoffice_core::models::{BusinessType, DeletedUser, User, UserFilter, UserSort, VerificationStatus};
use backoffice_core::{ListView, Page, SortDirection};
use serde::Deserialize;
use validator::Validate;

use super::list::{parse_optional, ListQuery};
use crate::error::Result;
use crate::services::{ActionOutcome, UserService};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user).delete(delete_user))
        .route("/:id/approve", post(approve_user))
        .route("/:id/reject", post(reject_user))
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub status: Option<String>,
    pub business_type: Option<String>,
    #[serde(flatten)]
    pub list: ListQuery,
}

async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Page<User>>> {
    let status = parse_optional::<VerificationStatus>(query.status.as_deref())?;
    let business_type = parse_optional::<BusinessType>(query.business_type.as_deref())?;

    let user_service = UserService::new(state.store.clone(), state.guard.clone());
    let mut view = ListView::new(user_service.list_users(None).await)
        .with_sort(UserSort::SubmittedAt, SortDirection::Desc);
    view.set_filter(UserFilter::Status(status));
    view.set_filter(UserFilter::BusinessType(business_type));

    let page = query.list.render(view, &state.config.list)?;
    Ok(Json(page))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let user_service = UserService::new(state.store.clone(), state.guard.clone());
    Ok(Json(user_service.get_user(&id).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct ApproveRequest {
    #[serde(default)]
    pub remarks: Option<String>,
}

async fn approve_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<ApproveRequest>>,
) -> Result<Json<ActionOutcome<User>>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let user_service = UserService::new(state.store.clone(), state.guard.clone());
    let outcome = user_service.approve_user(&id, payload.remarks).await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RejectRequest {
    #[validate(length(min = 1, message = "Remarks are required"))]
    pub remarks: String,
}

async fn reject_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<RejectRequest>,
) -> Result<Json<ActionOutcome<User>>> {
    payload.validate()?;

    let user_service = UserService::new(state.store.clone(), state.guard.clone());
    let outcome = user_service.reject_user(&id, &payload.remarks).await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteUserRequest {
    #[validate(length(min = 1, message = "A reason is required"))]
    pub reason: String,
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DeleteUserRequest>,
) -> Result<Json<ActionOutcome<DeletedUser>>> {
    payload.validate()?;

    let user_service = UserService::new(state.store.clone(), state.guard.clone());
    let outcome = user_service.delete_user(&id, &payload.reason).await?;
    Ok(Json(outcome))
}
