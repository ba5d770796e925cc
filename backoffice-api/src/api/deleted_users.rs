use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use backoffice_core::models::{DeletedUser, DeletedUserFilter, DeletionType};
use backoffice_core::{ListView, Page};
use serde::Deserialize;

use super::list::{parse_optional, ListQuery};
use crate::error::Result;
use crate::services::{DeletedUserService, DeletionCounts};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_deleted_users))
        .route("/counts", get(get_counts))
}

#[derive(Debug, Deserialize)]
pub struct ListDeletedUsersQuery {
    pub kind: Option<String>,
    #[serde(flatten)]
    pub list: ListQuery,
}

async fn list_deleted_users(
    State(state): State<AppState>,
    Query(query): Query<ListDeletedUsersQuery>,
) -> Result<Json<Page<DeletedUser>>> {
    let kind = parse_optional::<DeletionType>(query.kind.as_deref())?;

    let deleted_user_service = DeletedUserService::new(state.store.clone());
    let mut view = ListView::new(deleted_user_service.list(None).await);
    view.set_filter(DeletedUserFilter::Kind(kind));

    let page = query.list.render(view, &state.config.list)?;
    Ok(Json(page))
}

async fn get_counts(State(state): State<AppState>) -> Result<Json<DeletionCounts>> {
    let deleted_user_service = DeletedUserService::new(state.store.clone());
    Ok(Json(deleted_user_service.counts().await))
}
