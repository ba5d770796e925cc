mod auth;
mod contacts;
mod dashboard;
mod deleted_users;
mod list;
mod reports;
mod tickets;
mod users;

use axum::Router;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::routes())
        .nest("/dashboard", dashboard::routes())
        .nest("/users", users::routes())
        .nest("/reports", reports::routes())
        .nest("/tickets", tickets::routes())
        .nest("/contacts", contacts::routes())
        .nest("/deleted-users", deleted_users::routes())
}
