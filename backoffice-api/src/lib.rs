pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod store;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::services::{ProcessingGuard, Sessions};
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub guard: ProcessingGuard,
    pub sessions: Sessions,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store,
            guard: ProcessingGuard::new(),
            sessions: Sessions::new(),
            config,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api::routes())
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
