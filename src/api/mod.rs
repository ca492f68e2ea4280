//! HTTP API layer - axum router, request extraction, and error mapping.
//!
//! Handlers parse and validate requests, call into [`crate::core`], and serialize
//! the result. They hold no state besides the shared database connection.

pub mod auth;
pub mod error;
pub mod routes;
pub mod validation;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// State shared by every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub database: DatabaseConnection,
}

impl AppState {
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// Builds the complete application router: `/health`, `/ready`, and the `/api` tree.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::common::common_routes())
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
