//! Route tables, one module per resource.

pub mod achievements;
pub mod auth;
pub mod common;
pub mod favorites;
pub mod seeds;
pub mod stats;

use super::AppState;
use axum::Router;

/// Every route under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(seeds::seed_routes())
        .merge(achievements::achievement_routes())
        .merge(favorites::favorite_routes())
        .merge(stats::stats_routes())
        .merge(auth::auth_routes())
}
