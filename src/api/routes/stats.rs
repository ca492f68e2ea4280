//! Stats routes.

use crate::{
    api::{AppState, auth::AuthUser},
    core::stats::{self, GlobalStats, UserStats},
    errors::Result,
};
use axum::{Json, Router, extract::State, routing::get};

async fn global(State(state): State<AppState>) -> Result<Json<GlobalStats>> {
    Ok(Json(stats::get_global_stats(&state.database).await?))
}

async fn user(State(state): State<AppState>, AuthUser(user): AuthUser) -> Result<Json<UserStats>> {
    Ok(Json(stats::get_user_stats(&state.database, &user.id).await?))
}

/// GET /stats and GET /stats/user.
pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(global))
        .route("/stats/user", get(user))
}
