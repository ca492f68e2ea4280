//! Seed routes: categories, listing, detail, submission, and ratings.

use crate::{
    api::{
        AppState,
        auth::AuthUser,
        validation::{JsonBody, parse_id, parse_seed_query},
    },
    core::{
        rating::{self, NewRating, RatingResponse},
        seed::{self, DEFAULT_DIFFICULTY, NewSeed, SeedResponse},
    },
    entities::{RatingModel, SeedCategory},
    errors::{Error, Result},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde_json::Value;
use std::collections::HashMap;

async fn categories() -> Json<[SeedCategory; 8]> {
    Json(SeedCategory::ALL)
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<SeedResponse>>> {
    let query = parse_seed_query(&params)?;
    Ok(Json(seed::list_seeds(&state.database, &query).await?))
}

async fn featured(State(state): State<AppState>) -> Result<Json<Vec<SeedResponse>>> {
    Ok(Json(seed::get_featured_seeds(&state.database).await?))
}

/// Serves the seed as it was before this view was counted.
async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<SeedResponse>> {
    let id = parse_id(&id)?;
    let found = seed::get_seed(&state.database, id)
        .await?
        .ok_or(Error::SeedNotFound { id })?;
    seed::increment_view_count(&state.database, id).await?;
    Ok(Json(found))
}

async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SeedResponse>)> {
    let body = JsonBody::from_extracted(body)?;
    // viewCount and createdBy are server-owned and never read from the body
    let new_seed = NewSeed {
        seed_value: body.required_string("seedValue")?,
        name: body.required_string("name")?,
        description: body.optional_string("description")?,
        category: body.optional_category("category")?.unwrap_or_default(),
        difficulty: body.optional_i32("difficulty")?.unwrap_or(DEFAULT_DIFFICULTY),
        image_url: body.optional_string("imageUrl")?,
        features: body.string_list("features")?,
        is_featured: body.optional_bool("isFeatured")?.unwrap_or(false),
    };

    let created = seed::create_seed(&state.database, new_seed, &user.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(SeedResponse::unrated(created, user.first_name)),
    ))
}

async fn list_ratings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RatingResponse>>> {
    let seed_id = parse_id(&id)?;
    Ok(Json(rating::list_ratings(&state.database, seed_id).await?))
}

async fn create_rating(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RatingModel>)> {
    let seed_id = parse_id(&id)?;
    let body = JsonBody::from_extracted(body)?;
    let new_rating = NewRating {
        score: body.required_i32("score")?,
        comment: body.optional_string("comment")?,
    };

    let created = rating::create_rating(&state.database, new_rating, seed_id, &user.id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /categories, /seeds, /seeds/featured, /seeds/:id, and /seeds/:id/ratings.
pub fn seed_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories))
        .route("/seeds", get(list).post(create))
        .route("/seeds/featured", get(featured))
        .route("/seeds/:id", get(detail))
        .route("/seeds/:id/ratings", get(list_ratings).post(create_rating))
}
