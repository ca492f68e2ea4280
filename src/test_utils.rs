//! Shared test utilities for `SeedAtlas`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use crate::{
    api::{
        AppState,
        auth::{USER_FIRST_NAME_HEADER, USER_ID_HEADER},
        router,
    },
    core::{
        rating::{self, NewRating},
        seed::{self, NewSeed},
        user::{self, Identity},
    },
    entities::{self, AchievementType, SeedCategory},
    errors::Result,
};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use serde_json::Value;
use tower::ServiceExt;

/// Identifier of the user created by [`setup_with_user`].
pub const TEST_USER_ID: &str = "test-user";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Installs a test subscriber so `tracing` output shows up with `--nocapture`.
/// Safe to call from several tests.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Creates a test user.
///
/// # Defaults
/// * `first_name`: `"Tester"`
/// * `email`: `"<id>@example.com"`
pub async fn create_test_user(db: &DatabaseConnection, id: &str) -> Result<entities::UserModel> {
    user::upsert_user(
        db,
        Identity {
            email: Some(format!("{id}@example.com")),
            first_name: Some("Tester".to_string()),
            ..Identity::new(id)
        },
    )
    .await
}

/// Creates a test seed with sensible defaults.
///
/// # Defaults
/// * `name`: `"Test Seed"`
/// * `seed_value`: `"1234567890"`
/// * `category`: survival
/// * `difficulty`: 3
pub async fn create_test_seed(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<entities::SeedModel> {
    create_custom_seed(db, user_id, "Test Seed", SeedCategory::Survival, 3).await
}

/// Creates a test seed with a custom name, category, and difficulty.
pub async fn create_custom_seed(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    category: SeedCategory,
    difficulty: i32,
) -> Result<entities::SeedModel> {
    seed::create_seed(
        db,
        NewSeed {
            seed_value: "1234567890".to_string(),
            name: name.to_string(),
            description: Some(format!("{name} description")),
            category,
            difficulty,
            features: vec!["village".to_string()],
            ..NewSeed::default()
        },
        user_id,
    )
    .await
}

/// Creates a rating without a comment.
pub async fn create_test_rating(
    db: &DatabaseConnection,
    seed_id: i32,
    user_id: &str,
    score: i32,
) -> Result<entities::RatingModel> {
    rating::create_rating(
        db,
        NewRating {
            score,
            comment: None,
        },
        seed_id,
        user_id,
    )
    .await
}

/// Inserts a catalog entry of type explorer.
pub async fn create_test_achievement(
    db: &DatabaseConnection,
    name: &str,
    points: i32,
) -> Result<entities::AchievementModel> {
    let achievement = entities::achievement::ActiveModel {
        name: Set(name.to_string()),
        description: Set(Some(format!("{name} description"))),
        icon: Set(Some("Trophy".to_string())),
        kind: Set(AchievementType::Explorer),
        points: Set(points),
        requirement: Set(None),
        ..Default::default()
    };
    Ok(achievement.insert(db).await?)
}

/// Sets up a database with one user.
/// Returns (db, user) for common test scenarios.
pub async fn setup_with_user() -> Result<(DatabaseConnection, entities::UserModel)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, TEST_USER_ID).await?;
    Ok((db, user))
}

/// Sets up a database with one user and a seed they submitted.
/// Returns (db, user, seed) for seed-related tests.
pub async fn setup_with_seed() -> Result<(
    DatabaseConnection,
    entities::UserModel,
    entities::SeedModel,
)> {
    let (db, user) = setup_with_user().await?;
    let seed = create_test_seed(&db, &user.id).await?;
    Ok((db, user, seed))
}

/// Builds the full router over a fresh in-memory database.
/// Returns (router, db) so tests can arrange data directly.
pub async fn setup_test_app() -> Result<(Router, DatabaseConnection)> {
    init_test_tracing();
    let db = setup_test_db().await?;
    let app = router(AppState::new(db.clone()));
    Ok((app, db))
}

/// Sends a request through the router and decodes the JSON response.
/// An empty body decodes to `Value::Null`.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };
    (status, body)
}

/// Anonymous GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    empty_request(Method::GET, uri, None)
}

fn request_builder(method: Method, uri: &str, user_id: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match user_id {
        // Test users always carry the first name "Tester"
        Some(id) => builder
            .header(USER_ID_HEADER, id)
            .header(USER_FIRST_NAME_HEADER, "Tester"),
        None => builder,
    }
}

/// Request without a body, authenticated as `user_id` when given.
pub fn empty_request(method: Method, uri: &str, user_id: Option<&str>) -> Request<Body> {
    request_builder(method, uri, user_id)
        .body(Body::empty())
        .unwrap()
}

/// Request with a JSON body, authenticated as `user_id` when given.
pub fn json_request(method: Method, uri: &str, user_id: Option<&str>, body: &Value) -> Request<Body> {
    raw_request(method, uri, user_id, &body.to_string())
}

/// Request with a raw body sent as `application/json`.
pub fn raw_request(method: Method, uri: &str, user_id: Option<&str>, body: &str) -> Request<Body> {
    request_builder(method, uri, user_id)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
