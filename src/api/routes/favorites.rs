//! Favorite routes. All of them act on the caller's own bookmarks.

use crate::{
    api::{AppState, auth::AuthUser, validation::parse_id},
    core::{favorite, seed::SeedResponse},
    entities::FavoriteModel,
    errors::Result,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Serialize;

#[derive(Serialize)]
struct SuccessBody {
    success: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteCheckBody {
    is_favorite: bool,
}

async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<SeedResponse>>> {
    Ok(Json(
        favorite::get_user_favorites(&state.database, &user.id).await?,
    ))
}

async fn add(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FavoriteModel>> {
    let seed_id = parse_id(&id)?;
    Ok(Json(
        favorite::add_favorite(&state.database, &user.id, seed_id).await?,
    ))
}

async fn remove(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<SuccessBody>> {
    let seed_id = parse_id(&id)?;
    favorite::remove_favorite(&state.database, &user.id, seed_id).await?;
    Ok(Json(SuccessBody { success: true }))
}

async fn check(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FavoriteCheckBody>> {
    let seed_id = parse_id(&id)?;
    let is_favorite = favorite::is_favorite(&state.database, &user.id, seed_id).await?;
    Ok(Json(FavoriteCheckBody { is_favorite }))
}

/// GET /favorites, POST|DELETE /favorites/:id, GET /favorites/:id/check.
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list))
        .route("/favorites/:id", post(add).delete(remove))
        .route("/favorites/:id/check", get(check))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::errors::Result;
    use crate::test_utils::*;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_favorites_require_auth() -> Result<()> {
        let (app, _db) = setup_test_app().await?;
        for (method, uri) in [
            (Method::GET, "/api/favorites"),
            (Method::POST, "/api/favorites/1"),
            (Method::DELETE, "/api/favorites/1"),
            (Method::GET, "/api/favorites/1/check"),
        ] {
            let (status, _) = send(&app, empty_request(method, uri, None)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_favorite_toggle() -> Result<()> {
        let (app, db) = setup_test_app().await?;
        let user = create_test_user(&db, TEST_USER_ID).await?;
        let seed = create_test_seed(&db, &user.id).await?;
        let uri = format!("/api/favorites/{}", seed.id);
        let check_uri = format!("{uri}/check");
        let me = Some(TEST_USER_ID);

        let (status, added) = send(&app, empty_request(Method::POST, &uri, me)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(added["seedId"], seed.id);

        let (_, check) = send(&app, empty_request(Method::GET, &check_uri, me)).await;
        assert_eq!(check, json!({ "isFavorite": true }));

        let (_, list) = send(&app, empty_request(Method::GET, "/api/favorites", me)).await;
        assert_eq!(list[0]["id"], seed.id);

        for _ in 0..2 {
            let (status, body) = send(&app, empty_request(Method::DELETE, &uri, me)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({ "success": true }));
        }

        let (_, check) = send(&app, empty_request(Method::GET, &check_uri, me)).await;
        assert_eq!(check, json!({ "isFavorite": false }));
        Ok(())
    }

    #[tokio::test]
    async fn test_favorite_missing_seed() -> Result<()> {
        let (app, _db) = setup_test_app().await?;
        let (status, _) = send(
            &app,
            empty_request(Method::POST, "/api/favorites/404", Some(TEST_USER_ID)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }
}
