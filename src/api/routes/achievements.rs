//! Achievement routes: catalog, the caller's unlocks, and unlocking.

use crate::{
    api::{AppState, auth::AuthUser, validation::parse_id},
    core::achievement::{self, UnlockedAchievement},
    entities::{AchievementModel, UserAchievementModel},
    errors::Result,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

async fn list(State(state): State<AppState>) -> Result<Json<Vec<AchievementModel>>> {
    Ok(Json(achievement::list_achievements(&state.database).await?))
}

async fn user_achievements(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<UnlockedAchievement>>> {
    Ok(Json(
        achievement::get_user_achievements(&state.database, &user.id).await?,
    ))
}

async fn unlock(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UserAchievementModel>> {
    let achievement_id = parse_id(&id)?;
    Ok(Json(
        achievement::unlock_achievement(&state.database, &user.id, achievement_id).await?,
    ))
}

/// GET /achievements, GET /achievements/user, POST /achievements/:id/unlock.
pub fn achievement_routes() -> Router<AppState> {
    Router::new()
        .route("/achievements", get(list))
        .route("/achievements/user", get(user_achievements))
        .route("/achievements/:id/unlock", post(unlock))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::errors::Result;
    use crate::test_utils::*;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_catalog_is_public() -> Result<()> {
        let (app, db) = setup_test_app().await?;
        create_test_achievement(&db, "Legend", 100).await?;
        create_test_achievement(&db, "Rookie", 5).await?;

        let (status, body) = send(&app, get_request("/api/achievements")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Rookie");
        assert_eq!(body[0]["type"], "explorer");
        assert_eq!(body[1]["points"], 100);
        Ok(())
    }

    #[tokio::test]
    async fn test_unlock_flow() -> Result<()> {
        let (app, db) = setup_test_app().await?;
        let achievement = create_test_achievement(&db, "First Steps", 10).await?;
        let uri = format!("/api/achievements/{}/unlock", achievement.id);

        let (status, _) = send(&app, empty_request(Method::POST, &uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, first) = send(&app, empty_request(Method::POST, &uri, Some(TEST_USER_ID))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["achievementId"], achievement.id);
        let (_, second) = send(&app, empty_request(Method::POST, &uri, Some(TEST_USER_ID))).await;
        assert_eq!(first, second);

        let (status, unlocked) = send(
            &app,
            empty_request(Method::GET, "/api/achievements/user", Some(TEST_USER_ID)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unlocked.as_array().unwrap().len(), 1);
        assert_eq!(unlocked[0]["achievement"]["name"], "First Steps");
        assert_eq!(unlocked[0]["userId"], TEST_USER_ID);

        let (status, _) = send(
            &app,
            empty_request(Method::POST, "/api/achievements/999/unlock", Some(TEST_USER_ID)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }
}
