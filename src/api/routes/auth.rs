//! Current-user route.

use crate::{
    api::{AppState, auth::AuthUser},
    entities::UserModel,
};
use axum::{Json, Router, routing::get};

/// The signed-in user's stored profile, refreshed from the forwarded identity.
async fn current_user(AuthUser(user): AuthUser) -> Json<UserModel> {
    Json(user)
}

/// GET /auth/user.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/user", get(current_user))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::api::auth::{USER_EMAIL_HEADER, USER_FIRST_NAME_HEADER, USER_ID_HEADER};
    use crate::core::user::get_user;
    use crate::errors::Result;
    use crate::test_utils::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };

    #[tokio::test]
    async fn test_current_user_is_upserted_from_headers() -> Result<()> {
        let (app, db) = setup_test_app().await?;

        let (status, _) = send(&app, get_request("/api/auth/user")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .uri("/api/auth/user")
            .header(USER_ID_HEADER, "provider-42")
            .header(USER_EMAIL_HEADER, "sam@example.com")
            .header(USER_FIRST_NAME_HEADER, "Sam")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "provider-42");
        assert_eq!(body["firstName"], "Sam");
        assert_eq!(body["email"], "sam@example.com");

        let stored = get_user(&db, "provider-42").await?.unwrap();
        assert_eq!(stored.first_name.as_deref(), Some("Sam"));
        Ok(())
    }
}
