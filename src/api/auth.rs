//! Authenticated identity extraction.
//!
//! Sessions are owned by the external identity provider. The proxy in front of the
//! API forwards the authenticated user in `X-User-*` headers; a request without a
//! subject id is anonymous.

use super::AppState;
use crate::{
    core::user::{Identity, upsert_user},
    entities::UserModel,
    errors::Error,
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

/// Subject identifier of the authenticated user. Required.
pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_EMAIL_HEADER: &str = "X-User-Email";
pub const USER_FIRST_NAME_HEADER: &str = "X-User-First-Name";
pub const USER_LAST_NAME_HEADER: &str = "X-User-Last-Name";
pub const USER_PROFILE_IMAGE_HEADER: &str = "X-User-Profile-Image";

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Reads the forwarded identity, or `None` when the request is anonymous.
#[must_use]
pub fn identity_from_headers(headers: &HeaderMap) -> Option<Identity> {
    Some(Identity {
        id: header(headers, USER_ID_HEADER)?,
        email: header(headers, USER_EMAIL_HEADER),
        first_name: header(headers, USER_FIRST_NAME_HEADER),
        last_name: header(headers, USER_LAST_NAME_HEADER),
        profile_image_url: header(headers, USER_PROFILE_IMAGE_HEADER),
    })
}

/// Extractor for routes that require a signed-in user.
///
/// Rejects anonymous requests with [`Error::Unauthorized`] and upserts the user row
/// so everything the handler writes can reference it.
#[derive(Clone, Debug)]
pub struct AuthUser(pub UserModel);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = identity_from_headers(&parts.headers).ok_or(Error::Unauthorized)?;
        let user = upsert_user(&state.database, identity).await?;
        Ok(Self(user))
    }
}
