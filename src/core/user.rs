//! User business logic - Mirrors identities forwarded by the identity provider.
//!
//! The provider is the source of truth for who a user is. Every authenticated request
//! upserts the forwarded profile so seeds and ratings can be joined to an author name.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};
use tracing::debug;

/// An authenticated identity as forwarded by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// Subject identifier (required)
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl Identity {
    /// Creates an identity that carries only a subject identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Finds a user by identifier.
pub async fn get_user(db: &DatabaseConnection, user_id: &str) -> Result<Option<user::Model>> {
    User::find_by_id(user_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts the identity, or refreshes the stored profile when a forwarded field changed.
///
/// Fields the provider did not forward keep their stored value. Concurrent first
/// requests for the same identity are safe: the insert ignores a conflicting id and
/// the losing request merges into the row that won.
pub async fn upsert_user(db: &DatabaseConnection, identity: Identity) -> Result<user::Model> {
    let now = chrono::Utc::now();

    let existing = match get_user(db, &identity.id).await? {
        Some(existing) => existing,
        None => {
            let new_user = user::ActiveModel {
                id: Set(identity.id.clone()),
                email: Set(identity.email.clone()),
                first_name: Set(identity.first_name.clone()),
                last_name: Set(identity.last_name.clone()),
                profile_image_url: Set(identity.profile_image_url.clone()),
                created_at: Set(now),
                updated_at: Set(now),
            };
            let inserted = User::insert(new_user)
                .on_conflict(OnConflict::column(user::Column::Id).do_nothing().to_owned())
                .exec_without_returning(db)
                .await?;
            if inserted > 0 {
                debug!(user_id = %identity.id, "Registered new user");
            }
            get_user(db, &identity.id)
                .await?
                .ok_or_else(|| Error::UserNotFound {
                    id: identity.id.clone(),
                })?
        }
    };

    let email = identity.email.or_else(|| existing.email.clone());
    let first_name = identity.first_name.or_else(|| existing.first_name.clone());
    let last_name = identity.last_name.or_else(|| existing.last_name.clone());
    let profile_image_url = identity
        .profile_image_url
        .or_else(|| existing.profile_image_url.clone());

    if email == existing.email
        && first_name == existing.first_name
        && last_name == existing.last_name
        && profile_image_url == existing.profile_image_url
    {
        return Ok(existing);
    }

    let mut user: user::ActiveModel = existing.into();
    user.email = Set(email);
    user.first_name = Set(first_name);
    user.last_name = Set(last_name);
    user.profile_image_url = Set(profile_image_url);
    user.updated_at = Set(now);
    user.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_upsert_registers_new_user() -> Result<()> {
        let db = setup_test_db().await?;

        let user = upsert_user(
            &db,
            Identity {
                first_name: Some("Alex".to_string()),
                ..Identity::new("user-1")
            },
        )
        .await?;

        assert_eq!(user.id, "user-1");
        assert_eq!(user.first_name.as_deref(), Some("Alex"));
        assert!(get_user(&db, "user-1").await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_keeps_fields_that_were_not_forwarded() -> Result<()> {
        let db = setup_test_db().await?;

        upsert_user(
            &db,
            Identity {
                email: Some("alex@example.com".to_string()),
                first_name: Some("Alex".to_string()),
                ..Identity::new("user-1")
            },
        )
        .await?;

        let updated = upsert_user(
            &db,
            Identity {
                first_name: Some("Sam".to_string()),
                ..Identity::new("user-1")
            },
        )
        .await?;

        assert_eq!(updated.first_name.as_deref(), Some("Sam"));
        assert_eq!(updated.email.as_deref(), Some("alex@example.com"));
        assert_eq!(User::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_without_changes_returns_stored_row() -> Result<()> {
        let db = setup_test_db().await?;

        let first = upsert_user(&db, Identity::new("user-1")).await?;
        let second = upsert_user(&db, Identity::new("user-1")).await?;

        assert_eq!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_first_upserts_share_one_row() -> Result<()> {
        let db = setup_test_db().await?;

        for n in 0..10 {
            let id = format!("user-{n}");
            let (a, b, c) = tokio::join!(
                upsert_user(&db, Identity::new(id.as_str())),
                upsert_user(
                    &db,
                    Identity {
                        first_name: Some("Alex".to_string()),
                        ..Identity::new(id.as_str())
                    }
                ),
                upsert_user(&db, Identity::new(id.as_str())),
            );
            assert_eq!(a?.id, id);
            assert_eq!(b?.first_name.as_deref(), Some("Alex"));
            assert_eq!(c?.id, id);
        }

        assert_eq!(User::find().count(&db).await?, 10);
        Ok(())
    }
}
