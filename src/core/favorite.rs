//! Favorite business logic - Bookmarking seeds.
//!
//! Adding and removing are both idempotent, so a client can replay a toggle safely.

use crate::{
    core::seed::{SeedResponse, ensure_seed_exists, get_seeds_by_ids},
    entities::{Favorite, favorite},
    errors::Result,
};
use sea_orm::{QuerySelect, Set, prelude::*};
use tracing::debug;

/// Seeds a user has bookmarked, newest seed first.
pub async fn get_user_favorites(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<SeedResponse>> {
    let seed_ids: Vec<i32> = Favorite::find()
        .select_only()
        .column(favorite::Column::SeedId)
        .filter(favorite::Column::UserId.eq(user_id))
        .into_tuple()
        .all(db)
        .await?;

    get_seeds_by_ids(db, seed_ids).await
}

/// Bookmarks a seed. Adding an existing favorite returns the stored row.
///
/// # Errors
/// Returns [`crate::errors::Error::SeedNotFound`] when the seed does not exist.
pub async fn add_favorite(
    db: &DatabaseConnection,
    user_id: &str,
    seed_id: i32,
) -> Result<favorite::Model> {
    if let Some(existing) = find_favorite(db, user_id, seed_id).await? {
        return Ok(existing);
    }
    ensure_seed_exists(db, seed_id).await?;

    let favorite = favorite::ActiveModel {
        user_id: Set(user_id.to_string()),
        seed_id: Set(seed_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let result = favorite.insert(db).await?;
    debug!(user_id, seed_id, "Favorite added");
    Ok(result)
}

/// Removes a bookmark. Removing a missing favorite is not an error.
pub async fn remove_favorite(db: &DatabaseConnection, user_id: &str, seed_id: i32) -> Result<()> {
    let result = Favorite::delete_many()
        .filter(favorite::Column::UserId.eq(user_id))
        .filter(favorite::Column::SeedId.eq(seed_id))
        .exec(db)
        .await?;
    debug!(user_id, seed_id, removed = result.rows_affected, "Favorite removed");
    Ok(())
}

/// Whether the user has bookmarked the seed.
pub async fn is_favorite(db: &DatabaseConnection, user_id: &str, seed_id: i32) -> Result<bool> {
    Ok(find_favorite(db, user_id, seed_id).await?.is_some())
}

async fn find_favorite(
    db: &DatabaseConnection,
    user_id: &str,
    seed_id: i32,
) -> Result<Option<favorite::Model>> {
    Favorite::find()
        .filter(favorite::Column::UserId.eq(user_id))
        .filter(favorite::Column::SeedId.eq(seed_id))
        .one(db)
        .await
        .map_err(Into::into)
}
