//! Rating business logic - Submitting and listing seed ratings.
//!
//! Ratings are append-only and unconstrained per user. Seed aggregates are computed
//! from this table on read (see [`crate::core::seed`]).

use crate::{
    core::seed::ensure_seed_exists,
    entities::{Rating, User, rating},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use tracing::debug;

/// Lowest accepted score.
pub const MIN_SCORE: i32 = 1;
/// Highest accepted score.
pub const MAX_SCORE: i32 = 5;
/// Longest accepted comment, in characters.
pub const MAX_COMMENT_CHARS: usize = 1000;

/// A rating submission, validated by [`create_rating`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRating {
    pub score: i32,
    pub comment: Option<String>,
}

/// A rating together with the rater's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    #[serde(flatten)]
    pub rating: rating::Model,
    /// First name of the rater, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Lists the ratings of a seed, newest first.
///
/// # Errors
/// Returns [`Error::SeedNotFound`] when the seed does not exist.
pub async fn list_ratings(db: &DatabaseConnection, seed_id: i32) -> Result<Vec<RatingResponse>> {
    ensure_seed_exists(db, seed_id).await?;

    let rows = Rating::find()
        .filter(rating::Column::SeedId.eq(seed_id))
        .order_by_desc(rating::Column::CreatedAt)
        .order_by_desc(rating::Column::Id)
        .find_also_related(User)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(rating, user)| RatingResponse {
            rating,
            username: user.and_then(|u| u.first_name),
        })
        .collect())
}

/// Validates and stores a rating left by `user_id` on `seed_id`.
///
/// A blank comment is stored as no comment.
///
/// # Errors
/// Returns [`Error::Validation`] for a score outside 1..=5 or an overlong comment,
/// and [`Error::SeedNotFound`] when the seed does not exist.
pub async fn create_rating(
    db: &DatabaseConnection,
    new_rating: NewRating,
    seed_id: i32,
    user_id: &str,
) -> Result<rating::Model> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&new_rating.score) {
        return Err(Error::invalid_field(
            "score",
            format!("Score must be between {MIN_SCORE} and {MAX_SCORE}"),
        ));
    }

    let comment = new_rating
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    if comment
        .as_ref()
        .is_some_and(|c| c.chars().count() > MAX_COMMENT_CHARS)
    {
        return Err(Error::invalid_field(
            "comment",
            format!("Comment must be at most {MAX_COMMENT_CHARS} characters"),
        ));
    }

    ensure_seed_exists(db, seed_id).await?;

    let rating = rating::ActiveModel {
        seed_id: Set(seed_id),
        user_id: Set(user_id.to_string()),
        score: Set(new_rating.score),
        comment: Set(comment),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = rating.insert(db).await?;
    debug!(rating_id = result.id, seed_id, user_id, "Rating created");
    Ok(result)
}
