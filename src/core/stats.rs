//! Stats business logic - Per-user and site-wide counters.

use crate::{
    entities::{
        Favorite, Rating, Seed, User, UserAchievement, achievement, favorite, rating, seed,
        user_achievement,
    },
    errors::Result,
};
use sea_orm::{JoinType, QuerySelect, RelationTrait, prelude::*};
use serde::Serialize;

/// Activity counters for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub seeds_created: u64,
    pub ratings_given: u64,
    pub favorites_count: u64,
    /// Sum of the points of every unlocked achievement
    pub total_points: i64,
}

/// Site-wide totals shown on the landing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_seeds: u64,
    pub total_users: u64,
    pub total_ratings: u64,
}

/// Counts what a user has submitted, rated, bookmarked, and unlocked.
pub async fn get_user_stats(db: &DatabaseConnection, user_id: &str) -> Result<UserStats> {
    let seeds_created = Seed::find()
        .filter(seed::Column::CreatedBy.eq(user_id))
        .count(db)
        .await?;
    let ratings_given = Rating::find()
        .filter(rating::Column::UserId.eq(user_id))
        .count(db)
        .await?;
    let favorites_count = Favorite::find()
        .filter(favorite::Column::UserId.eq(user_id))
        .count(db)
        .await?;

    // SUM over zero rows is NULL
    let total_points: Option<Option<i64>> = UserAchievement::find()
        .select_only()
        .column_as(achievement::Column::Points.sum(), "total_points")
        .join(
            JoinType::InnerJoin,
            user_achievement::Relation::Achievement.def(),
        )
        .filter(user_achievement::Column::UserId.eq(user_id))
        .into_tuple()
        .one(db)
        .await?;

    Ok(UserStats {
        seeds_created,
        ratings_given,
        favorites_count,
        total_points: total_points.flatten().unwrap_or(0),
    })
}

/// Counts every seed, user, and rating.
pub async fn get_global_stats(db: &DatabaseConnection) -> Result<GlobalStats> {
    Ok(GlobalStats {
        total_seeds: Seed::find().count(db).await?,
        total_users: User::find().count(db).await?,
        total_ratings: Rating::find().count(db).await?,
    })
}
