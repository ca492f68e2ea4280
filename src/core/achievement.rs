//! Achievement business logic - Catalog listing, unlocking, and startup seeding.
//!
//! Unlocking is a check-then-insert without a transaction. Contention on a single
//! user's unlock is low and a repeated unlock returns the existing row.

use crate::{
    config::achievements::AchievementConfig,
    entities::{Achievement, UserAchievement, achievement, user_achievement},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use tracing::{debug, info};

/// An unlocked achievement together with its catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    #[serde(flatten)]
    pub unlock: user_achievement::Model,
    pub achievement: achievement::Model,
}

/// Retrieves the whole catalog, cheapest achievements first.
pub async fn list_achievements(db: &DatabaseConnection) -> Result<Vec<achievement::Model>> {
    Achievement::find()
        .order_by_asc(achievement::Column::Points)
        .order_by_asc(achievement::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the achievements a user has unlocked, in unlock order.
pub async fn get_user_achievements(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<UnlockedAchievement>> {
    let rows = UserAchievement::find()
        .filter(user_achievement::Column::UserId.eq(user_id))
        .order_by_asc(user_achievement::Column::UnlockedAt)
        .order_by_asc(user_achievement::Column::Id)
        .find_also_related(Achievement)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(unlock, achievement)| {
            achievement.map(|achievement| UnlockedAchievement {
                unlock,
                achievement,
            })
        })
        .collect())
}

/// Unlocks an achievement for a user. Unlocking twice returns the first unlock.
///
/// # Errors
/// Returns [`Error::AchievementNotFound`] when the achievement is not in the catalog.
pub async fn unlock_achievement(
    db: &DatabaseConnection,
    user_id: &str,
    achievement_id: i32,
) -> Result<user_achievement::Model> {
    if Achievement::find_by_id(achievement_id).one(db).await?.is_none() {
        return Err(Error::AchievementNotFound { id: achievement_id });
    }

    let existing = UserAchievement::find()
        .filter(user_achievement::Column::UserId.eq(user_id))
        .filter(user_achievement::Column::AchievementId.eq(achievement_id))
        .one(db)
        .await?;
    if let Some(existing) = existing {
        return Ok(existing);
    }

    let unlock = user_achievement::ActiveModel {
        user_id: Set(user_id.to_string()),
        achievement_id: Set(achievement_id),
        unlocked_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let result = unlock.insert(db).await?;
    info!(user_id, achievement_id, "Achievement unlocked");
    Ok(result)
}

/// Inserts every configured catalog entry whose name is not in the database yet.
///
/// Existing entries are not modified. Returns the number of inserted entries.
pub async fn seed_catalog(db: &DatabaseConnection, entries: &[AchievementConfig]) -> Result<usize> {
    info!(
        "Seeding achievement catalog. Found {} entries in configuration.",
        entries.len()
    );
    let mut inserted = 0;

    for entry in entries {
        let exists = Achievement::find()
            .filter(achievement::Column::Name.eq(entry.name.as_str()))
            .one(db)
            .await?
            .is_some();
        if exists {
            debug!("Achievement '{}' already exists. Skipping.", entry.name);
            continue;
        }

        let model = achievement::ActiveModel {
            name: Set(entry.name.clone()),
            description: Set(entry.description.clone()),
            icon: Set(entry.icon.clone()),
            kind: Set(entry.kind),
            points: Set(entry.points),
            requirement: Set(entry.requirement.clone()),
            ..Default::default()
        };
        model.insert(db).await?;
        inserted += 1;
    }

    info!("Achievement catalog seeded: {inserted} new entries.");
    Ok(inserted)
}
