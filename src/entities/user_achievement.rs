//! User achievement entity - Junction recording that a user unlocked an achievement.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User achievement database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_achievements")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the unlock
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Identity of the user who unlocked it
    pub user_id: String,
    /// ID of the unlocked achievement
    pub achievement_id: i32,
    /// When the achievement was unlocked
    pub unlocked_at: DateTimeUtc,
}

/// Defines relationships between `UserAchievement` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each unlock refers to one catalog entry
    #[sea_orm(
        belongs_to = "super::achievement::Entity",
        from = "Column::AchievementId",
        to = "super::achievement::Column::Id",
        on_delete = "Cascade"
    )]
    Achievement,
    /// Each unlock belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::achievement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Achievement.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
