//! Achievement entity - One entry of the static achievement catalog.
//!
//! The catalog is authored in `config.toml` and seeded at startup. Users unlock
//! entries through the `user_achievements` junction table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Achievement database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "achievements")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the achievement
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Display name, unique within the catalog
    #[sea_orm(unique)]
    pub name: String,
    /// What the player did to earn it
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Icon name rendered by the client
    pub icon: Option<String>,
    /// Achievement family
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: AchievementType,
    /// Points awarded when unlocked
    pub points: i32,
    /// Machine-readable unlock condition
    #[sea_orm(column_type = "Json", nullable)]
    pub requirement: Option<Json>,
}

/// Families of achievements.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum AchievementType {
    #[default]
    #[sea_orm(string_value = "explorer")]
    Explorer,
    #[sea_orm(string_value = "collector")]
    Collector,
    #[sea_orm(string_value = "builder")]
    Builder,
    #[sea_orm(string_value = "warrior")]
    Warrior,
    #[sea_orm(string_value = "social")]
    Social,
    #[sea_orm(string_value = "legendary")]
    Legendary,
}

/// Defines relationships between Achievement and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One achievement is unlocked by many users
    #[sea_orm(has_many = "super::user_achievement::Entity")]
    UserAchievements,
}

impl Related<super::user_achievement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAchievements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
