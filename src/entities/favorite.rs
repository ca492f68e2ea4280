//! Favorite entity - Junction recording that a user bookmarked a seed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Favorite database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorites")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the favorite
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Identity of the user
    pub user_id: String,
    /// ID of the bookmarked seed
    pub seed_id: i32,
    /// When the seed was bookmarked
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Favorite and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each favorite points at one seed and disappears with it
    #[sea_orm(
        belongs_to = "super::seed::Entity",
        from = "Column::SeedId",
        to = "super::seed::Column::Id",
        on_delete = "Cascade"
    )]
    Seed,
    /// Each favorite belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::seed::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seed.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
