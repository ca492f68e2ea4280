//! Rating entity - A score and optional comment left on a seed.
//!
//! Ratings are append-only. A user may rate the same seed more than once and every
//! submission counts toward the seed's derived average.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rating database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the rating
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the rated seed
    pub seed_id: i32,
    /// Identity of the user who left the rating
    pub user_id: String,
    /// Score from 1 to 5
    pub score: i32,
    /// Optional review text
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    /// When the rating was submitted
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Rating and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each rating belongs to one seed and disappears with it
    #[sea_orm(
        belongs_to = "super::seed::Entity",
        from = "Column::SeedId",
        to = "super::seed::Column::Id",
        on_delete = "Cascade"
    )]
    Seed,
    /// Each rating is left by one user
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
