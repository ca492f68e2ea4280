//! User entity - Profile of an identity forwarded by the external identity provider.
//!
//! The provider owns credentials and sessions. This table only mirrors the profile
//! fields so seeds and ratings can show an author name.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Subject identifier issued by the identity provider
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    /// When the user was first seen
    pub created_at: DateTimeUtc,
    /// When the profile fields last changed
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user submits many seeds
    #[sea_orm(has_many = "super::seed::Entity")]
    Seeds,
    /// One user leaves many ratings
    #[sea_orm(has_many = "super::rating::Entity")]
    Ratings,
}

impl Related<super::seed::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seeds.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
