//! Seed entity - A catalogued world seed for the sandbox game.
//!
//! Each seed carries the value typed into the game's world generator, a display name,
//! a category, a difficulty from 1 to 5, and a list of notable features.
//! Ratings and favorites reference seeds and are removed together with them.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Seed database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seeds")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the seed
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Value entered into the world generator (e.g. `"-4172144997902289642"`)
    pub seed_value: String,
    /// Human-readable name of the seed
    pub name: String,
    /// Optional free-form description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Category the seed is listed under
    pub category: SeedCategory,
    /// Difficulty rating from 1 (easy) to 5 (brutal)
    pub difficulty: i32,
    /// Optional preview image
    pub image_url: Option<String>,
    /// Notable features of the generated world, stored as a JSON array
    #[sea_orm(column_type = "Json")]
    pub features: Features,
    /// Whether the seed is shown in the featured list
    pub is_featured: bool,
    /// Number of times the seed's detail page was viewed
    pub view_count: i32,
    /// Identity of the user who submitted the seed
    pub created_by: Option<String>,
    /// When the seed was submitted
    pub created_at: DateTimeUtc,
}

/// Categories a seed can be listed under.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum SeedCategory {
    /// Harsh starts that test survival skills
    #[default]
    #[sea_orm(string_value = "survival")]
    Survival,
    /// Worlds with structures worth a journey
    #[sea_orm(string_value = "adventure")]
    Adventure,
    /// Flat or scenic terrain for building
    #[sea_orm(string_value = "building")]
    Building,
    /// Varied biomes to explore
    #[sea_orm(string_value = "exploration")]
    Exploration,
    /// Deliberately hard setups
    #[sea_orm(string_value = "challenge")]
    Challenge,
    /// Resource-rich spawns
    #[sea_orm(string_value = "resource")]
    Resource,
    /// Villages close to spawn
    #[sea_orm(string_value = "village")]
    Village,
    /// Remarkable spawn points
    #[sea_orm(string_value = "spawn")]
    Spawn,
}

impl SeedCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 8] = [
        Self::Survival,
        Self::Adventure,
        Self::Building,
        Self::Exploration,
        Self::Challenge,
        Self::Resource,
        Self::Village,
        Self::Spawn,
    ];

    /// Lowercase wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Survival => "survival",
            Self::Adventure => "adventure",
            Self::Building => "building",
            Self::Exploration => "exploration",
            Self::Challenge => "challenge",
            Self::Resource => "resource",
            Self::Village => "village",
            Self::Spawn => "spawn",
        }
    }

    /// Parses a wire name, returning `None` for unknown categories.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Feature tags of a seed, persisted as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Features(pub Vec<String>);

/// Defines relationships between Seed and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each seed is submitted by one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Author,
    /// One seed has many ratings
    #[sea_orm(has_many = "super::rating::Entity")]
    Ratings,
    /// One seed has many favorites
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
