//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod achievement;
pub mod favorite;
pub mod rating;
pub mod seed;
pub mod user;
pub mod user_achievement;

// Re-export specific types to avoid conflicts
pub use achievement::{
    AchievementType, Column as AchievementColumn, Entity as Achievement,
    Model as AchievementModel,
};
pub use favorite::{Column as FavoriteColumn, Entity as Favorite, Model as FavoriteModel};
pub use rating::{Column as RatingColumn, Entity as Rating, Model as RatingModel};
pub use seed::{
    Column as SeedColumn, Entity as Seed, Features, Model as SeedModel, SeedCategory,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
pub use user_achievement::{
    Column as UserAchievementColumn, Entity as UserAchievement, Model as UserAchievementModel,
};
