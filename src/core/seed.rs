//! Seed business logic - Listing, filtering, submission, and view tracking.
//!
//! A seed's `average_rating` and `ratings_count` are never stored. They are
//! aggregated from the `ratings` table on every read, so a new rating is reflected
//! by the next request without any invalidation step.

use crate::{
    entities::{Rating, Seed, User, rating, seed, user},
    errors::{Error, Result},
};
use sea_orm::{
    DbBackend, FromQueryResult, QueryOrder, QuerySelect, SelectTwo, Set,
    prelude::*,
    sea_query::{Expr, LikeExpr, extension::postgres::PgExpr},
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Lowest accepted difficulty.
pub const MIN_DIFFICULTY: i32 = 1;
/// Highest accepted difficulty.
pub const MAX_DIFFICULTY: i32 = 5;
/// Difficulty used when a submission does not specify one.
pub const DEFAULT_DIFFICULTY: i32 = 3;

/// Sort order for seed listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedSort {
    /// Most recently submitted first
    #[default]
    Newest,
    /// Most viewed first
    Popular,
    /// Highest average rating first, unrated seeds last
    Rating,
}

impl SeedSort {
    /// Parses the `sortBy` query value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newest" => Some(Self::Newest),
            "popular" => Some(Self::Popular),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }
}

/// Filters and ordering for [`list_seeds`]. Every filter is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedQuery {
    /// Case-insensitive substring of the seed name
    pub search: Option<String>,
    pub category: Option<seed::SeedCategory>,
    pub difficulty: Option<i32>,
    pub sort_by: SeedSort,
    /// Only return featured seeds
    pub featured: bool,
}

/// A seed submission, validated by [`create_seed`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSeed {
    pub seed_value: String,
    pub name: String,
    pub description: Option<String>,
    pub category: seed::SeedCategory,
    pub difficulty: i32,
    pub image_url: Option<String>,
    pub features: Vec<String>,
    pub is_featured: bool,
}

/// A seed with its author and derived rating aggregates, as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResponse {
    #[serde(flatten)]
    pub seed: seed::Model,
    /// First name of the submitting user, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Mean score rounded to one decimal place, 0 when unrated
    pub average_rating: f64,
    pub ratings_count: i64,
}

impl SeedResponse {
    /// Wraps a seed that has no ratings yet.
    #[must_use]
    pub const fn unrated(seed: seed::Model, author_name: Option<String>) -> Self {
        Self {
            seed,
            author_name,
            average_rating: 0.0,
            ratings_count: 0,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct RatingAggregate {
    seed_id: i32,
    score_sum: i64,
    ratings_count: i64,
}

impl RatingAggregate {
    #[allow(clippy::cast_precision_loss)] // Rating counts stay far below 2^52
    fn average(&self) -> f64 {
        if self.ratings_count == 0 {
            return 0.0;
        }
        round_to_tenth(self.score_sum as f64 / self.ratings_count as f64)
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Lists seeds matching `query`, ordered by its sort key.
///
/// Filtering happens in SQL, except the name search on `SQLite`: its `LOWER` only
/// folds ASCII, so names are matched in Rust there. Rating order is applied after
/// aggregation; the sort is stable, so seeds with equal averages keep newest-first order.
pub async fn list_seeds(db: &DatabaseConnection, query: &SeedQuery) -> Result<Vec<SeedResponse>> {
    debug!(?query, "Listing seeds");
    let mut select = Seed::find();
    let mut name_filter = None;

    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        match db.get_database_backend() {
            DbBackend::Postgres => select = select.filter(name_ilike(search)),
            _ => name_filter = Some(search.to_lowercase()),
        }
    }
    if let Some(category) = query.category {
        select = select.filter(seed::Column::Category.eq(category));
    }
    if let Some(difficulty) = query.difficulty {
        select = select.filter(seed::Column::Difficulty.eq(difficulty));
    }
    if query.featured {
        select = select.filter(seed::Column::IsFeatured.eq(true));
    }

    select = match query.sort_by {
        SeedSort::Popular => select.order_by_desc(seed::Column::ViewCount),
        SeedSort::Newest | SeedSort::Rating => select,
    };
    let select = select
        .order_by_desc(seed::Column::CreatedAt)
        .order_by_desc(seed::Column::Id)
        .find_also_related(User);

    let mut seeds = load_responses(db, select, name_filter.as_deref()).await?;
    if query.sort_by == SeedSort::Rating {
        seeds.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
    }
    Ok(seeds)
}

/// `ILIKE` on the seed name for `PostgreSQL`. Wildcards in `search` match literally.
fn name_ilike(search: &str) -> sea_orm::sea_query::SimpleExpr {
    let escaped = search
        .replace('!', "!!")
        .replace('%', "!%")
        .replace('_', "!_");
    Expr::col((seed::Entity, seed::Column::Name))
        .ilike(LikeExpr::new(format!("%{escaped}%")).escape('!'))
}

/// Featured seeds, best rated first.
pub async fn get_featured_seeds(db: &DatabaseConnection) -> Result<Vec<SeedResponse>> {
    list_seeds(
        db,
        &SeedQuery {
            featured: true,
            sort_by: SeedSort::Rating,
            ..SeedQuery::default()
        },
    )
    .await
}

/// Seeds whose id is in `seed_ids`, newest first.
pub async fn get_seeds_by_ids(
    db: &DatabaseConnection,
    seed_ids: Vec<i32>,
) -> Result<Vec<SeedResponse>> {
    if seed_ids.is_empty() {
        return Ok(Vec::new());
    }
    let select = Seed::find()
        .filter(seed::Column::Id.is_in(seed_ids))
        .order_by_desc(seed::Column::CreatedAt)
        .order_by_desc(seed::Column::Id)
        .find_also_related(User);
    load_responses(db, select, None).await
}

/// Finds one seed with its author and rating aggregates.
pub async fn get_seed(db: &DatabaseConnection, seed_id: i32) -> Result<Option<SeedResponse>> {
    let select = Seed::find_by_id(seed_id).find_also_related(User);
    Ok(load_responses(db, select, None).await?.into_iter().next())
}

/// Runs a seed/author select and attaches rating aggregates to every row.
///
/// `name_filter`, when given, must be lowercase; only seeds whose lowercased name
/// contains it are kept.
async fn load_responses(
    db: &DatabaseConnection,
    select: SelectTwo<seed::Entity, user::Entity>,
    name_filter: Option<&str>,
) -> Result<Vec<SeedResponse>> {
    let mut rows = select.all(db).await?;
    if let Some(needle) = name_filter {
        rows.retain(|(seed, _)| seed.name.to_lowercase().contains(needle));
    }
    let seed_ids: Vec<i32> = rows.iter().map(|(seed, _)| seed.id).collect();
    let aggregates = rating_aggregates(db, seed_ids).await?;

    Ok(rows
        .into_iter()
        .map(|(seed, author)| {
            let author_name = author.and_then(|a| a.first_name);
            match aggregates.get(&seed.id) {
                Some(aggregate) => SeedResponse {
                    average_rating: aggregate.average(),
                    ratings_count: aggregate.ratings_count,
                    seed,
                    author_name,
                },
                None => SeedResponse::unrated(seed, author_name),
            }
        })
        .collect())
}

/// Sum and count of scores per seed, keyed by seed id.
async fn rating_aggregates(
    db: &DatabaseConnection,
    seed_ids: Vec<i32>,
) -> Result<HashMap<i32, RatingAggregate>> {
    if seed_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let aggregates = Rating::find()
        .select_only()
        .column(rating::Column::SeedId)
        .column_as(rating::Column::Score.sum(), "score_sum")
        .column_as(rating::Column::Id.count(), "ratings_count")
        .filter(rating::Column::SeedId.is_in(seed_ids))
        .group_by(rating::Column::SeedId)
        .into_model::<RatingAggregate>()
        .all(db)
        .await?;

    Ok(aggregates.into_iter().map(|a| (a.seed_id, a)).collect())
}

/// Validates a submission and stores it on behalf of `user_id`.
///
/// The name and seed value are trimmed and must not be empty; difficulty must be
/// within 1..=5. Blank feature tags are dropped.
///
/// # Errors
/// Returns [`Error::Validation`] naming the offending field, or a database error.
pub async fn create_seed(
    db: &DatabaseConnection,
    new_seed: NewSeed,
    user_id: &str,
) -> Result<seed::Model> {
    let seed_value = new_seed.seed_value.trim().to_string();
    if seed_value.is_empty() {
        return Err(Error::invalid_field("seedValue", "Seed value cannot be empty"));
    }

    let name = new_seed.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::invalid_field("name", "Name cannot be empty"));
    }

    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&new_seed.difficulty) {
        return Err(Error::invalid_field(
            "difficulty",
            format!("Difficulty must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}"),
        ));
    }

    let features = new_seed
        .features
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();

    let seed = seed::ActiveModel {
        seed_value: Set(seed_value),
        name: Set(name),
        description: Set(non_blank(new_seed.description)),
        category: Set(new_seed.category),
        difficulty: Set(new_seed.difficulty),
        image_url: Set(non_blank(new_seed.image_url)),
        features: Set(seed::Features(features)),
        is_featured: Set(new_seed.is_featured),
        view_count: Set(0),
        created_by: Set(Some(user_id.to_string())),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = seed.insert(db).await?;
    debug!(seed_id = result.id, user_id, "Seed created");
    Ok(result)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Atomically increments the view counter of a seed.
///
/// Uses a single `UPDATE seeds SET view_count = view_count + 1 WHERE id = ?` so
/// concurrent views are never lost.
///
/// # Errors
/// Returns [`Error::SeedNotFound`] when no seed has this id.
pub async fn increment_view_count(db: &DatabaseConnection, seed_id: i32) -> Result<()> {
    let result = Seed::update_many()
        .col_expr(
            seed::Column::ViewCount,
            Expr::col(seed::Column::ViewCount).add(1),
        )
        .filter(seed::Column::Id.eq(seed_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::SeedNotFound { id: seed_id });
    }
    Ok(())
}

/// Returns an error unless a seed with this id exists.
pub async fn ensure_seed_exists(db: &DatabaseConnection, seed_id: i32) -> Result<()> {
    let exists = Seed::find_by_id(seed_id).count(db).await? > 0;
    if exists {
        Ok(())
    } else {
        Err(Error::SeedNotFound { id: seed_id })
    }
}

/// Deletes a seed. Its ratings and favorites are removed by the database cascade.
///
/// Returns whether a seed was deleted.
pub async fn delete_seed(db: &DatabaseConnection, seed_id: i32) -> Result<bool> {
    let result = Seed::delete_by_id(seed_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
