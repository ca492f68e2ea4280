//! Achievement catalog loading from config.toml
//!
//! The catalog is admin-authored: every `[[achievements]]` table in the configuration
//! file becomes one catalog entry. Entries are seeded into the database at startup
//! and existing entries (matched by name) are left untouched.

use crate::entities::AchievementType;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Achievement catalog entries to seed
    #[serde(default)]
    pub achievements: Vec<AchievementConfig>,
}

/// Configuration for a single catalog entry
#[derive(Debug, Deserialize, Clone)]
pub struct AchievementConfig {
    /// Display name, unique within the catalog
    pub name: String,
    /// What the player did to earn it
    pub description: Option<String>,
    /// Icon name rendered by the client
    pub icon: Option<String>,
    /// Achievement family (`explorer`, `collector`, ...)
    #[serde(rename = "type", default)]
    pub kind: AchievementType,
    /// Points awarded when unlocked
    #[serde(default = "default_points")]
    pub points: i32,
    /// Machine-readable unlock condition, stored as JSON
    pub requirement: Option<serde_json::Value>,
}

const fn default_points() -> i32 {
    10
}

/// Loads the achievement catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing or an achievement type is unknown
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses catalog configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_achievement_config() {
        let toml_str = r#"
            [[achievements]]
            name = "First Steps"
            description = "View your first seed"
            icon = "Footprints"
            type = "explorer"
            points = 10
            requirement = { action = "view_seed", count = 1 }

            [[achievements]]
            name = "Curator"
            type = "collector"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.achievements.len(), 2);

        let first = &config.achievements[0];
        assert_eq!(first.name, "First Steps");
        assert_eq!(first.kind, AchievementType::Explorer);
        assert_eq!(first.icon.as_deref(), Some("Footprints"));
        assert_eq!(
            first.requirement,
            Some(serde_json::json!({ "action": "view_seed", "count": 1 }))
        );

        let second = &config.achievements[1];
        assert_eq!(second.kind, AchievementType::Collector);
        assert_eq!(second.points, 10);
        assert!(second.description.is_none());
        assert!(second.requirement.is_none());
    }

    #[test]
    fn test_unknown_achievement_type_is_rejected() {
        let toml_str = r#"
            [[achievements]]
            name = "Oops"
            type = "wizard"
        "#;

        assert!(matches!(parse_config(toml_str), Err(Error::Config { .. })));
    }

    #[test]
    fn test_empty_config_has_no_achievements() {
        let config = parse_config("").unwrap();
        assert!(config.achievements.is_empty());
    }

    #[test]
    fn test_shipped_catalog_parses() {
        let config = parse_config(include_str!("../../config.toml")).unwrap();
        assert_eq!(config.achievements.len(), 8);
        for kind in [
            AchievementType::Explorer,
            AchievementType::Collector,
            AchievementType::Builder,
            AchievementType::Warrior,
            AchievementType::Social,
            AchievementType::Legendary,
        ] {
            assert!(config.achievements.iter().any(|a| a.kind == kind));
        }
    }
}
