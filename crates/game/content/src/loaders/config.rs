//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Bundled `data/config.toml`.
pub const BUNDLED_CONFIG: &str = include_str!("../../data/config.toml");

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a [`GameConfig`] from a TOML file.
    ///
    /// Missing tables and keys take their defaults, so an empty file is a
    /// valid configuration.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn bundled() -> LoadResult<GameConfig> {
        Self::parse(BUNDLED_CONFIG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::BossPolicy;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn bundled_config_matches_defaults() {
        assert_eq!(ConfigLoader::bundled().unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_tables_override_only_given_keys() {
        let config = ConfigLoader::parse(
            r#"
            [generator]
            room_count = 4
            boss = "AfterHostagesRescued"

            [combat]
            trigger_radius = 3.5
            "#,
        )
        .unwrap();

        assert_eq!(config.generator.room_count, 4);
        assert_eq!(config.generator.boss, BossPolicy::AfterHostagesRescued);
        assert_eq!(config.generator.width, 100);
        assert_eq!(config.combat.trigger_radius, 3.5);
        assert_eq!(config.combat.max_step, 1);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ConfigLoader::parse(
            r#"
            [generator]
            min_room_size = 12
            max_room_size = 6
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("room size"), "{err}");
    }
}
