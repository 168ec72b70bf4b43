//! Enemy catalog loader.

use std::path::Path;

use game_core::{EnemyCatalog, EnemyKind};
use tracing::warn;

use crate::loaders::{LoadResult, read_file};

/// Bundled `data/enemies.ron`.
pub const BUNDLED_ENEMIES: &str = include_str!("../../data/enemies.ron");

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load an enemy catalog from a RON file.
    ///
    /// The file is a list of templates; a later entry for the same kind
    /// replaces an earlier one. Kinds the file omits resolve to their
    /// built-in template at spawn time.
    pub fn load(path: &Path) -> LoadResult<EnemyCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid enemy catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<EnemyCatalog> {
        let catalog: EnemyCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        for template in catalog.templates() {
            if template.stats.current_health > template.stats.max_health {
                anyhow::bail!(
                    "{} starts with {} health above its maximum {}",
                    template.kind,
                    template.stats.current_health,
                    template.stats.max_health
                );
            }
            if template.stats.max_health == 0 {
                anyhow::bail!("{} has no health", template.kind);
            }
        }
        if catalog.get(EnemyKind::Boss).is_none() {
            warn!("enemy catalog has no boss entry, using the built-in boss");
        }
        Ok(catalog)
    }

    pub fn bundled() -> LoadResult<EnemyCatalog> {
        Self::parse(BUNDLED_ENEMIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Behavior, EnemyTemplate};

    #[test]
    fn bundled_catalog_matches_builtins() {
        assert_eq!(EnemyLoader::bundled().unwrap(), EnemyCatalog::default());
    }

    #[test]
    fn profile_and_reward_are_optional() {
        let catalog = EnemyLoader::parse(
            r#"[
                (
                    kind: PatrolBot,
                    stats: (
                        max_health: 12,
                        current_health: 12,
                        attack: 4,
                        defense: 1,
                        speed: 9,
                        accuracy: 60,
                    ),
                ),
            ]"#,
        )
        .unwrap();

        let patrol = catalog.resolve(EnemyKind::PatrolBot);
        assert_eq!(patrol.stats.max_health, 12);
        assert_eq!(patrol.profile, None);
        assert_eq!(patrol.reward.score, 0);
        assert_eq!(
            catalog.resolve(EnemyKind::HeavyBot),
            EnemyTemplate::builtin(EnemyKind::HeavyBot)
        );
    }

    #[test]
    fn profiles_deserialize_by_behavior_name() {
        let catalog = EnemyLoader::parse(
            r#"[
                (
                    kind: SecurityBot,
                    stats: (
                        max_health: 50,
                        current_health: 50,
                        attack: 12,
                        defense: 5,
                        speed: 8,
                        accuracy: 70,
                    ),
                    profile: Some((behavior: Random, attack_range: 2, move_range: 4)),
                    reward: (xp: 7, score: 30),
                ),
            ]"#,
        )
        .unwrap();

        let bot = catalog.resolve(EnemyKind::SecurityBot);
        let profile = bot.profile.unwrap();
        assert_eq!(profile.behavior, Behavior::Random);
        assert_eq!(profile.attack_range, 2);
        assert_eq!(bot.reward.xp, 7);
    }

    #[test]
    fn overfull_health_is_rejected() {
        let err = EnemyLoader::parse(
            r#"[
                (
                    kind: HeavyBot,
                    stats: (
                        max_health: 10,
                        current_health: 11,
                        attack: 1,
                        defense: 1,
                        speed: 1,
                        accuracy: 1,
                    ),
                ),
            ]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("HeavyBot"), "{err}");
    }
}
