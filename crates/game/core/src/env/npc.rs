use crate::ai::{AiProfile, Behavior};
use crate::map::EnemyKind;
use crate::stats::Stats;

/// Granted to the host when an enemy of a template dies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub xp: u32,
    pub score: u64,
}

impl Reward {
    pub const fn new(xp: u32, score: u64) -> Self {
        Self { xp, score }
    }
}

/// Static description of one enemy archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub kind: EnemyKind,
    pub stats: Stats,
    /// `None` falls back to the built-in adjacent-attack policy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub profile: Option<AiProfile>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward: Reward,
}

impl EnemyTemplate {
    /// Shipped template for `kind`.
    pub fn builtin(kind: EnemyKind) -> Self {
        let (stats, behavior, reward) = match kind {
            EnemyKind::SecurityBot => (
                Stats::new(50, 12, 5, 8, 70),
                Behavior::Aggressive,
                Reward::new(10, 50),
            ),
            EnemyKind::PatrolBot => (
                Stats::new(30, 8, 3, 10, 75),
                Behavior::Cautious,
                Reward::new(10, 50),
            ),
            EnemyKind::HeavyBot => (
                Stats::new(100, 20, 10, 5, 65),
                Behavior::Defensive,
                Reward::new(20, 80),
            ),
            EnemyKind::Boss => (
                Stats::new(200, 25, 15, 7, 80),
                Behavior::Aggressive,
                Reward::new(100, 500),
            ),
        };
        Self {
            kind,
            stats,
            profile: Some(AiProfile::new(behavior, 1, 3)),
            reward,
        }
    }
}

/// Lookup of enemy templates by kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EnemyCatalog {
    templates: Vec<EnemyTemplate>,
}

impl EnemyCatalog {
    /// Later templates for the same kind replace earlier ones.
    pub fn new(templates: impl IntoIterator<Item = EnemyTemplate>) -> Self {
        let mut catalog = Self {
            templates: Vec::new(),
        };
        for template in templates {
            catalog.insert(template);
        }
        catalog
    }

    pub fn insert(&mut self, template: EnemyTemplate) {
        match self.templates.iter_mut().find(|t| t.kind == template.kind) {
            Some(slot) => *slot = template,
            None => self.templates.push(template),
        }
    }

    pub fn get(&self, kind: EnemyKind) -> Option<&EnemyTemplate> {
        self.templates.iter().find(|t| t.kind == kind)
    }

    /// Catalog entry for `kind`, or the shipped template when absent.
    pub fn resolve(&self, kind: EnemyKind) -> EnemyTemplate {
        self.get(kind)
            .copied()
            .unwrap_or_else(|| EnemyTemplate::builtin(kind))
    }

    pub fn templates(&self) -> &[EnemyTemplate] {
        &self.templates
    }
}

impl Default for EnemyCatalog {
    fn default() -> Self {
        use strum::IntoEnumIterator;
        Self::new(EnemyKind::iter().map(EnemyTemplate::builtin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_covers_every_kind() {
        let catalog = EnemyCatalog::default();
        assert_eq!(catalog.templates().len(), 4);
        let boss = catalog.resolve(EnemyKind::Boss);
        assert_eq!(boss.stats.max_health, 200);
        assert_eq!(boss.stats.accuracy, 80);
    }

    #[test]
    fn insert_replaces_existing_kind() {
        let mut catalog = EnemyCatalog::default();
        let mut weak = EnemyTemplate::builtin(EnemyKind::PatrolBot);
        weak.stats = Stats::new(1, 1, 0, 1, 10);
        catalog.insert(weak);

        assert_eq!(catalog.templates().len(), 4);
        assert_eq!(catalog.resolve(EnemyKind::PatrolBot).stats.max_health, 1);
    }

    #[test]
    fn missing_kind_resolves_to_builtin() {
        let catalog = EnemyCatalog::new([]);
        assert_eq!(
            catalog.resolve(EnemyKind::HeavyBot),
            EnemyTemplate::builtin(EnemyKind::HeavyBot)
        );
    }
}
