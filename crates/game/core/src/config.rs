//! Tunable parameters for generation, combat and progression.
//!
//! Every field has a default matching the shipped game, so an empty TOML
//! document deserializes to a playable configuration.
use crate::error::ConfigError;
use crate::map::{EnemyKind, Grid, ItemKind, WeightTable};
use crate::stats::{LevelGrowth, Stats};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub generator: GeneratorConfig,
    pub combat: CombatRules,
    pub progression: ProgressionConfig,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        self.progression.validate()
    }
}

/// Independent spawn roll for one category in one room.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnRule {
    /// Probability in `[0, 1]` that the room gets any of this category.
    pub chance: f64,
    pub min: u32,
    pub max: u32,
}

impl SpawnRule {
    pub const fn new(chance: f64, min: u32, max: u32) -> Self {
        Self { chance, min, max }
    }

    fn validate(&self, category: &'static str) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.chance) {
            return Err(ConfigError::SpawnChance { category });
        }
        if self.min > self.max {
            return Err(ConfigError::SpawnRange {
                category,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Where the boss goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossPolicy {
    /// No boss; the last room is populated like any other.
    Disabled,
    /// One boss in the last room, present from the start.
    #[default]
    LastRoom,
    /// The boss position is reserved in the last room, but the boss only
    /// appears once every hostage has been rescued.
    AfterHostagesRescued,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    pub width: u32,
    pub height: u32,
    pub room_count: u32,
    pub min_room_size: u32,
    pub max_room_size: u32,
    /// `None` disables the category entirely.
    pub enemies: Option<SpawnRule>,
    pub hostages: Option<SpawnRule>,
    pub items: Option<SpawnRule>,
    /// Rejection-sampling budget per spawned entity.
    pub spawn_attempts: u32,
    pub boss: BossPolicy,
    pub enemy_weights: WeightTable<EnemyKind>,
    pub item_weights: WeightTable<ItemKind>,
}

impl GeneratorConfig {
    pub const DEFAULT_WIDTH: u32 = 100;
    pub const DEFAULT_HEIGHT: u32 = 100;
    pub const DEFAULT_ROOM_COUNT: u32 = 15;
    pub const DEFAULT_SPAWN_ATTEMPTS: u32 = 50;

    /// Room placement attempts granted per requested room.
    pub const ATTEMPTS_PER_ROOM: u32 = 10;

    pub fn with_room_count(mut self, room_count: u32) -> Self {
        self.room_count = room_count;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_boss(mut self, boss: BossPolicy) -> Self {
        self.boss = boss;
        self
    }

    /// Rejects configuration the generator cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyMap {
                width: self.width,
                height: self.height,
            });
        }
        if Grid::cell_count(self.width, self.height).is_none() {
            return Err(ConfigError::MapTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.min_room_size == 0 {
            return Err(ConfigError::ZeroRoomSize);
        }
        if self.min_room_size > self.max_room_size {
            return Err(ConfigError::RoomSizeRange {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        for (category, rule) in [
            ("enemies", &self.enemies),
            ("hostages", &self.hostages),
            ("items", &self.items),
        ] {
            if let Some(rule) = rule {
                rule.validate(category)?;
            }
        }
        if self.enemies.is_some() && self.enemy_weights.total() == 0 {
            return Err(ConfigError::EmptyWeights("enemies"));
        }
        if self.items.is_some() && self.item_weights.total() == 0 {
            return Err(ConfigError::EmptyWeights("items"));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            room_count: Self::DEFAULT_ROOM_COUNT,
            min_room_size: 5,
            max_room_size: 15,
            enemies: Some(SpawnRule::new(0.6, 0, 3)),
            hostages: Some(SpawnRule::new(0.4, 0, 2)),
            items: Some(SpawnRule::new(0.5, 0, 2)),
            spawn_attempts: Self::DEFAULT_SPAWN_ATTEMPTS,
            boss: BossPolicy::default(),
            enemy_weights: WeightTable::default_enemies(),
            item_weights: WeightTable::default_items(),
        }
    }
}

/// Movement and encounter rules used while resolving actions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatRules {
    /// Largest Manhattan distance a single move may cover.
    pub max_step: u32,
    /// Euclidean distance at which a nearby enemy starts an encounter.
    pub trigger_radius: f32,
    /// Health restored by one heal item.
    pub heal_amount: u32,
}

impl CombatRules {
    /// Radius within which enemies join an encounter once it triggers.
    pub fn gather_radius(&self) -> f32 {
        self.trigger_radius * 2.0
    }
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            max_step: 1,
            trigger_radius: 2.0,
            heal_amount: 50,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionConfig {
    /// Starting stat block of a new player.
    pub player: Stats,
    pub growth: LevelGrowth,
    pub base_xp: u32,
    pub xp_multiplier: f64,
    pub ledger_capacity: usize,
    pub treasure_score: u64,
    /// Score for winning an ordinary encounter.
    pub encounter_score: u64,
    /// Score for defeating the boss.
    pub victory_score: u64,
}

impl ProgressionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.xp_multiplier < 1.0 {
            return Err(ConfigError::XpMultiplier);
        }
        Ok(())
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            player: Stats::default(),
            growth: LevelGrowth::default(),
            base_xp: 100,
            xp_multiplier: 1.5,
            ledger_capacity: 10,
            treasure_score: 200,
            encounter_score: 100,
            victory_score: 500,
        }
    }
}
