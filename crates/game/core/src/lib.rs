//! Deterministic rules for a seeded, turn-based dungeon crawler.
//!
//! `game-core` covers procedural level generation ([`map`]), the combat
//! state machine ([`combat`]), enemy decision making ([`ai`]) and player
//! progression ([`progression`]). It performs no I/O: hosts supply terrain,
//! randomness and progression callbacks through explicit seams, and every
//! random draw comes from a caller-owned seeded stream.
pub mod ai;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod map;
pub mod progression;
pub mod state;
pub mod stats;

pub use ai::{AiPolicy, AiProfile, Behavior, DecisionRolls};
pub use combat::{
    Action, ActionOutcome, ActionReport, AttackReport, CombatEnv, CombatHooks, CombatOutcome,
    CombatPhase, CombatSession, Combatant, NoHooks, Role,
};
pub use config::{BossPolicy, CombatRules, GameConfig, GeneratorConfig, ProgressionConfig, SpawnRule};
pub use env::{EnemyCatalog, EnemyTemplate, Obstructed, OpenFloor, Reward, Terrain};
pub use error::{ConfigError, ErrorSeverity, GameError, ImportError};
pub use map::{
    BossSpawn, DungeonGenerator, EnemyKind, EnemySpawn, Grid, ItemKind, ItemSpawn, Level,
    LevelExport, Room, RoomKind, SpawnManifest, WeightTable,
};
pub use progression::{
    Experience, HighScore, HostageTracker, Inventory, PickupEffect, Progress, ScoreLedger,
};
pub use state::{Direction, EntityId, Position};
pub use stats::{LevelGrowth, SharedStats, StatKind, Stats};
