//! Event types for different topics.

use game_core::{
    ActionReport, BossSpawn, CombatOutcome, EntityId, ItemKind, PickupEffect, Position,
};
use serde::{Deserialize, Serialize};

/// Events raised while exploring the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorldEvent {
    PlayerMoved {
        from: Position,
        to: Position,
    },
    ItemPicked {
        item: ItemKind,
        effect: PickupEffect,
    },
    HostageRescued {
        rescued: u32,
        total: u32,
    },
    /// A carried heal item was used outside combat.
    Healed {
        restored: u32,
    },
    /// The gated boss appeared after the last hostage was rescued.
    BossReleased(BossSpawn),
    LevelUp {
        level: u32,
    },
}

/// Events raised by the encounter driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CombatEvent {
    Started {
        enemies: Vec<EntityId>,
        boss: bool,
    },
    /// One resolved action, player or enemy.
    Resolved(ActionReport),
    Ended {
        /// `None` when the encounter was aborted.
        outcome: Option<CombatOutcome>,
        rounds: u32,
    },
}

/// Session lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    NewGame {
        seed: u64,
        rooms: usize,
        enemies: usize,
        hostages: usize,
        items: usize,
    },
    Saved {
        slot: String,
    },
    Loaded {
        slot: String,
        /// False when the level had to be regenerated from its seed.
        restored_map: bool,
    },
    ScoreRecorded {
        score: u64,
        rank: Option<usize>,
    },
    GameOver {
        won: bool,
        score: u64,
    },
}
