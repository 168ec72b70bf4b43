//! Persistent save record.

use game_core::{HostageTracker, Inventory, LevelExport, Position, Stats};
use serde::{Deserialize, Serialize};

/// Everything needed to resume a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    #[serde(default = "SaveRecord::current_version")]
    pub version: u32,
    pub player: PlayerSave,
    pub map: MapSave,
    pub score: u64,
    pub play_time_secs: u64,
    /// RFC 3339 timestamp.
    pub saved_at: String,
}

impl SaveRecord {
    pub const VERSION: u32 = 1;

    fn current_version() -> u32 {
        Self::VERSION
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSave {
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
    pub stats: Stats,
    pub level: u32,
    pub xp: u32,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub hostages: HostageTracker,
}

impl PlayerSave {
    /// Stats with `health`/`max_health` applied, clamped so the block stays
    /// consistent even if the file was edited by hand.
    pub fn restored_stats(&self) -> Stats {
        let mut stats = self.stats;
        stats.max_health = self.max_health;
        stats.current_health = self.health.min(self.max_health);
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSave {
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    /// Layout plus live spawns. Preferred over regeneration on load.
    #[serde(default)]
    pub full_map: Option<LevelExport>,
    /// Hex SHA-256 of the level as generated from `seed`.
    pub fingerprint: String,
}
