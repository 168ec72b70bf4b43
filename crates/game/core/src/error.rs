//! Error types surfaced by game-core.
//!
//! Generation and combat recover locally (a spawn that does not fit is
//! skipped, an illegal move is a no-op) and never return errors. The only
//! failures a host sees are configuration it cannot run with and level data
//! it cannot import.

use crate::state::{EntityId, Position};

/// How a host should treat an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input; reject it and keep running.
    Validation,
    /// The game cannot start with this input.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }
}

/// Common classification shared by every game-core error.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the variant, for logs and tests.
    fn error_code(&self) -> &'static str;
}

/// Configuration the generator or progression system cannot run with.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("map dimensions must be non-zero, got {width}x{height}")]
    EmptyMap { width: u32, height: u32 },

    #[error("map of {width}x{height} exceeds the cell limit")]
    MapTooLarge { width: u32, height: u32 },

    #[error("room size range is empty: min {min} > max {max}")]
    RoomSizeRange { min: u32, max: u32 },

    #[error("minimum room size must be at least 1")]
    ZeroRoomSize,

    #[error("spawn rule for {category} has min {min} > max {max}")]
    SpawnRange {
        category: &'static str,
        min: u32,
        max: u32,
    },

    #[error("spawn chance for {category} must be within [0, 1]")]
    SpawnChance { category: &'static str },

    #[error("weight table for {0} has no positive weights")]
    EmptyWeights(&'static str),

    #[error("experience multiplier must be at least 1")]
    XpMultiplier,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMap { .. } => "CONFIG_EMPTY_MAP",
            Self::MapTooLarge { .. } => "CONFIG_MAP_TOO_LARGE",
            Self::RoomSizeRange { .. } => "CONFIG_ROOM_SIZE_RANGE",
            Self::ZeroRoomSize => "CONFIG_ZERO_ROOM_SIZE",
            Self::SpawnRange { .. } => "CONFIG_SPAWN_RANGE",
            Self::SpawnChance { .. } => "CONFIG_SPAWN_CHANCE",
            Self::EmptyWeights(_) => "CONFIG_EMPTY_WEIGHTS",
            Self::XpMultiplier => "CONFIG_XP_MULTIPLIER",
        }
    }
}

/// Exported level data that does not describe a valid level.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("map dimensions must be non-zero, got {width}x{height}")]
    EmptyMap { width: u32, height: u32 },

    #[error("map of {width}x{height} exceeds the cell limit")]
    MapTooLarge { width: u32, height: u32 },

    #[error("room {index} does not fit inside the map")]
    RoomOutOfBounds { index: usize },

    #[error("{category} spawn at {position} is outside the map")]
    SpawnOutOfBounds {
        category: &'static str,
        position: Position,
    },

    #[error("{category} spawn at {position} is not walkable")]
    SpawnNotWalkable {
        category: &'static str,
        position: Position,
    },

    #[error("{category} spawn uses the reserved player id")]
    ReservedId { category: &'static str },

    #[error("entity id {0} is used by more than one spawn")]
    DuplicateId(EntityId),
}

impl GameError for ImportError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMap { .. } => "IMPORT_EMPTY_MAP",
            Self::MapTooLarge { .. } => "IMPORT_MAP_TOO_LARGE",
            Self::RoomOutOfBounds { .. } => "IMPORT_ROOM_OUT_OF_BOUNDS",
            Self::SpawnOutOfBounds { .. } => "IMPORT_SPAWN_OUT_OF_BOUNDS",
            Self::SpawnNotWalkable { .. } => "IMPORT_SPAWN_NOT_WALKABLE",
            Self::ReservedId { .. } => "IMPORT_RESERVED_ID",
            Self::DuplicateId(_) => "IMPORT_DUPLICATE_ID",
        }
    }
}
