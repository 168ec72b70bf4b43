use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::error::ImportError;
use crate::state::Position;

use super::generator::carve;
use super::{BossSpawn, EnemySpawn, Grid, ItemSpawn, Room, SpawnManifest};

/// A generated (or imported) level: walkability, rooms in placement order,
/// and the initial spawn manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    seed: u64,
    grid: Grid,
    rooms: Vec<Room>,
    spawns: SpawnManifest,
}

/// Serializable description of a level, sufficient to rebuild it without
/// re-running the generator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelExport {
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    pub rooms: Vec<Room>,
    pub enemy_spawns: Vec<EnemySpawn>,
    pub hostage_spawns: Vec<Position>,
    pub item_spawns: Vec<ItemSpawn>,
    pub boss: Option<BossSpawn>,
}

impl Level {
    pub(crate) fn from_parts(
        seed: u64,
        grid: Grid,
        rooms: Vec<Room>,
        spawns: SpawnManifest,
    ) -> Self {
        Self {
            seed,
            grid,
            rooms,
            spawns,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn spawns(&self) -> &SpawnManifest {
        &self.spawns
    }

    /// Moves the manifest out, leaving an empty one behind.
    pub fn take_spawns(&mut self) -> SpawnManifest {
        std::mem::take(&mut self.spawns)
    }

    /// Where a new player starts: the center of the first room.
    pub fn start_position(&self) -> Option<Position> {
        self.rooms.first().map(Room::center)
    }

    pub fn export(&self) -> LevelExport {
        self.export_with(&self.spawns)
    }

    /// Exports this level's layout with a caller-supplied manifest, typically
    /// the spawns still alive in a running game.
    pub fn export_with(&self, spawns: &SpawnManifest) -> LevelExport {
        LevelExport {
            seed: self.seed,
            width: self.grid.width(),
            height: self.grid.height(),
            rooms: self.rooms.clone(),
            enemy_spawns: spawns.enemies.clone(),
            hostage_spawns: spawns.hostages.clone(),
            item_spawns: spawns.items.clone(),
            boss: spawns.boss,
        }
    }

    /// Rebuilds a level from exported data. Corridors are re-derived from
    /// consecutive room centers; no randomness is involved.
    pub fn import(export: LevelExport) -> Result<Self, ImportError> {
        let LevelExport {
            seed,
            width,
            height,
            rooms,
            enemy_spawns,
            hostage_spawns,
            item_spawns,
            boss,
        } = export;

        if width == 0 || height == 0 {
            return Err(ImportError::EmptyMap { width, height });
        }
        if Grid::cell_count(width, height).is_none() {
            return Err(ImportError::MapTooLarge { width, height });
        }
        for (index, room) in rooms.iter().enumerate() {
            let fits = room.origin.x >= 0
                && room.origin.y >= 0
                && room.origin.x as i64 + room.width as i64 <= width as i64
                && room.origin.y as i64 + room.height as i64 <= height as i64;
            if !fits {
                return Err(ImportError::RoomOutOfBounds { index });
            }
        }

        let grid = carve(width, height, &rooms);
        let spawns = SpawnManifest {
            enemies: enemy_spawns,
            hostages: hostage_spawns,
            items: item_spawns,
            boss,
        };

        let placed = spawns
            .enemies
            .iter()
            .map(|e| ("enemy", e.position))
            .chain(spawns.hostages.iter().map(|p| ("hostage", *p)))
            .chain(spawns.items.iter().map(|i| ("item", i.position)))
            .chain(spawns.boss.iter().map(|b| ("boss", b.position)));
        for (category, position) in placed {
            if !grid.contains(position) {
                return Err(ImportError::SpawnOutOfBounds { category, position });
            }
            if !grid.is_walkable(position) {
                return Err(ImportError::SpawnNotWalkable { category, position });
            }
        }

        let ids = spawns
            .enemies
            .iter()
            .map(|e| ("enemy", e.id))
            .chain(spawns.boss.iter().map(|b| ("boss", b.id)));
        let mut seen = HashSet::new();
        for (category, id) in ids {
            if id.is_player() {
                return Err(ImportError::ReservedId { category });
            }
            if !seen.insert(id) {
                return Err(ImportError::DuplicateId(id));
            }
        }

        Ok(Self::from_parts(seed, grid, rooms, spawns))
    }

    /// SHA-256 over dimensions, walkability, rooms and spawns.
    ///
    /// Two levels with equal fingerprints are interchangeable for play; the
    /// seed itself is not hashed so an imported level matches its source.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"dungeon-level/v1");
        hasher.update(self.grid.width().to_le_bytes());
        hasher.update(self.grid.height().to_le_bytes());
        hasher.update(
            self.grid
                .raw_cells()
                .iter()
                .map(|walkable| u8::from(*walkable))
                .collect::<Vec<_>>(),
        );

        hasher.update((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            hash_position(&mut hasher, room.origin);
            hasher.update(room.width.to_le_bytes());
            hasher.update(room.height.to_le_bytes());
            hasher.update([room.kind as u8]);
        }

        let spawns = &self.spawns;
        hasher.update((spawns.enemies.len() as u32).to_le_bytes());
        for enemy in &spawns.enemies {
            hasher.update(enemy.id.0.to_le_bytes());
            hasher.update([enemy.kind as u8]);
            hash_position(&mut hasher, enemy.position);
        }
        hasher.update((spawns.hostages.len() as u32).to_le_bytes());
        for hostage in &spawns.hostages {
            hash_position(&mut hasher, *hostage);
        }
        hasher.update((spawns.items.len() as u32).to_le_bytes());
        for item in &spawns.items {
            hasher.update([item.kind as u8]);
            hash_position(&mut hasher, item.position);
        }
        match &spawns.boss {
            Some(boss) => {
                hasher.update([1, u8::from(boss.gated)]);
                hasher.update(boss.id.0.to_le_bytes());
                hash_position(&mut hasher, boss.position);
            }
            None => hasher.update([0]),
        }

        hasher.finalize().into()
    }
}

fn hash_position(hasher: &mut Sha256, position: Position) {
    hasher.update(position.x.to_le_bytes());
    hasher.update(position.y.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::map::{DungeonGenerator, EnemyKind, RoomKind};
    use crate::state::EntityId;

    fn level(seed: u64) -> Level {
        DungeonGenerator::new(
            GeneratorConfig::default()
                .with_size(60, 60)
                .with_room_count(6),
        )
        .generate(seed)
    }

    #[test]
    fn fingerprint_is_stable_and_sensitive() {
        let a = level(1);
        assert_eq!(a.fingerprint(), level(1).fingerprint());
        assert_ne!(a.fingerprint(), level(2).fingerprint());
    }

    #[test]
    fn take_spawns_leaves_empty_manifest() {
        let mut level = level(4);
        let original = level.spawns().clone();
        let taken = level.take_spawns();
        assert_eq!(taken, original);
        assert_eq!(level.spawns(), &SpawnManifest::default());
    }

    #[test]
    fn import_rejects_room_outside_map() {
        let export = LevelExport {
            seed: 0,
            width: 10,
            height: 10,
            rooms: vec![Room::new(Position::new(6, 6), 5, 5, RoomKind::Special)],
            enemy_spawns: Vec::new(),
            hostage_spawns: Vec::new(),
            item_spawns: Vec::new(),
            boss: None,
        };
        assert_eq!(
            Level::import(export),
            Err(ImportError::RoomOutOfBounds { index: 0 })
        );
    }

    #[test]
    fn import_rejects_spawn_in_rock() {
        let export = LevelExport {
            seed: 0,
            width: 10,
            height: 10,
            rooms: vec![Room::new(Position::new(1, 1), 3, 3, RoomKind::Special)],
            enemy_spawns: Vec::new(),
            hostage_spawns: vec![Position::new(8, 8)],
            item_spawns: Vec::new(),
            boss: None,
        };
        assert!(matches!(
            Level::import(export),
            Err(ImportError::SpawnNotWalkable {
                category: "hostage",
                ..
            })
        ));
    }

    fn single_room(enemy_spawns: Vec<EnemySpawn>, boss: Option<BossSpawn>) -> LevelExport {
        LevelExport {
            seed: 0,
            width: 10,
            height: 10,
            rooms: vec![Room::new(Position::new(1, 1), 6, 6, RoomKind::Special)],
            enemy_spawns,
            hostage_spawns: Vec::new(),
            item_spawns: Vec::new(),
            boss,
        }
    }

    fn enemy(id: u32, x: i32) -> EnemySpawn {
        EnemySpawn {
            id: EntityId(id),
            kind: EnemyKind::SecurityBot,
            position: Position::new(x, 3),
        }
    }

    #[test]
    fn import_rejects_oversized_map_without_allocating() {
        let export = LevelExport {
            width: 4_000_000,
            height: 4_000_000,
            rooms: Vec::new(),
            ..single_room(Vec::new(), None)
        };
        assert_eq!(
            Level::import(export),
            Err(ImportError::MapTooLarge {
                width: 4_000_000,
                height: 4_000_000
            })
        );
    }

    #[test]
    fn import_rejects_enemy_with_player_id() {
        assert_eq!(
            Level::import(single_room(vec![enemy(0, 2)], None)),
            Err(ImportError::ReservedId { category: "enemy" })
        );
    }

    #[test]
    fn import_rejects_duplicate_ids() {
        assert_eq!(
            Level::import(single_room(vec![enemy(3, 2), enemy(3, 4)], None)),
            Err(ImportError::DuplicateId(EntityId(3)))
        );

        let boss = BossSpawn {
            id: EntityId(3),
            position: Position::new(5, 5),
            gated: false,
        };
        assert_eq!(
            Level::import(single_room(vec![enemy(3, 2)], Some(boss))),
            Err(ImportError::DuplicateId(EntityId(3)))
        );
    }

    #[test]
    fn start_position_is_first_room_center() {
        let level = level(8);
        assert_eq!(level.start_position(), Some(level.rooms()[0].center()));
    }
}
