use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::{BossPolicy, GeneratorConfig, SpawnRule};
use crate::state::{EntityId, Position};

use super::{BossSpawn, EnemySpawn, Grid, ItemSpawn, Level, Room, RoomKind, SpawnManifest};

/// Seeded procedural level generator.
///
/// All randomness comes from one `ChaCha8Rng` stream drawn in a fixed order
/// (room sizes and origins, room kinds, then per-room spawn rolls), so the
/// same seed and configuration always produce the same [`Level`].
#[derive(Clone, Debug, Default)]
pub struct DungeonGenerator {
    config: GeneratorConfig,
}

impl DungeonGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self, seed: u64) -> Level {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let rooms = self.place_rooms(&mut rng);
        let grid = carve(self.config.width, self.config.height, &rooms);
        let spawns = self.populate(&rooms, &grid, &mut rng);

        debug!(
            seed,
            rooms = rooms.len(),
            enemies = spawns.enemies.len(),
            hostages = spawns.hostages.len(),
            items = spawns.items.len(),
            boss = spawns.boss.is_some(),
            "generated level"
        );
        Level::from_parts(seed, grid, rooms, spawns)
    }

    fn place_rooms(&self, rng: &mut ChaCha8Rng) -> Vec<Room> {
        let config = &self.config;
        let attempts = config.room_count.saturating_mul(GeneratorConfig::ATTEMPTS_PER_ROOM);
        let mut rooms: Vec<Room> = Vec::with_capacity(config.room_count as usize);

        for _ in 0..attempts {
            if rooms.len() as u32 >= config.room_count {
                break;
            }
            let width = rng.gen_range(config.min_room_size..=config.max_room_size);
            let height = rng.gen_range(config.min_room_size..=config.max_room_size);

            let max_x = config.width as i64 - width as i64 - 1;
            let max_y = config.height as i64 - height as i64 - 1;
            if max_x <= 1 || max_y <= 1 {
                continue;
            }
            let origin = Position::new(
                rng.gen_range(1..max_x) as i32,
                rng.gen_range(1..max_y) as i32,
            );
            let candidate = Room::new(origin, width, height, RoomKind::ControlRoom);
            if rooms.iter().all(|room| !room.overlaps(&candidate)) {
                rooms.push(candidate);
            }
        }

        if (rooms.len() as u32) < config.room_count {
            debug!(
                placed = rooms.len(),
                requested = config.room_count,
                "room placement ran out of attempts"
            );
        }

        let last = rooms.len().saturating_sub(1);
        for (index, room) in rooms.iter_mut().enumerate() {
            room.kind = if index == last {
                RoomKind::Special
            } else {
                RoomKind::ORDINARY[rng.gen_range(0..RoomKind::ORDINARY.len())]
            };
        }
        rooms
    }

    fn populate(&self, rooms: &[Room], grid: &Grid, rng: &mut ChaCha8Rng) -> SpawnManifest {
        let config = &self.config;
        let mut manifest = SpawnManifest::default();
        let mut next_id = EntityId::PLAYER.0 + 1;
        let boss_room = match config.boss {
            BossPolicy::Disabled => None,
            _ => rooms.len().checked_sub(1),
        };

        for (index, room) in rooms.iter().enumerate() {
            if Some(index) == boss_room {
                continue;
            }

            for _ in 0..roll_count(config.enemies.as_ref(), rng) {
                let Some(kind) = config.enemy_weights.pick(rng) else {
                    continue;
                };
                match self.sample_cell(room, grid, &manifest, rng) {
                    Some(position) => {
                        manifest.enemies.push(EnemySpawn {
                            id: EntityId(next_id),
                            kind,
                            position,
                        });
                        next_id += 1;
                    }
                    None => debug!(room = index, %kind, "no free cell for enemy"),
                }
            }

            for _ in 0..roll_count(config.hostages.as_ref(), rng) {
                match self.sample_cell(room, grid, &manifest, rng) {
                    Some(position) => manifest.hostages.push(position),
                    None => debug!(room = index, "no free cell for hostage"),
                }
            }

            for _ in 0..roll_count(config.items.as_ref(), rng) {
                let Some(kind) = config.item_weights.pick(rng) else {
                    continue;
                };
                match self.sample_cell(room, grid, &manifest, rng) {
                    Some(position) => manifest.items.push(ItemSpawn { kind, position }),
                    None => debug!(room = index, %kind, "no free cell for item"),
                }
            }
        }

        if let Some(index) = boss_room {
            let room = &rooms[index];
            let position = self
                .sample_cell(room, grid, &manifest, rng)
                .unwrap_or_else(|| room.center());
            manifest.boss = Some(BossSpawn {
                id: EntityId(next_id),
                position,
                gated: config.boss == BossPolicy::AfterHostagesRescued,
            });
        }

        manifest
    }

    /// Rejection-samples a walkable, unused interior cell of `room`.
    fn sample_cell(
        &self,
        room: &Room,
        grid: &Grid,
        manifest: &SpawnManifest,
        rng: &mut ChaCha8Rng,
    ) -> Option<Position> {
        let (xs, ys) = room.interior();
        if xs.is_empty() || ys.is_empty() {
            return None;
        }
        (0..self.config.spawn_attempts)
            .map(|_| Position::new(rng.gen_range(xs.clone()), rng.gen_range(ys.clone())))
            .find(|cell| grid.is_walkable(*cell) && !manifest.is_occupied(*cell))
    }
}

/// Number of entities a room receives for one category; zero when the
/// category is disabled or the chance roll fails.
fn roll_count(rule: Option<&SpawnRule>, rng: &mut ChaCha8Rng) -> u32 {
    let Some(rule) = rule else {
        return 0;
    };
    if rule.min > rule.max || rng.gen_range(0.0..1.0) >= rule.chance {
        return 0;
    }
    rng.gen_range(rule.min..=rule.max)
}

/// Carves rooms, then an L-shaped corridor between each consecutive pair of
/// room centers. Shared by generation and import.
pub(crate) fn carve(width: u32, height: u32, rooms: &[Room]) -> Grid {
    let mut grid = Grid::new(width, height);
    for room in rooms {
        grid.carve_room(room);
    }
    for pair in rooms.windows(2) {
        grid.carve_corridor(pair[0].center(), pair[1].center());
    }
    grid
}
