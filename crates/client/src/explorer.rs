//! Breadth-first exploration toward the nearest thing worth visiting.

use std::collections::{HashMap, HashSet, VecDeque};

use game_core::{Direction, Grid, Position, SpawnManifest};

/// First step toward the closest pickup, hostage or enemy.
///
/// Pickups and hostages are reached by standing on them, enemies (and a
/// released boss) by standing next to them, which is enough to start an
/// encounter. When the closest goal is already satisfied by the current
/// position the player steps off so the next move can trigger it again.
/// Returns `None` once nothing reachable is left.
pub fn next_step(grid: &Grid, spawns: &SpawnManifest, from: Position) -> Option<Direction> {
    let hostiles: HashSet<Position> = spawns
        .enemies
        .iter()
        .map(|e| e.position)
        .chain(spawns.boss.iter().filter(|b| !b.gated).map(|b| b.position))
        .collect();
    let pickups: HashSet<Position> = spawns
        .hostages
        .iter()
        .copied()
        .chain(spawns.items.iter().map(|i| i.position))
        .collect();
    let open = |p: Position| grid.is_walkable(p) && !hostiles.contains(&p);

    let mut came_from: HashMap<Position, (Position, Direction)> = HashMap::new();
    let mut seen = HashSet::from([from]);
    let mut queue = VecDeque::from([from]);
    while let Some(current) = queue.pop_front() {
        let reached = pickups.contains(&current)
            || Direction::ALL
                .iter()
                .any(|d| hostiles.contains(&current.step(*d)));
        if reached {
            if current == from {
                return Direction::ALL.into_iter().find(|d| open(from.step(*d)));
            }
            return first_step(&came_from, from, current);
        }
        for direction in Direction::ALL {
            let next = current.step(direction);
            if open(next) && seen.insert(next) {
                came_from.insert(next, (current, direction));
                queue.push_back(next);
            }
        }
    }
    None
}

fn first_step(
    came_from: &HashMap<Position, (Position, Direction)>,
    from: Position,
    to: Position,
) -> Option<Direction> {
    let mut cursor = to;
    loop {
        let (previous, direction) = *came_from.get(&cursor)?;
        if previous == from {
            return Some(direction);
        }
        cursor = previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        BossSpawn, DungeonGenerator, EnemyKind, EnemySpawn, EntityId, GeneratorConfig, ItemKind,
        ItemSpawn, Level,
    };

    fn open_level() -> Level {
        DungeonGenerator::new(
            GeneratorConfig {
                enemies: None,
                hostages: None,
                items: None,
                ..GeneratorConfig::default().with_size(40, 40).with_room_count(4)
            }
            .with_boss(game_core::BossPolicy::Disabled),
        )
        .generate(5)
    }

    fn walk(level: &Level, spawns: &mut SpawnManifest, mut at: Position) -> Position {
        for _ in 0..10_000 {
            let Some(direction) = next_step(level.grid(), spawns, at) else {
                break;
            };
            at = at.step(direction);
            assert!(level.grid().is_walkable(at));
            spawns.items.retain(|i| i.position != at);
            spawns.hostages.retain(|h| *h != at);
        }
        at
    }

    #[test]
    fn collects_everything_then_stops() {
        let level = open_level();
        let start = level.start_position().unwrap();
        let far = level.rooms().last().unwrap().center();
        let mut spawns = SpawnManifest {
            items: vec![ItemSpawn {
                kind: ItemKind::Treasure,
                position: far,
            }],
            hostages: vec![start],
            ..SpawnManifest::default()
        };

        walk(&level, &mut spawns, start);
        assert!(spawns.items.is_empty());
        assert!(spawns.hostages.is_empty());
    }

    #[test]
    fn stops_next_to_an_enemy() {
        let level = open_level();
        let start = level.start_position().unwrap();
        let target = level.rooms().last().unwrap().center();
        let mut spawns = SpawnManifest {
            enemies: vec![EnemySpawn {
                id: EntityId(1),
                kind: EnemyKind::PatrolBot,
                position: target,
            }],
            ..SpawnManifest::default()
        };

        let mut at = start;
        for _ in 0..10_000 {
            if at.manhattan(target) == 1 {
                break;
            }
            at = at.step(next_step(level.grid(), &spawns, at).unwrap());
        }
        assert_eq!(at.manhattan(target), 1);
        spawns.enemies.clear();
        assert_eq!(next_step(level.grid(), &spawns, at), None);
    }

    #[test]
    fn dormant_boss_is_ignored() {
        let level = open_level();
        let spawns = SpawnManifest {
            boss: Some(BossSpawn {
                id: EntityId(9),
                position: level.rooms().last().unwrap().center(),
                gated: true,
            }),
            ..SpawnManifest::default()
        };
        assert_eq!(
            next_step(level.grid(), &spawns, level.start_position().unwrap()),
            None
        );
    }
}
