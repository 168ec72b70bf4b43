use std::collections::{HashSet, VecDeque};

use game_core::{
    BossPolicy, DungeonGenerator, GeneratorConfig, Level, LevelExport, Position, SpawnRule,
};

fn default_level(seed: u64) -> Level {
    DungeonGenerator::new(GeneratorConfig::default().with_room_count(15)).generate(seed)
}

/// Cells reachable from `start` over walkable 4-neighbours.
fn reachable(level: &Level, start: Position) -> HashSet<Position> {
    let grid = level.grid();
    let mut seen = HashSet::from([start]);
    let mut frontier = VecDeque::from([start]);
    while let Some(cell) = frontier.pop_front() {
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let next = cell.offset(dx, dy);
            if grid.is_walkable(next) && seen.insert(next) {
                frontier.push_back(next);
            }
        }
    }
    seen
}

#[test]
fn same_seed_produces_identical_levels() {
    let first = default_level(42);
    let second = default_level(42);

    assert_eq!(first.rooms(), second.rooms());
    assert_eq!(first.grid(), second.grid());
    assert_eq!(first.spawns(), second.spawns());
    assert_eq!(
        hex::encode(first.fingerprint()),
        hex::encode(second.fingerprint())
    );
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(default_level(42).rooms(), default_level(43).rooms());
}

#[test]
fn rooms_never_overlap() {
    for seed in [1, 42, 1337, 9001] {
        let level = default_level(seed);
        let rooms = level.rooms();
        assert!(!rooms.is_empty());
        assert!(rooms.len() <= 15);
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                assert!(!a.overlaps(b), "seed {seed}: {a:?} overlaps {b:?}");
            }
        }
    }
}

#[test]
fn every_room_is_reachable_from_the_first() {
    for seed in [7, 42, 2024] {
        let level = default_level(seed);
        let start = level.start_position().expect("level has rooms");
        let reached = reachable(&level, start);

        for room in level.rooms() {
            assert!(
                reached.contains(&room.center()),
                "seed {seed}: room at {} unreachable",
                room.origin
            );
        }
        assert_eq!(reached.len(), level.grid().walkable_count());
    }
}

#[test]
fn spawns_sit_on_distinct_walkable_cells() {
    let level = default_level(42);
    let spawns = level.spawns();
    let positions: Vec<Position> = spawns.positions().collect();
    let unique: HashSet<Position> = positions.iter().copied().collect();

    assert_eq!(positions.len(), unique.len());
    for position in positions {
        assert!(level.grid().is_walkable(position));
    }
}

#[test]
fn boss_takes_the_id_after_the_last_enemy() {
    let level = default_level(42);
    let spawns = level.spawns();
    let boss = spawns.boss.expect("boss placed in last room");
    let last_room = level.rooms().last().expect("rooms");

    assert!(last_room.contains(boss.position));
    assert!(!boss.gated);
    assert_eq!(boss.id.0 as usize, spawns.enemies.len() + 1);
    for (index, enemy) in spawns.enemies.iter().enumerate() {
        assert_eq!(enemy.id.0 as usize, index + 1);
        assert!(!last_room.contains(enemy.position));
    }
}

#[test]
fn gated_boss_policy_marks_the_boss() {
    let config = GeneratorConfig::default().with_boss(BossPolicy::AfterHostagesRescued);
    let level = DungeonGenerator::new(config).generate(42);
    assert!(level.spawns().boss.is_some_and(|b| b.gated));

    let config = GeneratorConfig {
        hostages: Some(SpawnRule::new(1.0, 1, 1)),
        ..GeneratorConfig::default().with_boss(BossPolicy::Disabled)
    };
    let level = DungeonGenerator::new(config).generate(42);
    assert!(level.spawns().boss.is_none());
    assert_eq!(level.spawns().hostages.len(), level.rooms().len());
}

#[test]
fn export_then_import_rebuilds_the_same_level() {
    let level = default_level(42);
    let export: LevelExport = level.export();

    let imported = Level::import(export.clone()).expect("exported level imports");

    assert_eq!(imported.rooms(), level.rooms());
    assert_eq!(imported.grid(), level.grid());
    assert_eq!(imported.spawns(), level.spawns());
    assert_eq!(imported.fingerprint(), level.fingerprint());
    assert_eq!(imported.export(), export);
}
