#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};

use game_content::GameContent;
use game_core::{
    BossPolicy, Direction, GameConfig, GeneratorConfig, Position, SpawnRule, Stats, WeightTable,
    EnemyKind,
};
use runtime::{Game, GameBuilder, MoveReport};

/// Small level, no stray pickups, one enemy kind.
pub fn content(player: Stats) -> GameContent {
    let mut config = GameConfig::default();
    config.generator = GeneratorConfig {
        enemies: Some(SpawnRule::new(1.0, 1, 1)),
        hostages: None,
        items: None,
        boss: BossPolicy::Disabled,
        enemy_weights: WeightTable::new([(EnemyKind::SecurityBot, 1)]),
        ..GeneratorConfig::default().with_size(60, 60).with_room_count(6)
    };
    config.progression.player = player;
    GameContent {
        config,
        ..GameContent::default()
    }
}

pub fn champion() -> Stats {
    Stats::new(1000, 500, 50, 10, 100)
}

pub fn game(content: GameContent) -> Game {
    GameBuilder::new()
        .content(content)
        .build()
        .expect("game should build")
}

/// Walks toward `target` one step at a time along a shortest path, stopping
/// on arrival, when an encounter starts, or when no path remains.
pub fn walk_to(game: &mut Game, target: Position) -> Option<MoveReport> {
    let mut last = None;
    for _ in 0..10_000 {
        let position = game.player_position()?;
        let direction = if position != target {
            first_step(game, position, target)?
        } else if last.is_none() {
            // Already standing on it; step off and come back.
            step_off(game, position)?
        } else {
            return last;
        };
        let report = game.move_player(direction).expect("exploring");
        let started = report.encounter.is_some();
        let moved = report.moved;
        last = Some(report);
        if started || !moved {
            return last;
        }
    }
    last
}

fn step_off(game: &Game, from: Position) -> Option<Direction> {
    let grid = game.level()?.grid();
    Direction::ALL
        .into_iter()
        .find(|direction| grid.is_walkable(from.step(*direction)))
}

fn first_step(game: &Game, from: Position, to: Position) -> Option<Direction> {
    let grid = game.level()?.grid();
    let spawns = game.spawns()?;
    let blocked: HashSet<Position> = spawns
        .enemies
        .iter()
        .map(|e| e.position)
        .chain(spawns.boss.iter().filter(|b| !b.gated).map(|b| b.position))
        .filter(|p| *p != to)
        .collect();

    let mut came_from: HashMap<Position, (Position, Direction)> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    let mut seen = HashSet::from([from]);
    while let Some(current) = queue.pop_front() {
        if current == to {
            break;
        }
        for direction in Direction::ALL {
            let next = current.step(direction);
            if grid.is_walkable(next) && !blocked.contains(&next) && seen.insert(next) {
                came_from.insert(next, (current, direction));
                queue.push_back(next);
            }
        }
    }

    let mut cursor = to;
    loop {
        let (previous, direction) = *came_from.get(&cursor)?;
        if previous == from {
            return Some(direction);
        }
        cursor = previous;
    }
}
