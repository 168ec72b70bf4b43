//! ASCII rendering of a level.

use std::collections::HashMap;

use game_core::{EnemyKind, Grid, ItemKind, Position, SpawnManifest};

pub const PLAYER: char = '@';
pub const FLOOR: char = '.';
pub const WALL: char = '#';
pub const ROCK: char = ' ';
pub const HOSTAGE: char = 'h';

fn enemy_glyph(kind: EnemyKind) -> char {
    match kind {
        EnemyKind::SecurityBot => 's',
        EnemyKind::PatrolBot => 'p',
        EnemyKind::HeavyBot => 'H',
        EnemyKind::Boss => 'B',
    }
}

fn item_glyph(kind: ItemKind) -> char {
    match kind {
        ItemKind::Heal => '+',
        ItemKind::Weapon => '/',
        ItemKind::Defense => ']',
        ItemKind::Speed => '>',
        ItemKind::Accuracy => '*',
        ItemKind::Treasure => '$',
    }
}

/// One line per row. The player is drawn over everything, enemies over
/// items. A dormant boss is shown as `b`.
pub fn render(grid: &Grid, spawns: &SpawnManifest, player: Option<Position>) -> String {
    let mut overlay: HashMap<Position, char> = HashMap::new();
    for hostage in &spawns.hostages {
        overlay.insert(*hostage, HOSTAGE);
    }
    for item in &spawns.items {
        overlay.insert(item.position, item_glyph(item.kind));
    }
    for enemy in &spawns.enemies {
        overlay.insert(enemy.position, enemy_glyph(enemy.kind));
    }
    if let Some(boss) = spawns.boss {
        overlay.insert(boss.position, if boss.gated { 'b' } else { 'B' });
    }
    if let Some(player) = player {
        overlay.insert(player, PLAYER);
    }

    let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize);
    for y in 0..grid.height() as i32 {
        let row: String = (0..grid.width() as i32)
            .map(|x| {
                let position = Position::new(x, y);
                match overlay.get(&position) {
                    Some(glyph) => *glyph,
                    None if grid.is_walkable(position) => FLOOR,
                    None if grid.is_wall(position) => WALL,
                    None => ROCK,
                }
            })
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}
