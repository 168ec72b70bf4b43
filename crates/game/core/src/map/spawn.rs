use rand::Rng;

use crate::state::{EntityId, Position};
use crate::stats::StatKind;

/// Enemy archetypes. [`EnemyKind::Boss`] is only placed by the boss policy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyKind {
    SecurityBot,
    PatrolBot,
    HeavyBot,
    Boss,
}

/// Pickups scattered through rooms.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Heal,
    Weapon,
    Defense,
    Speed,
    Accuracy,
    Treasure,
}

impl ItemKind {
    /// Stat raised on pickup, if this is a boost item.
    pub fn boosted_stat(self) -> Option<StatKind> {
        match self {
            ItemKind::Weapon => Some(StatKind::Attack),
            ItemKind::Defense => Some(StatKind::Defense),
            ItemKind::Speed => Some(StatKind::Speed),
            ItemKind::Accuracy => Some(StatKind::Accuracy),
            ItemKind::Heal | ItemKind::Treasure => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weighted<T> {
    pub kind: T,
    pub weight: u32,
}

/// Weighted choice over a fixed set of values.
///
/// A roll in `[0, total)` walks the cumulative thresholds in entry order, so
/// the same roll always maps to the same value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WeightTable<T> {
    entries: Vec<Weighted<T>>,
}

impl<T: Copy> WeightTable<T> {
    pub fn new(entries: impl IntoIterator<Item = (T, u32)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(kind, weight)| Weighted { kind, weight })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[Weighted<T>] {
        &self.entries
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Maps a roll in `[0, total)` to its value.
    pub fn select(&self, roll: u32) -> Option<T> {
        let mut threshold = 0;
        for entry in &self.entries {
            threshold += entry.weight;
            if roll < threshold {
                return Some(entry.kind);
            }
        }
        None
    }

    /// Draws one value. `None` when every weight is zero.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        self.select(rng.gen_range(0..total))
    }
}

impl WeightTable<EnemyKind> {
    pub fn default_enemies() -> Self {
        Self::new([
            (EnemyKind::SecurityBot, 50),
            (EnemyKind::PatrolBot, 30),
            (EnemyKind::HeavyBot, 20),
        ])
    }
}

impl WeightTable<ItemKind> {
    pub fn default_items() -> Self {
        Self::new([
            (ItemKind::Heal, 30),
            (ItemKind::Weapon, 15),
            (ItemKind::Defense, 15),
            (ItemKind::Speed, 15),
            (ItemKind::Accuracy, 15),
            (ItemKind::Treasure, 10),
        ])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpawn {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Position,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSpawn {
    pub kind: ItemKind,
    pub position: Position,
}

/// Boss placement. A gated boss stays dormant until every hostage is rescued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossSpawn {
    pub id: EntityId,
    pub position: Position,
    pub gated: bool,
}

/// Everything a generated level places, consumed once by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnManifest {
    pub enemies: Vec<EnemySpawn>,
    pub hostages: Vec<Position>,
    pub items: Vec<ItemSpawn>,
    pub boss: Option<BossSpawn>,
}

impl SpawnManifest {
    /// Positions of every spawn in the manifest.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.enemies
            .iter()
            .map(|e| e.position)
            .chain(self.hostages.iter().copied())
            .chain(self.items.iter().map(|i| i.position))
            .chain(self.boss.iter().map(|b| b.position))
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.positions().any(|p| p == position)
    }

    /// First id not used by any enemy or the boss.
    pub fn next_id(&self) -> EntityId {
        let highest = self
            .enemies
            .iter()
            .map(|e| e.id.0)
            .chain(self.boss.iter().map(|b| b.id.0))
            .max()
            .unwrap_or(EntityId::PLAYER.0);
        EntityId(highest + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn select_walks_cumulative_thresholds() {
        let table = WeightTable::default_enemies();
        assert_eq!(table.total(), 100);
        assert_eq!(table.select(0), Some(EnemyKind::SecurityBot));
        assert_eq!(table.select(49), Some(EnemyKind::SecurityBot));
        assert_eq!(table.select(50), Some(EnemyKind::PatrolBot));
        assert_eq!(table.select(79), Some(EnemyKind::PatrolBot));
        assert_eq!(table.select(80), Some(EnemyKind::HeavyBot));
        assert_eq!(table.select(100), None);
    }

    #[test]
    fn zero_weights_never_pick() {
        let table = WeightTable::new([(ItemKind::Heal, 0), (ItemKind::Treasure, 0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(table.pick(&mut rng), None);
    }

    #[test]
    fn zero_weight_entries_are_skipped() {
        let table = WeightTable::new([(ItemKind::Heal, 0), (ItemKind::Treasure, 3)]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(table.pick(&mut rng), Some(ItemKind::Treasure));
        }
    }

    #[test]
    fn item_boosts_map_to_stats() {
        assert_eq!(ItemKind::Weapon.boosted_stat(), Some(StatKind::Attack));
        assert_eq!(ItemKind::Heal.boosted_stat(), None);
        assert_eq!(ItemKind::Treasure.boosted_stat(), None);
    }

    #[test]
    fn next_id_follows_highest_spawn() {
        let mut manifest = SpawnManifest::default();
        assert_eq!(manifest.next_id(), EntityId(1));
        manifest.enemies.push(EnemySpawn {
            id: EntityId(4),
            kind: EnemyKind::PatrolBot,
            position: Position::new(1, 1),
        });
        assert_eq!(manifest.next_id(), EntityId(5));
        assert!(manifest.is_occupied(Position::new(1, 1)));
    }
}
