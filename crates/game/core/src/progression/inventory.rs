use std::collections::BTreeMap;

use crate::map::ItemKind;
use crate::stats::{StatKind, Stats};

/// What picking an item up did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickupEffect {
    /// Kept for later use.
    Stored(ItemKind),
    Boosted { stat: StatKind, by: u32 },
    Score(u64),
}

/// Consumables carried by the player. Boosts and treasure apply on pickup
/// and are never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    counts: BTreeMap<ItemKind, u32>,
}

impl Inventory {
    pub fn count(&self, item: ItemKind) -> u32 {
        self.counts.get(&item).copied().unwrap_or(0)
    }

    pub fn collect(&mut self, item: ItemKind, stats: &mut Stats, treasure_score: u64) -> PickupEffect {
        match (item, item.boosted_stat()) {
            (_, Some(stat)) => PickupEffect::Boosted {
                stat,
                by: stats.boost(stat),
            },
            (ItemKind::Treasure, None) => PickupEffect::Score(treasure_score),
            (_, None) => {
                *self.counts.entry(item).or_default() += 1;
                PickupEffect::Stored(item)
            }
        }
    }

    /// Removes one `item`. Returns `false` when none is carried.
    pub fn take(&mut self, item: ItemKind) -> bool {
        match self.counts.get_mut(&item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(&item);
                }
                true
            }
            _ => false,
        }
    }

    /// Consumes a heal item outside combat. Returns the health restored, or
    /// `None` when no heal item is carried.
    pub fn use_heal(&mut self, stats: &mut Stats, amount: u32) -> Option<u32> {
        self.take(ItemKind::Heal).then(|| stats.heal(amount))
    }
}
