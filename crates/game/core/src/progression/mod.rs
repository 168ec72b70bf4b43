//! Player progression between and during encounters.
//!
//! [`Progress`] bundles everything a run accumulates and implements
//! [`CombatHooks`], so a host can hand it straight to a combat session.
mod experience;
mod hostages;
mod inventory;
mod ledger;

pub use experience::Experience;
pub use hostages::HostageTracker;
pub use inventory::{Inventory, PickupEffect};
pub use ledger::{HighScore, ScoreLedger};

use tracing::info;

use crate::combat::{CombatHooks, Combatant};
use crate::config::ProgressionConfig;
use crate::env::Reward;
use crate::map::ItemKind;
use crate::stats::{LevelGrowth, SharedStats};

/// Everything a run accumulates.
#[derive(Clone, Debug)]
pub struct Progress {
    /// Shared with the player's combatant during encounters.
    pub stats: SharedStats,
    pub experience: Experience,
    pub inventory: Inventory,
    pub hostages: HostageTracker,
    pub score: u64,
    growth: LevelGrowth,
    treasure_score: u64,
}

impl Progress {
    pub fn new(config: &ProgressionConfig) -> Self {
        Self {
            stats: SharedStats::new(config.player),
            experience: Experience::new(config.base_xp, config.xp_multiplier),
            inventory: Inventory::default(),
            hostages: HostageTracker::default(),
            score: 0,
            growth: config.growth,
            treasure_score: config.treasure_score,
        }
    }

    /// Applies a pickup, crediting treasure to the score.
    pub fn pick_up(&mut self, item: ItemKind) -> PickupEffect {
        let effect = self
            .inventory
            .collect(item, &mut self.stats.borrow_mut(), self.treasure_score);
        if let PickupEffect::Score(points) = effect {
            self.score += points;
        }
        effect
    }

    /// Grants experience and returns the number of levels gained.
    pub fn grant_xp(&mut self, amount: u32) -> u32 {
        let gained = self
            .experience
            .add_xp(amount, &mut self.stats.borrow_mut(), &self.growth);
        if gained > 0 {
            info!(level = self.experience.level(), "level up");
        }
        gained
    }

    pub fn is_alive(&self) -> bool {
        self.stats.borrow().is_alive()
    }
}

impl CombatHooks for Progress {
    fn on_enemy_killed(&mut self, _enemy: &Combatant, reward: Reward) {
        self.score += reward.score;
        self.grant_xp(reward.xp);
    }

    fn take_item(&mut self, item: ItemKind) -> bool {
        self.inventory.take(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnemyTemplate;
    use crate::map::EnemyKind;
    use crate::state::{EntityId, Position};

    #[test]
    fn kill_rewards_feed_score_and_experience() {
        let mut progress = Progress::new(&ProgressionConfig::default());
        let boss = Combatant::enemy(
            EntityId(1),
            Position::new(0, 0),
            &EnemyTemplate::builtin(EnemyKind::Boss),
        );

        progress.on_enemy_killed(&boss, Reward::new(150, 500));

        assert_eq!(progress.score, 500);
        assert_eq!(progress.experience.level(), 2);
        assert_eq!(progress.experience.xp(), 50);
        assert_eq!(progress.stats.snapshot().max_health, 110);
    }

    #[test]
    fn treasure_scores_and_heals_are_usable_in_combat() {
        let mut progress = Progress::new(&ProgressionConfig::default());
        progress.pick_up(ItemKind::Treasure);
        progress.pick_up(ItemKind::Heal);

        assert_eq!(progress.score, 200);
        assert!(progress.take_item(ItemKind::Heal));
        assert!(!progress.take_item(ItemKind::Heal));
    }
}
