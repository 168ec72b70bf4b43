//! Combat statistics and the single damage-application primitive.
//!
//! Health only changes through [`Stats::take_damage`] and [`Stats::heal`],
//! both of which keep `current_health` within `[0, max_health]`. Defense is
//! subtracted inside `take_damage` and nowhere else.

mod shared;

pub use shared::SharedStats;

/// Upper bound of the accuracy percentage.
pub const MAX_ACCURACY: u32 = 100;

/// Fixed stat block carried by every combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub max_health: u32,
    pub current_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    /// Hit chance in percent, `0..=100`.
    pub accuracy: u32,
}

impl Stats {
    /// Builds a stat block at full health.
    pub fn new(max_health: u32, attack: u32, defense: u32, speed: u32, accuracy: u32) -> Self {
        Self {
            max_health,
            current_health: max_health,
            attack,
            defense,
            speed,
            accuracy: accuracy.min(MAX_ACCURACY),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Health as a fraction of maximum in `[0.0, 1.0]`.
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.current_health as f32 / self.max_health as f32
    }

    /// Effective damage a raw hit of `raw` would deal: `max(1, raw - defense)`.
    pub fn mitigate(&self, raw: u32) -> u32 {
        raw.saturating_sub(self.defense).max(1)
    }

    /// Applies a raw hit and returns the health actually removed.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        let effective = self.mitigate(raw);
        let before = self.current_health;
        self.current_health = before.saturating_sub(effective);
        before - self.current_health
    }

    /// Restores health up to the maximum and returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_health;
        self.current_health = before.saturating_add(amount).min(self.max_health);
        self.current_health - before
    }

    /// Raises `kind` by ten percent of its current value, rounded up.
    ///
    /// Returns the increase. Accuracy never exceeds [`MAX_ACCURACY`].
    pub fn boost(&mut self, kind: StatKind) -> u32 {
        let slot = match kind {
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Speed => &mut self.speed,
            StatKind::Accuracy => &mut self.accuracy,
        };
        let before = *slot;
        let mut after = before + before.div_ceil(10);
        if kind == StatKind::Accuracy {
            after = after.min(MAX_ACCURACY);
        }
        *slot = after;
        after - before
    }

    /// Applies one level of growth. Current health rises with the maximum.
    pub fn grow(&mut self, growth: &LevelGrowth) {
        self.max_health += growth.health;
        self.current_health = (self.current_health + growth.health).min(self.max_health);
        self.attack += growth.attack;
        self.defense += growth.defense;
        self.speed += growth.speed;
        self.accuracy = (self.accuracy + growth.accuracy).min(MAX_ACCURACY);
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new(100, 15, 8, 12, 85)
    }
}

/// Non-health stats that items can raise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
    Accuracy,
}

/// Per-level stat increase applied on level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelGrowth {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub accuracy: u32,
}

impl Default for LevelGrowth {
    fn default() -> Self {
        Self {
            health: 10,
            attack: 2,
            defense: 1,
            speed: 1,
            accuracy: 1,
        }
    }
}
