use crate::stats::{LevelGrowth, Stats};

/// Level and experience toward the next level.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Experience {
    level: u32,
    xp: u32,
    base: u32,
    multiplier: f64,
}

impl Experience {
    pub fn new(base: u32, multiplier: f64) -> Self {
        Self {
            level: 1,
            xp: 0,
            base,
            multiplier,
        }
    }

    /// Restores a saved level and partial experience.
    pub fn restore(mut self, level: u32, xp: u32) -> Self {
        self.level = level.max(1);
        self.xp = xp;
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    /// `round(base * multiplier^(level - 1))`, ties to even.
    pub fn xp_to_next(&self) -> u32 {
        let exponent = self.level.saturating_sub(1) as i32;
        let required = (self.base as f64 * self.multiplier.powi(exponent)).round_ties_even();
        (required as u32).max(1)
    }

    /// Adds experience, applying `growth` to `stats` once per level gained.
    /// Returns the number of levels gained.
    pub fn add_xp(&mut self, amount: u32, stats: &mut Stats, growth: &LevelGrowth) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        let mut gained = 0;
        while self.xp >= self.xp_to_next() {
            self.xp -= self.xp_to_next();
            self.level += 1;
            stats.grow(growth);
            gained += 1;
        }
        gained
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new(100, 1.5)
    }
}
