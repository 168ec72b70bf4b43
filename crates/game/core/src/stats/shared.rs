use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use super::Stats;

/// Shared handle to a stat block.
///
/// The player's combatant and the player's progression record hold clones of
/// the same handle, so damage taken in a fight persists after it.
#[derive(Clone, Debug, Default)]
pub struct SharedStats(Rc<RefCell<Stats>>);

impl SharedStats {
    pub fn new(stats: Stats) -> Self {
        Self(Rc::new(RefCell::new(stats)))
    }

    /// Copy of the current values.
    pub fn snapshot(&self) -> Stats {
        *self.0.borrow()
    }

    pub fn borrow(&self) -> Ref<'_, Stats> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Stats> {
        self.0.borrow_mut()
    }

    /// Replaces every value in place; other holders observe the change.
    pub fn replace(&self, stats: Stats) {
        *self.0.borrow_mut() = stats;
    }

    /// True when both handles point at the same stat block.
    pub fn same_as(&self, other: &SharedStats) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Stats> for SharedStats {
    fn from(stats: Stats) -> Self {
        Self::new(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_the_same_damage() {
        let progress = SharedStats::new(Stats::new(100, 15, 8, 12, 85));
        let in_combat = progress.clone();

        in_combat.borrow_mut().take_damage(20);

        assert_eq!(progress.snapshot().current_health, 88);
        assert!(progress.same_as(&in_combat));
    }
}
