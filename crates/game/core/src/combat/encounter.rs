//! Proximity checks that start encounters outside combat.
//!
//! Straight-line distance is used here; every in-combat range check is
//! Manhattan.

use crate::config::CombatRules;
use crate::state::{EntityId, Position};

/// Ids of `candidates` within `radius` of `center`, in input order.
pub fn nearby<I>(center: Position, radius: f32, candidates: I) -> Vec<EntityId>
where
    I: IntoIterator<Item = (EntityId, Position)>,
{
    candidates
        .into_iter()
        .filter(|(_, position)| center.euclidean(*position) <= radius)
        .map(|(id, _)| id)
        .collect()
}

/// Enemies that join an encounter triggered at `center`, or `None` when no
/// enemy is inside the trigger radius.
///
/// Once any enemy is close enough to trigger, every enemy inside the wider
/// gather radius is pulled in.
pub fn triggered<I>(center: Position, rules: &CombatRules, candidates: I) -> Option<Vec<EntityId>>
where
    I: IntoIterator<Item = (EntityId, Position)>,
    I::IntoIter: Clone,
{
    let candidates = candidates.into_iter();
    if nearby(center, rules.trigger_radius, candidates.clone()).is_empty() {
        return None;
    }
    Some(nearby(center, rules.gather_radius(), candidates))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_uses_euclidean_distance() {
        let center = Position::new(0, 0);
        let found = nearby(
            center,
            2.0,
            [
                (EntityId(1), Position::new(1, 1)),
                (EntityId(2), Position::new(2, 1)),
                (EntityId(3), Position::new(0, 2)),
            ],
        );
        assert_eq!(found, vec![EntityId(1), EntityId(3)]);
    }

    #[test]
    fn trigger_gathers_the_wider_radius() {
        let rules = CombatRules::default();
        let enemies = [
            (EntityId(1), Position::new(2, 0)),
            (EntityId(2), Position::new(0, 4)),
            (EntityId(3), Position::new(5, 0)),
        ];
        assert_eq!(
            triggered(Position::new(0, 0), &rules, enemies),
            Some(vec![EntityId(1), EntityId(2)])
        );
        assert_eq!(triggered(Position::new(0, 9), &rules, enemies), None);
    }
}
