use crate::ai::AiProfile;
use crate::env::{EnemyTemplate, Reward};
use crate::map::{EnemyKind, EnemySpawn};
use crate::state::{EntityId, Position};
use crate::stats::{SharedStats, Stats};

#[derive(Clone, Debug, PartialEq)]
pub enum Role {
    Player,
    Enemy {
        kind: EnemyKind,
        profile: Option<AiProfile>,
        reward: Reward,
    },
}

/// A participant in an encounter.
///
/// The player's stats are a [`SharedStats`] handle shared with the host, so
/// damage and healing persist once the encounter ends.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub id: EntityId,
    pub position: Position,
    pub stats: SharedStats,
    pub role: Role,
    alive: bool,
}

impl Combatant {
    pub fn player(position: Position, stats: SharedStats) -> Self {
        let alive = stats.borrow().is_alive();
        Self {
            id: EntityId::PLAYER,
            position,
            stats,
            role: Role::Player,
            alive,
        }
    }

    /// Builds an enemy with fresh stats copied from `template`.
    pub fn enemy(id: EntityId, position: Position, template: &EnemyTemplate) -> Self {
        Self {
            id,
            position,
            stats: SharedStats::new(template.stats),
            role: Role::Enemy {
                kind: template.kind,
                profile: template.profile,
                reward: template.reward,
            },
            alive: template.stats.is_alive(),
        }
    }

    pub fn from_spawn(spawn: &EnemySpawn, template: &EnemyTemplate) -> Self {
        Self::enemy(spawn.id, spawn.position, template)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kind(&self) -> Option<EnemyKind> {
        match self.role {
            Role::Enemy { kind, .. } => Some(kind),
            Role::Player => None,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.kind() == Some(EnemyKind::Boss)
    }

    pub fn profile(&self) -> Option<&AiProfile> {
        match &self.role {
            Role::Enemy { profile, .. } => profile.as_ref(),
            Role::Player => None,
        }
    }

    pub fn reward(&self) -> Reward {
        match self.role {
            Role::Enemy { reward, .. } => reward,
            Role::Player => Reward::default(),
        }
    }

    pub fn snapshot(&self) -> Stats {
        self.stats.snapshot()
    }

    /// Applies a raw hit through [`Stats::take_damage`] and returns the
    /// health removed. Dead combatants take no further damage.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        let removed = self.stats.borrow_mut().take_damage(raw);
        if !self.stats.borrow().is_alive() {
            self.alive = false;
        }
        removed
    }

    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        self.stats.borrow_mut().heal(amount)
    }

    /// True when two combatants fight for opposing sides.
    pub fn is_hostile_to(&self, other: &Combatant) -> bool {
        self.is_player() != other.is_player()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lethal_damage_marks_dead_and_stops_further_damage() {
        let mut template = EnemyTemplate::builtin(EnemyKind::PatrolBot);
        template.stats = Stats::new(5, 1, 0, 1, 50);
        let mut enemy = Combatant::enemy(EntityId(3), Position::new(0, 0), &template);

        assert_eq!(enemy.take_damage(10), 5);
        assert!(!enemy.is_alive());
        assert_eq!(enemy.take_damage(10), 0);
        assert_eq!(enemy.heal(10), 0);
    }

    #[test]
    fn player_damage_reaches_shared_stats() {
        let stats = SharedStats::new(Stats::default());
        let mut player = Combatant::player(Position::new(1, 1), stats.clone());

        player.take_damage(18);

        assert_eq!(stats.snapshot().current_health, 90);
        assert!(player.is_player());
        assert_eq!(player.profile(), None);
    }

    #[test]
    fn boss_reports_its_kind_and_reward() {
        let boss = Combatant::enemy(
            EntityId(9),
            Position::new(4, 4),
            &EnemyTemplate::builtin(EnemyKind::Boss),
        );
        assert!(boss.is_boss());
        assert_eq!(boss.reward(), Reward::new(100, 500));
        assert!(boss.is_hostile_to(&Combatant::player(
            Position::new(0, 0),
            SharedStats::default()
        )));
    }
}
