//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{CombatEvent, SessionEvent, WorldEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Exploration: movement, pickups, hostages, boss release
    World,
    /// Encounter start, resolved actions, encounter end
    Combat,
    /// New game, save/load, scores, game over
    Session,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::World, Topic::Combat, Topic::Session];

    fn index(self) -> usize {
        match self {
            Topic::World => 0,
            Topic::Combat => 1,
            Topic::Session => 2,
        }
    }
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    World(WorldEvent),
    Combat(CombatEvent),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::World(_) => Topic::World,
            Event::Combat(_) => Topic::Combat,
            Event::Session(_) => Topic::Session,
        }
    }
}

impl From<WorldEvent> for Event {
    fn from(event: WorldEvent) -> Self {
        Event::World(event)
    }
}

impl From<CombatEvent> for Event {
    fn from(event: CombatEvent) -> Self {
        Event::Combat(event)
    }
}

impl From<SessionEvent> for Event {
    fn from(event: SessionEvent) -> Self {
        Event::Session(event)
    }
}

/// Topic-based event bus
///
/// Clones share the same channels.
#[derive(Clone)]
pub struct EventBus {
    channels: [broadcast::Sender<Event>; 3],
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Topic::ALL.map(|_| broadcast::channel(capacity).0),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.channels[topic.index()].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[topic.index()].subscribe()
    }

    /// Subscribe to every topic at once.
    pub fn subscribe_all(&self) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        Topic::ALL
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
