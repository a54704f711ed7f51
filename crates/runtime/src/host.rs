//! World seam of the runtime.
//!
//! The behavior core only needs the collaborator traits bundled in
//! [`agent_core::World`]. Driving a population additionally requires creating
//! agent bodies, reading back their positions and advancing movement, which
//! [`AgentHost`] adds on top.

use agent_core::{EntityId, Position, World};

/// Notification produced by the world while time advances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WorldEvent {
    /// Movement reached the point last passed to `move_to`.
    Arrived(EntityId),
    /// Movement cannot make progress toward its point.
    Stuck(EntityId),
    /// A shot connected.
    Damaged {
        target: EntityId,
        attacker: EntityId,
        amount: f64,
    },
}

impl WorldEvent {
    /// Agent the notification is delivered to.
    pub fn subject(&self) -> EntityId {
        match self {
            Self::Arrived(id) | Self::Stuck(id) => *id,
            Self::Damaged { target, .. } => *target,
        }
    }
}

/// World able to host a population of agents.
pub trait AgentHost: World {
    /// Creates an agent body and returns its id.
    fn spawn_agent(&mut self, name: &str, position: Position) -> EntityId;

    /// Leaves a dead body behind; it stops moving and is reported dead.
    fn mark_dead(&mut self, agent: EntityId);

    fn position_of(&self, entity: EntityId) -> Option<Position>;

    /// Moves bodies forward by `elapsed_ms` and drains pending notifications.
    fn advance(&mut self, elapsed_ms: u64) -> Vec<WorldEvent>;
}
