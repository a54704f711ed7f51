use crate::state::{EntityId, Position};

/// Body animation requested by a behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Animation {
    /// Idle stance.
    Look,
    Rest,
    Dance,
}

/// Movement collaborator.
///
/// Completion and stuck notifications flow back into the core through the
/// driver (`on_reach_destination` / `on_move_stuck`). Stopping an agent
/// cancels any completion that has not fired yet.
pub trait Motor {
    fn move_to(&mut self, agent: EntityId, destination: Position);

    fn stop(&mut self, agent: EntityId);

    /// Places the agent at `position` without moving through the world.
    fn set_transform(&mut self, agent: EntityId, position: Position);

    fn play_animation(&mut self, agent: EntityId, animation: Animation);
}
