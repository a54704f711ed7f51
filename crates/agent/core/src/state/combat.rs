use super::{EntityId, Position};

/// Combat block of one agent.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub in_combat: bool,
    pub is_side_stepping: bool,
    /// Last attacker that triggered a reaction; cleared every think tick.
    pub last_attacker: Option<EntityId>,
    pub hunt_target: Option<EntityId>,
    pub hunt_close_following: bool,
    /// Attacker handed to the hunt behavior by a damage reaction.
    pub explicit_target: Option<EntityId>,
    pub last_known_target_position: Option<Position>,
}

impl CombatState {
    /// Drops every hunt reference and leaves combat.
    pub fn disengage(&mut self) {
        self.in_combat = false;
        self.is_side_stepping = false;
        self.hunt_target = None;
        self.hunt_close_following = false;
        self.explicit_target = None;
        self.last_known_target_position = None;
    }
}
