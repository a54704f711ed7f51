use serde::{Deserialize, Serialize};

use agent_core::{Archetype, Assignment, EntityId, Position};

/// Agents joining or leaving the roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RosterEvent {
    Spawned {
        agent: EntityId,
        archetype: Archetype,
        position: Position,
    },
    Removed {
        agent: EntityId,
        archetype: Archetype,
    },
}

/// Behavior-level changes of a single agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BehaviorEvent {
    /// A new (goal, solution) pair became active.
    GoalAssigned {
        agent: EntityId,
        assignment: Assignment,
        /// Pair that was active right before, if any.
        replaced: Option<Assignment>,
    },
    /// The agent went idle; the next think tick requests a goal.
    GoalCleared {
        agent: EntityId,
        replaced: Assignment,
    },
    Damaged {
        agent: EntityId,
        attacker: EntityId,
        health: f64,
    },
}

impl BehaviorEvent {
    pub fn agent(&self) -> EntityId {
        match self {
            Self::GoalAssigned { agent, .. }
            | Self::GoalCleared { agent, .. }
            | Self::Damaged { agent, .. } => *agent,
        }
    }
}
