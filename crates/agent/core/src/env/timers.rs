use crate::state::EntityId;

/// Continuation bound to one agent, fired later by the timer service.
///
/// Solution continuations carry the assignment epoch they were armed under;
/// they are dropped if the agent has moved on to another assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentEvent {
    Think,
    CheckVitals,
    /// Re-run the active solution's `execute`.
    Execute { epoch: u64 },
    /// Finish the active solution.
    Exit { epoch: u64 },
    /// Restore the idle animation.
    RestoreIdle { epoch: u64 },
    /// Let go of the weapon trigger.
    ReleaseTrigger,
}

/// Timer service accepting delayed continuations.
///
/// The scheduler re-validates that the agent still exists before firing;
/// the core re-validates liveness and epochs.
pub trait Scheduler {
    fn schedule(&mut self, agent: EntityId, delay_ms: u64, event: AgentEvent);
}
