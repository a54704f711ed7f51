//! Live agents keyed by id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use agent_core::{Agent, Archetype, EntityId, GoalKind, Position, SolutionKind, Vitals};

/// Owns every live agent. Iteration is ordered by id.
#[derive(Debug, Default)]
pub struct Roster {
    agents: BTreeMap<EntityId, Agent>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, agent: Agent) {
        tracing::debug!(target: "runtime::roster", agent = %agent.id, archetype = %agent.archetype, "joined");
        self.agents.insert(agent.id, agent);
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Agent> {
        let removed = self.agents.remove(&id);
        if removed.is_some() {
            tracing::debug!(target: "runtime::roster", agent = %id, "left");
        }
        removed
    }

    pub fn get(&self, id: EntityId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.agents.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.agents.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        self.iter().map(AgentSnapshot::from).collect()
    }
}

/// Serializable summary of one agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: EntityId,
    pub archetype: Archetype,
    pub position: Position,
    pub vitals: Vitals,
    pub goal: Option<GoalKind>,
    pub solution: Option<SolutionKind>,
    pub in_combat: bool,
}

impl From<&Agent> for AgentSnapshot {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            archetype: agent.archetype,
            position: agent.position,
            vitals: agent.vitals,
            goal: agent.current_goal(),
            solution: agent.current_solution(),
            in_combat: agent.combat.in_combat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn agent(id: u32) -> Agent {
        Agent::new(
            EntityId(id),
            Archetype::Bandit,
            Vitals::default(),
            Position::ORIGIN,
            Arc::from(Vec::<GoalKind>::new()),
            0,
        )
    }

    #[test]
    fn test_iteration_is_ordered_by_id() {
        let mut roster = Roster::new();
        roster.insert(agent(9));
        roster.insert(agent(2));
        roster.insert(agent(5));
        assert_eq!(
            roster.ids().collect::<Vec<_>>(),
            vec![EntityId(2), EntityId(5), EntityId(9)]
        );
    }

    #[test]
    fn test_remove_reports_absence() {
        let mut roster = Roster::new();
        roster.insert(agent(1));
        assert!(roster.remove(EntityId(1)).is_some());
        assert!(roster.remove(EntityId(1)).is_none());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_snapshot_of_idle_agent() {
        let mut roster = Roster::new();
        roster.insert(agent(3));
        let snapshot = roster.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].goal, None);
        assert_eq!(snapshot[0].solution, None);
        assert!(!snapshot[0].in_combat);
    }
}
