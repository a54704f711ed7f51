//! Population management.
//!
//! Agents enter the world through [`Runtime::spawn`]; the population timer
//! armed by [`Runtime::start`] tops the roster up to the configured count.

use agent_core::{
    Agent, AgentEvent, Archetype, Armory, EntityId, GoalArbiter, InventoryItem, Position,
    RngOracle, Vitals, compute_seed, env::contexts,
};

use crate::events::{Event, RosterEvent};
use crate::host::AgentHost;
use crate::runtime::Runtime;
use crate::timers::Scheduled;

/// Crossbow bolts handed to every bandit.
pub const BANDIT_AMMO: u32 = 1_000;

/// Spawn options; anything left unset is rolled or taken from the config.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpawnRequest {
    pub archetype: Option<Archetype>,
    pub position: Option<Position>,
    pub vitals: Option<Vitals>,
}

impl SpawnRequest {
    pub fn archetype(archetype: Archetype) -> Self {
        Self {
            archetype: Some(archetype),
            ..Self::default()
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_vitals(mut self, vitals: Vitals) -> Self {
        self.vitals = Some(vitals);
        self
    }
}

impl<W: AgentHost> Runtime<W> {
    /// Creates an agent, arms its think and vitals ticks and picks its
    /// first goal.
    pub fn spawn(&mut self, request: SpawnRequest) -> EntityId {
        self.spawn_nonce += 1;
        let archetype = request.archetype.unwrap_or_else(|| {
            let code = self.system_roll(contexts::SPAWN_ARCHETYPE, 1, 3);
            Archetype::from_code(code).unwrap_or(Archetype::Soldier)
        });
        let position = request.position.unwrap_or_else(|| self.random_position());
        let vitals = request.vitals.unwrap_or(self.config.behavior.spawn.vitals);

        let id = self.world.spawn_agent(archetype.as_ref(), position);
        equip(&mut self.world, id, archetype);

        let agent = Agent::new(
            id,
            archetype,
            vitals,
            position,
            self.catalog.goal_list(archetype),
            self.config.behavior.seed,
        );
        self.roster.insert(agent);
        self.bus.publish(Event::Roster(RosterEvent::Spawned {
            agent: id,
            archetype,
            position,
        }));
        tracing::info!(target: "runtime::roster", agent = %id, %archetype, %position, "spawned");

        let behavior = &self.config.behavior;
        let (think, vitals) = (behavior.think_interval_ms, behavior.vitals_interval_ms);
        self.timers.schedule_in(think, Scheduled::Agent(id, AgentEvent::Think));
        self.timers
            .schedule_in(vitals, Scheduled::Agent(id, AgentEvent::CheckVitals));

        self.with_agent(id, |ctx| GoalArbiter::request_new_goal(ctx, false, false));
        id
    }

    /// Spawns agents until the roster holds the configured count.
    pub fn populate(&mut self) -> usize {
        let target = self.config.behavior.spawn.count;
        let mut spawned = 0;
        while self.roster.len() < target {
            self.spawn(SpawnRequest::default());
            spawned += 1;
        }
        if spawned > 0 {
            tracing::debug!(target: "runtime::roster", spawned, population = self.roster.len(), "population topped up");
        }
        spawned
    }

    fn system_roll(&self, context: u32, min: u32, max: u32) -> u32 {
        let seed = compute_seed(
            self.config.behavior.seed,
            self.spawn_nonce,
            EntityId::SYSTEM.0,
            context,
        );
        self.rng.range(seed, min, max)
    }

    fn random_position(&self) -> Position {
        let bounds = self.config.behavior.wander_bounds;
        let seed = |context| {
            compute_seed(
                self.config.behavior.seed,
                self.spawn_nonce,
                EntityId::SYSTEM.0,
                context,
            )
        };
        Position::new(
            self.rng
                .range_f64(seed(contexts::SPAWN_POSITION_X), bounds.min_x, bounds.max_x),
            self.rng
                .range_f64(seed(contexts::SPAWN_POSITION_Y), bounds.min_y, bounds.max_y),
            bounds.z,
        )
    }
}

/// Starting kit per archetype.
fn equip<W: Armory>(world: &mut W, id: EntityId, archetype: Archetype) {
    match archetype {
        Archetype::Bandit => {
            world.increment_inventory(id, InventoryItem::CrossbowAmmo, BANDIT_AMMO);
            world.increment_inventory(id, InventoryItem::Crossbow, 1);
        }
        Archetype::Entertainer => world.increment_inventory(id, InventoryItem::Sword, 1),
        Archetype::Soldier => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Topic;
    use crate::sandbox::SandboxWorld;
    use agent_core::BehaviorConfig;

    fn runtime(behavior: BehaviorConfig) -> Runtime<SandboxWorld> {
        Runtime::builder()
            .behavior(behavior)
            .world(SandboxWorld::default())
            .build()
            .expect("runtime builds")
    }

    #[test]
    fn test_spawn_sets_up_agent() {
        let mut runtime = runtime(BehaviorConfig::default());
        let mut roster = runtime.subscribe(Topic::Roster);
        let at = Position::new(10.0, 20.0, 0.0);
        let id = runtime.spawn(SpawnRequest::archetype(Archetype::Bandit).at(at));

        let agent = runtime.agent(id).expect("agent spawned");
        assert_eq!(agent.archetype, Archetype::Bandit);
        assert_eq!(agent.position, at);
        assert!(agent.current().is_some());
        assert_eq!(runtime.world().inventory(id, InventoryItem::Crossbow), 1);
        assert_eq!(runtime.world().inventory(id, InventoryItem::CrossbowAmmo), BANDIT_AMMO);
        // think and vitals ticks
        assert_eq!(runtime.pending_timers(), 2);
        assert_eq!(
            roster.try_recv().expect("spawn published"),
            Event::Roster(RosterEvent::Spawned {
                agent: id,
                archetype: Archetype::Bandit,
                position: at,
            })
        );
    }

    #[test]
    fn test_random_spawns_stay_in_bounds() {
        let mut runtime = runtime(BehaviorConfig::default());
        let bounds = runtime.config().behavior.wander_bounds;
        for _ in 0..20 {
            let id = runtime.spawn(SpawnRequest::default());
            let agent = runtime.agent(id).expect("agent spawned");
            assert!(bounds.contains(&agent.position));
        }
        assert_eq!(runtime.roster().len(), 20);
    }

    #[test]
    fn test_populate_fills_to_count() {
        let mut behavior = BehaviorConfig::default();
        behavior.spawn.count = 3;
        let mut runtime = runtime(behavior);

        assert_eq!(runtime.populate(), 3);
        assert_eq!(runtime.populate(), 0);
        assert_eq!(runtime.roster().len(), 3);
    }

    #[test]
    fn test_spawn_rolls_are_seeded() {
        let archetypes = |seed| {
            let mut behavior = BehaviorConfig::default();
            behavior.seed = seed;
            let mut runtime = runtime(behavior);
            (0..8)
                .map(|_| {
                    let id = runtime.spawn(SpawnRequest::default());
                    runtime.agent(id).map(|a| (a.archetype, a.position))
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(archetypes(11), archetypes(11));
    }
}
