//! Behavior runtime orchestrator.
//!
//! [`Runtime`] owns the roster, the timer queue, the host world and the event
//! bus. It exposes the driver API of the behavior core (think/vitals ticks,
//! damage and movement notifications, goal requests) and advances virtual
//! time, firing timers and world notifications in order.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use agent_core::{
    AgentThinkLoop, BehaviorConfig, BehaviorCtx, CatalogError, CombatReactor, DamageResponse,
    EntityId, GoalArbiter, GoalCatalog, GoalKind, PcgRng, SolutionKind, Tick,
};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{BehaviorEvent, Event, EventBus, RosterEvent, Topic};
use crate::host::{AgentHost, WorldEvent};
use crate::roster::{AgentSnapshot, Roster};
use crate::timers::{Scheduled, TimerQueue};
use crate::workers::SimulationWorker;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub behavior: BehaviorConfig,
    /// Virtual-time granularity of movement updates.
    pub step_ms: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_STEP_MS: u64 = 100;

    pub fn new(behavior: BehaviorConfig) -> Self {
        Self {
            behavior,
            ..Self::default()
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            behavior: BehaviorConfig::default(),
            step_ms: Self::DEFAULT_STEP_MS,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// What one call to [`Runtime::advance`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceReport {
    pub now: Tick,
    pub timers_fired: usize,
    pub world_events: usize,
}

/// Behavior runtime over a host world `W`.
pub struct Runtime<W> {
    pub(crate) config: RuntimeConfig,
    pub(crate) catalog: Arc<GoalCatalog>,
    pub(crate) world: W,
    pub(crate) roster: Roster,
    pub(crate) timers: TimerQueue,
    pub(crate) rng: PcgRng,
    pub(crate) bus: EventBus,
    pub(crate) spawn_nonce: u64,
    pub(crate) started: bool,
}

impl<W: AgentHost> Runtime<W> {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder<W> {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<GoalCatalog> {
        &self.catalog
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn agent(&self, id: EntityId) -> Option<&agent_core::Agent> {
        self.roster.get(id)
    }

    pub fn now(&self) -> Tick {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        self.roster.snapshot()
    }

    // ===== driver API =====

    /// Runs one think tick of `agent` without rescheduling it.
    pub fn tick(&mut self, agent: EntityId) -> Result<()> {
        self.drive(agent, AgentThinkLoop::tick)
    }

    /// Runs one vitals tick of `agent` without rescheduling it.
    pub fn check_vitals(&mut self, agent: EntityId) -> Result<()> {
        self.drive(agent, AgentThinkLoop::check_vitals)
    }

    pub fn on_reach_destination(&mut self, agent: EntityId) -> Result<()> {
        self.drive(agent, AgentThinkLoop::on_reach_destination)
    }

    pub fn on_move_stuck(&mut self, agent: EntityId) -> Result<()> {
        self.drive(agent, AgentThinkLoop::on_move_stuck)
    }

    /// Reacts to `attacker` hurting `agent`; health is left untouched.
    pub fn on_damage(&mut self, agent: EntityId, attacker: EntityId) -> Result<DamageResponse> {
        self.drive(agent, |ctx| CombatReactor::on_damage(ctx, attacker))
    }

    /// Unconstrained goal request; `false` if nothing is eligible.
    pub fn request_new_goal(&mut self, agent: EntityId) -> Result<bool> {
        self.drive(agent, |ctx| GoalArbiter::request_new_goal(ctx, false, false))
    }

    /// Assigns a goal and solution by name.
    ///
    /// Empty names fail without touching the agent; names that match no goal
    /// or solution are reported as catalog errors.
    pub fn assign_goal(&mut self, agent: EntityId, goal: &str, solution: &str) -> Result<bool> {
        if !self.roster.contains(agent) {
            return Err(RuntimeError::UnknownAgent(agent));
        }
        if goal.is_empty() || solution.is_empty() {
            return Ok(false);
        }
        let goal = GoalKind::from_str(goal).map_err(|_| CatalogError::UnknownGoal {
            name: goal.to_owned(),
        })?;
        let solution = SolutionKind::from_str(solution).map_err(|_| CatalogError::UnknownSolution {
            name: solution.to_owned(),
        })?;
        self.drive(agent, |ctx| GoalArbiter::assign_goal(ctx, goal, solution))
    }

    /// Applies a hit: lowers health, kills at zero, otherwise reacts.
    ///
    /// Returns `None` if the hit was fatal.
    pub fn damage(
        &mut self,
        agent: EntityId,
        attacker: EntityId,
        amount: f64,
    ) -> Result<Option<DamageResponse>> {
        let target = self
            .roster
            .get_mut(agent)
            .ok_or(RuntimeError::UnknownAgent(agent))?;
        target.vitals.health -= amount;
        let health = target.vitals.health;
        self.bus.publish(Event::Behavior(BehaviorEvent::Damaged {
            agent,
            attacker,
            health,
        }));

        if health <= 0.0 {
            tracing::info!(target: "runtime::roster", %agent, %attacker, "killed");
            self.kill(agent)?;
            return Ok(None);
        }
        self.on_damage(agent, attacker).map(Some)
    }

    /// Kills `agent`: releases its path, leaves a body in the world, drops
    /// its timers and removes it from the roster.
    pub fn kill(&mut self, agent: EntityId) -> Result<()> {
        self.drive(agent, AgentThinkLoop::on_death)?;
        self.world.mark_dead(agent);
        self.timers.cancel_agent(agent);
        if let Some(removed) = self.roster.remove(agent) {
            self.bus.publish(Event::Roster(RosterEvent::Removed {
                agent,
                archetype: removed.archetype,
            }));
        }
        Ok(())
    }

    // ===== time =====

    /// Advances virtual time by `duration_ms`.
    ///
    /// Time moves in steps of `step_ms`: timers due within a step fire in
    /// order first, then the world moves bodies through the step and its
    /// notifications are delivered.
    pub fn advance(&mut self, duration_ms: u64) -> AdvanceReport {
        let end = self.timers.now() + duration_ms;
        let step = self.config.step_ms.max(1);
        let mut report = AdvanceReport::default();

        while self.timers.now() < end {
            let start = self.timers.now();
            let step_end = (start + step).min(end);

            while let Some(task) = self.timers.pop_due(step_end) {
                self.fire(task);
                report.timers_fired += 1;
            }
            self.timers.advance_to(step_end);

            for event in self.world.advance(step_end.since(start)) {
                self.dispatch(event);
                report.world_events += 1;
            }
        }

        report.now = self.timers.now();
        report
    }

    /// Schedules the first population check; later calls do nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let delay = self.config.behavior.spawn.initial_delay_ms;
        tracing::info!(target: "runtime::roster", delay_ms = delay, "population checks armed");
        self.timers.schedule_in(delay, Scheduled::Populate);
    }

    /// Starts the population policy and runs for `duration_ms`.
    pub fn simulate(&mut self, duration_ms: u64) -> AdvanceReport {
        self.start();
        self.advance(duration_ms)
    }

    fn fire(&mut self, task: Scheduled) {
        match task {
            Scheduled::Agent(agent, event) => {
                if self
                    .with_agent(agent, |ctx| AgentThinkLoop::handle(ctx, event))
                    .is_none()
                {
                    tracing::trace!(target: "runtime::timers", %agent, ?event, "agent gone, timer dropped");
                }
            }
            Scheduled::Populate => {
                self.populate();
                let interval = self.config.behavior.spawn.interval_ms;
                self.timers.schedule_in(interval, Scheduled::Populate);
            }
        }
    }

    fn dispatch(&mut self, event: WorldEvent) {
        let outcome = match event {
            WorldEvent::Arrived(agent) => self.on_reach_destination(agent),
            WorldEvent::Stuck(agent) => self.on_move_stuck(agent),
            WorldEvent::Damaged {
                target,
                attacker,
                amount,
            } => self.damage(target, attacker, amount).map(|_| ()),
        };
        if let Err(error) = outcome {
            tracing::trace!(target: "runtime::roster", ?event, %error, "notification dropped");
        }
    }

    /// Moves the runtime onto a background task and returns a handle to it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn launch(self) -> (RuntimeHandle, JoinHandle<()>)
    where
        W: Send + 'static,
    {
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let handle = RuntimeHandle::new(command_tx, self.bus.clone());
        let worker = SimulationWorker::new(self, command_rx);
        let task = tokio::spawn(worker.run());
        (handle, task)
    }

    // ===== agent access =====

    fn drive<R>(&mut self, agent: EntityId, f: impl FnOnce(&mut BehaviorCtx<'_>) -> R) -> Result<R> {
        self.with_agent(agent, f)
            .ok_or(RuntimeError::UnknownAgent(agent))
    }

    /// Runs `f` against a live agent, then publishes its goal change, if any.
    pub(crate) fn with_agent<R>(
        &mut self,
        id: EntityId,
        f: impl FnOnce(&mut BehaviorCtx<'_>) -> R,
    ) -> Option<R> {
        let agent = self.roster.get_mut(id)?;
        if let Some(position) = self.world.position_of(id) {
            agent.position = position;
        }
        let before = agent.current();
        let epoch = agent.epoch();

        let result = {
            let mut ctx = BehaviorCtx::new(
                agent,
                &self.catalog,
                &self.config.behavior,
                &mut self.world,
                &mut self.timers,
                &self.rng,
            );
            f(&mut ctx)
        };

        if agent.epoch() != epoch {
            let event = match agent.current() {
                Some(assignment) => Some(BehaviorEvent::GoalAssigned {
                    agent: id,
                    assignment,
                    replaced: before,
                }),
                None => before.map(|replaced| BehaviorEvent::GoalCleared { agent: id, replaced }),
            };
            if let Some(event) = event {
                self.bus.publish(Event::Behavior(event));
            }
        }
        Some(result)
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder<W> {
    config: RuntimeConfig,
    catalog: Option<Arc<GoalCatalog>>,
    world: Option<W>,
}

impl<W: AgentHost> RuntimeBuilder<W> {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            world: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override behavior configuration only
    pub fn behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.config.behavior = behavior;
        self
    }

    /// Use a prebuilt catalog instead of the standard one
    pub fn catalog(mut self, catalog: Arc<GoalCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set required host world
    pub fn world(mut self, world: W) -> Self {
        self.world = Some(world);
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime<W>> {
        let world = self.world.ok_or(RuntimeError::MissingWorld)?;
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Arc::new(GoalCatalog::standard()?),
        };
        let bus = EventBus::with_capacity(self.config.event_buffer_size);

        Ok(Runtime {
            config: self.config,
            catalog,
            world,
            roster: Roster::new(),
            timers: TimerQueue::new(),
            rng: PcgRng,
            bus,
            spawn_nonce: 0,
            started: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::SandboxWorld;
    use crate::spawner::SpawnRequest;
    use agent_core::{Archetype, Assignment, Position};

    fn runtime() -> Runtime<SandboxWorld> {
        Runtime::builder()
            .world(SandboxWorld::default())
            .build()
            .expect("runtime builds")
    }

    #[test]
    fn test_build_requires_world() {
        let result = Runtime::<SandboxWorld>::builder().build();
        assert!(matches!(result, Err(RuntimeError::MissingWorld)));
    }

    #[test]
    fn test_unknown_agent_reported() {
        let mut runtime = runtime();
        assert!(matches!(
            runtime.tick(EntityId(42)),
            Err(RuntimeError::UnknownAgent(EntityId(42)))
        ));
        assert!(matches!(
            runtime.assign_goal(EntityId(42), "doRest", "relax"),
            Err(RuntimeError::UnknownAgent(_))
        ));
    }

    #[test]
    fn test_assign_goal_parses_names() {
        let mut runtime = runtime();
        let id = runtime.spawn(SpawnRequest::archetype(Archetype::Soldier));

        assert!(!runtime.assign_goal(id, "", "relax").expect("known agent"));
        assert!(matches!(
            runtime.assign_goal(id, "doNothing", "relax"),
            Err(RuntimeError::Catalog(CatalogError::UnknownGoal { .. }))
        ));
        assert!(matches!(
            runtime.assign_goal(id, "doRest", "nap"),
            Err(RuntimeError::Catalog(CatalogError::UnknownSolution { .. }))
        ));

        assert!(runtime.assign_goal(id, "doRest", "relax").expect("known agent"));
        assert_eq!(
            runtime.agent(id).and_then(|a| a.current()),
            Some(Assignment::new(GoalKind::DoRest, SolutionKind::Relax))
        );
    }

    #[test]
    fn test_goal_changes_are_published() {
        let mut runtime = runtime();
        let mut events = runtime.subscribe(Topic::Behavior);
        let id = runtime.spawn(SpawnRequest::archetype(Archetype::Soldier));
        let initial = runtime.agent(id).and_then(|a| a.current());

        runtime.assign_goal(id, "doRest", "relax").expect("known agent");

        let mut assigned = Vec::new();
        while let Ok(Event::Behavior(BehaviorEvent::GoalAssigned {
            assignment,
            replaced,
            ..
        })) = events.try_recv()
        {
            assigned.push((assignment, replaced));
        }
        assert_eq!(assigned.len(), 2);
        assert_eq!(
            assigned[1],
            (Assignment::new(GoalKind::DoRest, SolutionKind::Relax), initial)
        );
    }

    #[test]
    fn test_advance_moves_clock_in_steps() {
        let mut runtime = runtime();
        let id = runtime.spawn(
            SpawnRequest::archetype(Archetype::Soldier).at(Position::new(10.0, 10.0, 0.0)),
        );
        let report = runtime.advance(2_050);

        assert_eq!(report.now, Tick(2_050));
        assert_eq!(runtime.now(), Tick(2_050));
        // first think tick fired and was rescheduled
        assert!(report.timers_fired >= 1);
        assert!(runtime.agent(id).is_some());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut runtime = runtime();
        runtime.start();
        runtime.start();
        assert_eq!(runtime.pending_timers(), 1);
    }
}
