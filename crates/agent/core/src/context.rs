//! Per-callback view of one agent and its collaborators.

use crate::catalog::GoalCatalog;
use crate::config::BehaviorConfig;
use crate::env::{AgentEvent, Animation, RngOracle, Scheduler, World, compute_seed, contexts};
use crate::solution::Hook;
use crate::state::{Agent, EntityId, Position};

/// Everything a behavior callback may touch.
///
/// Built by the driver for a single callback invocation: the agent is
/// borrowed exclusively, while the catalog and configuration are shared
/// read-only across agents.
pub struct BehaviorCtx<'a> {
    pub agent: &'a mut Agent,
    pub catalog: &'a GoalCatalog,
    pub config: &'a BehaviorConfig,
    pub world: &'a mut dyn World,
    pub timers: &'a mut dyn Scheduler,
    pub rng: &'a dyn RngOracle,
}

impl<'a> BehaviorCtx<'a> {
    pub fn new(
        agent: &'a mut Agent,
        catalog: &'a GoalCatalog,
        config: &'a BehaviorConfig,
        world: &'a mut dyn World,
        timers: &'a mut dyn Scheduler,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            agent,
            catalog,
            config,
            world,
            timers,
            rng,
        }
    }

    pub fn id(&self) -> EntityId {
        self.agent.id
    }

    pub fn alive(&self) -> bool {
        self.agent.alive
    }

    // ===== randomness =====

    /// Uniform integer in `[min, max]`, advancing the agent's draw counter.
    pub fn roll(&mut self, context: u32, min: u32, max: u32) -> u32 {
        let nonce = self.agent.next_nonce();
        let seed = compute_seed(self.agent.seed(), nonce, self.agent.id.0, context);
        self.rng.range(seed, min, max)
    }

    /// True with `percent` % probability.
    pub fn chance(&mut self, context: u32, percent: u32) -> bool {
        let nonce = self.agent.next_nonce();
        let seed = compute_seed(self.agent.seed(), nonce, self.agent.id.0, context);
        self.rng.roll_d100(seed) <= percent
    }

    /// Random point inside the wander bounds.
    pub fn random_point(&mut self) -> Position {
        let bounds = self.config.wander_bounds;
        let x_seed = compute_seed(
            self.agent.seed(),
            self.agent.next_nonce(),
            self.agent.id.0,
            contexts::WANDER_X,
        );
        let y_seed = compute_seed(
            self.agent.seed(),
            self.agent.next_nonce(),
            self.agent.id.0,
            contexts::WANDER_Y,
        );
        Position::new(
            self.rng.range_f64(x_seed, bounds.min_x, bounds.max_x),
            self.rng.range_f64(y_seed, bounds.min_y, bounds.max_y),
            bounds.z,
        )
    }

    // ===== movement =====

    /// Replaces the agent's path with a fresh one to `destination`.
    ///
    /// On failure the agent is left without a path and the destination is
    /// remembered so the next think tick can retry.
    pub fn generate_path(&mut self, destination: Position) -> bool {
        self.release_path();
        match self.world.create_path(self.agent.position, destination) {
            Ok(path) => {
                self.agent.attach_path(path);
                self.agent.pending_destination = None;
                true
            }
            Err(error) => {
                tracing::debug!(
                    target: "agent::path",
                    agent = %self.agent.id,
                    %error,
                    "path unavailable, will retry"
                );
                self.agent.pending_destination = Some(destination);
                false
            }
        }
    }

    /// Starts walking to the next waypoint of the current path.
    pub fn follow_path(&mut self) -> bool {
        let next = self.agent.path_mut().and_then(|path| path.next_waypoint());
        match next {
            Some(waypoint) => {
                self.move_to(waypoint);
                true
            }
            None => false,
        }
    }

    /// Builds a path to `destination` and starts following it.
    pub fn travel_to(&mut self, destination: Position) -> bool {
        self.generate_path(destination) && self.follow_path()
    }

    pub fn move_to(&mut self, destination: Position) {
        self.agent.move_destination = Some(destination);
        self.world.move_to(self.agent.id, destination);
    }

    pub fn stop(&mut self) {
        self.agent.move_destination = None;
        self.world.stop(self.agent.id);
    }

    /// Drops the current path; stopping cancels its pending arrival.
    pub fn release_path(&mut self) {
        if self.agent.take_path().is_some() {
            self.stop();
        }
    }

    pub fn teleport(&mut self, position: Position) {
        self.agent.position = position;
        self.world.set_transform(self.agent.id, position);
    }

    pub fn animate(&mut self, animation: Animation) {
        self.world.play_animation(self.agent.id, animation);
    }

    // ===== timers =====

    pub fn schedule(&mut self, delay_ms: u64, event: AgentEvent) {
        self.timers.schedule(self.agent.id, delay_ms, event);
    }

    /// Finishes the active solution after `delay_ms`, unless it is replaced first.
    pub fn schedule_exit(&mut self, delay_ms: u64) {
        let epoch = self.agent.epoch();
        self.schedule(delay_ms, AgentEvent::Exit { epoch });
    }

    /// Re-runs the active solution's `execute` after `delay_ms`.
    pub fn schedule_execute(&mut self, delay_ms: u64) {
        let epoch = self.agent.epoch();
        self.schedule(delay_ms, AgentEvent::Execute { epoch });
    }

    // ===== solution dispatch =====

    /// Invokes `hook` on the active solution, if any.
    pub fn invoke(&mut self, hook: Hook) {
        let Some(solution) = self.agent.current_solution() else {
            return;
        };
        let Some(handlers) = self.catalog.callbacks_for(solution).copied() else {
            tracing::error!(
                target: "agent::solution",
                agent = %self.agent.id,
                %solution,
                "no handlers registered"
            );
            return;
        };
        tracing::trace!(
            target: "agent::solution",
            agent = %self.agent.id,
            %solution,
            ?hook,
            "invoke"
        );
        (handlers.callback(hook))(self);
    }
}
