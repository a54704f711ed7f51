//! Periodic driver and movement callbacks.
//!
//! Every entry point re-validates that the agent is alive; a callback against
//! a dead agent is a no-op.

use crate::arbiter::GoalArbiter;
use crate::combat::CombatReactor;
use crate::context::BehaviorCtx;
use crate::env::{AgentEvent, Animation};
use crate::seek::TargetAcquisition;
use crate::solution::Hook;

/// Think tick, vitals tick and movement notifications of one agent.
pub struct AgentThinkLoop;

impl AgentThinkLoop {
    /// One think tick, without rescheduling.
    ///
    /// Runs target acquisition and the combat step, tracks stagnation,
    /// retries a pending path and requests a goal when idle.
    pub fn tick(ctx: &mut BehaviorCtx<'_>) {
        if !ctx.alive() {
            return;
        }
        ctx.agent.next_nonce();

        TargetAcquisition::think(ctx);
        CombatReactor::think(ctx);
        if !ctx.alive() {
            return;
        }

        let goal = ctx.agent.current_goal();
        if goal.is_some() && goal == ctx.agent.last_tick_goal {
            ctx.agent.stagnation_ticks += 1;
        } else {
            ctx.agent.stagnation_ticks = 0;
            ctx.agent.last_tick_goal = goal;
        }

        if ctx.agent.stagnation_ticks > ctx.config.stagnation_limit {
            tracing::debug!(
                target: "agent::think",
                agent = %ctx.agent.id,
                ?goal,
                ticks = ctx.agent.stagnation_ticks,
                "stagnant, forcing exit"
            );
            ctx.invoke(Hook::Exit);
            ctx.agent.stagnation_ticks = 0;
        }

        if let Some(destination) = ctx.agent.pending_destination {
            ctx.travel_to(destination);
        }

        if ctx.agent.current().is_none() {
            GoalArbiter::request_new_goal(ctx, false, false);
        }
    }

    /// Applies baseline vitals decay and the active solution's vitals hook.
    pub fn check_vitals(ctx: &mut BehaviorCtx<'_>) {
        if !ctx.alive() {
            return;
        }
        let decay = ctx.config.vitals_decay;
        let vitals = &mut ctx.agent.vitals;
        vitals.happiness += decay.happiness;
        vitals.fatigue += decay.fatigue;
        vitals.boredom += decay.boredom;

        ctx.invoke(Hook::CheckVitals);
    }

    /// Movement reached the requested point.
    pub fn on_reach_destination(ctx: &mut BehaviorCtx<'_>) {
        if !ctx.alive() {
            return;
        }
        ctx.agent.combat.is_side_stepping = false;
        ctx.agent.move_destination = None;

        let more = ctx.agent.path().map(|path| path.has_more_waypoints());
        match more {
            Some(true) => {
                ctx.follow_path();
            }
            Some(false) => {
                ctx.release_path();
                ctx.invoke(Hook::ReachDestination);
            }
            None => ctx.invoke(Hook::ReachDestination),
        }
    }

    /// Movement reported the agent cannot make progress.
    pub fn on_move_stuck(ctx: &mut BehaviorCtx<'_>) {
        if !ctx.alive() {
            return;
        }

        if let Some(waypoint) = ctx.agent.path_mut().and_then(|path| path.next_waypoint()) {
            tracing::debug!(target: "agent::think", agent = %ctx.agent.id, "stuck, skipping to next waypoint");
            ctx.teleport(waypoint);
            ctx.move_to(waypoint);
            return;
        }

        let destination = ctx
            .agent
            .path()
            .and_then(|path| path.destination())
            .or(ctx.agent.move_destination);
        let Some(destination) = destination else {
            return;
        };

        if ctx.agent.position.distance(&destination) <= ctx.config.stuck_tolerance {
            tracing::debug!(target: "agent::think", agent = %ctx.agent.id, "stuck near destination, snapping");
            let position = ctx.agent.position;
            ctx.move_to(position);
        } else {
            tracing::debug!(target: "agent::think", agent = %ctx.agent.id, "stuck, regenerating path");
            ctx.travel_to(destination);
        }
    }

    /// Dispatches a timer event; stale solution continuations are dropped.
    pub fn handle(ctx: &mut BehaviorCtx<'_>, event: AgentEvent) {
        if !ctx.alive() {
            return;
        }
        let epoch = ctx.agent.epoch();
        match event {
            AgentEvent::Think => {
                Self::tick(ctx);
                ctx.schedule(ctx.config.think_interval_ms, AgentEvent::Think);
            }
            AgentEvent::CheckVitals => {
                Self::check_vitals(ctx);
                ctx.schedule(ctx.config.vitals_interval_ms, AgentEvent::CheckVitals);
            }
            AgentEvent::Execute { epoch: scheduled } if scheduled == epoch => ctx.invoke(Hook::Execute),
            AgentEvent::Exit { epoch: scheduled } if scheduled == epoch => ctx.invoke(Hook::Exit),
            AgentEvent::RestoreIdle { epoch: scheduled } if scheduled == epoch => {
                ctx.animate(Animation::Look);
            }
            AgentEvent::ReleaseTrigger => {
                let id = ctx.agent.id;
                ctx.world.fire_weapon(id, false);
            }
            stale => {
                tracing::trace!(target: "agent::think", agent = %ctx.agent.id, ?stale, epoch, "dropping stale continuation");
            }
        }
    }

    /// Death: drops the path and every behavior reference.
    pub fn on_death(ctx: &mut BehaviorCtx<'_>) {
        if !ctx.alive() {
            return;
        }
        tracing::info!(target: "agent::think", agent = %ctx.agent.id, archetype = %ctx.agent.archetype, "died");
        ctx.release_path();
        let id = ctx.agent.id;
        ctx.world.fire_weapon(id, false);
        ctx.agent.seek.reset_seek();
        ctx.agent.seek.reset_detect();
        ctx.agent.combat.disengage();
        ctx.agent.clear_assignment();
        ctx.agent.alive = false;
    }
}
