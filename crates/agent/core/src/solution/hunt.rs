//! seekAndDestroy and patrolArea.
//!
//! Soldiers hunt bandits and bandits hunt soldiers. seekAndDestroy either
//! chases an attacker handed over by the combat reactor or seeks the closest
//! rival; patrolArea walks a fixed loop of four random waypoints and
//! interrupts into seekAndDestroy as soon as it detects a rival.

use crate::arbiter::GoalArbiter;
use crate::catalog::{GoalKind, SolutionKind};
use crate::context::BehaviorCtx;
use crate::env::{AimTarget, EntityKinds};
use crate::seek::TargetAcquisition;
use crate::solution::Hook;
use crate::state::{PATROL_WAYPOINTS, Position};

/// Money earned by a finished hunt or patrol.
pub const HUNT_REWARD: f64 = 50.0;

/// Aim offset toward the target's upper body.
pub(crate) const AIM_OFFSET: Position = Position::new(0.0, 0.0, 2.0);

// ===== seekAndDestroy =====

pub fn destroy_enter(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.combat.hunt_close_following = false;
    let distance = ctx.config.hunt_distance_away;

    if let Some(target) = ctx.agent.combat.explicit_target {
        match ctx.world.entity(target).filter(|view| !view.is_dead()) {
            Some(view) => {
                TargetAcquisition::seek_object(ctx, None, view.kind, Some(distance));
                TargetAcquisition::lock_on(ctx, &view);
                return;
            }
            None => ctx.agent.combat.explicit_target = None,
        }
    }

    match ctx.agent.archetype.rival() {
        Some(rival) => {
            let name = rival.to_string();
            TargetAcquisition::seek_object(ctx, Some(&name), EntityKinds::AGENT, Some(distance));
        }
        None => ctx.invoke(Hook::Exit),
    }
}

/// Engages once the target is found in place.
pub fn destroy_reach(ctx: &mut BehaviorCtx<'_>) {
    let seek = &ctx.agent.seek;
    if seek.seeking || !seek.found || ctx.agent.combat.hunt_close_following {
        return;
    }
    let Some(target) = seek.object else {
        return;
    };

    let combat = &mut ctx.agent.combat;
    combat.hunt_target = Some(target);
    combat.hunt_close_following = true;
    combat.in_combat = true;
    tracing::info!(target: "agent::combat", agent = %ctx.agent.id, %target, "engaging");

    let id = ctx.agent.id;
    ctx.world.set_aim(id, AimTarget::Entity(target), AIM_OFFSET);
    ctx.release_path();
    ctx.invoke(Hook::Execute);
}

/// Finishes once the target is gone, otherwise re-checks later.
pub fn destroy_execute(ctx: &mut BehaviorCtx<'_>) {
    let target_alive = ctx
        .agent
        .combat
        .hunt_target
        .and_then(|id| ctx.world.entity(id))
        .is_some_and(|view| !view.is_dead());
    if target_alive {
        ctx.schedule_execute(ctx.config.hunt_recheck_ms);
    } else {
        ctx.invoke(Hook::Exit);
    }
}

pub fn destroy_exit(ctx: &mut BehaviorCtx<'_>) {
    let id = ctx.agent.id;
    ctx.world.fire_weapon(id, false);
    ctx.world.clear_aim(id);
    ctx.agent.combat.disengage();
    TargetAcquisition::cancel_seek(ctx);
    ctx.agent.vitals.money += HUNT_REWARD;
    GoalArbiter::completed_solution(ctx);
}

// ===== patrolArea =====

pub fn patrol_enter(ctx: &mut BehaviorCtx<'_>) {
    TargetAcquisition::cancel_detect(ctx);

    if !ctx.agent.errand.patrol.is_planned() {
        ctx.agent.errand.patrol.waypoints.clear();
        for _ in 0..PATROL_WAYPOINTS {
            let point = ctx.random_point();
            ctx.agent.errand.patrol.waypoints.push(point);
        }
    }
    if let Some(waypoint) = ctx.agent.errand.patrol.entry_waypoint() {
        ctx.travel_to(waypoint);
    }

    match ctx.agent.archetype.rival() {
        Some(rival) => {
            let name = rival.to_string();
            TargetAcquisition::detect_object(ctx, Some(&name), EntityKinds::AGENT);
        }
        None => ctx.invoke(Hook::Exit),
    }
}

pub fn patrol_reach(ctx: &mut BehaviorCtx<'_>) {
    if ctx.agent.seek.detect_found {
        tracing::info!(
            target: "agent::combat",
            agent = %ctx.agent.id,
            target = ?ctx.agent.seek.detect_object,
            "rival spotted on patrol"
        );
        ctx.agent.goal_interrupt = true;
        GoalArbiter::assign_goal(ctx, GoalKind::DoHunt, SolutionKind::SeekAndDestroy);
    } else {
        ctx.invoke(Hook::Execute);
    }
}

/// Walks the next leg of the loop.
pub fn patrol_execute(ctx: &mut BehaviorCtx<'_>) {
    if let Some(waypoint) = ctx.agent.errand.patrol.advance() {
        ctx.travel_to(waypoint);
    }
}

pub fn hunting_vitals(ctx: &mut BehaviorCtx<'_>) {
    let decay = ctx.config.vitals_decay;
    ctx.agent.vitals.fatigue += decay.fatigue * 1.5;
    ctx.agent.vitals.boredom += decay.boredom * 1.2;
}

pub fn patrol_exit(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.vitals.money += HUNT_REWARD;
    TargetAcquisition::cancel_detect(ctx);
    GoalArbiter::completed_solution(ctx);
}
