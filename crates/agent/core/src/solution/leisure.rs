//! seekHome and dance.

use super::head_to;
use crate::arbiter::GoalArbiter;
use crate::context::BehaviorCtx;
use crate::env::{AgentEvent, Animation};
use crate::solution::Hook;

pub const HOME_STAY_MS: u64 = 10_000;
pub const HOME_PAY: f64 = 200.0;
pub const DANCE_MS: u64 = 10_000;
/// Dancing stops slightly before the solution ends.
pub const DANCE_IDLE_MS: u64 = 9_000;

pub fn home_enter(ctx: &mut BehaviorCtx<'_>) {
    let home = ctx.config.landmarks.home;
    head_to(ctx, home);
    ctx.invoke(Hook::Execute);
}

/// Heals and collects pay once home.
pub fn home_execute(ctx: &mut BehaviorCtx<'_>) {
    if !ctx.agent.errand.arrived {
        return;
    }
    ctx.agent.vitals.health = 100.0;
    ctx.agent.vitals.money += HOME_PAY;
    ctx.schedule_exit(HOME_STAY_MS);
}

pub fn home_vitals(ctx: &mut BehaviorCtx<'_>) {
    if !ctx.agent.errand.arrived {
        return;
    }
    let decay = ctx.config.vitals_decay;
    ctx.agent.vitals.fatigue -= decay.fatigue * 1.5;
    ctx.agent.vitals.boredom -= decay.boredom * 1.5;
}

pub fn home_exit(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.errand.arrived = false;
    GoalArbiter::completed_solution(ctx);
}

pub fn dance_enter(ctx: &mut BehaviorCtx<'_>) {
    ctx.animate(Animation::Look);
    let club = ctx.config.landmarks.club;
    head_to(ctx, club);
    ctx.invoke(Hook::Execute);
}

pub fn dance_execute(ctx: &mut BehaviorCtx<'_>) {
    if !ctx.agent.errand.arrived {
        return;
    }
    ctx.animate(Animation::Dance);
    ctx.schedule_exit(DANCE_MS);
    let epoch = ctx.agent.epoch();
    ctx.schedule(DANCE_IDLE_MS, AgentEvent::RestoreIdle { epoch });
}

pub fn dance_vitals(ctx: &mut BehaviorCtx<'_>) {
    if !ctx.agent.errand.arrived {
        return;
    }
    let decay = ctx.config.vitals_decay;
    ctx.agent.vitals.fatigue += decay.fatigue * 2.0;
    ctx.agent.vitals.happiness -= decay.happiness * 2.0;
}

pub fn dance_exit(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.errand.arrived = false;
    let vitals = &mut ctx.agent.vitals;
    vitals.happiness += 33.0;
    vitals.fatigue -= 33.0;
    vitals.boredom -= 33.0;
    ctx.animate(Animation::Look);
    GoalArbiter::completed_solution(ctx);
}
