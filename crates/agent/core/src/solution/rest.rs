//! relax and sleep.

use super::head_to;
use crate::arbiter::GoalArbiter;
use crate::context::BehaviorCtx;
use crate::env::Animation;
use crate::solution::Hook;

/// How long one rest lasts.
pub const REST_MS: u64 = 30_000;

pub fn relax_enter(ctx: &mut BehaviorCtx<'_>) {
    ctx.invoke(Hook::Execute);
}

/// Rests on the spot.
pub fn relax_execute(ctx: &mut BehaviorCtx<'_>) {
    ctx.release_path();
    ctx.stop();
    ctx.animate(Animation::Rest);
    ctx.schedule_exit(REST_MS);
}

pub fn relax_vitals(ctx: &mut BehaviorCtx<'_>) {
    let decay = ctx.config.vitals_decay;
    ctx.agent.vitals.fatigue -= decay.fatigue * 2.0;
    ctx.agent.vitals.boredom -= decay.boredom * 2.0;
}

pub fn relax_exit(ctx: &mut BehaviorCtx<'_>) {
    ctx.animate(Animation::Look);
    let vitals = &mut ctx.agent.vitals;
    vitals.fatigue -= 50.0;
    vitals.boredom -= 50.0;
    vitals.happiness += 15.0;
    GoalArbiter::completed_solution(ctx);
}

pub fn sleep_enter(ctx: &mut BehaviorCtx<'_>) {
    let home = ctx.config.landmarks.home;
    head_to(ctx, home);
    ctx.invoke(Hook::Execute);
}

pub fn sleep_execute(ctx: &mut BehaviorCtx<'_>) {
    if !ctx.agent.errand.arrived {
        return;
    }
    ctx.animate(Animation::Rest);
    ctx.schedule_exit(REST_MS);
}

pub fn sleep_vitals(ctx: &mut BehaviorCtx<'_>) {
    if !ctx.agent.errand.arrived {
        return;
    }
    let decay = ctx.config.vitals_decay;
    ctx.agent.vitals.fatigue -= decay.fatigue * 4.0;
    ctx.agent.vitals.boredom -= decay.boredom * 4.0;
}

pub fn sleep_exit(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.errand.arrived = false;
    ctx.animate(Animation::Look);
    let vitals = &mut ctx.agent.vitals;
    vitals.health += 15.0;
    vitals.fatigue = 0.0;
    vitals.boredom = 0.0;
    GoalArbiter::completed_solution(ctx);
}
