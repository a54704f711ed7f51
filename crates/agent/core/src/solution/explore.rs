//! exploreArea: walk a random number of legs to random points.

use crate::arbiter::GoalArbiter;
use crate::context::BehaviorCtx;
use crate::env::contexts;
use crate::solution::Hook;

/// Most legs one exploration may take.
pub const MAX_LEGS: u32 = 20;

pub fn enter(ctx: &mut BehaviorCtx<'_>) {
    let total = ctx.roll(contexts::EXPLORE_LEGS, 1, MAX_LEGS);
    ctx.agent.errand.explore_total = total;
    ctx.agent.errand.explore_done = 0;
    ctx.invoke(Hook::Execute);
}

pub fn execute(ctx: &mut BehaviorCtx<'_>) {
    let errand = &ctx.agent.errand;
    if errand.explore_done >= errand.explore_total {
        ctx.invoke(Hook::Exit);
        return;
    }
    let point = ctx.random_point();
    ctx.travel_to(point);
    ctx.agent.errand.explore_done += 1;
}

pub fn reach(ctx: &mut BehaviorCtx<'_>) {
    ctx.invoke(Hook::Execute);
}

pub fn vitals(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.vitals.fatigue += ctx.config.vitals_decay.fatigue * 1.5;
}

pub fn exit(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.vitals.boredom -= 20.0;
    GoalArbiter::completed_solution(ctx);
}
