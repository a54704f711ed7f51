//! fleeArea: run to a random point, then recover.

use crate::arbiter::GoalArbiter;
use crate::context::BehaviorCtx;
use crate::solution::Hook;

pub fn flee_enter(ctx: &mut BehaviorCtx<'_>) {
    ctx.invoke(Hook::Execute);
}

pub fn flee_execute(ctx: &mut BehaviorCtx<'_>) {
    ctx.release_path();
    let point = ctx.random_point();
    ctx.travel_to(point);
}

pub fn flee_reach(ctx: &mut BehaviorCtx<'_>) {
    ctx.invoke(Hook::Exit);
}

pub fn flee_vitals(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.vitals.fatigue += ctx.config.vitals_decay.fatigue * 1.5;
}

pub fn flee_exit(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.vitals.happiness -= 20.0;
    ctx.agent.vitals.fatigue += 20.0;
    GoalArbiter::completed_solution(ctx);
}
