//! Food and health: buy at a vendor, steal from it, or scavenge an item.

use super::head_to;
use crate::arbiter::GoalArbiter;
use crate::context::BehaviorCtx;
use crate::env::{AgentEvent, AimTarget, EntityKinds, InventoryItem};
use crate::seek::TargetAcquisition;
use crate::solution::Hook;
use crate::state::Position;

/// Time spent at a vendor.
pub const VENDOR_MS: u64 = 5_000;
pub const FOOD_PRICE: f64 = 50.0;
pub const HEALTH_PRICE: f64 = 60.0;

/// World names of scavengeable items.
pub const FOOD_ITEM: &str = "food_item";
pub const HEALTH_ITEM: &str = "health_patch";

fn take_kit(ctx: &mut BehaviorCtx<'_>, kit: InventoryItem) {
    let id = ctx.agent.id;
    ctx.world.increment_inventory(id, kit, 1);
    ctx.world.use_item(id, kit);
}

// ===== buy =====

pub fn buy_food_enter(ctx: &mut BehaviorCtx<'_>) {
    let vendor = ctx.config.landmarks.food_vendor;
    head_to(ctx, vendor);
    ctx.invoke(Hook::Execute);
}

pub fn buy_health_enter(ctx: &mut BehaviorCtx<'_>) {
    let vendor = ctx.config.landmarks.health_vendor;
    head_to(ctx, vendor);
    ctx.invoke(Hook::Execute);
}

pub fn buy_execute(ctx: &mut BehaviorCtx<'_>) {
    if ctx.agent.errand.arrived {
        ctx.schedule_exit(VENDOR_MS);
    }
}

pub fn buy_food_exit(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.errand.arrived = false;
    ctx.agent.vitals.money -= FOOD_PRICE;
    take_kit(ctx, InventoryItem::FoodKit);
    GoalArbiter::completed_solution(ctx);
}

pub fn buy_health_exit(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.errand.arrived = false;
    ctx.agent.vitals.money -= HEALTH_PRICE;
    take_kit(ctx, InventoryItem::HealthKit);
    GoalArbiter::completed_solution(ctx);
}

// ===== steal =====

/// Holds up the vendor at `vendor` once there.
fn rob(ctx: &mut BehaviorCtx<'_>, vendor: Position) {
    if !ctx.agent.errand.arrived {
        return;
    }
    let id = ctx.agent.id;
    ctx.world.set_aim(id, AimTarget::Point(vendor), Position::ORIGIN);
    ctx.world.fire_weapon(id, true);
    ctx.schedule(ctx.config.trigger_release_ms, AgentEvent::ReleaseTrigger);
    ctx.schedule_exit(VENDOR_MS);
}

fn getaway(ctx: &mut BehaviorCtx<'_>, kit: InventoryItem) {
    ctx.agent.errand.arrived = false;
    let id = ctx.agent.id;
    ctx.world.clear_aim(id);
    take_kit(ctx, kit);
    GoalArbiter::completed_solution(ctx);
}

pub fn steal_food_enter(ctx: &mut BehaviorCtx<'_>) {
    buy_food_enter(ctx);
}

pub fn steal_food_execute(ctx: &mut BehaviorCtx<'_>) {
    let vendor = ctx.config.landmarks.food_vendor;
    rob(ctx, vendor);
}

pub fn steal_food_exit(ctx: &mut BehaviorCtx<'_>) {
    getaway(ctx, InventoryItem::FoodKit);
}

pub fn steal_health_enter(ctx: &mut BehaviorCtx<'_>) {
    buy_health_enter(ctx);
}

pub fn steal_health_execute(ctx: &mut BehaviorCtx<'_>) {
    let vendor = ctx.config.landmarks.health_vendor;
    rob(ctx, vendor);
}

pub fn steal_health_exit(ctx: &mut BehaviorCtx<'_>) {
    getaway(ctx, InventoryItem::HealthKit);
}

// ===== scavenge =====

pub fn seek_food_enter(ctx: &mut BehaviorCtx<'_>) {
    TargetAcquisition::seek_object(ctx, Some(FOOD_ITEM), EntityKinds::ITEM, None);
}

pub fn seek_health_enter(ctx: &mut BehaviorCtx<'_>) {
    TargetAcquisition::seek_object(ctx, Some(HEALTH_ITEM), EntityKinds::ITEM, None);
}

pub fn seek_food_execute(ctx: &mut BehaviorCtx<'_>) {
    finish_on_object(ctx);
}

pub fn seek_health_execute(ctx: &mut BehaviorCtx<'_>) {
    finish_on_object(ctx);
}

fn finish_on_object(ctx: &mut BehaviorCtx<'_>) {
    if ctx.agent.seek.on_object {
        ctx.invoke(Hook::Exit);
    }
}

pub fn scavenge_reach(ctx: &mut BehaviorCtx<'_>) {
    ctx.invoke(Hook::Execute);
}

pub fn scavenge_vitals(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.vitals.fatigue += ctx.config.vitals_decay.fatigue * 2.0;
}

pub fn scavenge_exit(ctx: &mut BehaviorCtx<'_>) {
    TargetAcquisition::cancel_seek(ctx);
    GoalArbiter::completed_solution(ctx);
}
