//! Solution state machines.
//!
//! Each solution is a small state machine driven from outside: movement
//! completion, the vitals cadence and timers call into it, and it finishes by
//! calling [`GoalArbiter::completed_solution`](crate::GoalArbiter::completed_solution)
//! from its exit hook. The catalog stores one [`SolutionHandlers`] table per
//! [`SolutionKind`]; dispatch goes through the table, never through names.
//!
//! # Modules
//!
//! - [`defend`]: fleeArea
//! - [`explore`]: exploreArea
//! - [`hunt`]: seekAndDestroy, patrolArea
//! - [`rest`]: relax, sleep
//! - [`supply`]: buy/seek/steal food and health
//! - [`leisure`]: seekHome, dance

pub mod defend;
pub mod explore;
pub mod hunt;
pub mod leisure;
pub mod rest;
pub mod supply;

use crate::catalog::SolutionKind;
use crate::context::BehaviorCtx;
use crate::scoring::{Evaluator, solutions};

/// Behavior callback.
pub type Callback = fn(&mut BehaviorCtx<'_>);

/// Lifecycle hook of a solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    Enter,
    Execute,
    ReachDestination,
    CheckVitals,
    Exit,
}

/// Callback table of one solution.
#[derive(Clone, Copy, Debug)]
pub struct SolutionHandlers {
    pub evaluate: Evaluator,
    /// One-time setup when the solution becomes active.
    pub on_enter: Callback,
    /// Idempotent "may I finish now?" check.
    pub execute: Callback,
    pub on_reach_destination: Callback,
    pub on_check_vitals: Callback,
    /// Final rewards, then hand control back to the arbiter.
    pub on_exit: Callback,
}

impl SolutionHandlers {
    /// Stock behavior of `solution`.
    pub fn standard(solution: SolutionKind) -> Self {
        let evaluate = solutions::evaluator(solution);
        match solution {
            SolutionKind::FleeArea => table(
                evaluate,
                defend::flee_enter,
                defend::flee_execute,
                defend::flee_reach,
                defend::flee_vitals,
                defend::flee_exit,
            ),
            SolutionKind::ExploreArea => table(
                evaluate,
                explore::enter,
                explore::execute,
                explore::reach,
                explore::vitals,
                explore::exit,
            ),
            SolutionKind::SeekAndDestroy => table(
                evaluate,
                hunt::destroy_enter,
                hunt::destroy_execute,
                hunt::destroy_reach,
                hunt::hunting_vitals,
                hunt::destroy_exit,
            ),
            SolutionKind::PatrolArea => table(
                evaluate,
                hunt::patrol_enter,
                hunt::patrol_execute,
                hunt::patrol_reach,
                hunt::hunting_vitals,
                hunt::patrol_exit,
            ),
            SolutionKind::Relax => table(
                evaluate,
                rest::relax_enter,
                rest::relax_execute,
                noop,
                rest::relax_vitals,
                rest::relax_exit,
            ),
            SolutionKind::Sleep => table(
                evaluate,
                rest::sleep_enter,
                rest::sleep_execute,
                arrive_and_execute,
                rest::sleep_vitals,
                rest::sleep_exit,
            ),
            SolutionKind::BuyFood => table(
                evaluate,
                supply::buy_food_enter,
                supply::buy_execute,
                arrive_and_execute,
                noop,
                supply::buy_food_exit,
            ),
            SolutionKind::BuyHealth => table(
                evaluate,
                supply::buy_health_enter,
                supply::buy_execute,
                arrive_and_execute,
                noop,
                supply::buy_health_exit,
            ),
            SolutionKind::StealFood => table(
                evaluate,
                supply::steal_food_enter,
                supply::steal_food_execute,
                arrive_and_execute,
                noop,
                supply::steal_food_exit,
            ),
            SolutionKind::StealHealth => table(
                evaluate,
                supply::steal_health_enter,
                supply::steal_health_execute,
                arrive_and_execute,
                noop,
                supply::steal_health_exit,
            ),
            SolutionKind::SeekFood => table(
                evaluate,
                supply::seek_food_enter,
                supply::seek_food_execute,
                supply::scavenge_reach,
                supply::scavenge_vitals,
                supply::scavenge_exit,
            ),
            SolutionKind::SeekHealth => table(
                evaluate,
                supply::seek_health_enter,
                supply::seek_health_execute,
                supply::scavenge_reach,
                supply::scavenge_vitals,
                supply::scavenge_exit,
            ),
            SolutionKind::SeekHome => table(
                evaluate,
                leisure::home_enter,
                leisure::home_execute,
                arrive_and_execute,
                leisure::home_vitals,
                leisure::home_exit,
            ),
            SolutionKind::Dance => table(
                evaluate,
                leisure::dance_enter,
                leisure::dance_execute,
                arrive_and_execute,
                leisure::dance_vitals,
                leisure::dance_exit,
            ),
        }
    }

    pub fn callback(&self, hook: Hook) -> Callback {
        match hook {
            Hook::Enter => self.on_enter,
            Hook::Execute => self.execute,
            Hook::ReachDestination => self.on_reach_destination,
            Hook::CheckVitals => self.on_check_vitals,
            Hook::Exit => self.on_exit,
        }
    }
}

fn table(
    evaluate: Evaluator,
    on_enter: Callback,
    execute: Callback,
    on_reach_destination: Callback,
    on_check_vitals: Callback,
    on_exit: Callback,
) -> SolutionHandlers {
    SolutionHandlers {
        evaluate,
        on_enter,
        execute,
        on_reach_destination,
        on_check_vitals,
        on_exit,
    }
}

fn noop(_ctx: &mut BehaviorCtx<'_>) {}

/// Arrival at a fixed destination: mark it and re-check completion.
fn arrive_and_execute(ctx: &mut BehaviorCtx<'_>) {
    ctx.agent.errand.arrived = true;
    ctx.invoke(Hook::Execute);
}

/// Start of a "walk to a landmark" errand.
fn head_to(ctx: &mut BehaviorCtx<'_>, destination: crate::state::Position) {
    ctx.agent.errand.arrived = false;
    ctx.travel_to(destination);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::GoalArbiter;
    use crate::catalog::{Assignment, GoalKind};
    use crate::env::{AgentEvent, AimTarget, Animation, EntityKinds, InventoryItem};
    use crate::seek::TargetAcquisition;
    use crate::state::{Archetype, EntityId, Position};
    use crate::testing::{Harness, calm};
    use crate::think::AgentThinkLoop;

    /// Completes the current movement leg.
    fn arrive(h: &mut Harness) {
        if let Some(destination) = h.agent.move_destination {
            h.agent.position = destination;
        }
        AgentThinkLoop::on_reach_destination(&mut h.ctx());
    }

    #[test]
    fn test_sleep_rests_after_reaching_home() {
        let mut h = Harness::new(Archetype::Soldier, calm());
        GoalArbiter::assign_goal(&mut h.ctx(), GoalKind::DoRest, SolutionKind::Sleep);
        assert!(!h.agent.errand.arrived);
        assert!(h.timers.scheduled.is_empty());

        arrive(&mut h);
        assert!(h.agent.errand.arrived);
        assert_eq!(h.agent.position, h.config.landmarks.home);
        assert_eq!(h.world.animations.last(), Some(&Animation::Rest));
        let epoch = h.agent.epoch();
        assert!(h.timers.scheduled.contains(&(rest::REST_MS, AgentEvent::Exit { epoch })));

        h.agent.vitals.fatigue = 90.0;
        AgentThinkLoop::handle(&mut h.ctx(), AgentEvent::Exit { epoch });
        assert_eq!(h.agent.vitals.fatigue, 0.0);
        assert_eq!(h.agent.vitals.health, 115.0);
    }

    #[test]
    fn test_buy_food_pays_and_uses_kit() {
        let mut h = Harness::new(Archetype::Entertainer, calm());
        GoalArbiter::assign_goal(&mut h.ctx(), GoalKind::GetFood, SolutionKind::BuyFood);
        arrive(&mut h);

        let epoch = h.agent.epoch();
        AgentThinkLoop::handle(&mut h.ctx(), AgentEvent::Exit { epoch });
        assert_eq!(h.agent.vitals.money, 150.0);
        assert_eq!(h.world.inventory, vec![(InventoryItem::FoodKit, 1)]);
        assert_eq!(h.world.used, vec![InventoryItem::FoodKit]);
    }

    #[test]
    fn test_steal_aims_and_fires_at_vendor() {
        let mut h = Harness::new(Archetype::Bandit, calm());
        GoalArbiter::assign_goal(&mut h.ctx(), GoalKind::GetHealth, SolutionKind::StealHealth);
        arrive(&mut h);

        let vendor = h.config.landmarks.health_vendor;
        assert_eq!(h.world.aim, Some(AimTarget::Point(vendor)));
        assert_eq!(h.world.triggers, vec![true]);
        assert!(h.timers.scheduled.contains(&(1_500, AgentEvent::ReleaseTrigger)));

        let epoch = h.agent.epoch();
        AgentThinkLoop::handle(&mut h.ctx(), AgentEvent::Exit { epoch });
        assert_eq!(h.world.aim, None);
        assert_eq!(h.world.used, vec![InventoryItem::HealthKit]);
        assert_eq!(h.agent.vitals.money, 200.0);
    }

    #[test]
    fn test_explore_walks_rolled_number_of_legs() {
        let mut h = Harness::new(Archetype::Bandit, calm());
        GoalArbiter::assign_goal(&mut h.ctx(), GoalKind::DoExplore, SolutionKind::ExploreArea);
        let total = h.agent.errand.explore_total;
        assert!((1..=explore::MAX_LEGS).contains(&total));

        for _ in 0..total {
            assert_eq!(h.agent.current_solution(), Some(SolutionKind::ExploreArea));
            arrive(&mut h);
        }
        assert_eq!(h.agent.errand.explore_done, total);
        assert_ne!(h.agent.current_solution(), Some(SolutionKind::ExploreArea));
        assert_eq!(h.agent.vitals.boredom, -20.0);
    }

    #[test]
    fn test_seek_and_destroy_engages_found_rival() {
        let mut h = Harness::new(Archetype::Soldier, calm());
        let bandit = Position::new(30.0, 0.0, 0.0);
        h.world.spawn(2, "bandit", EntityKinds::AGENT, bandit);

        GoalArbiter::assign_goal(&mut h.ctx(), GoalKind::DoHunt, SolutionKind::SeekAndDestroy);
        AgentThinkLoop::tick(&mut h.ctx());

        let combat = &h.agent.combat;
        assert!(combat.in_combat && combat.hunt_close_following);
        assert_eq!(combat.hunt_target, Some(EntityId(2)));
        assert_eq!(h.world.aim, Some(AimTarget::Entity(EntityId(2))));
        let epoch = h.agent.epoch();
        assert!(h.timers.scheduled.contains(&(2_000, AgentEvent::Execute { epoch })));

        h.world.entities[0].alive = false;
        AgentThinkLoop::handle(&mut h.ctx(), AgentEvent::Execute { epoch });
        assert!(!h.agent.combat.in_combat);
        assert_eq!(h.agent.vitals.money, 250.0);
        assert_ne!(h.agent.current_solution(), Some(SolutionKind::SeekAndDestroy));
    }

    #[test]
    fn test_entertainer_never_hunts() {
        let mut h = Harness::new(Archetype::Entertainer, calm());
        GoalArbiter::assign_goal(&mut h.ctx(), GoalKind::DoHunt, SolutionKind::SeekAndDestroy);
        assert_ne!(h.agent.current_solution(), Some(SolutionKind::SeekAndDestroy));
        assert!(!h.agent.seek.seeking);
    }

    #[test]
    fn test_lost_hunt_target_keeps_solution_on_vitals() {
        let mut h = Harness::new(Archetype::Soldier, calm());
        h.world.spawn(2, "bandit", EntityKinds::AGENT, Position::new(120.0, 0.0, 0.0));
        GoalArbiter::assign_goal(&mut h.ctx(), GoalKind::DoHunt, SolutionKind::SeekAndDestroy);
        assert!(h.agent.seek.seeking);

        TargetAcquisition::cancel_seek(&mut h.ctx());
        AgentThinkLoop::check_vitals(&mut h.ctx());

        assert_eq!(h.agent.current_solution(), Some(SolutionKind::SeekAndDestroy));
        assert!(!h.agent.combat.in_combat);
        assert_eq!(h.agent.vitals.fatigue, 25.0);
        assert_eq!(h.agent.vitals.money, 200.0);
    }

    #[test]
    fn test_patrol_interrupts_into_hunt_on_detection() {
        let mut h = Harness::new(Archetype::Bandit, calm());
        let patrol = Assignment::new(GoalKind::DoHunt, SolutionKind::PatrolArea);
        GoalArbiter::assign_goal(&mut h.ctx(), patrol.goal, patrol.solution);
        assert!(h.agent.errand.patrol.is_planned());
        assert!(h.agent.seek.detecting);

        h.world.spawn(2, "soldier", EntityKinds::AGENT, Position::new(40.0, 0.0, 0.0));
        TargetAcquisition::think(&mut h.ctx());

        assert_eq!(h.agent.current_solution(), Some(SolutionKind::SeekAndDestroy));
        assert_eq!(h.agent.previous(), Some(patrol));
        assert!(h.agent.resume_previous);
    }

    #[test]
    fn test_dance_restores_idle_before_exit() {
        let mut h = Harness::new(Archetype::Entertainer, calm());
        GoalArbiter::assign_goal(&mut h.ctx(), GoalKind::HaveFun, SolutionKind::Dance);
        arrive(&mut h);

        let epoch = h.agent.epoch();
        assert_eq!(h.world.animations.last(), Some(&Animation::Dance));
        assert!(h.timers.scheduled.contains(&(leisure::DANCE_IDLE_MS, AgentEvent::RestoreIdle { epoch })));
        assert!(h.timers.scheduled.contains(&(leisure::DANCE_MS, AgentEvent::Exit { epoch })));

        AgentThinkLoop::handle(&mut h.ctx(), AgentEvent::RestoreIdle { epoch });
        assert_eq!(h.world.animations.last(), Some(&Animation::Look));
    }
}
