//! Reactive combat layer.

use crate::arbiter::GoalArbiter;
use crate::catalog::{GoalKind, SolutionKind};
use crate::context::BehaviorCtx;
use crate::env::{AgentEvent, AimTarget, InventoryItem, contexts};
use crate::scoring::solutions;
use crate::solution::hunt;
use crate::state::EntityId;

/// What a damage notification led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageResponse {
    /// Dead agent, invalid or repeated attacker.
    Ignored,
    /// Interrupted into doDefend/fleeArea.
    Flee,
    /// Interrupted into doHunt/seekAndDestroy against the attacker.
    Hunt,
    /// Already fighting; the attacker is closer and the hunt restarted on it.
    SwitchedTarget,
    /// Already fighting a closer target.
    KeptTarget,
}

/// Combat think step and damage reactions.
pub struct CombatReactor;

impl CombatReactor {
    /// Per-tick combat step.
    ///
    /// Forgets the last attacker, then, while in combat: maybe sidesteps,
    /// shoots at a visible target or closes in on its last known position.
    pub fn think(ctx: &mut BehaviorCtx<'_>) {
        ctx.agent.combat.last_attacker = None;
        if !ctx.agent.combat.in_combat {
            return;
        }

        if ctx.chance(contexts::SIDESTEP_CHANCE, ctx.config.sidestep_chance) {
            Self::sidestep(ctx);
        }

        let target = ctx
            .agent
            .combat
            .hunt_target
            .and_then(|id| ctx.world.entity(id))
            .filter(|t| !t.is_dead());
        let side_stepping = ctx.agent.combat.is_side_stepping;

        match target {
            Some(target) if ctx.world.line_of_sight(ctx.agent.id, target.id) => {
                ctx.agent.combat.last_known_target_position = Some(target.position);
                if !side_stepping {
                    ctx.stop();
                }
                let id = ctx.agent.id;
                ctx.world.fire_weapon(id, true);
                ctx.world.increment_inventory(id, InventoryItem::CrossbowAmmo, 1);
                ctx.schedule(ctx.config.trigger_release_ms, AgentEvent::ReleaseTrigger);
                tracing::trace!(target: "agent::combat", agent = %id, target = %target.id, "firing");
            }
            Some(target) => {
                ctx.agent.combat.last_known_target_position = Some(target.position);
                if !side_stepping {
                    ctx.move_to(target.position);
                }
            }
            None => match ctx.agent.combat.last_known_target_position {
                Some(last_known) if !side_stepping => ctx.move_to(last_known),
                _ => {}
            },
        }
    }

    fn sidestep(ctx: &mut BehaviorCtx<'_>) {
        let max = ctx.config.sidestep_max.max(1);
        let dx = ctx.roll(contexts::SIDESTEP_X, 1, max);
        let dy = ctx.roll(contexts::SIDESTEP_Y, 1, max);
        ctx.agent.combat.is_side_stepping = true;
        let point = ctx.agent.position.offset(f64::from(dx), f64::from(dy), 0.0);
        ctx.move_to(point);
    }

    /// Reacts to `attacker` damaging the agent.
    pub fn on_damage(ctx: &mut BehaviorCtx<'_>, attacker: EntityId) -> DamageResponse {
        if !ctx.alive() || attacker == ctx.agent.id {
            return DamageResponse::Ignored;
        }
        let Some(view) = ctx.world.entity(attacker) else {
            tracing::trace!(target: "agent::combat", agent = %ctx.agent.id, %attacker, "unknown attacker");
            return DamageResponse::Ignored;
        };
        if !view.is_actor() || ctx.agent.combat.last_attacker == Some(attacker) {
            return DamageResponse::Ignored;
        }
        ctx.agent.combat.last_attacker = Some(attacker);

        let flee = solutions::flee_area(ctx.agent, ctx.rng);
        if flee > 0.0 {
            tracing::info!(target: "agent::combat", agent = %ctx.agent.id, %attacker, flee, "fleeing");
            ctx.agent.goal_interrupt = true;
            GoalArbiter::assign_goal(ctx, GoalKind::DoDefend, SolutionKind::FleeArea);
            return DamageResponse::Flee;
        }

        if !ctx.agent.combat.in_combat {
            tracing::info!(target: "agent::combat", agent = %ctx.agent.id, %attacker, "fighting back");
            ctx.agent.combat.explicit_target = Some(attacker);
            ctx.agent.goal_interrupt = true;
            GoalArbiter::assign_goal(ctx, GoalKind::DoHunt, SolutionKind::SeekAndDestroy);
            return DamageResponse::Hunt;
        }

        let position = ctx.agent.position;
        let current = ctx
            .agent
            .combat
            .hunt_target
            .and_then(|id| ctx.world.entity(id))
            .map_or(f64::INFINITY, |t| t.position.distance(&position));
        if view.position.distance(&position) < current {
            tracing::debug!(target: "agent::combat", agent = %ctx.agent.id, %attacker, "switching target");
            let combat = &mut ctx.agent.combat;
            combat.hunt_target = Some(attacker);
            combat.explicit_target = Some(attacker);
            combat.last_known_target_position = Some(view.position);
            let id = ctx.agent.id;
            ctx.world.set_aim(id, AimTarget::Entity(attacker), hunt::AIM_OFFSET);

            // Re-enter the hunt so the seek locks onto the new attacker.
            ctx.agent.goal_interrupt = true;
            GoalArbiter::assign_goal(ctx, GoalKind::DoHunt, SolutionKind::SeekAndDestroy);
            DamageResponse::SwitchedTarget
        } else {
            DamageResponse::KeptTarget
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Assignment;
    use crate::env::EntityKinds;
    use crate::state::{Archetype, Position, Vitals};
    use crate::testing::{Harness, calm};

    fn with_bandit(vitals: Vitals) -> Harness {
        let mut h = Harness::new(Archetype::Soldier, vitals);
        h.world.spawn(2, "bandit", EntityKinds::AGENT, Position::new(50.0, 0.0, 0.0));
        h
    }

    #[test]
    fn test_wounded_soldier_flees() {
        let mut h = with_bandit(Vitals::new(20.0, 80.0, 100.0, 0.0, 200.0));
        assert_eq!(CombatReactor::on_damage(&mut h.ctx(), EntityId(2)), DamageResponse::Flee);
        assert_eq!(
            h.agent.current(),
            Some(Assignment::new(GoalKind::DoDefend, SolutionKind::FleeArea))
        );
        assert!(h.agent.resume_previous);
        assert!(!h.agent.goal_interrupt);
    }

    #[test]
    fn test_healthy_soldier_hunts_attacker() {
        let mut h = with_bandit(calm());
        assert_eq!(CombatReactor::on_damage(&mut h.ctx(), EntityId(2)), DamageResponse::Hunt);
        assert_eq!(
            h.agent.current(),
            Some(Assignment::new(GoalKind::DoHunt, SolutionKind::SeekAndDestroy))
        );
        assert_eq!(h.agent.combat.explicit_target, Some(EntityId(2)));
        assert!(h.agent.seek.seeking && h.agent.seek.found);
        assert_eq!(h.agent.seek.object, Some(EntityId(2)));
        assert_eq!(h.agent.seek.distance_away, h.config.hunt_distance_away);
    }

    #[test]
    fn test_entertainer_always_flees() {
        let mut h = Harness::new(Archetype::Entertainer, calm());
        h.world.spawn(2, "bandit", EntityKinds::AGENT, Position::new(50.0, 0.0, 0.0));
        assert_eq!(CombatReactor::on_damage(&mut h.ctx(), EntityId(2)), DamageResponse::Flee);
    }

    #[test]
    fn test_invalid_attackers_ignored() {
        let mut h = with_bandit(calm());
        h.world.spawn(3, "crate", EntityKinds::ITEM, Position::new(5.0, 0.0, 0.0));

        assert_eq!(CombatReactor::on_damage(&mut h.ctx(), EntityId(1)), DamageResponse::Ignored);
        assert_eq!(CombatReactor::on_damage(&mut h.ctx(), EntityId(3)), DamageResponse::Ignored);
        assert_eq!(CombatReactor::on_damage(&mut h.ctx(), EntityId(9)), DamageResponse::Ignored);
        assert_eq!(h.agent.current(), None);

        h.agent.alive = false;
        assert_eq!(CombatReactor::on_damage(&mut h.ctx(), EntityId(2)), DamageResponse::Ignored);
    }

    #[test]
    fn test_repeat_attacker_ignored_until_think() {
        let mut h = with_bandit(calm());
        CombatReactor::on_damage(&mut h.ctx(), EntityId(2));
        assert_eq!(CombatReactor::on_damage(&mut h.ctx(), EntityId(2)), DamageResponse::Ignored);

        CombatReactor::think(&mut h.ctx());
        assert_eq!(h.agent.combat.last_attacker, None);
        assert_ne!(CombatReactor::on_damage(&mut h.ctx(), EntityId(2)), DamageResponse::Ignored);
    }

    #[test]
    fn test_only_closer_attacker_takes_over() {
        let mut h = with_bandit(calm());
        h.world.spawn(3, "bandit", EntityKinds::AGENT, Position::new(10.0, 0.0, 0.0));
        h.world.spawn(4, "bandit", EntityKinds::AGENT, Position::new(80.0, 0.0, 0.0));
        assert_eq!(CombatReactor::on_damage(&mut h.ctx(), EntityId(2)), DamageResponse::Hunt);
        h.agent.combat.in_combat = true;
        h.agent.combat.hunt_target = Some(EntityId(2));
        h.world.aim = Some(AimTarget::Entity(EntityId(2)));
        let epoch = h.agent.epoch();

        assert_eq!(CombatReactor::on_damage(&mut h.ctx(), EntityId(4)), DamageResponse::KeptTarget);
        assert_eq!(h.agent.combat.hunt_target, Some(EntityId(2)));
        assert_eq!(h.agent.combat.explicit_target, Some(EntityId(2)));
        assert_eq!(h.agent.epoch(), epoch);

        assert_eq!(
            CombatReactor::on_damage(&mut h.ctx(), EntityId(3)),
            DamageResponse::SwitchedTarget
        );
        assert_eq!(h.agent.combat.hunt_target, Some(EntityId(3)));
        assert_eq!(h.agent.combat.explicit_target, Some(EntityId(3)));
        assert_eq!(h.world.aim, Some(AimTarget::Entity(EntityId(3))));
        assert_ne!(h.agent.epoch(), epoch);
        assert_eq!(
            h.agent.current(),
            Some(Assignment::new(GoalKind::DoHunt, SolutionKind::SeekAndDestroy))
        );
        assert!(h.agent.resume_previous);
        assert_eq!(h.agent.seek.object, Some(EntityId(3)));
        assert_eq!(h.world.moves.last(), Some(&Position::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_visible_target_is_shot() {
        let mut h = with_bandit(calm());
        h.agent.combat.in_combat = true;
        h.agent.combat.hunt_target = Some(EntityId(2));

        CombatReactor::think(&mut h.ctx());
        assert_eq!(h.world.triggers, vec![true]);
        assert!(h.world.inventory.contains(&(InventoryItem::CrossbowAmmo, 1)));
        assert!(h.timers.scheduled.contains(&(1_500, AgentEvent::ReleaseTrigger)));
        assert_eq!(
            h.agent.combat.last_known_target_position,
            Some(Position::new(50.0, 0.0, 0.0))
        );
    }

    #[test]
    fn test_hidden_target_is_approached() {
        let mut h = with_bandit(calm());
        h.world.sight_blocked = true;
        h.config.sidestep_chance = 0;
        h.agent.combat.in_combat = true;
        h.agent.combat.hunt_target = Some(EntityId(2));

        CombatReactor::think(&mut h.ctx());
        assert!(h.world.triggers.is_empty());
        assert_eq!(h.world.moves, vec![Position::new(50.0, 0.0, 0.0)]);
    }
}
