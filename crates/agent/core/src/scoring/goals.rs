//! Goal evaluators.
//!
//! Thresholds are on the 0-100 vitals scale. Archetypes with a zero weight
//! never pick the goal on merit.

use super::{ArchetypeWeights, Evaluator, jitter, weighted};
use crate::catalog::GoalKind;
use crate::env::RngOracle;
use crate::state::Agent;

const EXPLORE: ArchetypeWeights = ArchetypeWeights::new(2.0, 1.0, 0.0);
const HUNT: ArchetypeWeights = ArchetypeWeights::new(2.0, 0.0, 4.0);
const REST: ArchetypeWeights = ArchetypeWeights::new(1.0, 2.0, 3.0);
const FOOD: ArchetypeWeights = ArchetypeWeights::new(2.0, 1.0, 1.0);
const HEALTH: ArchetypeWeights = ArchetypeWeights::uniform(1.0);
const HOME: ArchetypeWeights = ArchetypeWeights::new(1.0, 2.0, 1.0);
const FUN: ArchetypeWeights = ArchetypeWeights::new(1.0, 3.0, 0.0);

/// Evaluator bound to each goal.
pub fn evaluator(goal: GoalKind) -> Evaluator {
    match goal {
        GoalKind::DoDefend => do_defend,
        GoalKind::DoExplore => do_explore,
        GoalKind::DoHunt => do_hunt,
        GoalKind::DoRest => do_rest,
        GoalKind::GetFood => get_food,
        GoalKind::GetHealth => get_health,
        GoalKind::GoHome => go_home,
        GoalKind::HaveFun => have_fun,
    }
}

/// Never chosen by evaluation; only entered through a damage interrupt.
pub fn do_defend(_agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    -1.0
}

pub fn do_explore(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.fatigue >= 33.0 || v.happiness <= 50.0 || v.boredom <= 50.0 {
        return 0.0;
    }
    weighted(
        &[
            (33.0 - v.fatigue) / 33.0,
            (v.happiness - 50.0) / 50.0,
            (v.boredom - 50.0) / 50.0,
        ],
        EXPLORE,
        agent.archetype,
    )
}

pub fn do_hunt(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.health <= 50.0 || v.fatigue >= 33.0 || v.happiness <= 33.0 {
        return 0.0;
    }
    weighted(
        &[
            (33.0 - v.fatigue) / 33.0,
            (v.happiness - 33.0) / 33.0,
            (v.health - 50.0) / 50.0,
        ],
        HUNT,
        agent.archetype,
    )
}

pub fn do_rest(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.fatigue <= 33.0 || v.health >= 50.0 {
        return 0.0;
    }
    weighted(
        &[(v.fatigue - 33.0) / 33.0, (50.0 - v.health) / 50.0],
        REST,
        agent.archetype,
    )
}

pub fn get_food(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.health >= 80.0 || v.happiness >= 80.0 {
        return 0.0;
    }
    weighted(
        &[(80.0 - v.health) / 50.0, (80.0 - v.happiness) / 80.0],
        FOOD,
        agent.archetype,
    )
}

pub fn get_health(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.health >= 50.0 {
        return 0.0;
    }
    weighted(&[(50.0 - v.health) / 50.0], HEALTH, agent.archetype)
}

pub fn go_home(agent: &Agent, rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.health >= 66.0 || v.fatigue <= 33.0 || v.money >= 200.0 || v.boredom <= 33.0 {
        return jitter(agent, rng, 0);
    }
    weighted(
        &[
            (66.0 - v.health) / 66.0,
            (v.fatigue - 33.0) / 33.0,
            (v.money - 200.0) / 200.0,
            (v.boredom - 33.0) / 33.0,
        ],
        HOME,
        agent.archetype,
    )
}

pub fn have_fun(agent: &Agent, rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.fatigue <= 33.0 || v.happiness >= 33.0 || v.boredom <= 33.0 {
        return jitter(agent, rng, 1);
    }
    weighted(
        &[
            (v.fatigue - 33.0) / 33.0,
            (33.0 - v.happiness) / 33.0,
            (v.boredom - 33.0) / 33.0,
        ],
        FUN,
        agent.archetype,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::{Archetype, EntityId, Position, Vitals};
    use std::sync::Arc;

    fn agent(archetype: Archetype, vitals: Vitals) -> Agent {
        Agent::new(
            EntityId(1),
            archetype,
            vitals,
            Position::ORIGIN,
            Arc::from(Vec::<GoalKind>::new()),
            0,
        )
    }

    fn vitals(health: f64, fatigue: f64, happiness: f64, boredom: f64) -> Vitals {
        Vitals::new(health, fatigue, happiness, boredom, 200.0)
    }

    #[test]
    fn test_rest_soldier_example() {
        let soldier = agent(Archetype::Soldier, vitals(30.0, 60.0, 50.0, 0.0));
        let score = do_rest(&soldier, &PcgRng);
        assert!((score - 0.182_727).abs() < 1e-4, "score = {score}");
    }

    #[test]
    fn test_rest_guard_returns_zero() {
        let rested = agent(Archetype::Soldier, vitals(30.0, 20.0, 50.0, 0.0));
        assert_eq!(do_rest(&rested, &PcgRng), 0.0);
        let healthy = agent(Archetype::Soldier, vitals(90.0, 60.0, 50.0, 0.0));
        assert_eq!(do_rest(&healthy, &PcgRng), 0.0);
    }

    #[test]
    fn test_defend_is_never_eligible() {
        let soldier = agent(Archetype::Soldier, vitals(10.0, 90.0, 0.0, 0.0));
        assert!(do_defend(&soldier, &PcgRng) < 0.0);
    }

    #[test]
    fn test_hunt_weights_by_archetype() {
        let v = vitals(100.0, 0.0, 100.0, 0.0);
        let soldier = do_hunt(&agent(Archetype::Soldier, v), &PcgRng);
        let bandit = do_hunt(&agent(Archetype::Bandit, v), &PcgRng);
        let entertainer = do_hunt(&agent(Archetype::Entertainer, v), &PcgRng);
        assert!(soldier > bandit);
        assert!((soldier - 2.0 * bandit).abs() < 1e-9);
        assert_eq!(entertainer, 0.0);
    }

    #[test]
    fn test_whimsical_goals_jitter_when_guarded() {
        let content = agent(Archetype::Entertainer, vitals(100.0, 0.0, 100.0, 0.0));
        for score in [go_home(&content, &PcgRng), have_fun(&content, &PcgRng)] {
            assert!([0.0, 0.01, 0.02].iter().any(|v| (score - v).abs() < 1e-9));
        }
    }

    #[test]
    fn test_jitter_is_pure() {
        let content = agent(Archetype::Bandit, vitals(100.0, 0.0, 100.0, 0.0));
        assert_eq!(go_home(&content, &PcgRng), go_home(&content, &PcgRng));
    }

    #[test]
    fn test_health_goal() {
        let hurt = agent(Archetype::Bandit, vitals(25.0, 0.0, 50.0, 0.0));
        assert!((get_health(&hurt, &PcgRng) - 0.05).abs() < 1e-9);
    }
}
