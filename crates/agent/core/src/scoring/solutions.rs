//! Solution evaluators.

use super::{ArchetypeWeights, Evaluator, weighted};
use crate::catalog::SolutionKind;
use crate::env::RngOracle;
use crate::state::{Agent, Archetype};

const FLEE: ArchetypeWeights = ArchetypeWeights::new(0.0, 0.0, 10.0);
const EXPLORE: ArchetypeWeights = ArchetypeWeights::new(10.0, 10.0, 0.0);
const SEEK_AND_DESTROY: ArchetypeWeights = ArchetypeWeights::new(7.0, 0.0, 3.0);
const PATROL: ArchetypeWeights = ArchetypeWeights::new(3.0, 0.0, 7.0);
const RELAX: ArchetypeWeights = ArchetypeWeights::new(4.0, 5.0, 6.0);
const SLEEP: ArchetypeWeights = ArchetypeWeights::new(6.0, 5.0, 4.0);
const BUY: ArchetypeWeights = ArchetypeWeights::new(0.0, 7.0, 5.0);
const SCAVENGE: ArchetypeWeights = ArchetypeWeights::new(5.0, 0.0, 5.0);
const STEAL: ArchetypeWeights = ArchetypeWeights::new(5.0, 3.0, 0.0);
const HOME: ArchetypeWeights = ArchetypeWeights::uniform(10.0);
const DANCE: ArchetypeWeights = ArchetypeWeights::new(10.0, 10.0, 0.0);

/// Evaluator bound to each solution.
pub fn evaluator(solution: SolutionKind) -> Evaluator {
    match solution {
        SolutionKind::FleeArea => flee_area,
        SolutionKind::ExploreArea => explore_area,
        SolutionKind::PatrolArea => patrol_area,
        SolutionKind::SeekAndDestroy => seek_and_destroy,
        SolutionKind::Relax => relax,
        SolutionKind::Sleep => sleep,
        SolutionKind::BuyFood => buy_food,
        SolutionKind::SeekFood => seek_food,
        SolutionKind::StealFood => steal_food,
        SolutionKind::BuyHealth => buy_health,
        SolutionKind::SeekHealth => seek_health,
        SolutionKind::StealHealth => steal_health,
        SolutionKind::SeekHome => seek_home,
        SolutionKind::Dance => dance,
    }
}

/// Also consulted by the combat reactor to decide between fleeing and fighting.
///
/// Entertainers always want to flee.
pub fn flee_area(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    if agent.archetype == Archetype::Entertainer {
        return 1.0;
    }
    let v = &agent.vitals;
    if v.health >= 50.0 && v.fatigue <= 50.0 {
        return 0.0;
    }
    weighted(
        &[(50.0 - v.health) / 50.0, (v.fatigue - 50.0) / 50.0],
        FLEE,
        agent.archetype,
    )
}

pub fn explore_area(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.boredom <= 66.0 {
        return 0.0;
    }
    weighted(&[(v.boredom - 66.0) / 66.0], EXPLORE, agent.archetype)
}

pub fn patrol_area(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.boredom >= 66.0 {
        return 0.0;
    }
    weighted(&[(66.0 - v.boredom) / 66.0], PATROL, agent.archetype)
}

pub fn seek_and_destroy(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.happiness >= 66.0 {
        return 0.0;
    }
    weighted(&[(66.0 - v.happiness) / 66.0], SEEK_AND_DESTROY, agent.archetype)
}

pub fn relax(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.fatigue <= 33.0 {
        return 0.0;
    }
    weighted(&[(v.fatigue - 33.0) / 33.0], RELAX, agent.archetype)
}

pub fn sleep(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.fatigue <= 66.0 || v.boredom <= 50.0 {
        return 0.0;
    }
    weighted(
        &[(v.fatigue - 66.0) / 66.0, (v.boredom - 50.0) / 50.0],
        SLEEP,
        agent.archetype,
    )
}

pub fn buy_food(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.money <= 100.0 {
        return 0.0;
    }
    weighted(&[(v.money - 100.0) / 100.0], BUY, agent.archetype)
}

pub fn seek_food(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    scavenge(agent)
}

pub fn steal_food(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    steal(agent)
}

/// Affordable from exactly 100 money, unlike buying food.
pub fn buy_health(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.money < 100.0 {
        return 0.0;
    }
    weighted(&[(v.money - 100.0) / 100.0], BUY, agent.archetype)
}

pub fn seek_health(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    scavenge(agent)
}

pub fn steal_health(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    steal(agent)
}

pub fn seek_home(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.health >= 66.0 {
        return 0.0;
    }
    weighted(&[(66.0 - v.health) / 66.0], HOME, agent.archetype)
}

pub fn dance(agent: &Agent, _rng: &dyn RngOracle) -> f64 {
    let v = &agent.vitals;
    if v.fatigue <= 33.0 {
        return 0.0;
    }
    weighted(&[(v.fatigue - 33.0) / 33.0], DANCE, agent.archetype)
}

fn scavenge(agent: &Agent) -> f64 {
    let v = &agent.vitals;
    if v.fatigue >= 50.0 {
        return 0.0;
    }
    weighted(&[(50.0 - v.fatigue) / 50.0], SCAVENGE, agent.archetype)
}

fn steal(agent: &Agent) -> f64 {
    let v = &agent.vitals;
    if v.happiness >= 50.0 {
        return 0.0;
    }
    weighted(&[(50.0 - v.happiness) / 50.0], STEAL, agent.archetype)
}
