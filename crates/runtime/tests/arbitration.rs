//! Goal arbitration driven through the runtime's driver API.

use std::sync::Arc;

use agent_core::{
    Archetype, Assignment, BehaviorConfig, CatalogError, DamageResponse, EntityId, EntityKinds,
    GoalCatalog, GoalKind, Position, SolutionHandlers, SolutionKind, Vitals,
};
use runtime::{Runtime, RuntimeError, SandboxWorld, SpawnRequest};

fn runtime_with(behavior: BehaviorConfig) -> Runtime<SandboxWorld> {
    Runtime::builder()
        .behavior(behavior)
        .world(SandboxWorld::default())
        .build()
        .expect("runtime builds")
}

fn runtime() -> Runtime<SandboxWorld> {
    runtime_with(BehaviorConfig::default())
}

fn soldier_at_origin(runtime: &mut Runtime<SandboxWorld>, vitals: Vitals) -> EntityId {
    runtime.spawn(
        SpawnRequest::archetype(Archetype::Soldier)
            .at(Position::ORIGIN)
            .with_vitals(vitals),
    )
}

fn calm() -> Vitals {
    Vitals::new(100.0, 0.0, 100.0, 0.0, 200.0)
}

fn current(runtime: &Runtime<SandboxWorld>, id: EntityId) -> Option<Assignment> {
    runtime.agent(id).and_then(|agent| agent.current())
}

#[test]
fn test_calm_soldier_starts_on_patrol() {
    let mut runtime = runtime();
    let id = soldier_at_origin(&mut runtime, calm());
    assert_eq!(
        current(&runtime, id),
        Some(Assignment::new(GoalKind::DoHunt, SolutionKind::PatrolArea))
    );
}

#[test]
fn test_negative_scores_are_never_selected() {
    let catalog = GoalCatalog::builder()
        .goal_evaluator(GoalKind::DoRest, |_, _| -0.5)
        .goal_evaluator(GoalKind::GoHome, |_, _| -0.01)
        .solution_handlers(SolutionKind::Relax, SolutionHandlers::standard(SolutionKind::Relax))
        .solution_handlers(SolutionKind::SeekHome, SolutionHandlers::standard(SolutionKind::SeekHome))
        .offer(Archetype::Soldier, GoalKind::DoRest, &[SolutionKind::Relax])
        .offer(Archetype::Soldier, GoalKind::GoHome, &[SolutionKind::SeekHome])
        .build()
        .expect("catalog builds");
    let mut runtime = Runtime::builder()
        .catalog(Arc::new(catalog))
        .world(SandboxWorld::default())
        .build()
        .expect("runtime builds");

    let id = soldier_at_origin(&mut runtime, calm());
    assert_eq!(current(&runtime, id), None);
    assert!(!runtime.request_new_goal(id).expect("agent is live"));
    runtime.tick(id).expect("agent is live");
    assert_eq!(current(&runtime, id), None);
}

#[test]
fn test_ties_keep_the_first_goal() {
    let catalog = GoalCatalog::builder()
        .goal_evaluator(GoalKind::DoRest, |_, _| 0.25)
        .goal_evaluator(GoalKind::GoHome, |_, _| 0.25)
        .solution_handlers(SolutionKind::Relax, SolutionHandlers::standard(SolutionKind::Relax))
        .solution_handlers(SolutionKind::SeekHome, SolutionHandlers::standard(SolutionKind::SeekHome))
        .offer(Archetype::Soldier, GoalKind::GoHome, &[SolutionKind::SeekHome])
        .offer(Archetype::Soldier, GoalKind::DoRest, &[SolutionKind::Relax])
        .build()
        .expect("catalog builds");
    let mut runtime = Runtime::builder()
        .catalog(Arc::new(catalog))
        .world(SandboxWorld::default())
        .build()
        .expect("runtime builds");

    let id = soldier_at_origin(&mut runtime, calm());
    assert_eq!(
        current(&runtime, id),
        Some(Assignment::new(GoalKind::DoRest, SolutionKind::Relax))
    );
}

#[test]
fn test_unknown_names_are_catalog_errors() {
    let mut runtime = runtime();
    let id = soldier_at_origin(&mut runtime, calm());
    let before = current(&runtime, id);

    let error = runtime
        .assign_goal(id, "getFood", "forage")
        .expect_err("unknown solution");
    assert!(matches!(
        error,
        RuntimeError::Catalog(CatalogError::UnknownSolution { ref name }) if name == "forage"
    ));
    assert!(!runtime.assign_goal(id, "getFood", "").expect("agent is live"));
    assert_eq!(current(&runtime, id), before);
}

#[test]
fn test_wounded_soldier_flees_then_resumes() {
    let mut runtime = runtime();
    let id = soldier_at_origin(&mut runtime, Vitals::new(30.0, 80.0, 100.0, 0.0, 200.0));
    let attacker = runtime
        .world_mut()
        .add_entity("bandit", EntityKinds::AGENT, Position::new(50.0, 0.0, 0.0));
    let initial = current(&runtime, id);
    assert!(initial.is_some());

    let response = runtime.damage(id, attacker, 10.0).expect("agent is live");
    assert_eq!(response, Some(DamageResponse::Flee));
    assert_eq!(runtime.agent(id).map(|a| a.vitals.health), Some(20.0));
    assert_eq!(
        current(&runtime, id),
        Some(Assignment::new(GoalKind::DoDefend, SolutionKind::FleeArea))
    );

    // the next assignment is redirected to the interrupted pair
    assert!(runtime.assign_goal(id, "doRest", "relax").expect("agent is live"));
    assert_eq!(current(&runtime, id), initial);
}

#[test]
fn test_healthy_soldier_hunts_attacker() {
    let mut runtime = runtime();
    let id = soldier_at_origin(&mut runtime, calm());
    let attacker = runtime
        .world_mut()
        .add_entity("bandit", EntityKinds::AGENT, Position::new(120.0, 0.0, 0.0));

    assert_eq!(
        runtime.on_damage(id, attacker).expect("agent is live"),
        DamageResponse::Hunt
    );
    let agent = runtime.agent(id).expect("agent is live");
    assert_eq!(agent.combat.explicit_target, Some(attacker));
    assert_eq!(
        agent.current(),
        Some(Assignment::new(GoalKind::DoHunt, SolutionKind::SeekAndDestroy))
    );
    // health is only touched by `damage`
    assert_eq!(agent.vitals.health, 100.0);
}

#[test]
fn test_seek_food_snaps_onto_closest_item() {
    let mut runtime = runtime();
    let near = runtime
        .world_mut()
        .add_entity("food_item", EntityKinds::ITEM, Position::new(5.0, 0.0, 0.0));
    runtime
        .world_mut()
        .add_entity("food_item", EntityKinds::ITEM, Position::new(10.0, 0.0, 0.0));
    let id = soldier_at_origin(&mut runtime, calm());

    assert!(runtime.assign_goal(id, "getFood", "seekFood").expect("agent is live"));
    runtime.tick(id).expect("agent is live");

    let position = runtime.world().view(near).map(|v| v.position);
    assert_eq!(runtime.world().view(id).map(|v| v.position), position);
    assert_eq!(runtime.agent(id).map(|a| a.position), position);
    // found and moved on
    assert_ne!(
        runtime.agent(id).and_then(|a| a.current_goal()),
        Some(GoalKind::GetFood)
    );
}

#[test]
fn test_stagnant_goal_is_abandoned_once() {
    let mut behavior = BehaviorConfig::default();
    behavior.stagnation_limit = 2;
    let mut runtime = runtime_with(behavior);
    let id = soldier_at_origin(&mut runtime, calm());

    assert!(runtime.assign_goal(id, "getFood", "seekFood").expect("agent is live"));
    for _ in 0..3 {
        runtime.tick(id).expect("agent is live");
        assert_eq!(
            runtime.agent(id).and_then(|a| a.current_goal()),
            Some(GoalKind::GetFood)
        );
    }

    runtime.tick(id).expect("agent is live");
    let agent = runtime.agent(id).expect("agent is live");
    assert_eq!(agent.current_goal(), Some(GoalKind::DoHunt));
    assert_eq!(agent.stagnation_ticks, 0);
}
