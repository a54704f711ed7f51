//! Recording collaborators for unit tests.

use crate::catalog::GoalCatalog;
use crate::config::BehaviorConfig;
use crate::context::BehaviorCtx;
use crate::env::{
    AgentEvent, AimTarget, Animation, Armory, EntityKinds, EntityView, InventoryItem, Motor,
    PathError, PathService, PcgRng, Scheduler, SpatialQuery,
};
use crate::state::{Agent, Archetype, EntityId, Path, Position, Vitals};

#[derive(Default)]
pub struct StubWorld {
    pub entities: Vec<EntityView>,
    pub sight_blocked: bool,
    pub fail_paths: bool,
    pub moves: Vec<Position>,
    pub stops: usize,
    pub teleports: Vec<Position>,
    pub animations: Vec<Animation>,
    pub triggers: Vec<bool>,
    pub inventory: Vec<(InventoryItem, u32)>,
    pub used: Vec<InventoryItem>,
    pub aim: Option<AimTarget>,
}

impl StubWorld {
    pub fn spawn(&mut self, id: u32, name: &str, kind: EntityKinds, position: Position) {
        self.entities.push(EntityView {
            id: EntityId(id),
            name: name.to_owned(),
            kind,
            position,
            alive: true,
        });
    }
}

impl SpatialQuery for StubWorld {
    fn radius_search(&self, origin: Position, radius: f64, kinds: EntityKinds) -> Vec<EntityView> {
        self.entities
            .iter()
            .filter(|e| e.kind.intersects(kinds) && origin.distance(&e.position) <= radius)
            .cloned()
            .collect()
    }

    fn line_of_sight(&self, _observer: EntityId, _target: EntityId) -> bool {
        !self.sight_blocked
    }

    fn entity(&self, id: EntityId) -> Option<EntityView> {
        self.entities.iter().find(|e| e.id == id).cloned()
    }
}

impl PathService for StubWorld {
    fn create_path(&self, from: Position, to: Position) -> Result<Path, PathError> {
        if self.fail_paths {
            return Err(PathError::Unreachable { from, to });
        }
        Ok(Path::new([to]))
    }
}

impl Motor for StubWorld {
    fn move_to(&mut self, _agent: EntityId, destination: Position) {
        self.moves.push(destination);
    }

    fn stop(&mut self, _agent: EntityId) {
        self.stops += 1;
    }

    fn set_transform(&mut self, _agent: EntityId, position: Position) {
        self.teleports.push(position);
    }

    fn play_animation(&mut self, _agent: EntityId, animation: Animation) {
        self.animations.push(animation);
    }
}

impl Armory for StubWorld {
    fn fire_weapon(&mut self, _agent: EntityId, trigger: bool) {
        self.triggers.push(trigger);
    }

    fn increment_inventory(&mut self, _agent: EntityId, item: InventoryItem, amount: u32) {
        self.inventory.push((item, amount));
    }

    fn use_item(&mut self, _agent: EntityId, item: InventoryItem) {
        self.used.push(item);
    }

    fn set_aim(&mut self, _agent: EntityId, target: AimTarget, _offset: Position) {
        self.aim = Some(target);
    }

    fn clear_aim(&mut self, _agent: EntityId) {
        self.aim = None;
    }
}

#[derive(Default)]
pub struct TimerLog {
    pub scheduled: Vec<(u64, AgentEvent)>,
}

impl Scheduler for TimerLog {
    fn schedule(&mut self, _agent: EntityId, delay_ms: u64, event: AgentEvent) {
        self.scheduled.push((delay_ms, event));
    }
}

/// One agent with every collaborator it needs.
pub struct Harness {
    pub agent: Agent,
    pub catalog: GoalCatalog,
    pub config: BehaviorConfig,
    pub world: StubWorld,
    pub timers: TimerLog,
    pub rng: PcgRng,
}

impl Harness {
    pub fn new(archetype: Archetype, vitals: Vitals) -> Self {
        let catalog = GoalCatalog::standard().expect("standard catalog builds");
        let agent = Agent::new(
            EntityId(1),
            archetype,
            vitals,
            Position::ORIGIN,
            catalog.goal_list(archetype),
            7,
        );
        Self {
            agent,
            catalog,
            config: BehaviorConfig::default(),
            world: StubWorld::default(),
            timers: TimerLog::default(),
            rng: PcgRng,
        }
    }

    pub fn ctx(&mut self) -> BehaviorCtx<'_> {
        BehaviorCtx::new(
            &mut self.agent,
            &self.catalog,
            &self.config,
            &mut self.world,
            &mut self.timers,
            &self.rng,
        )
    }
}

/// Vitals for which every goal guard of a soldier holds.
pub fn calm() -> Vitals {
    Vitals::new(100.0, 0.0, 100.0, 0.0, 200.0)
}
