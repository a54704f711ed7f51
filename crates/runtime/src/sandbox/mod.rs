//! In-memory reference world.
//!
//! [`SandboxWorld`] implements every collaborator the behavior core consumes:
//! entities live in a flat map, paths are straight lines cut into legs,
//! circular walls block sight, and bodies glide toward their movement target
//! at a fixed speed. It is deterministic and cheap, which makes it the world
//! of choice for tests and the command-line simulation.

mod env;

use std::collections::BTreeMap;

use agent_core::{
    AimTarget, Animation, EntityId, EntityKinds, EntityView, InventoryItem, Position, WanderBounds,
};

use crate::host::{AgentHost, WorldEvent};

/// Tunables of the sandbox.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SandboxConfig {
    /// Movement speed in world units per second.
    pub speed: f64,
    /// Longest straight leg of a generated path.
    pub leg_length: f64,
    /// Navigable area; destinations outside it cannot be reached.
    pub bounds: WanderBounds,
    pub weapon_damage: f64,
    pub weapon_range: f64,
}

impl SandboxConfig {
    pub const DEFAULT_SPEED: f64 = 10.0;
    pub const DEFAULT_LEG_LENGTH: f64 = 50.0;
    pub const DEFAULT_WEAPON_DAMAGE: f64 = 10.0;
    pub const DEFAULT_WEAPON_RANGE: f64 = 150.0;
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            speed: Self::DEFAULT_SPEED,
            leg_length: Self::DEFAULT_LEG_LENGTH,
            bounds: WanderBounds {
                min_x: -200.0,
                max_x: 650.0,
                min_y: -200.0,
                max_y: 650.0,
                z: 0.0,
            },
            weapon_damage: Self::DEFAULT_WEAPON_DAMAGE,
            weapon_range: Self::DEFAULT_WEAPON_RANGE,
        }
    }
}

/// Vertical cylinder that blocks line of sight and cannot be entered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    pub center: Position,
    pub radius: f64,
}

impl Wall {
    pub fn new(center: Position, radius: f64) -> Self {
        Self { center, radius }
    }

    fn contains(&self, point: &Position) -> bool {
        planar_distance(&self.center, point) <= self.radius
    }

    /// True if the planar segment `a -> b` passes through the wall.
    fn blocks(&self, a: &Position, b: &Position) -> bool {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let length_sq = dx * dx + dy * dy;
        let t = if length_sq == 0.0 {
            0.0
        } else {
            (((self.center.x - a.x) * dx + (self.center.y - a.y) * dy) / length_sq).clamp(0.0, 1.0)
        };
        let closest = Position::new(a.x + dx * t, a.y + dy * t, self.center.z);
        planar_distance(&closest, &self.center) < self.radius
    }
}

fn planar_distance(a: &Position, b: &Position) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

#[derive(Clone, Debug)]
struct Body {
    view: EntityView,
    destination: Option<Position>,
    jammed: bool,
    animation: Animation,
    inventory: BTreeMap<InventoryItem, u32>,
    consumed: BTreeMap<InventoryItem, u32>,
    aim: Option<(AimTarget, Position)>,
    trigger: bool,
}

impl Body {
    fn new(id: EntityId, name: &str, kind: EntityKinds, position: Position) -> Self {
        Self {
            view: EntityView {
                id,
                name: name.to_owned(),
                kind,
                position,
                alive: true,
            },
            destination: None,
            jammed: false,
            animation: Animation::Look,
            inventory: BTreeMap::new(),
            consumed: BTreeMap::new(),
            aim: None,
            trigger: false,
        }
    }
}

/// Deterministic in-memory world.
#[derive(Clone, Debug)]
pub struct SandboxWorld {
    config: SandboxConfig,
    bodies: BTreeMap<EntityId, Body>,
    walls: Vec<Wall>,
    next_id: u32,
    pending: Vec<WorldEvent>,
}

impl SandboxWorld {
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            config,
            bodies: BTreeMap::new(),
            walls: Vec::new(),
            // 0 is reserved for the player
            next_id: 1,
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn set_bounds(&mut self, bounds: WanderBounds) {
        self.config.bounds = bounds;
    }

    /// Adds a non-agent entity (pickup, static prop, debris).
    pub fn add_entity(&mut self, name: &str, kind: EntityKinds, position: Position) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(id, Body::new(id, name, kind, position));
        id
    }

    /// Adds the player body under the reserved player id.
    pub fn add_player(&mut self, position: Position) -> EntityId {
        let id = EntityId::PLAYER;
        self.bodies
            .insert(id, Body::new(id, "player", EntityKinds::PLAYER, position));
        id
    }

    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        self.bodies.remove(&id).is_some()
    }

    pub fn add_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
    }

    /// Makes the next movement step of `agent` report it stuck.
    pub fn jam(&mut self, agent: EntityId) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.jammed = true;
        }
    }

    /// Queues a hit as if `attacker` had shot `target`.
    pub fn inflict(&mut self, target: EntityId, attacker: EntityId, amount: f64) {
        self.pending.push(WorldEvent::Damaged {
            target,
            attacker,
            amount,
        });
    }

    // ===== inspection =====

    pub fn view(&self, id: EntityId) -> Option<&EntityView> {
        self.bodies.get(&id).map(|body| &body.view)
    }

    pub fn destination(&self, id: EntityId) -> Option<Position> {
        self.bodies.get(&id).and_then(|body| body.destination)
    }

    pub fn animation(&self, id: EntityId) -> Option<Animation> {
        self.bodies.get(&id).map(|body| body.animation)
    }

    pub fn inventory(&self, id: EntityId, item: InventoryItem) -> u32 {
        self.bodies
            .get(&id)
            .and_then(|body| body.inventory.get(&item).copied())
            .unwrap_or(0)
    }

    /// Items of `item` kind used up by `id` so far.
    pub fn consumed(&self, id: EntityId, item: InventoryItem) -> u32 {
        self.bodies
            .get(&id)
            .and_then(|body| body.consumed.get(&item).copied())
            .unwrap_or(0)
    }

    pub fn aim(&self, id: EntityId) -> Option<AimTarget> {
        self.bodies.get(&id).and_then(|body| body.aim.map(|(target, _)| target))
    }

    pub fn trigger_held(&self, id: EntityId) -> bool {
        self.bodies.get(&id).is_some_and(|body| body.trigger)
    }

    fn clear_line(&self, from: &Position, to: &Position) -> bool {
        !self.walls.iter().any(|wall| wall.blocks(from, to))
    }
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new(SandboxConfig::default())
    }
}

impl AgentHost for SandboxWorld {
    fn spawn_agent(&mut self, name: &str, position: Position) -> EntityId {
        self.add_entity(name, EntityKinds::AGENT, position)
    }

    fn mark_dead(&mut self, agent: EntityId) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.view.alive = false;
            body.destination = None;
            body.trigger = false;
        }
    }

    fn position_of(&self, entity: EntityId) -> Option<Position> {
        self.bodies.get(&entity).map(|body| body.view.position)
    }

    fn advance(&mut self, elapsed_ms: u64) -> Vec<WorldEvent> {
        let mut events = std::mem::take(&mut self.pending);
        let reach = self.config.speed * elapsed_ms as f64 / 1_000.0;

        for (id, body) in &mut self.bodies {
            let Some(target) = body.destination else {
                continue;
            };
            if body.jammed {
                body.jammed = false;
                events.push(WorldEvent::Stuck(*id));
                continue;
            }

            let remaining = body.view.position.distance(&target);
            if remaining <= reach {
                body.view.position = target;
                body.destination = None;
                events.push(WorldEvent::Arrived(*id));
            } else {
                body.view.position = body.view.position.lerp(target, reach / remaining);
            }
        }
        events
    }
}
