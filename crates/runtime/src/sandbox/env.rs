//! Behavior collaborators implemented by the sandbox.

use agent_core::{
    AimTarget, Animation, Armory, EntityId, EntityKinds, EntityView, InventoryItem, Motor, Path,
    PathError, PathService, Position, SpatialQuery,
};

use super::SandboxWorld;
use crate::host::WorldEvent;

impl SpatialQuery for SandboxWorld {
    fn radius_search(&self, origin: Position, radius: f64, kinds: EntityKinds) -> Vec<EntityView> {
        self.bodies
            .values()
            .filter(|body| body.view.kind.intersects(kinds))
            .filter(|body| origin.distance(&body.view.position) <= radius)
            .map(|body| body.view.clone())
            .collect()
    }

    fn line_of_sight(&self, observer: EntityId, target: EntityId) -> bool {
        match (self.bodies.get(&observer), self.bodies.get(&target)) {
            (Some(a), Some(b)) => self.clear_line(&a.view.position, &b.view.position),
            _ => false,
        }
    }

    fn entity(&self, id: EntityId) -> Option<EntityView> {
        self.bodies.get(&id).map(|body| body.view.clone())
    }
}

impl PathService for SandboxWorld {
    fn create_path(&self, from: Position, to: Position) -> Result<Path, PathError> {
        if !self.config.bounds.contains(&to) {
            return Err(PathError::OutOfBounds { to });
        }
        if self.walls.iter().any(|wall| wall.contains(&to)) {
            return Err(PathError::Unreachable { from, to });
        }

        let legs = (from.distance(&to) / self.config.leg_length.max(1.0)).ceil().max(1.0) as usize;
        let waypoints = (1..legs)
            .map(|leg| from.lerp(to, leg as f64 / legs as f64))
            .chain(std::iter::once(to));
        Ok(Path::new(waypoints))
    }
}

impl Motor for SandboxWorld {
    fn move_to(&mut self, agent: EntityId, destination: Position) {
        if let Some(body) = self.bodies.get_mut(&agent).filter(|body| body.view.alive) {
            body.destination = Some(destination);
        }
    }

    fn stop(&mut self, agent: EntityId) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.destination = None;
        }
    }

    fn set_transform(&mut self, agent: EntityId, position: Position) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.view.position = position;
        }
    }

    fn play_animation(&mut self, agent: EntityId, animation: Animation) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.animation = animation;
        }
    }
}

impl Armory for SandboxWorld {
    fn fire_weapon(&mut self, agent: EntityId, trigger: bool) {
        let Some(shooter) = self.bodies.get_mut(&agent) else {
            return;
        };
        shooter.trigger = trigger;
        if !trigger {
            return;
        }
        let Some((AimTarget::Entity(target), _)) = shooter.aim else {
            return;
        };
        let origin = shooter.view.position;

        let Some(victim) = self.bodies.get(&target).filter(|body| body.view.alive) else {
            return;
        };
        let position = victim.view.position;
        if origin.distance(&position) <= self.config.weapon_range && self.clear_line(&origin, &position) {
            self.pending.push(WorldEvent::Damaged {
                target,
                attacker: agent,
                amount: self.config.weapon_damage,
            });
        }
    }

    fn increment_inventory(&mut self, agent: EntityId, item: InventoryItem, amount: u32) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            *body.inventory.entry(item).or_default() += amount;
        }
    }

    fn use_item(&mut self, agent: EntityId, item: InventoryItem) {
        let Some(body) = self.bodies.get_mut(&agent) else {
            return;
        };
        match body.inventory.get_mut(&item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                *body.consumed.entry(item).or_default() += 1;
            }
            _ => tracing::debug!(target: "runtime::sandbox", %agent, %item, "nothing to use"),
        }
    }

    fn set_aim(&mut self, agent: EntityId, target: AimTarget, offset: Position) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.aim = Some((target, offset));
        }
    }

    fn clear_aim(&mut self, agent: EntityId) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.aim = None;
        }
    }
}
