//! Spatial queries over the world's entities.

use bitflags::bitflags;

use crate::state::{EntityId, Position};

bitflags! {
    /// Entity type tags, combinable into search masks.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EntityKinds: u8 {
        const AGENT   = 1 << 0;
        const PLAYER  = 1 << 1;
        const ITEM    = 1 << 2;
        const CORPSE  = 1 << 3;
        const DEBRIS  = 1 << 4;
        const STATIC  = 1 << 5;
    }
}

impl EntityKinds {
    /// Kinds that can see, fight and be hunted.
    pub const ACTORS: Self = Self::AGENT.union(Self::PLAYER);
}

/// Snapshot of an entity returned by a spatial query.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityView {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKinds,
    pub position: Position,
    pub alive: bool,
}

impl EntityView {
    /// Dead, destroyed, or a leftover corpse/debris shape.
    pub fn is_dead(&self) -> bool {
        !self.alive || self.kind.intersects(EntityKinds::CORPSE | EntityKinds::DEBRIS)
    }

    pub fn is_actor(&self) -> bool {
        self.kind.intersects(EntityKinds::ACTORS)
    }

    /// Pickup-class item an agent snaps onto when found.
    pub fn is_pickup(&self) -> bool {
        self.kind.contains(EntityKinds::ITEM)
    }
}

/// Radius search and visibility, provided by the host world.
pub trait SpatialQuery {
    /// Entities within `radius` of `origin` whose kind intersects `kinds`.
    fn radius_search(&self, origin: Position, radius: f64, kinds: EntityKinds) -> Vec<EntityView>;

    /// Unobstructed line of sight from `observer` to `target`.
    fn line_of_sight(&self, observer: EntityId, target: EntityId) -> bool;

    /// Looks up a single entity; `None` once it has been removed.
    fn entity(&self, id: EntityId) -> Option<EntityView>;
}
