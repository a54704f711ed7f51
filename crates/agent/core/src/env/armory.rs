use crate::state::{EntityId, Position};

/// Inventory items the behaviors hand out or consume.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InventoryItem {
    Crossbow,
    CrossbowAmmo,
    Sword,
    FoodKit,
    HealthKit,
}

/// What an agent points its weapon at.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AimTarget {
    Entity(EntityId),
    Point(Position),
}

/// Weapon and inventory collaborator.
pub trait Armory {
    fn fire_weapon(&mut self, agent: EntityId, trigger: bool);

    fn increment_inventory(&mut self, agent: EntityId, item: InventoryItem, amount: u32);

    fn use_item(&mut self, agent: EntityId, item: InventoryItem);

    fn set_aim(&mut self, agent: EntityId, target: AimTarget, offset: Position);

    fn clear_aim(&mut self, agent: EntityId);
}
