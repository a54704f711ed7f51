//! Collaborators the behavior core consumes but does not implement.
//!
//! The host world supplies spatial queries, path building, movement and
//! weapons/inventory; [`World`] bundles them so behavior code can hold a
//! single handle. Randomness and timers are supplied separately.
mod armory;
mod motor;
mod path;
mod rng;
mod spatial;
mod timers;

pub use armory::{AimTarget, Armory, InventoryItem};
pub use motor::{Animation, Motor};
pub use path::{PathError, PathService};
pub use rng::{PcgRng, RngOracle, compute_seed, contexts};
pub use spatial::{EntityKinds, EntityView, SpatialQuery};
pub use timers::{AgentEvent, Scheduler};

/// Everything the host world provides to behaviors.
pub trait World: SpatialQuery + PathService + Motor + Armory {}

impl<T> World for T where T: SpatialQuery + PathService + Motor + Armory + ?Sized {}
