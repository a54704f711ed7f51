//! Agent state: identity, vitals, behavior bookkeeping and owned path.
mod agent;
mod combat;
mod common;
mod errand;
mod path;
mod seek;

pub use agent::{Agent, Archetype, Vitals};
pub use combat::CombatState;
pub use common::{EntityId, Position, Tick};
pub use errand::{ErrandState, PATROL_WAYPOINTS, PatrolRoute};
pub use path::Path;
pub use seek::SeekState;
