//! Deterministic behavior arbitration for autonomous agents.
//!
//! `agent-core` decides what every agent wants to do and how: a read-only
//! [`GoalCatalog`] lists the goals and solutions each archetype may pursue,
//! the [`UtilityEvaluator`] scores them against the agent's vitals, and the
//! [`GoalArbiter`] installs, interrupts and resumes the winning pair.
//! Solutions are small state machines advanced by movement, vitals and timer
//! callbacks that the host drives through [`AgentThinkLoop`].
//!
//! The crate performs no I/O. Everything it needs from the world (spatial
//! queries, paths, movement, weapons and timers) arrives through the traits in
//! [`env`], bundled per callback in a [`BehaviorCtx`].
pub mod arbiter;
pub mod catalog;
pub mod combat;
pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod scoring;
pub mod seek;
pub mod solution;
pub mod state;
pub mod think;

#[cfg(test)]
mod testing;

pub use arbiter::GoalArbiter;
pub use catalog::{Assignment, CatalogError, GoalCatalog, GoalCatalogBuilder, GoalKind, SolutionKind};
pub use combat::{CombatReactor, DamageResponse};
pub use config::{BehaviorConfig, Landmarks, SpawnPolicy, VitalsDecay, WanderBounds};
pub use context::BehaviorCtx;
pub use env::{
    AgentEvent, AimTarget, Animation, Armory, EntityKinds, EntityView, InventoryItem, Motor,
    PathError, PathService, PcgRng, RngOracle, Scheduler, SpatialQuery, World, compute_seed,
};
pub use error::{BehaviorError, ErrorSeverity};
pub use scoring::{Evaluator, UtilityEvaluator};
pub use seek::TargetAcquisition;
pub use solution::{Callback, Hook, SolutionHandlers};
pub use state::{
    Agent, Archetype, CombatState, EntityId, ErrandState, Path, PatrolRoute, Position, SeekState,
    Tick, Vitals,
};
pub use think::AgentThinkLoop;
