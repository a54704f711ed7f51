//! Data-driven behavior content and loaders.
//!
//! This crate reads the tunables and catalog registrations of the behavior
//! engine from data files:
//! - Behavior configuration (data-driven via TOML)
//! - Catalog registrations per archetype (data-driven via RON)
//!
//! Evaluators and solution handlers always come from `agent-core`; files only
//! decide which archetype may use which goal and solution.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ArchetypeSpec, CatalogLoader, CatalogSpec, ConfigLoader, ContentFactory, GoalSpec, LoadResult,
};
