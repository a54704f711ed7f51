//! Public runtime API surface.
//!
//! Gathers the types exposed to consumers of the runtime crate so the
//! orchestration and worker layers can stay focused on their own duties.

pub mod errors;
pub mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
