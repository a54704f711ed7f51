//! Worker tasks that back the async runtime surface.
//!
//! The simulation worker owns the [`Runtime`](crate::Runtime) and executes
//! commands sent through [`RuntimeHandle`](crate::RuntimeHandle) one at a
//! time, so behavior callbacks never run concurrently.

mod simulation;

pub use simulation::{Command, SimulationWorker};
