//! Runtime orchestration for behavior-driven agent populations.
//!
//! The runtime wires the deterministic rules in `agent-core` to a host world:
//! it keeps the roster of live agents, fires their think and vitals ticks on a
//! virtual clock, delivers movement and damage notifications, tops the
//! population up and broadcasts roster and goal changes over an
//! [`EventBus`]. [`SandboxWorld`] is a self-contained planar world used by the
//! CLI and the tests.
//!
//! Modules:
//! - [`api`]: errors and the async [`RuntimeHandle`]
//! - [`runtime`]: [`Runtime`], its builder and the driver API
//! - [`events`]: topic-based event bus
//! - [`workers`]: background task backing [`Runtime::launch`]
pub mod api;
pub mod events;
pub mod host;
pub mod roster;
pub mod runtime;
pub mod sandbox;
pub mod spawner;
pub mod timers;
pub mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{BehaviorEvent, Event, EventBus, RosterEvent, Topic};
pub use host::{AgentHost, WorldEvent};
pub use roster::{AgentSnapshot, Roster};
pub use runtime::{AdvanceReport, Runtime, RuntimeBuilder, RuntimeConfig};
pub use sandbox::{SandboxConfig, SandboxWorld, Wall};
pub use spawner::SpawnRequest;
pub use timers::{Scheduled, TimerQueue};
