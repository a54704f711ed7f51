//! Event system for runtime notifications.
//!
//! - [`bus`]: topic-based [`EventBus`] built on `tokio::sync::broadcast`
//! - [`types`]: roster and behavior event payloads

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{BehaviorEvent, RosterEvent};
