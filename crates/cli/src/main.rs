//! Agent simulation binary.
//!
//! Composition root that assembles:
//! 1. Behavior configuration and goal catalog (defaults, or data files)
//! 2. A sandbox world stocked with food and health pickups
//! 3. The runtime, launched on a background worker
//!
//! It then runs the population for a bounded virtual duration, logs roster
//! and goal changes as they happen and prints the final agent snapshot as
//! JSON on stdout.
//!
//! # Examples
//!
//! ```bash
//! SIM_AGENT_COUNT=6 SIM_DURATION_SECS=300 RUST_LOG=agent::arbiter=debug cargo run -p sim-cli
//! ```

mod config;
mod logging;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast::{self, error::RecvError};

use agent_core::{EntityKinds, Position, WanderBounds};
use runtime::{BehaviorEvent, Event, RosterEvent, Runtime, RuntimeConfig, SandboxWorld, Topic};

use config::SimConfig;

/// Pickups of each kind scattered over the wander area.
const PICKUPS_PER_KIND: usize = 4;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = SimConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let behavior = config.load_behavior()?;
    let catalog = config.load_catalog()?;
    tracing::info!(
        agents = behavior.spawn.count,
        seed = behavior.seed,
        duration_secs = config.duration_secs,
        "Starting simulation"
    );

    let world = stocked_world(&behavior.wander_bounds);
    let runtime = Runtime::builder()
        .config(RuntimeConfig::new(behavior))
        .catalog(Arc::new(catalog))
        .world(world)
        .build()?;
    let (handle, worker) = runtime.launch();

    let logger = tokio::spawn(log_events(
        handle.subscribe(Topic::Roster),
        handle.subscribe(Topic::Behavior),
    ));

    handle.start().await?;
    // one-second slices keep the event stream flowing while time advances
    for _ in 0..config.duration_secs {
        handle.advance(1_000).await?;
    }

    let snapshot = handle.snapshot().await?;
    tracing::info!(agents = snapshot.len(), "Simulation finished");
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    drop(handle);
    worker.await?;
    logger.await?;
    Ok(())
}

/// Sandbox with food and health pickups laid out on a diagonal of `bounds`.
fn stocked_world(bounds: &WanderBounds) -> SandboxWorld {
    let mut world = SandboxWorld::default();
    let step = 1.0 / (PICKUPS_PER_KIND + 1) as f64;
    for i in 1..=PICKUPS_PER_KIND {
        let t = step * i as f64;
        let x = bounds.min_x + (bounds.max_x - bounds.min_x) * t;
        let y = bounds.min_y + (bounds.max_y - bounds.min_y) * t;
        world.add_entity("food_item", EntityKinds::ITEM, Position::new(x, y, bounds.z));
        world.add_entity(
            "health_patch",
            EntityKinds::ITEM,
            Position::new(x, bounds.max_y + bounds.min_y - y, bounds.z),
        );
    }
    world
}

/// Logs roster and behavior events until the runtime shuts down.
async fn log_events(mut roster: broadcast::Receiver<Event>, mut behavior: broadcast::Receiver<Event>) {
    let (mut roster_open, mut behavior_open) = (true, true);
    while roster_open || behavior_open {
        let received = tokio::select! {
            event = roster.recv(), if roster_open => (Topic::Roster, event),
            event = behavior.recv(), if behavior_open => (Topic::Behavior, event),
        };
        match received {
            (_, Ok(event)) => log_event(&event),
            (topic, Err(RecvError::Lagged(skipped))) => {
                tracing::warn!(?topic, skipped, "Event logger lagged behind");
            }
            (Topic::Roster, Err(RecvError::Closed)) => roster_open = false,
            (Topic::Behavior, Err(RecvError::Closed)) => behavior_open = false,
        }
    }
}

fn log_event(event: &Event) {
    match event {
        Event::Roster(RosterEvent::Spawned {
            agent,
            archetype,
            position,
        }) => tracing::info!(%agent, %archetype, %position, "Agent spawned"),
        Event::Roster(RosterEvent::Removed { agent, archetype }) => {
            tracing::info!(%agent, %archetype, "Agent removed")
        }
        Event::Behavior(BehaviorEvent::GoalAssigned {
            agent,
            assignment,
            replaced,
        }) => tracing::info!(%agent, %assignment, ?replaced, "Goal assigned"),
        Event::Behavior(BehaviorEvent::GoalCleared { agent, replaced }) => {
            tracing::info!(%agent, %replaced, "Goal cleared")
        }
        Event::Behavior(BehaviorEvent::Damaged {
            agent,
            attacker,
            health,
        }) => tracing::info!(%agent, %attacker, health, "Agent damaged"),
    }
}
