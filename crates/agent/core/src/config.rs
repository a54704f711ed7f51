use crate::state::{Position, Vitals};

/// Behavior timing, distances and tuning knobs.
///
/// Every field has a default; configuration files only need to list the
/// values they override.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    /// Period of the think tick.
    pub think_interval_ms: u64,
    /// Period of the slower vitals tick.
    pub vitals_interval_ms: u64,
    /// Think ticks an agent may spend in one goal before it is forced out.
    pub stagnation_limit: u32,

    pub seek_radius: f64,
    /// Default distance at which a sought object counts as reached.
    pub seek_distance_away: f64,
    /// Distance at which a hunter engages its prey.
    pub hunt_distance_away: f64,
    /// Distance from the final destination that counts as arrived when stuck.
    pub stuck_tolerance: f64,
    /// Displacement of a sought target that forces a new path.
    pub moved_tolerance: f64,

    pub vitals_decay: VitalsDecay,
    pub wander_bounds: WanderBounds,

    /// Percent chance of a combat sidestep each think tick.
    pub sidestep_chance: u32,
    /// Maximum lateral offset of a sidestep, per axis.
    pub sidestep_max: u32,
    pub trigger_release_ms: u64,
    pub hunt_recheck_ms: u64,

    pub landmarks: Landmarks,
    pub spawn: SpawnPolicy,

    /// Base seed for all random draws.
    pub seed: u64,
}

impl BehaviorConfig {
    pub const DEFAULT_THINK_INTERVAL_MS: u64 = 2_000;
    pub const DEFAULT_VITALS_INTERVAL_MS: u64 = 10_000;
    pub const DEFAULT_STAGNATION_LIMIT: u32 = 60;
    pub const DEFAULT_SEEK_RADIUS: f64 = 150.0;
    pub const DEFAULT_SEEK_DISTANCE_AWAY: f64 = 10.0;
    pub const DEFAULT_HUNT_DISTANCE_AWAY: f64 = 100.0;
    pub const DEFAULT_STUCK_TOLERANCE: f64 = 10.0;
    pub const DEFAULT_MOVED_TOLERANCE: f64 = 1.0;
    pub const DEFAULT_SIDESTEP_CHANCE: u32 = 50;
    pub const DEFAULT_SIDESTEP_MAX: u32 = 25;
    pub const DEFAULT_TRIGGER_RELEASE_MS: u64 = 1_500;
    pub const DEFAULT_HUNT_RECHECK_MS: u64 = 2_000;

    pub fn new() -> Self {
        Self {
            think_interval_ms: Self::DEFAULT_THINK_INTERVAL_MS,
            vitals_interval_ms: Self::DEFAULT_VITALS_INTERVAL_MS,
            stagnation_limit: Self::DEFAULT_STAGNATION_LIMIT,
            seek_radius: Self::DEFAULT_SEEK_RADIUS,
            seek_distance_away: Self::DEFAULT_SEEK_DISTANCE_AWAY,
            hunt_distance_away: Self::DEFAULT_HUNT_DISTANCE_AWAY,
            stuck_tolerance: Self::DEFAULT_STUCK_TOLERANCE,
            moved_tolerance: Self::DEFAULT_MOVED_TOLERANCE,
            vitals_decay: VitalsDecay::default(),
            wander_bounds: WanderBounds::default(),
            sidestep_chance: Self::DEFAULT_SIDESTEP_CHANCE,
            sidestep_max: Self::DEFAULT_SIDESTEP_MAX,
            trigger_release_ms: Self::DEFAULT_TRIGGER_RELEASE_MS,
            hunt_recheck_ms: Self::DEFAULT_HUNT_RECHECK_MS,
            landmarks: Landmarks::default(),
            spawn: SpawnPolicy::default(),
            seed: 0,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Baseline drift applied on every vitals tick.
///
/// Solutions express their own vitals deltas as multiples of these values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VitalsDecay {
    pub happiness: f64,
    pub fatigue: f64,
    pub boredom: f64,
}

impl Default for VitalsDecay {
    fn default() -> Self {
        Self {
            happiness: -10.0,
            fatigue: 10.0,
            boredom: 10.0,
        }
    }
}

/// Box random wander points are drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WanderBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub z: f64,
}

impl WanderBounds {
    pub fn contains(&self, point: &Position) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }
}

impl Default for WanderBounds {
    fn default() -> Self {
        Self {
            min_x: -150.0,
            max_x: 600.0,
            min_y: -150.0,
            max_y: 600.0,
            z: 0.0,
        }
    }
}

/// Fixed destinations used by errand-style behaviors.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Landmarks {
    pub home: Position,
    pub food_vendor: Position,
    pub health_vendor: Position,
    pub club: Position,
}

impl Default for Landmarks {
    fn default() -> Self {
        Self {
            home: Position::new(120.0, 280.0, 250.0),
            food_vendor: Position::new(420.406, 329.79, 218.504),
            health_vendor: Position::new(323.09, 347.599, 218.99),
            club: Position::new(405.0, 331.0, 200.0),
        }
    }
}

/// Population policy of the agent spawner.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnPolicy {
    /// Number of agents kept alive.
    pub count: usize,
    /// Period of the population check.
    pub interval_ms: u64,
    /// Delay before the first population check.
    pub initial_delay_ms: u64,
    pub vitals: Vitals,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            count: 2,
            interval_ms: 2_000,
            initial_delay_ms: 15_000,
            vitals: Vitals::new(100.0, 0.0, 100.0, 0.0, 200.0),
        }
    }
}
