//! Utility scoring.
//!
//! Every goal and solution owns an evaluator: a pure function of the agent
//! snapshot returning a utility score. Scores share one shape:
//!
//! ```text
//! score = (sum(deviations) / n) / 10 * archetype_weight
//! ```
//!
//! where each deviation is `(value - threshold) / range` on the side of the
//! threshold its guard admits. A guard that rejects the agent returns `0.0`
//! (still selectable when nothing else scores), and a negative score removes
//! the candidate from selection entirely.
//!
//! # Modules
//!
//! - [`goals`]: evaluators for every [`GoalKind`](crate::GoalKind)
//! - [`solutions`]: evaluators for every [`SolutionKind`](crate::SolutionKind)
//! - [`selector`]: the [`UtilityEvaluator`] picking the winner

pub mod goals;
pub mod selector;
pub mod solutions;

pub use selector::UtilityEvaluator;

use crate::env::{RngOracle, compute_seed, contexts};
use crate::state::{Agent, Archetype};

/// Pure scoring function of an agent snapshot.
pub type Evaluator = fn(&Agent, &dyn RngOracle) -> f64;

/// Per-archetype multiplier applied to an averaged score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchetypeWeights {
    pub bandit: f64,
    pub entertainer: f64,
    pub soldier: f64,
}

impl ArchetypeWeights {
    pub const fn new(bandit: f64, entertainer: f64, soldier: f64) -> Self {
        Self {
            bandit,
            entertainer,
            soldier,
        }
    }

    pub const fn uniform(weight: f64) -> Self {
        Self::new(weight, weight, weight)
    }

    pub const fn for_archetype(&self, archetype: Archetype) -> f64 {
        match archetype {
            Archetype::Bandit => self.bandit,
            Archetype::Entertainer => self.entertainer,
            Archetype::Soldier => self.soldier,
        }
    }
}

/// Averages normalized deviations, scales by 1/10 and the archetype weight.
pub fn weighted(deviations: &[f64], weights: ArchetypeWeights, archetype: Archetype) -> f64 {
    if deviations.is_empty() {
        return 0.0;
    }
    let average = deviations.iter().sum::<f64>() / deviations.len() as f64 / 10.0;
    average * weights.for_archetype(archetype)
}

/// Small random score (0.00, 0.01 or 0.02) used by whimsical goals when
/// their guard rejects the agent.
///
/// Derived from the agent's current nonce without advancing it, so the same
/// snapshot always scores the same.
pub fn jitter(agent: &Agent, rng: &dyn RngOracle, salt: u32) -> f64 {
    let seed = compute_seed(agent.seed(), agent.nonce(), agent.id.0, contexts::JITTER + salt);
    f64::from(rng.range(seed, 0, 2)) / 100.0
}
