//! Deterministic randomness for behaviors.
//!
//! Every random decision (wander points, sidestep rolls, evaluator jitter)
//! is derived from a seed built with [`compute_seed`], so a run replays
//! exactly given the same base seed and event order.

/// RNG oracle for deterministic random number generation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }

    /// Uniform real in [min, max].
    fn range_f64(&self, seed: u64, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        let unit = f64::from(self.next_u32(seed)) / f64::from(u32::MAX);
        min + (max - min) * unit
    }
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Roll contexts, so independent draws in the same step never share a seed.
pub mod contexts {
    pub const WANDER_X: u32 = 1;
    pub const WANDER_Y: u32 = 2;
    pub const SIDESTEP_CHANCE: u32 = 3;
    pub const SIDESTEP_X: u32 = 4;
    pub const SIDESTEP_Y: u32 = 5;
    pub const EXPLORE_LEGS: u32 = 6;
    pub const JITTER: u32 = 7;
    pub const SPAWN_ARCHETYPE: u32 = 8;
    pub const SPAWN_POSITION_X: u32 = 9;
    pub const SPAWN_POSITION_Y: u32 = 10;
}

/// Mix a base seed, a nonce, an entity and a roll context into one seed.
///
/// # Arguments
///
/// * `base_seed` - Seed fixed for the whole run
/// * `nonce` - Per-entity draw counter
/// * `entity` - Entity the roll belongs to
/// * `context` - Distinguishes independent rolls (see [`contexts`])
pub fn compute_seed(base_seed: u64, nonce: u64, entity: u32, context: u32) -> u64 {
    let mut hash = base_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (entity as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
