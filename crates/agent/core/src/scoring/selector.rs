//! Candidate selection.
//!
//! The [`UtilityEvaluator`] is shared by goal and solution selection: the
//! arbiter hands it the candidate list from the catalog together with the
//! matching evaluator lookup.

use super::Evaluator;
use crate::env::RngOracle;
use crate::state::Agent;

/// Picks the highest-scoring candidate.
///
/// # Selection rules
///
/// - The excluded candidate (if any) is skipped.
/// - Negative scores make a candidate ineligible for this pass.
/// - The running maximum starts at `-1`, so a score of exactly `0` can win.
/// - Only a strictly greater score replaces the current best: on ties the
///   candidate listed first is kept.
///
/// Selection is a pure function of the candidate list and the agent snapshot.
pub struct UtilityEvaluator;

impl UtilityEvaluator {
    /// Score below every eligible candidate.
    pub const SENTINEL: f64 = -1.0;

    /// Selects the best candidate.
    ///
    /// # Arguments
    ///
    /// * `candidates` - Candidate names in catalog order
    /// * `avoid` - Candidate to skip, typically the one currently active
    /// * `evaluator` - Resolves each candidate to its scoring function;
    ///   candidates without one are skipped
    /// * `agent` / `rng` - Snapshot handed to every evaluator
    ///
    /// # Returns
    ///
    /// The winning candidate and its score, or `None` if nothing is eligible.
    pub fn select<K>(
        candidates: &[K],
        avoid: Option<K>,
        evaluator: impl Fn(K) -> Option<Evaluator>,
        agent: &Agent,
        rng: &dyn RngOracle,
    ) -> Option<(K, f64)>
    where
        K: Copy + PartialEq + std::fmt::Display,
    {
        let mut best: Option<(K, f64)> = None;
        let mut max = Self::SENTINEL;

        for &candidate in candidates {
            if avoid == Some(candidate) {
                tracing::trace!(
                    target: "agent::scoring",
                    agent = %agent.id,
                    %candidate,
                    "skipped (avoided)"
                );
                continue;
            }
            let Some(evaluate) = evaluator(candidate) else {
                tracing::warn!(
                    target: "agent::scoring",
                    agent = %agent.id,
                    %candidate,
                    "no evaluator registered"
                );
                continue;
            };

            let score = evaluate(agent, rng);
            tracing::debug!(
                target: "agent::scoring",
                agent = %agent.id,
                %candidate,
                score,
                "evaluated"
            );

            // NaN fails both comparisons and is never selected.
            if score < 0.0 {
                continue;
            }
            if score > max {
                max = score;
                best = Some((candidate, score));
            }
        }

        best
    }
}
