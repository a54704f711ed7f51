//! Goal and solution catalog.
//!
//! Goals are high-level intents ("rest", "hunt"); solutions are the concrete
//! strategies that satisfy them ("sleep" or "relax" for resting). Both sets
//! are closed enums: the catalog restricts which of them an archetype may use
//! and binds each name to its evaluator and behavior callbacks.

mod registry;
mod standard;

pub use registry::{CatalogError, GoalCatalog, GoalCatalogBuilder};

/// High-level intent an agent may pursue.
///
/// String forms are the camelCase names used in catalog files and driver calls.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum GoalKind {
    /// Defend against an attacker. Only reachable through forced interrupts.
    DoDefend,
    DoExplore,
    DoHunt,
    DoRest,
    GetFood,
    GetHealth,
    GoHome,
    HaveFun,
}

/// Concrete strategy implementing a goal.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum SolutionKind {
    FleeArea,
    ExploreArea,
    PatrolArea,
    SeekAndDestroy,
    Relax,
    Sleep,
    BuyFood,
    SeekFood,
    StealFood,
    BuyHealth,
    SeekHealth,
    StealHealth,
    SeekHome,
    Dance,
}

/// Active (goal, solution) pair.
///
/// Goal and solution are installed and cleared together, so an agent can never
/// hold one without the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub goal: GoalKind,
    pub solution: SolutionKind,
}

impl Assignment {
    pub const fn new(goal: GoalKind, solution: SolutionKind) -> Self {
        Self { goal, solution }
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.goal, self.solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_names_are_camel_case() {
        assert_eq!(GoalKind::DoRest.as_ref(), "doRest");
        assert_eq!(GoalKind::GoHome.to_string(), "goHome");
        assert_eq!(SolutionKind::SeekAndDestroy.as_ref(), "seekAndDestroy");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(GoalKind::from_str("haveFun"), Ok(GoalKind::HaveFun));
        assert_eq!(SolutionKind::from_str("fleeArea"), Ok(SolutionKind::FleeArea));
        assert!(GoalKind::from_str("").is_err());
        assert!(SolutionKind::from_str("teleport").is_err());
    }
}
