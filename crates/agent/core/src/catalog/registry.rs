//! Immutable catalog and its builder.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::{GoalKind, SolutionKind};
use crate::error::{BehaviorError, ErrorSeverity};
use crate::scoring::{Evaluator, goals};
use crate::solution::SolutionHandlers;
use crate::state::Archetype;

/// Catalog configuration error, raised while building.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("goal `{goal}` is offered to {archetype} but has no evaluator")]
    MissingGoalEvaluator {
        archetype: Archetype,
        goal: GoalKind,
    },

    #[error("solution `{solution}` is offered to {archetype} but has no handlers")]
    MissingSolutionHandlers {
        archetype: Archetype,
        solution: SolutionKind,
    },

    #[error("goal `{goal}` of {archetype} has no solutions")]
    EmptyGoal {
        archetype: Archetype,
        goal: GoalKind,
    },

    #[error("{archetype} has no goals")]
    NoGoals { archetype: Archetype },

    #[error("unknown archetype `{name}`")]
    UnknownArchetype { name: String },

    #[error("unknown goal `{name}`")]
    UnknownGoal { name: String },

    #[error("unknown solution `{name}`")]
    UnknownSolution { name: String },
}

impl BehaviorError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingGoalEvaluator { .. } => "CATALOG_MISSING_GOAL_EVALUATOR",
            Self::MissingSolutionHandlers { .. } => "CATALOG_MISSING_SOLUTION_HANDLERS",
            Self::EmptyGoal { .. } => "CATALOG_EMPTY_GOAL",
            Self::NoGoals { .. } => "CATALOG_NO_GOALS",
            Self::UnknownArchetype { .. } => "CATALOG_UNKNOWN_ARCHETYPE",
            Self::UnknownGoal { .. } => "CATALOG_UNKNOWN_GOAL",
            Self::UnknownSolution { .. } => "CATALOG_UNKNOWN_SOLUTION",
        }
    }
}

/// Read-only registry of goals, solutions and their behaviors.
///
/// Built once through [`GoalCatalogBuilder`] and shared by reference (usually
/// behind an `Arc`) with every agent. Goal and solution lists are ordered
/// alphabetically by name, which is also the tie-break order of selection.
#[derive(Clone, Debug)]
pub struct GoalCatalog {
    goals: HashMap<Archetype, Arc<[GoalKind]>>,
    solutions: HashMap<(Archetype, GoalKind), Arc<[SolutionKind]>>,
    goal_evaluators: HashMap<GoalKind, Evaluator>,
    handlers: HashMap<SolutionKind, SolutionHandlers>,
}

impl GoalCatalog {
    pub fn builder() -> GoalCatalogBuilder {
        GoalCatalogBuilder::new()
    }

    /// Catalog with every behavior registered and the stock archetype table.
    pub fn standard() -> Result<Self, CatalogError> {
        super::standard::register(GoalCatalogBuilder::new().with_standard_behaviors()).build()
    }

    /// Goals offered to `archetype`; empty if none were registered.
    pub fn goals_for(&self, archetype: Archetype) -> &[GoalKind] {
        self.goals.get(&archetype).map(|g| &g[..]).unwrap_or(&[])
    }

    /// Shared handle to the goal list, copied onto agents at spawn.
    pub fn goal_list(&self, archetype: Archetype) -> Arc<[GoalKind]> {
        self.goals
            .get(&archetype)
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    pub fn solutions_for(&self, archetype: Archetype, goal: GoalKind) -> &[SolutionKind] {
        self.solutions
            .get(&(archetype, goal))
            .map(|s| &s[..])
            .unwrap_or(&[])
    }

    pub fn goal_evaluator(&self, goal: GoalKind) -> Option<Evaluator> {
        self.goal_evaluators.get(&goal).copied()
    }

    pub fn solution_evaluator(&self, solution: SolutionKind) -> Option<Evaluator> {
        self.handlers.get(&solution).map(|h| h.evaluate)
    }

    pub fn callbacks_for(&self, solution: SolutionKind) -> Option<&SolutionHandlers> {
        self.handlers.get(&solution)
    }

    pub fn archetypes(&self) -> impl Iterator<Item = Archetype> + '_ {
        self.goals.keys().copied()
    }
}

/// Additive registration of catalog entries.
#[derive(Default)]
pub struct GoalCatalogBuilder {
    goals: BTreeMap<Archetype, BTreeMap<GoalKind, Vec<SolutionKind>>>,
    goal_evaluators: HashMap<GoalKind, Evaluator>,
    handlers: HashMap<SolutionKind, SolutionHandlers>,
}

impl GoalCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the stock evaluator of every goal and the stock behavior of
    /// every solution.
    #[must_use]
    pub fn with_standard_behaviors(mut self) -> Self {
        use strum::IntoEnumIterator;

        for goal in GoalKind::iter() {
            self.goal_evaluators.insert(goal, goals::evaluator(goal));
        }
        for solution in SolutionKind::iter() {
            self.handlers.insert(solution, SolutionHandlers::standard(solution));
        }
        self
    }

    #[must_use]
    pub fn goal_evaluator(mut self, goal: GoalKind, evaluator: Evaluator) -> Self {
        self.goal_evaluators.insert(goal, evaluator);
        self
    }

    #[must_use]
    pub fn solution_handlers(mut self, solution: SolutionKind, handlers: SolutionHandlers) -> Self {
        self.handlers.insert(solution, handlers);
        self
    }

    /// Offers `goal` to `archetype`, satisfied by the given solutions.
    ///
    /// Repeated calls for the same pair add solutions; duplicates are ignored.
    #[must_use]
    pub fn offer(mut self, archetype: Archetype, goal: GoalKind, solutions: &[SolutionKind]) -> Self {
        let entry = self
            .goals
            .entry(archetype)
            .or_default()
            .entry(goal)
            .or_default();
        for solution in solutions {
            if !entry.contains(solution) {
                entry.push(*solution);
            }
        }
        self
    }

    /// Validates totality and freezes the catalog.
    pub fn build(self) -> Result<GoalCatalog, CatalogError> {
        let mut goals = HashMap::new();
        let mut solutions = HashMap::new();

        for (archetype, offered) in self.goals {
            if offered.is_empty() {
                return Err(CatalogError::NoGoals { archetype });
            }

            let mut goal_list: Vec<GoalKind> = Vec::with_capacity(offered.len());
            for (goal, mut goal_solutions) in offered {
                if !self.goal_evaluators.contains_key(&goal) {
                    return Err(CatalogError::MissingGoalEvaluator { archetype, goal });
                }
                if goal_solutions.is_empty() {
                    return Err(CatalogError::EmptyGoal { archetype, goal });
                }
                if let Some(&solution) = goal_solutions
                    .iter()
                    .find(|s| !self.handlers.contains_key(*s))
                {
                    return Err(CatalogError::MissingSolutionHandlers {
                        archetype,
                        solution,
                    });
                }

                goal_solutions.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
                solutions.insert((archetype, goal), Arc::from(goal_solutions));
                goal_list.push(goal);
            }

            goal_list.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
            goals.insert(archetype, Arc::from(goal_list));
        }

        Ok(GoalCatalog {
            goals,
            solutions,
            goal_evaluators: self.goal_evaluators,
            handlers: self.handlers,
        })
    }
}
