//! Goal catalog loader.
//!
//! Catalog files only list which archetype may pursue which goals through
//! which solutions. Evaluators and solution behaviors are always the stock
//! ones registered by [`GoalCatalogBuilder::with_standard_behaviors`].

use std::path::Path;
use std::str::FromStr;

use agent_core::{Archetype, CatalogError, GoalCatalog, GoalCatalogBuilder, GoalKind, SolutionKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSpec {
    pub archetypes: Vec<ArchetypeSpec>,
}

/// Goals offered to one archetype.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeSpec {
    pub name: String,
    pub goals: Vec<GoalSpec>,
}

/// One goal and the solutions that satisfy it, by camelCase name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSpec {
    pub goal: String,
    pub solutions: Vec<String>,
}

impl CatalogSpec {
    /// Resolves every name and registers the offers on `builder`.
    pub fn register(&self, mut builder: GoalCatalogBuilder) -> Result<GoalCatalogBuilder, CatalogError> {
        for archetype_spec in &self.archetypes {
            let archetype = Archetype::from_str(&archetype_spec.name).map_err(|_| {
                CatalogError::UnknownArchetype {
                    name: archetype_spec.name.clone(),
                }
            })?;

            for goal_spec in &archetype_spec.goals {
                let goal = GoalKind::from_str(&goal_spec.goal).map_err(|_| {
                    CatalogError::UnknownGoal {
                        name: goal_spec.goal.clone(),
                    }
                })?;
                let solutions = goal_spec
                    .solutions
                    .iter()
                    .map(|name| {
                        SolutionKind::from_str(name)
                            .map_err(|_| CatalogError::UnknownSolution { name: name.clone() })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                builder = builder.offer(archetype, goal, &solutions);
            }
        }
        Ok(builder)
    }
}

/// Loader for the goal catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a goal catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing CatalogSpec
    pub fn load(path: &Path) -> LoadResult<GoalCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GoalCatalog> {
        let spec: CatalogSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse goal catalog RON: {}", e))?;

        let catalog = spec
            .register(GoalCatalog::builder().with_standard_behaviors())
            .and_then(GoalCatalogBuilder::build)
            .map_err(|e| anyhow::anyhow!("Invalid goal catalog: {}", e))?;

        tracing::debug!(archetypes = spec.archetypes.len(), "goal catalog loaded");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"(
        archetypes: [
            (
                name: "soldier",
                goals: [
                    (goal: "doRest", solutions: ["sleep", "relax"]),
                    (goal: "goHome", solutions: ["seekHome"]),
                ],
            ),
        ],
    )"#;

    #[test]
    fn test_parse_orders_alphabetically() {
        let catalog = CatalogLoader::parse(SMALL).expect("catalog parses");
        assert_eq!(
            catalog.goals_for(Archetype::Soldier),
            &[GoalKind::DoRest, GoalKind::GoHome]
        );
        assert_eq!(
            catalog.solutions_for(Archetype::Soldier, GoalKind::DoRest),
            &[SolutionKind::Relax, SolutionKind::Sleep]
        );
        assert!(catalog.goals_for(Archetype::Bandit).is_empty());
    }

    #[test]
    fn test_unknown_names_rejected() {
        let err = CatalogLoader::parse(&SMALL.replace("seekHome", "teleportHome")).unwrap_err();
        assert!(err.to_string().contains("unknown solution `teleportHome`"));

        let err = CatalogLoader::parse(&SMALL.replace("goHome", "goAway")).unwrap_err();
        assert!(err.to_string().contains("unknown goal `goAway`"));

        let err = CatalogLoader::parse(&SMALL.replace("soldier", "pirate")).unwrap_err();
        assert!(err.to_string().contains("unknown archetype `pirate`"));
    }

    #[test]
    fn test_empty_goal_rejected() {
        let err = CatalogLoader::parse(&SMALL.replace(r#"["seekHome"]"#, "[]")).unwrap_err();
        assert!(err.to_string().contains("has no solutions"));
    }

    #[test]
    fn test_register_reports_typed_error() {
        let spec = CatalogSpec {
            archetypes: vec![ArchetypeSpec {
                name: "bandit".into(),
                goals: vec![GoalSpec {
                    goal: "haveFun".into(),
                    solutions: vec!["juggle".into()],
                }],
            }],
        };
        let err = spec.register(GoalCatalog::builder()).err();
        assert_eq!(
            err,
            Some(CatalogError::UnknownSolution {
                name: "juggle".into()
            })
        );
    }

    #[test]
    fn test_malformed_ron_rejected() {
        let err = CatalogLoader::parse("(archetypes: [").unwrap_err();
        assert!(err.to_string().contains("goal catalog RON"));
    }
}
