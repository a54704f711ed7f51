//! Simulation configuration read from the environment.
use std::env;
use std::path::PathBuf;

use anyhow::Result;

use agent_content::{CatalogLoader, ConfigLoader};
use agent_core::{BehaviorConfig, GoalCatalog};

/// What to simulate and where its inputs come from.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Overrides the population size of the behavior configuration.
    pub agent_count: Option<usize>,
    /// Virtual seconds to simulate.
    pub duration_secs: u64,
    /// Overrides the base seed of the behavior configuration.
    pub seed: Option<u64>,
    /// TOML behavior configuration; defaults apply when unset.
    pub behavior_config: Option<PathBuf>,
    /// RON catalog; the standard catalog applies when unset.
    pub catalog: Option<PathBuf>,
    /// Enables the log file; an empty path selects the platform default.
    pub log_dir: Option<PathBuf>,
}

impl SimConfig {
    pub const DEFAULT_DURATION_SECS: u64 = 120;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SIM_AGENT_COUNT` - Agents kept alive (default: from behavior config)
    /// - `SIM_DURATION_SECS` - Virtual seconds to run (default: 120)
    /// - `SIM_SEED` - Base seed (default: from behavior config)
    /// - `SIM_BEHAVIOR_CONFIG` - Path to a behavior TOML file
    /// - `SIM_CATALOG` - Path to a catalog RON file
    /// - `SIM_LOG_DIR` - Log directory; set but empty for the platform default
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(count) = read_env::<usize>("SIM_AGENT_COUNT") {
            config.agent_count = Some(count);
        }
        if let Some(secs) = read_env::<u64>("SIM_DURATION_SECS") {
            config.duration_secs = secs;
        }
        if let Some(seed) = read_env::<u64>("SIM_SEED") {
            config.seed = Some(seed);
        }
        config.behavior_config = env::var_os("SIM_BEHAVIOR_CONFIG").map(PathBuf::from);
        config.catalog = env::var_os("SIM_CATALOG").map(PathBuf::from);
        config.log_dir = env::var_os("SIM_LOG_DIR").map(PathBuf::from);

        config
    }

    /// Behavior configuration with the environment overrides applied.
    pub fn load_behavior(&self) -> Result<BehaviorConfig> {
        let mut behavior = match &self.behavior_config {
            Some(path) => ConfigLoader::load(path)?,
            None => BehaviorConfig::default(),
        };
        if let Some(count) = self.agent_count {
            behavior.spawn.count = count;
        }
        if let Some(seed) = self.seed {
            behavior.seed = seed;
        }
        Ok(behavior)
    }

    pub fn load_catalog(&self) -> Result<GoalCatalog> {
        match &self.catalog {
            Some(path) => CatalogLoader::load(path),
            None => Ok(GoalCatalog::standard()?),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            agent_count: None,
            duration_secs: Self::DEFAULT_DURATION_SECS,
            seed: None,
            behavior_config: None,
            catalog: None,
            log_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_files() {
        let config = SimConfig::default();
        assert_eq!(config.load_behavior().expect("defaults"), BehaviorConfig::default());
        assert!(config.load_catalog().is_ok());
    }

    #[test]
    fn test_overrides_apply_on_top_of_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "think_interval_ms = 500\n\n[spawn]\ncount = 9").expect("write");

        let config = SimConfig {
            agent_count: Some(4),
            seed: Some(77),
            behavior_config: Some(file.path().to_path_buf()),
            ..SimConfig::default()
        };
        let behavior = config.load_behavior().expect("config loads");
        assert_eq!(behavior.think_interval_ms, 500);
        assert_eq!(behavior.spawn.count, 4);
        assert_eq!(behavior.seed, 77);
    }

    #[test]
    fn test_missing_catalog_is_an_error() {
        let config = SimConfig {
            catalog: Some(PathBuf::from("/nonexistent/catalog.ron")),
            ..SimConfig::default()
        };
        assert!(config.load_catalog().is_err());
    }
}
