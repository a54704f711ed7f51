//! Behavior configuration loader.

use std::path::Path;

use agent_core::BehaviorConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for behavior configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Fields missing from the file keep their defaults.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing BehaviorConfig
    pub fn load(path: &Path) -> LoadResult<BehaviorConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BehaviorConfig> {
        let config: BehaviorConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse behavior config TOML: {}", e))?;

        tracing::debug!(
            think_ms = config.think_interval_ms,
            vitals_ms = config.vitals_interval_ms,
            seed = config.seed,
            "behavior config loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::Position;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
stagnation_limit = 5
seed = 42

[landmarks.home]
x = 1.0
y = 2.0
z = 3.0

[spawn]
count = 6
"#
        )
        .expect("write config");

        let config = ConfigLoader::load(file.path()).expect("config parses");
        assert_eq!(config.stagnation_limit, 5);
        assert_eq!(config.seed, 42);
        assert_eq!(config.landmarks.home, Position::new(1.0, 2.0, 3.0));
        assert_eq!(config.spawn.count, 6);

        let defaults = BehaviorConfig::default();
        assert_eq!(config.think_interval_ms, defaults.think_interval_ms);
        assert_eq!(config.landmarks.club, defaults.landmarks.club);
        assert_eq!(config.spawn.vitals, defaults.spawn.vitals);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/behavior.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/behavior.toml"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = ConfigLoader::parse("think_interval_ms = \"soon\"").unwrap_err();
        assert!(err.to_string().contains("behavior config"));
    }
}
