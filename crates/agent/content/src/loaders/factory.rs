//! Content factory for loading behavior content from a data directory.

use std::path::{Path, PathBuf};

use agent_core::{BehaviorConfig, GoalCatalog};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads all behavior content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── behavior.toml
/// └── catalog.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "behavior.toml";
    pub const CATALOG_FILE: &'static str = "catalog.ron";

    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load behavior configuration from `behavior.toml`.
    pub fn load_config(&self) -> LoadResult<BehaviorConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        ConfigLoader::load(&path)
    }

    /// Load the goal catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<GoalCatalog> {
        let path = self.data_dir.join(Self::CATALOG_FILE);
        CatalogLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
