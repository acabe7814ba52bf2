//! Configuration for a downtime tracker.

use std::path::PathBuf;

use dt_engine::EngineConfig;

/// Configuration for a tracker backed by a file store.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Path of the JSON settings file.
    pub store_path: PathBuf,
    /// RNG seed for reproducible rolls.
    pub seed: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("downtime.json"),
            seed: None,
        }
    }
}

impl TrackerConfig {
    /// Set the settings file path.
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The roll engine configuration for this tracker.
    pub fn engine(&self) -> EngineConfig {
        EngineConfig { seed: self.seed }
    }
}
