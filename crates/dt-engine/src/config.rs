//! Configuration for the roll engine.

use crate::dice::RngSource;

/// Configuration for building a draw source.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// RNG seed for reproducible rolls. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the draw source this configuration describes.
    pub fn source(&self) -> RngSource {
        match self.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        }
    }
}
