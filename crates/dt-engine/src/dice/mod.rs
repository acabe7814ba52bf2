//! Dice types and random draw sources.
//!
//! Checks only ever roll two kinds of dice: a d20 for the primary roll of a
//! threshold check and d6s for every modifier or success pool.

pub mod source;

pub use source::{DrawError, DrawSource, RngSource, ScriptedSource};

use serde::{Deserialize, Serialize};

/// A die type used by checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Six-sided die, used for modifier pools and success pools.
    D6,
    /// Twenty-sided die, used for the primary roll of a threshold check.
    D20,
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D6 => 6,
            Self::D20 => 20,
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}
