//! Random draw sources.
//!
//! A [`DrawSource`] hands out a whole batch of die faces per call. The
//! executor relies on that: it slices one batch into the confirmed and
//! potential results, so a batch must never be assembled from separate calls.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Die;

/// Errors raised by a draw source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    /// A scripted source ran out of values.
    #[error("draw source exhausted: requested {requested}, {remaining} remaining")]
    Exhausted {
        /// Number of faces requested by the failing call.
        requested: u32,
        /// Number of faces left in the source.
        remaining: usize,
    },

    /// The source returned a different number of faces than requested.
    #[error("draw source returned {returned} faces, expected {requested}")]
    ShortBatch {
        /// Number of faces requested.
        requested: u32,
        /// Number of faces actually returned.
        returned: usize,
    },

    /// A scripted value does not fit on the requested die.
    #[error("value {value} is not a face of a {die}")]
    OutOfRange {
        /// The die that was being rolled.
        die: Die,
        /// The offending value.
        value: u32,
    },
}

/// Supplies independent uniform die faces on demand.
pub trait DrawSource {
    /// Roll `count` dice of type `die` in a single batch.
    ///
    /// Each returned value lies in `1..=die.sides()`.
    fn draw(&mut self, die: Die, count: u32) -> Result<Vec<u32>, DrawError>;
}

/// A draw source backed by a seedable PRNG.
#[derive(Debug, Clone)]
pub struct RngSource {
    rng: StdRng,
}

impl RngSource {
    /// Create a source seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a deterministic source from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DrawSource for RngSource {
    fn draw(&mut self, die: Die, count: u32) -> Result<Vec<u32>, DrawError> {
        Ok((0..count)
            .map(|_| self.rng.random_range(1..=die.sides()))
            .collect())
    }
}

/// A draw source that replays a fixed sequence of faces.
///
/// Values are consumed front to back across calls regardless of die type.
/// Useful for tests and for replaying a recorded roll.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: VecDeque<u32>,
    calls: Vec<(Die, u32)>,
}

impl ScriptedSource {
    /// Create a source that will return `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            calls: Vec::new(),
        }
    }

    /// Number of faces not yet drawn.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// Every `draw` call made so far, as `(die, count)` pairs.
    pub fn calls(&self) -> &[(Die, u32)] {
        &self.calls
    }
}

impl DrawSource for ScriptedSource {
    fn draw(&mut self, die: Die, count: u32) -> Result<Vec<u32>, DrawError> {
        let wanted = count as usize;
        if wanted > self.values.len() {
            return Err(DrawError::Exhausted {
                requested: count,
                remaining: self.values.len(),
            });
        }
        if let Some(&value) = self
            .values
            .iter()
            .take(wanted)
            .find(|&&v| v == 0 || v > die.sides())
        {
            return Err(DrawError::OutOfRange { die, value });
        }
        self.calls.push((die, count));
        Ok(self.values.drain(..wanted).collect())
    }
}
