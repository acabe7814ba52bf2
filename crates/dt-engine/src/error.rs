//! Error types for the roll engine.

use crate::dice::DrawError;
use crate::ledger::ModifierId;

/// Errors that can occur while building or executing a check.
#[derive(Debug, thiserror::Error)]
pub enum RollError {
    /// A conditional modifier was proposed with a magnitude of zero.
    #[error("conditional magnitude must be at least 1")]
    InvalidMagnitude,

    /// A conditional modifier was proposed without a justification.
    #[error("conditional justification must not be blank")]
    BlankJustification,

    /// A success pool was requested with a negative number of dice.
    #[error("pool size cannot be negative: {0}")]
    NegativePool(i32),

    /// The combined pool is larger than [`MAX_POOL`](crate::check::MAX_POOL).
    #[error("pool of {0} dice exceeds the maximum of {max}", max = crate::check::MAX_POOL)]
    PoolTooLarge(u64),

    /// A check kind tag did not name a known kind.
    #[error("unknown check kind: {0}")]
    UnknownKind(String),

    /// A ledger operation referenced a modifier that is not in the ledger.
    #[error("conditional modifier not found: {0}")]
    UnknownModifier(ModifierId),

    /// The random draw source failed.
    #[error("draw failed: {0}")]
    Draw(#[from] DrawError),
}

/// Convenience result type for roll operations.
pub type RollResult<T> = Result<T, RollError>;
