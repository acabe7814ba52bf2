//! Roll-resolution engine for downtime checks.
//!
//! A check produces a *confirmed* result from its unconditional modifiers and,
//! when conditional modifiers were proposed, a *potential* result showing the
//! outcome if every one of them were approved. Both are derived from a single
//! set of dice: the pool is drawn once at its largest size and the confirmed
//! result reads a prefix of it, so approving a conditional later never calls
//! for a re-roll.

pub mod check;
pub mod config;
pub mod dice;
pub mod error;
pub mod ledger;
pub mod tier;

pub use check::{CheckKind, CheckResult, CheckSpec, MAX_POOL, ResolvedRoll, execute};
pub use config::EngineConfig;
pub use dice::{Die, DrawError, DrawSource, RngSource, ScriptedSource};
pub use error::{RollError, RollResult};
pub use ledger::{Approval, ConditionalModifier, Ledger, ModifierId};
pub use tier::{SUCCESS_FACE, Tier, classify};
