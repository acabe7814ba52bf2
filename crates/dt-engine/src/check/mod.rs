//! Check specifications, results, and the executor entry point.
//!
//! Each [`CheckKind`] has its own executor:
//! - **Threshold roll** ([`threshold`]): a d20 plus the highest of a signed d6 pool
//! - **Success pool** ([`pool`]): count d6 faces of 5 or more
//!
//! Both draw their d6s in one batch sized for the potential result and read
//! the confirmed result from a prefix of that batch.

pub mod pool;
pub mod threshold;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::{Die, DrawError, DrawSource};
use crate::error::{RollError, RollResult};
use crate::ledger::ConditionalModifier;
use crate::tier::Tier;

/// Largest d6 batch a single check may draw.
pub const MAX_POOL: u32 = 100;

/// The kind of randomized check to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckKind {
    /// One d20 plus the highest die of a signed d6 pool.
    ThresholdRoll,
    /// N d6, counting faces that meet the success face.
    SuccessPool,
}

impl CheckKind {
    /// Parse a kind from a tag like "threshold" or "pool".
    pub fn from_str_tag(s: &str) -> RollResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "threshold" | "threshold_roll" => Ok(Self::ThresholdRoll),
            "pool" | "success_pool" => Ok(Self::SuccessPool),
            _ => Err(RollError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdRoll => write!(f, "threshold"),
            Self::SuccessPool => write!(f, "pool"),
        }
    }
}

/// Everything needed to execute one check.
///
/// Built per execution and consumed by [`execute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSpec {
    /// Which executor runs the check.
    pub kind: CheckKind,
    /// Net accuracy minus difficulty for a threshold roll, or the base pool
    /// size for a success pool.
    pub modifier: i32,
    /// Optional justification for the unconditional modifier.
    pub reason: Option<String>,
    /// Proposed conditional modifiers, in proposal order.
    pub conditionals: Vec<ConditionalModifier>,
}

impl CheckSpec {
    /// A threshold roll with the given accuracy and difficulty.
    ///
    /// Either side above [`MAX_POOL`] is rejected.
    pub fn threshold(accuracy: u32, difficulty: u32) -> RollResult<Self> {
        let accuracy = pool_steps(accuracy)?;
        let difficulty = pool_steps(difficulty)?;
        Ok(Self::new(CheckKind::ThresholdRoll, accuracy - difficulty))
    }

    /// A success pool of `size` dice, at most [`MAX_POOL`].
    pub fn pool(size: u32) -> RollResult<Self> {
        Ok(Self::new(CheckKind::SuccessPool, pool_steps(size)?))
    }

    /// A check of any kind with a raw modifier.
    pub fn new(kind: CheckKind, modifier: i32) -> Self {
        Self {
            kind,
            modifier,
            reason: None,
            conditionals: Vec::new(),
        }
    }

    /// Attach a justification for the unconditional modifier.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach conditional modifiers, typically a ledger snapshot.
    pub fn with_conditionals(mut self, conditionals: Vec<ConditionalModifier>) -> Self {
        self.conditionals = conditionals;
        self
    }

    /// Sum of all conditional magnitudes.
    pub fn conditional_total(&self) -> u64 {
        self.conditionals
            .iter()
            .map(|m| u64::from(m.magnitude))
            .sum()
    }

    /// Number of d6 drawn for the potential reading, which the confirmed
    /// reading shares.
    pub fn batch_size(&self) -> u64 {
        let net = i64::from(self.modifier);
        let conditional = self.conditional_total();
        match self.kind {
            CheckKind::ThresholdRoll => net
                .unsigned_abs()
                .max(net.saturating_add_unsigned(conditional).unsigned_abs()),
            CheckKind::SuccessPool => net.unsigned_abs().saturating_add(conditional),
        }
    }

    /// Reject specifications that must never reach the dice.
    pub fn validate(&self) -> RollResult<()> {
        if self.kind == CheckKind::SuccessPool && self.modifier < 0 {
            return Err(RollError::NegativePool(self.modifier));
        }
        for modifier in &self.conditionals {
            modifier.validate()?;
        }
        let size = self.batch_size();
        if size > u64::from(MAX_POOL) {
            return Err(RollError::PoolTooLarge(size));
        }
        Ok(())
    }
}

/// One fully resolved reading of a check: confirmed or potential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRoll {
    /// Human-readable dice formula, e.g. "1d20 + 2d6kh" or "4d6".
    pub formula: String,
    /// The d6 faces this reading uses, in draw order.
    pub dice: Vec<u32>,
    /// Total for a threshold roll, success count for a success pool.
    pub total: i32,
    /// Classified outcome.
    pub tier: Tier,
}

impl fmt::Display for ResolvedRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.dice.iter().map(|v| v.to_string()).collect();
        write!(
            f,
            "{} [{}] = {} ({})",
            self.formula,
            faces.join(", "),
            self.total,
            self.tier
        )
    }
}

/// The immutable outcome of executing a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The kind of check that was executed.
    pub kind: CheckKind,
    /// The d20 face, for threshold rolls only.
    pub primary: Option<u32>,
    /// The outcome using only unconditional modifiers.
    pub confirmed: ResolvedRoll,
    /// The outcome if every conditional were approved. Present iff the check
    /// carried conditionals.
    pub potential: Option<ResolvedRoll>,
    /// Snapshot of the conditionals the check was executed with.
    pub conditionals: Vec<ConditionalModifier>,
    /// Justification for the unconditional modifier.
    pub reason: Option<String>,
}

impl CheckResult {
    /// The confirmed tier.
    pub fn tier(&self) -> Tier {
        self.confirmed.tier
    }

    /// Whether the confirmed outcome counts as a success.
    pub fn is_success(&self) -> bool {
        self.confirmed.tier.is_success()
    }

    /// Whether approving every conditional would change the tier.
    pub fn would_change(&self) -> bool {
        self.potential
            .as_ref()
            .is_some_and(|p| p.tier != self.confirmed.tier)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(primary) = self.primary {
            write!(f, "d20 {primary}; ")?;
        }
        write!(f, "confirmed {}", self.confirmed)?;
        if let Some(potential) = &self.potential {
            write!(f, "; potential {potential}")?;
        }
        Ok(())
    }
}

/// Execute a check, drawing each die type at most once.
///
/// The specification is validated before anything is drawn. Draw failures
/// are returned unchanged.
pub fn execute<S: DrawSource + ?Sized>(
    spec: CheckSpec,
    source: &mut S,
) -> RollResult<CheckResult> {
    spec.validate()?;
    debug!(
        kind = %spec.kind,
        modifier = spec.modifier,
        conditionals = spec.conditionals.len(),
        "executing check"
    );

    let result = match spec.kind {
        CheckKind::ThresholdRoll => threshold::execute(spec, source)?,
        CheckKind::SuccessPool => pool::execute(spec, source)?,
    };

    debug!(
        confirmed = %result.confirmed.tier,
        potential = ?result.potential.as_ref().map(|p| p.tier),
        "check resolved"
    );
    Ok(result)
}

/// Convert a step count to a signed modifier, rejecting anything above
/// [`MAX_POOL`].
fn pool_steps(steps: u32) -> RollResult<i32> {
    if steps > MAX_POOL {
        return Err(RollError::PoolTooLarge(u64::from(steps)));
    }
    i32::try_from(steps).map_err(|_| RollError::PoolTooLarge(u64::from(steps)))
}

/// Convert a validated batch size to a draw count.
fn batch_len(size: u64) -> RollResult<u32> {
    u32::try_from(size)
        .ok()
        .filter(|&n| n <= MAX_POOL)
        .ok_or(RollError::PoolTooLarge(size))
}

/// Draw exactly `count` dice, skipping the source entirely for zero.
fn draw_exact<S: DrawSource + ?Sized>(
    source: &mut S,
    die: Die,
    count: u32,
) -> RollResult<Vec<u32>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let faces = source.draw(die, count)?;
    if faces.len() != count as usize {
        return Err(DrawError::ShortBatch {
            requested: count,
            returned: faces.len(),
        }
        .into());
    }
    debug!(%die, ?faces, "drew dice");
    Ok(faces)
}
