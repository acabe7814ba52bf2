//! Threshold roll executor.
//!
//! Roll one d20, then add (or subtract) the highest die of a d6 pool sized by
//! the net accuracy. The pool is drawn once at the size the potential result
//! needs; the confirmed result reads the first `|net|` faces of it.

use tracing::trace;

use super::{CheckKind, CheckResult, CheckSpec, ResolvedRoll, batch_len, draw_exact};
use crate::dice::{Die, DrawSource};
use crate::error::RollResult;
use crate::tier::classify;

/// Execute a validated threshold roll.
pub(crate) fn execute<S: DrawSource + ?Sized>(
    spec: CheckSpec,
    source: &mut S,
) -> RollResult<CheckResult> {
    let net_confirmed = i64::from(spec.modifier);
    let net_potential = net_confirmed.saturating_add_unsigned(spec.conditional_total());
    let pool_size = batch_len(spec.batch_size())?;

    let primary = draw_exact(source, Die::D20, 1)?[0];
    let batch = draw_exact(source, Die::D6, pool_size)?;
    trace!(primary, net_confirmed, net_potential, "threshold roll drawn");

    let confirmed = resolve(primary, &batch, net_confirmed);
    let potential = if spec.conditionals.is_empty() {
        None
    } else {
        Some(resolve(primary, &batch, net_potential))
    };

    Ok(CheckResult {
        kind: CheckKind::ThresholdRoll,
        primary: Some(primary),
        confirmed,
        potential,
        conditionals: spec.conditionals,
        reason: spec.reason,
    })
}

/// Read the first `|net|` faces of the batch and apply the highest one.
///
/// A negative net subtracts the highest face instead of adding it.
fn resolve(primary: u32, batch: &[u32], net: i64) -> ResolvedRoll {
    let dice: Vec<u32> = batch
        .iter()
        .take(net.unsigned_abs() as usize)
        .copied()
        .collect();
    let highest = dice.iter().copied().max().unwrap_or(0) as i32;
    let modifier = if net < 0 { -highest } else { highest };
    let total = primary as i32 + modifier;

    ResolvedRoll {
        formula: formula(net),
        dice,
        total,
        tier: classify(CheckKind::ThresholdRoll, total),
    }
}

fn formula(net: i64) -> String {
    match net {
        0 => "1d20".to_string(),
        n if n > 0 => format!("1d20 + {n}d6kh"),
        n => format!("1d20 - {}d6kh", n.unsigned_abs()),
    }
}
