//! Success pool executor.
//!
//! Roll N d6 and count faces of [`SUCCESS_FACE`] or more. Conditional dice are
//! drawn in the same batch, after the base pool, so the confirmed count reads
//! the first N faces and the potential count reads them all.

use tracing::trace;

use super::{CheckKind, CheckResult, CheckSpec, ResolvedRoll, batch_len, draw_exact};
use crate::dice::{Die, DrawSource};
use crate::error::{RollError, RollResult};
use crate::tier::{SUCCESS_FACE, classify, count_successes};

/// Execute a validated success pool.
pub(crate) fn execute<S: DrawSource + ?Sized>(
    spec: CheckSpec,
    source: &mut S,
) -> RollResult<CheckResult> {
    let confirmed_size =
        u32::try_from(spec.modifier).map_err(|_| RollError::NegativePool(spec.modifier))?;
    let potential_size = batch_len(spec.batch_size())?;

    let batch = draw_exact(source, Die::D6, potential_size)?;
    trace!(confirmed_size, potential_size, success_face = SUCCESS_FACE, "success pool drawn");

    let confirmed = tally(&batch[..confirmed_size as usize]);
    let potential = if spec.conditionals.is_empty() {
        None
    } else {
        Some(tally(&batch))
    };

    Ok(CheckResult {
        kind: CheckKind::SuccessPool,
        primary: None,
        confirmed,
        potential,
        conditionals: spec.conditionals,
        reason: spec.reason,
    })
}

fn tally(dice: &[u32]) -> ResolvedRoll {
    let successes = count_successes(dice) as i32;
    ResolvedRoll {
        formula: format!("{}d6", dice.len()),
        dice: dice.to_vec(),
        total: successes,
        tier: classify(CheckKind::SuccessPool, successes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedSource;
    use crate::ledger::Ledger;
    use crate::tier::Tier;
    use proptest::prelude::*;

    #[test]
    fn counts_fives_and_sixes() {
        let mut source = ScriptedSource::new([5, 1, 6, 4]);
        let result = execute(CheckSpec::pool(4).unwrap(), &mut source).unwrap();
        assert_eq!(result.confirmed.formula, "4d6");
        assert_eq!(result.confirmed.total, 2);
        assert_eq!(result.confirmed.tier, Tier::Success);
        assert!(result.potential.is_none());
    }

    #[test]
    fn three_successes_is_triumph() {
        let mut source = ScriptedSource::new([6, 6, 5]);
        let result = execute(CheckSpec::pool(3).unwrap(), &mut source).unwrap();
        assert_eq!(result.confirmed.tier, Tier::Triumph);
    }

    #[test]
    fn empty_pool_draws_nothing() {
        let mut source = ScriptedSource::default();
        let result = execute(CheckSpec::pool(0).unwrap(), &mut source).unwrap();
        assert!(source.calls().is_empty());
        assert_eq!(result.confirmed.formula, "0d6");
        assert_eq!(result.confirmed.total, 0);
        assert_eq!(result.confirmed.tier, Tier::Disaster);
    }

    #[test]
    fn empty_base_pool_with_conditionals() {
        let mut ledger = Ledger::new();
        ledger.propose(2, "Borrowed tools").unwrap();
        let spec = CheckSpec::pool(0).unwrap().with_conditionals(ledger.snapshot());
        let mut source = ScriptedSource::new([5, 6]);
        let result = execute(spec, &mut source).unwrap();

        assert!(result.confirmed.dice.is_empty());
        assert_eq!(result.confirmed.tier, Tier::Disaster);
        let potential = result.potential.unwrap();
        assert_eq!(potential.formula, "2d6");
        assert_eq!(potential.tier, Tier::Success);
    }

    proptest! {
        #[test]
        fn potential_extends_confirmed(
            size in 0u32..6,
            magnitudes in proptest::collection::vec(1u32..4, 1..4),
            faces in proptest::collection::vec(1u32..=6, 20),
        ) {
            let mut ledger = Ledger::new();
            for &m in &magnitudes {
                ledger.propose(m, "bonus").unwrap();
            }
            let spec = CheckSpec::pool(size).unwrap().with_conditionals(ledger.snapshot());
            let mut source = ScriptedSource::new(faces);

            let result = execute(spec, &mut source).unwrap();
            let potential = result.potential.unwrap();
            let k = size as usize;

            prop_assert_eq!(result.confirmed.dice.len(), k);
            prop_assert_eq!(&potential.dice[..k], &result.confirmed.dice[..]);
            prop_assert_eq!(potential.dice.len(), k + magnitudes.iter().sum::<u32>() as usize);
            prop_assert!(potential.total >= result.confirmed.total);
            prop_assert!(source.calls().len() <= 1);
        }
    }
}
