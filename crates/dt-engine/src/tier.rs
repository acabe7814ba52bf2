//! Outcome tiers and the classifier that maps a check total onto them.
//!
//! Both check kinds share the same four tiers, ordered
//! `Triumph > Success > Conflict > Disaster`:
//! - **Threshold roll**: 20+ triumph, 10+ success, 0+ conflict, negative disaster
//! - **Success pool**: 3+ successes triumph, 2 success, 1 conflict, 0 disaster

use serde::{Deserialize, Serialize};

use crate::check::CheckKind;

/// A d6 showing this face or higher counts as one success in a success pool.
pub const SUCCESS_FACE: u32 = 5;

/// The ordered outcome categories of a check.
///
/// Variants are declared from worst to best so the derived ordering matches
/// the narrative ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// The action fails with consequences.
    Disaster,
    /// The action succeeds at a cost, or fails without catastrophe.
    Conflict,
    /// The action succeeds.
    Success,
    /// The action succeeds beyond expectation.
    Triumph,
}

impl Tier {
    /// Returns true for tiers that count as a successful action.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Triumph | Self::Success)
    }

    /// The display label for this tier.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disaster => "Disaster",
            Self::Conflict => "Conflict",
            Self::Success => "Success",
            Self::Triumph => "Triumph",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a numeric outcome for the given check kind.
///
/// For a threshold roll `outcome` is the total (which may be negative or
/// exceed 20); for a success pool it is the number of successes.
pub fn classify(kind: CheckKind, outcome: i32) -> Tier {
    let (triumph, success, conflict) = match kind {
        CheckKind::ThresholdRoll => (20, 10, 0),
        CheckKind::SuccessPool => (3, 2, 1),
    };

    if outcome >= triumph {
        Tier::Triumph
    } else if outcome >= success {
        Tier::Success
    } else if outcome >= conflict {
        Tier::Conflict
    } else {
        Tier::Disaster
    }
}

/// Count the faces in `dice` that score a success.
pub fn count_successes(dice: &[u32]) -> u32 {
    dice.iter().filter(|&&v| v >= SUCCESS_FACE).count() as u32
}
