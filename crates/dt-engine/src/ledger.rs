//! Conditional modifiers proposed for a check and awaiting a referee's call.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RollError, RollResult};

/// Unique identifier for a conditional modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierId(pub Uuid);

impl ModifierId {
    /// Generate a new random modifier ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ModifierId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The referee's decision on a conditional modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Approval {
    /// Not yet reviewed.
    #[default]
    Pending,
    /// The referee accepted the bonus.
    Approved,
    /// The referee refused the bonus.
    Rejected,
}

impl fmt::Display for Approval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// A speculative bonus a player proposes for a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalModifier {
    /// Stable identifier.
    pub id: ModifierId,
    /// Extra pool dice (success pool) or extra accuracy steps (threshold roll).
    pub magnitude: u32,
    /// Why the player believes the bonus applies.
    pub justification: String,
    /// Current referee decision.
    pub approval: Approval,
}

impl ConditionalModifier {
    /// Build a pending modifier, rejecting a zero magnitude or a blank reason.
    pub fn new(magnitude: u32, justification: &str) -> RollResult<Self> {
        let justification = justification.trim();
        if magnitude == 0 {
            return Err(RollError::InvalidMagnitude);
        }
        if justification.is_empty() {
            return Err(RollError::BlankJustification);
        }
        Ok(Self {
            id: ModifierId::new(),
            magnitude,
            justification: justification.to_string(),
            approval: Approval::Pending,
        })
    }

    /// Check that this modifier could have been produced by [`Self::new`].
    pub fn validate(&self) -> RollResult<()> {
        if self.magnitude == 0 {
            return Err(RollError::InvalidMagnitude);
        }
        if self.justification.trim().is_empty() {
            return Err(RollError::BlankJustification);
        }
        Ok(())
    }
}

impl fmt::Display for ConditionalModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+{} ({}) [{}]",
            self.magnitude, self.justification, self.approval
        )
    }
}

/// An in-memory, ordered list of proposed conditional modifiers.
///
/// Insertion order is proposal order. The ledger is not persisted: take a
/// [`Ledger::snapshot`] into the check before discarding it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<ConditionalModifier>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Propose a new conditional modifier.
    ///
    /// On validation failure the ledger is left unchanged.
    pub fn propose(
        &mut self,
        magnitude: u32,
        justification: &str,
    ) -> RollResult<ConditionalModifier> {
        let modifier = ConditionalModifier::new(magnitude, justification)?;
        self.entries.push(modifier.clone());
        Ok(modifier)
    }

    /// Remove a modifier regardless of its approval state.
    pub fn withdraw(&mut self, id: ModifierId) -> Option<ConditionalModifier> {
        let pos = self.entries.iter().position(|m| m.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Sum of all magnitudes, whatever their approval state.
    pub fn total_magnitude(&self) -> u64 {
        self.entries.iter().map(|m| u64::from(m.magnitude)).sum()
    }

    /// Record a referee decision.
    pub fn set_approval(&mut self, id: ModifierId, approval: Approval) -> RollResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(RollError::UnknownModifier(id))?;
        entry.approval = approval;
        Ok(())
    }

    /// Mark a modifier as approved.
    pub fn approve(&mut self, id: ModifierId) -> RollResult<()> {
        self.set_approval(id, Approval::Approved)
    }

    /// Mark a modifier as rejected.
    pub fn reject(&mut self, id: ModifierId) -> RollResult<()> {
        self.set_approval(id, Approval::Rejected)
    }

    /// All entries in proposal order.
    pub fn entries(&self) -> &[ConditionalModifier] {
        &self.entries
    }

    /// Copy of the entries for embedding in a check.
    pub fn snapshot(&self) -> Vec<ConditionalModifier> {
        self.entries.clone()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
