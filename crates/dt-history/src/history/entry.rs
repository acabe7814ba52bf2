//! History entry types.

use std::fmt;

use chrono::{DateTime, Utc};
use dt_engine::{CheckResult, Tier};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::marker::MarkerId;

/// Unique identifier for a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate a new random entry ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// One downtime action taken by one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Stable identifier.
    pub id: EntryId,
    /// The character who took the action, as entered.
    pub character: String,
    /// The action name.
    pub action: String,
    /// When the action was recorded.
    pub timestamp: DateTime<Utc>,
    /// The narrative period the action belongs to.
    pub marker: Option<MarkerId>,
    /// Whether the action succeeded. Always true for actions without a check.
    pub success: bool,
    /// The confirmed tier, when the action required a check.
    pub tier: Option<Tier>,
    /// Free-text notes from the player or referee.
    pub notes: String,
    /// The full check result, kept for roll-detail display.
    pub check: Option<CheckResult>,
}

impl HistoryEntry {
    /// Build an entry stamped with the current time.
    pub fn new(
        character: &str,
        action: &str,
        notes: &str,
        marker: Option<MarkerId>,
        check: Option<CheckResult>,
    ) -> Self {
        let tier = check.as_ref().map(CheckResult::tier);
        Self {
            id: EntryId::new(),
            character: character.trim().to_string(),
            action: action.to_string(),
            timestamp: Utc::now(),
            marker,
            success: tier.is_none_or(Tier::is_success),
            tier,
            notes: notes.trim().to_string(),
            check,
        }
    }

    /// Override the timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The outcome label: the tier, or "Done" for actions without a check.
    pub fn outcome_label(&self) -> &'static str {
        self.tier.map_or("Done", Tier::label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dt_engine::{CheckSpec, ScriptedSource, execute};

    #[test]
    fn success_follows_confirmed_tier() {
        let mut source = ScriptedSource::new([5, 1]);
        let check = execute(CheckSpec::pool(2).unwrap(), &mut source).unwrap();
        let entry = HistoryEntry::new("Ash", "Work on a Project", "", None, Some(check));
        assert_eq!(entry.tier, Some(Tier::Conflict));
        assert!(!entry.success);
        assert_eq!(entry.outcome_label(), "Conflict");
    }

    #[test]
    fn checkless_action_succeeds() {
        let entry = HistoryEntry::new(" Vel ", "Get Focused", " Learned a talent ", None, None);
        assert!(entry.success);
        assert_eq!(entry.tier, None);
        assert_eq!(entry.character, "Vel");
        assert_eq!(entry.notes, "Learned a talent");
        assert_eq!(entry.outcome_label(), "Done");
    }
}
