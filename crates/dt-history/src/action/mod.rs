//! Downtime actions and the catalog they are chosen from.
//!
//! An action either requires a check of a fixed [`CheckKind`] or resolves
//! without one. [`preset`] supplies the default catalog.

pub mod preset;

use dt_engine::CheckKind;
use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, HistoryResult};

/// Something a character can do between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowntimeAction {
    /// Display name, unique within a catalog (case-insensitive).
    pub name: String,
    /// Short rules text.
    pub description: String,
    /// The check this action requires, if any.
    pub check: Option<CheckKind>,
}

impl DowntimeAction {
    /// Create an action.
    pub fn new(name: &str, description: &str, check: Option<CheckKind>) -> Self {
        Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            check,
        }
    }
}

/// The set of actions available to the group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionCatalog {
    actions: Vec<DowntimeAction>,
}

impl ActionCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default catalog of common downtime actions.
    pub fn preset() -> Self {
        preset::standard()
    }

    /// Add an action, rejecting blank or duplicate names.
    pub fn add(&mut self, action: DowntimeAction) -> HistoryResult<()> {
        if action.name.trim().is_empty() {
            return Err(HistoryError::BlankName("action"));
        }
        if self.get(&action.name).is_some() {
            return Err(HistoryError::DuplicateAction(action.name));
        }
        self.actions.push(action);
        Ok(())
    }

    /// Look up an action by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&DowntimeAction> {
        let name = name.trim();
        self.actions
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Iterate actions in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &DowntimeAction> {
        self.actions.iter()
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
