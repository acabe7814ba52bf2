//! The downtime tracker.
//!
//! `Downtime` owns a settings store and the three pieces of state kept in it
//! (action catalog, markers, history). Performing an action validates the
//! request, executes the check if the action has one, and appends the result
//! to the character's history. Nothing is recorded unless every step
//! succeeds, including the write to the store.

use chrono::{DateTime, Utc};
use dt_engine::{CheckSpec, DrawSource, execute};
use tracing::{info, warn};

use crate::action::{ActionCatalog, DowntimeAction};
use crate::error::{HistoryError, HistoryResult};
use crate::history::{History, HistoryEntry};
use crate::marker::{MarkerId, MarkerList};
use crate::store::{SettingsStore, load, save};

const ACTIONS_KEY: &str = "actions";
const MARKERS_KEY: &str = "markers";
const HISTORY_KEY: &str = "history";

/// A request to perform one downtime action.
#[derive(Debug, Clone, Default)]
pub struct PerformRequest {
    /// The character taking the action.
    pub character: String,
    /// The action name, matched case-insensitively against the catalog.
    pub action: String,
    /// The check to roll, required iff the action has one.
    pub spec: Option<CheckSpec>,
    /// Free-text notes stored with the entry.
    pub notes: String,
    /// Marker to file the entry under. Defaults to the current marker.
    pub marker: Option<MarkerId>,
}

impl PerformRequest {
    /// A request with no check, notes, or explicit marker.
    pub fn new(character: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            action: action.into(),
            ..Self::default()
        }
    }

    /// Attach the check to roll.
    pub fn with_check(mut self, spec: CheckSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Attach notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// File the entry under a specific marker.
    pub fn in_marker(mut self, marker: MarkerId) -> Self {
        self.marker = Some(marker);
        self
    }
}

/// Downtime state for a group, persisted in a settings store.
pub struct Downtime<S: SettingsStore> {
    store: S,
    catalog: ActionCatalog,
    markers: MarkerList,
    history: History,
}

impl<S: SettingsStore> Downtime<S> {
    /// Load tracker state from a store.
    ///
    /// A store without an action catalog starts from [`ActionCatalog::preset`].
    pub fn open(store: S) -> HistoryResult<Self> {
        let catalog = load(&store, ACTIONS_KEY)?.unwrap_or_else(ActionCatalog::preset);
        let markers = load(&store, MARKERS_KEY)?.unwrap_or_default();
        let history = load(&store, HISTORY_KEY)?.unwrap_or_default();
        Ok(Self {
            store,
            catalog,
            markers,
            history,
        })
    }

    /// Get the action catalog.
    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    /// Get the markers.
    pub fn markers(&self) -> &MarkerList {
        &self.markers
    }

    /// Get the history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Perform a downtime action and record its outcome.
    pub fn perform<R: DrawSource + ?Sized>(
        &mut self,
        request: PerformRequest,
        source: &mut R,
    ) -> HistoryResult<HistoryEntry> {
        let character = request.character.trim();
        if character.is_empty() {
            return Err(HistoryError::BlankName("character"));
        }
        let action = self
            .catalog
            .get(&request.action)
            .ok_or_else(|| HistoryError::UnknownAction(request.action.clone()))?;
        let marker = match request.marker {
            Some(id) if self.markers.get(id).is_none() => {
                return Err(HistoryError::UnknownMarker(id));
            }
            Some(id) => Some(id),
            None => self.markers.current().map(|m| m.id),
        };

        let spec = match (action.check, request.spec) {
            (Some(expected), Some(spec)) if spec.kind == expected => Some(spec),
            (Some(expected), Some(spec)) => {
                return Err(HistoryError::CheckKindMismatch {
                    action: action.name.clone(),
                    expected,
                    got: spec.kind,
                });
            }
            (Some(kind), None) => {
                return Err(HistoryError::MissingCheck {
                    action: action.name.clone(),
                    kind,
                });
            }
            (None, Some(_)) => return Err(HistoryError::UnexpectedCheck(action.name.clone())),
            (None, None) => None,
        };

        let check = spec
            .map(|spec| execute(spec, source))
            .transpose()
            .inspect_err(|e| warn!(character, action = %action.name, error = %e, "check failed"))?;

        let entry = HistoryEntry::new(character, &action.name, &request.notes, marker, check);
        let mut next = self.history.clone();
        next.record(entry.clone());
        save(&mut self.store, HISTORY_KEY, &next)?;
        self.history = next;

        info!(
            character = %entry.character,
            action = %entry.action,
            outcome = entry.outcome_label(),
            "recorded downtime action"
        );
        Ok(entry)
    }

    /// Start a new marker now.
    pub fn add_marker(&mut self, name: &str, description: &str) -> HistoryResult<MarkerId> {
        self.add_marker_at(name, description, Utc::now())
    }

    /// Add a marker with an explicit start time.
    pub fn add_marker_at(
        &mut self,
        name: &str,
        description: &str,
        started: DateTime<Utc>,
    ) -> HistoryResult<MarkerId> {
        let mut next = self.markers.clone();
        let id = next.add(name, description, started)?;
        save(&mut self.store, MARKERS_KEY, &next)?;
        self.markers = next;
        info!(marker = %id, name, "added marker");
        Ok(id)
    }

    /// Add a custom action to the catalog.
    pub fn add_action(&mut self, action: DowntimeAction) -> HistoryResult<()> {
        let mut next = self.catalog.clone();
        next.add(action)?;
        save(&mut self.store, ACTIONS_KEY, &next)?;
        self.catalog = next;
        Ok(())
    }
}
