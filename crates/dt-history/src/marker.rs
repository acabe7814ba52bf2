//! Markers: named narrative periods that group downtime entries in time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HistoryError, HistoryResult};

/// Unique identifier for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub Uuid);

impl MarkerId {
    /// Generate a new random marker ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MarkerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A named narrative period, e.g. "Between missions 3 and 4".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Stable identifier.
    pub id: MarkerId,
    /// Display name.
    pub name: String,
    /// When the period began.
    pub started: DateTime<Utc>,
    /// Free-text description.
    pub description: String,
}

/// Markers ordered by start time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkerList {
    markers: Vec<Marker>,
}

impl MarkerList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker, keeping the list ordered by start time.
    ///
    /// Markers with the same start time keep their insertion order.
    pub fn add(
        &mut self,
        name: &str,
        description: &str,
        started: DateTime<Utc>,
    ) -> HistoryResult<MarkerId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HistoryError::BlankName("marker"));
        }
        let marker = Marker {
            id: MarkerId::new(),
            name: name.to_string(),
            started,
            description: description.trim().to_string(),
        };
        let id = marker.id;
        let pos = self.markers.partition_point(|m| m.started <= started);
        self.markers.insert(pos, marker);
        Ok(id)
    }

    /// Look up a marker by ID.
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Find a marker by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&Marker> {
        let name = name.trim();
        self.markers
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// The most recently started marker.
    pub fn current(&self) -> Option<&Marker> {
        self.markers.last()
    }

    /// Remove a marker. Entries that reference it keep the stale ID.
    pub fn remove(&mut self, id: MarkerId) -> Option<Marker> {
        let pos = self.markers.iter().position(|m| m.id == id)?;
        Some(self.markers.remove(pos))
    }

    /// Iterate markers in start-time order.
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// Number of markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether there are no markers.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
