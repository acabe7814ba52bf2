//! Downtime history tracking.
//!
//! Records the outcome of each downtime action against the character who took
//! it, groups entries into time-ordered markers, and persists everything in a
//! simple key-value settings store. The [`Downtime`] tracker ties an action
//! from the [`ActionCatalog`] to a check from `dt-engine` and appends the
//! result to the character's history.

pub mod action;
pub mod config;
pub mod error;
pub mod history;
pub mod marker;
pub mod store;
pub mod tracker;

pub use action::{ActionCatalog, DowntimeAction};
pub use config::TrackerConfig;
pub use error::{HistoryError, HistoryResult};
pub use history::{EntryId, History, HistoryEntry};
pub use marker::{Marker, MarkerId, MarkerList};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use tracker::{Downtime, PerformRequest};
