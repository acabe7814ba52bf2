//! Per-character downtime history.

pub mod entry;
pub mod log;

pub use entry::{EntryId, HistoryEntry};
pub use log::History;
