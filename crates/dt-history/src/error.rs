//! Error types for history tracking.

use dt_engine::{CheckKind, RollError};

use crate::marker::MarkerId;

/// Result type for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors that can occur while recording or persisting downtime history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// A name (character, action, or marker) was blank.
    #[error("{0} name must not be blank")]
    BlankName(&'static str),

    /// The requested action is not in the catalog.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// An action with the same name already exists.
    #[error("action already exists: \"{0}\"")]
    DuplicateAction(String),

    /// The requested marker does not exist.
    #[error("marker not found: {0}")]
    UnknownMarker(MarkerId),

    /// The action requires a check but none was supplied.
    #[error("action '{action}' requires a {kind} check")]
    MissingCheck {
        /// The action name.
        action: String,
        /// The kind of check the action expects.
        kind: CheckKind,
    },

    /// The supplied check is of the wrong kind for the action.
    #[error("action '{action}' expects a {expected} check, got {got}")]
    CheckKindMismatch {
        /// The action name.
        action: String,
        /// The kind of check the action expects.
        expected: CheckKind,
        /// The kind of check that was supplied.
        got: CheckKind,
    },

    /// A check was supplied for an action that takes none.
    #[error("action '{0}' does not take a check")]
    UnexpectedCheck(String),

    /// The roll engine rejected the check.
    #[error(transparent)]
    Roll(#[from] RollError),

    /// The settings store could not be read or written.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be (de)serialized.
    #[error("store format error: {0}")]
    Format(#[from] serde_json::Error),
}
