//! Errors and the trait a host implements to feed the card.

use std::io::Error as IoError;

use serde_json::Error as JsonError;

use crate::model::StateSnapshot;

#[derive(thiserror::Error, Debug)]
/// Errors raised by the card itself.
pub enum CardError {
    /// Configuration was absent or falsy.
    #[error("Invalid configuration")]
    InvalidConfiguration,
    /// No card with this type name has been registered.
    #[error("Unknown card type: {0}")]
    UnknownCard(String),
}

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while a host loads a state snapshot.
pub enum SourceError {
    /// Reading the snapshot failed.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
    /// Snapshot payload was not valid JSON of the expected shape.
    #[error("Malformed snapshot: {0}")]
    Json(#[from] JsonError),
}

/// Supplies the state snapshot and language on each render request.
pub trait SnapshotSource {
    /// Current snapshot of entity states.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the snapshot cannot be obtained or decoded.
    fn snapshot(&self) -> Result<StateSnapshot, SourceError>;

    /// Language configured on the host, if any.
    fn language(&self) -> Option<&str>;
}
