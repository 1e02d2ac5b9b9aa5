//! Error types for control-stream editing.

use thiserror::Error;

/// Result type for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by parsing, editing, persistence, and replay.
#[derive(Debug, Error)]
pub enum Error {
    /// An update or replay named a block the stream does not contain.
    ///
    /// Updates never create blocks implicitly, so a missing name is always
    /// reported rather than papered over.
    #[error("block '{0}' not found in control stream")]
    BlockNotFound(String),

    /// A persisted change log could not be decoded: a record is missing a
    /// field, a field has the wrong type, or the document is not a JSON
    /// array. Surfaced when the log is loaded, before any replay step runs.
    #[error("malformed change log: {0}")]
    MalformedLog(#[from] serde_json::Error),

    /// An underlying file operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
