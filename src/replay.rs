//! Deterministic reconstruction of an edited stream from a change log.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::journal::ChangeLog;
use crate::model::ControlStream;

/// Reapply every entry of `log`, in order, to a copy of `original`.
///
/// Each step replaces the named block with the entry's updated content, so
/// the same log against the same original always rebuilds the same stream,
/// and the latest of several entries for one block wins. Replay records
/// nothing: the returned stream's change log is the clone of the
/// original's, byte for byte.
///
/// # Errors
///
/// Returns [`Error::BlockNotFound`](crate::error::Error::BlockNotFound) as
/// soon as an entry names a block the working copy does not hold, as a log
/// produced against a different original can. The partially rebuilt copy is
/// discarded; callers never observe it.
pub fn replay(original: &ControlStream, log: &ChangeLog) -> Result<ControlStream> {
    let mut rebuilt = original.clone();
    for entry in log {
        rebuilt.update_block(&entry.block_name, entry.updated_content.clone())?;
        debug!(block = %entry.block_name, at = %entry.timestamp, "change replayed");
    }
    Ok(rebuilt)
}

/// Load a change log from `path` and replay it onto a copy of `original`.
///
/// # Errors
///
/// Returns [`Error::MalformedLog`](crate::error::Error::MalformedLog) or
/// [`Error::Io`](crate::error::Error::Io) if the log cannot be loaded; a
/// malformed log fails here before a single entry is applied. Replay errors
/// are those of [`replay`].
pub fn replay_file(original: &ControlStream, path: impl AsRef<Path>) -> Result<ControlStream> {
    let log = ChangeLog::load(path)?;
    replay(original, &log)
}
