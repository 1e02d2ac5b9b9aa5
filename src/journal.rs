//! Append-only change history and its JSON persistence.
//!
//! Every accepted edit is recorded as a [`ChangeLogEntry`] holding the block
//! name, a timestamp, and the block's content before and after the edit. The
//! ordered list persists as a JSON array so an edit session can be replayed
//! later against a fresh copy of the original control stream.

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::model::Block;

/// One recorded block replacement.
///
/// Entries are immutable once appended. The timestamp is kept as an ISO 8601
/// sortable string rather than a parsed time so that logs written by older
/// tooling load unchanged, whatever their exact flavor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    /// When the edit was accepted. New entries use RFC 3339 with microsecond
    /// precision, which sorts lexicographically in log order.
    pub timestamp: String,
    /// Name of the replaced block, marker included.
    pub block_name: String,
    /// Flattened content the stream held for the block just before the edit.
    ///
    /// Serialized as `orginal_content`, the field name every existing log on
    /// disk carries. Both spellings are accepted on load.
    #[serde(rename = "orginal_content", alias = "original_content")]
    pub original_content: Block,
    /// Content the edit put in place.
    pub updated_content: Block,
}

/// Ordered, append-only history of accepted edits.
///
/// On the wire this is a bare JSON array of entries, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLog {
    entries: Vec<ChangeLogEntry>,
}

impl ChangeLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry for a replacement that has already been applied.
    ///
    /// Only the update path records entries; replay and structural edits
    /// never do.
    pub(crate) fn record(
        &mut self,
        at: DateTime<Utc>,
        block_name: &str,
        original_content: Block,
        updated_content: Block,
    ) {
        self.entries.push(ChangeLogEntry {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, true),
            block_name: block_name.to_string(),
            original_content,
            updated_content,
        });
    }

    /// Recorded entries, oldest first.
    pub fn entries(&self) -> &[ChangeLogEntry] {
        &self.entries
    }

    /// Iterate over entries, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, ChangeLogEntry> {
        self.entries.iter()
    }

    /// Number of recorded edits.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no edit has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&ChangeLogEntry> {
        self.entries.last()
    }

    /// Load a change log from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::error::Error::Io) if the file cannot be
    /// read, or [`Error::MalformedLog`](crate::error::Error::MalformedLog) if
    /// any record is missing a field or the document has the wrong shape. A
    /// malformed record fails the whole load; no prefix of the log is
    /// returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let log: Self = serde_json::from_str(&text)?;
        Ok(log)
    }

    /// Write the log as a pretty-printed JSON array, creating missing parent
    /// directories first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::error::Error::Io) if a directory or the
    /// file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json)?;
        info!(path = %path.display(), entries = self.entries.len(), "change log saved");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a ChangeLogEntry;
    type IntoIter = std::slice::Iter<'a, ChangeLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
