//! Core types for the block model of a control stream.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::journal::ChangeLog;

/// One block of a control stream: an ordered sequence of text lines.
///
/// Every line keeps its own terminator, so concatenating the lines
/// reproduces the block's text byte for byte. The marker line itself is the
/// first line of the block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block {
    lines: Vec<String>,
}

impl Block {
    /// Create a block from lines that already carry their terminators.
    pub const fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Create a block by splitting `text` into lines, keeping terminators.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(ToOwned::to_owned).collect(),
        }
    }

    /// The block's lines, terminators included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The block's full text: all lines concatenated.
    pub fn text(&self) -> String {
        self.lines.concat()
    }

    /// Number of lines in the block.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the block holds no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<String>> for Block {
    fn from(lines: Vec<String>) -> Self {
        Self::from_lines(lines)
    }
}

/// An in-memory, editable control stream.
///
/// Blocks are stored per name in first-seen order, and every name maps to a
/// list of instances so repeated blocks (`$TABLE`, `$ESTIMATION`, ...)
/// survive a parse. Block bodies are opaque text; nothing here interprets
/// NM-TRAN syntax. The stream also owns the [`ChangeLog`] recording every
/// accepted edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlStream {
    blocks: IndexMap<String, Vec<Block>>,
    change_log: ChangeLog,
}

impl ControlStream {
    /// Create an empty stream with no blocks and an empty change log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a control stream from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read. Parsing itself
    /// never fails; text with no marker lines yields an empty stream.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Ok(Self::parse(&source))
    }

    /// Append `content` as a new instance of `name`, creating the name on
    /// first use. Insertion order of names is preserved forever after.
    pub fn add_block(&mut self, name: impl Into<String>, content: Block) {
        self.blocks.entry(name.into()).or_default().push(content);
    }

    /// Replace every instance of `name` with the single instance `content`.
    ///
    /// A name with several instances collapses to one; that is the only
    /// replacement policy the crate offers. Update never creates a block:
    /// a name the stream has never seen is an error. The replacement itself
    /// is not journaled; [`Self::update`] is the entry point that records
    /// history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BlockNotFound`] if `name` has no instances.
    pub fn update_block(&mut self, name: &str, content: Block) -> Result<()> {
        match self.blocks.get_mut(name) {
            Some(instances) => {
                *instances = vec![content];
                Ok(())
            }
            None => Err(Error::BlockNotFound(name.to_string())),
        }
    }

    /// Replace a block and record the change, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BlockNotFound`] if `name` has no instances; nothing
    /// is recorded in that case.
    pub fn update(&mut self, name: &str, content: Block) -> Result<()> {
        self.update_at(name, content, Utc::now())
    }

    /// Replace a block and record the change with a caller-supplied time.
    ///
    /// The log entry captures the full flattened content the stream held
    /// for `name` immediately before the replacement, so an entry is enough
    /// to see what an edit did. The entry is appended only after the
    /// replacement succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BlockNotFound`] if `name` has no instances; the log
    /// is left untouched.
    pub fn update_at(&mut self, name: &str, content: Block, at: DateTime<Utc>) -> Result<()> {
        let original = self
            .flattened(name)
            .ok_or_else(|| Error::BlockNotFound(name.to_string()))?;
        let updated = content.clone();
        self.update_block(name, content)?;
        self.change_log.record(at, name, original, updated);
        Ok(())
    }

    /// Serialize the stream back to control-file text.
    ///
    /// Names render in first-seen order with every instance's lines intact
    /// and one separator line after each name. Trailing whitespace is
    /// trimmed from the very end of the output only; leading content and
    /// interior blank lines are preserved.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for instances in self.blocks.values() {
            for block in instances {
                for line in block.lines() {
                    out.push_str(line);
                }
            }
            out.push('\n');
        }
        out.trim_end().to_string()
    }

    /// Block names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    /// All instances recorded under `name`, in document order.
    pub fn get(&self, name: &str) -> Option<&[Block]> {
        self.blocks.get(name).map(Vec::as_slice)
    }

    /// Whether the stream contains at least one instance of `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// The flattened text of every instance of `name`, or `None` when the
    /// stream has no such block. This is the form handed to an edit source.
    pub fn block_text(&self, name: &str) -> Option<String> {
        self.blocks
            .get(name)
            .map(|instances| instances.iter().map(Block::text).collect())
    }

    /// Number of distinct block names.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the stream holds no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The log of every accepted edit, oldest first.
    pub const fn change_log(&self) -> &ChangeLog {
        &self.change_log
    }

    /// Write the rendered stream to `<dir>/<name>.ctl`, creating missing
    /// directories first. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory or file cannot be written.
    pub fn save_model(&self, name: &str, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{name}.ctl"));
        fs::write(&path, self.render())?;
        info!(path = %path.display(), blocks = self.block_count(), "control stream saved");
        Ok(path)
    }

    /// Write the change log to `<dir>/<name>_log.json`, creating missing
    /// directories first. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory or file cannot be written.
    pub fn save_change_log(&self, name: &str, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(format!("{name}_log.json"));
        self.change_log.save_to(&path)?;
        Ok(path)
    }

    /// Persist both the rendered stream and its change log under `dir`, as
    /// `<name>.ctl` and `<name>_log.json`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if either write fails.
    pub fn save(&self, name: &str, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        self.save_model(name, dir)?;
        self.save_change_log(name, dir)?;
        Ok(())
    }

    /// Every line of every instance of `name`, flattened into one block.
    fn flattened(&self, name: &str) -> Option<Block> {
        self.blocks.get(name).map(|instances| {
            Block::from_lines(
                instances
                    .iter()
                    .flat_map(|block| block.lines().iter().cloned())
                    .collect(),
            )
        })
    }
}
