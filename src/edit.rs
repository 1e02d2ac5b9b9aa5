//! The seam between the block model and whatever solicits replacement text.
//!
//! The crate never talks to a terminal or UI itself. Anything that can take
//! a block's current text and produce replacement text implements
//! [`EditSource`]: an `$EDITOR` round trip, a scripted rewrite, a test
//! closure. [`edit_block`] drives one edit end to end against a private copy
//! of the stream, so a caller keeps the pristine original for later replay.

use crate::error::{Error, Result};
use crate::model::{Block, ControlStream};

/// Supplies replacement text for a named block.
pub trait EditSource {
    /// Offer `current`, the block's flattened text, for editing.
    ///
    /// Return the replacement text to apply, or `None` to leave the block
    /// untouched.
    fn edit(&mut self, block_name: &str, current: &str) -> Option<String>;
}

/// Any `FnMut(&str, &str) -> Option<String>` is an edit source, which keeps
/// scripted edits and tests to one closure.
impl<F> EditSource for F
where
    F: FnMut(&str, &str) -> Option<String>,
{
    fn edit(&mut self, block_name: &str, current: &str) -> Option<String> {
        self(block_name, current)
    }
}

/// Run one edit of `name` against a copy of `stream`.
///
/// The caller's stream is never modified. When the source returns
/// replacement text, the copy is updated exactly once and the change lands
/// in the copy's log; when the source declines, the copy comes back
/// unchanged, with nothing recorded.
///
/// # Errors
///
/// Returns [`Error::BlockNotFound`] if the stream has no block `name`. The
/// check happens before the source is consulted, so a source is never asked
/// about a block that cannot be updated.
pub fn edit_block<S: EditSource>(
    stream: &ControlStream,
    name: &str,
    source: &mut S,
) -> Result<ControlStream> {
    let current = stream
        .block_text(name)
        .ok_or_else(|| Error::BlockNotFound(name.to_string()))?;

    let mut updated = stream.clone();
    if let Some(replacement) = source.edit(name, &current) {
        updated.update(name, Block::from_text(&replacement))?;
    }
    Ok(updated)
}
