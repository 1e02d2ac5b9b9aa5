//! Control-stream model: parsing, ordered block storage, and rendering.
//!
//! This module handles:
//! - Splitting control-file text into `$`-named blocks ([`parse`])
//! - The ordered, editable block model ([`ControlStream`])
//! - Rendering back to text and saving alongside the change log

mod parser;
mod types;

pub use parser::parse;
pub use types::{Block, ControlStream};

/// Marker character that opens a block. A line whose whitespace-trimmed form
/// starts with this character begins a new block.
pub const BLOCK_MARKER: char = '$';

/// The block name declared on `line`, if the line opens a block.
///
/// The name is the first whitespace-delimited token of the trimmed line,
/// marker included, so `"  $PK ADVAN2"` names the block `$PK`. Returns
/// `None` for body lines.
pub fn marker_name(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    trimmed
        .starts_with(BLOCK_MARKER)
        .then(|| trimmed.split_whitespace().next().unwrap_or(trimmed))
}
