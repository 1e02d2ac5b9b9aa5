//! Line-oriented parsing of control-file text into blocks.

use super::marker_name;
use super::types::{Block, ControlStream};

impl ControlStream {
    /// Parse control-stream text into an ordered block model.
    ///
    /// # Example
    ///
    /// ```
    /// use ctledit::model::ControlStream;
    ///
    /// let stream = ControlStream::parse("$PK\nCL=THETA(1)\n$ERROR\nY=F\n");
    /// assert_eq!(stream.block_count(), 2);
    /// assert_eq!(stream.block_text("$PK").unwrap(), "$PK\nCL=THETA(1)\n");
    /// ```
    pub fn parse(source: &str) -> Self {
        parse(source)
    }
}

/// Parse control-file text into a [`ControlStream`].
///
/// A line whose whitespace-trimmed form starts with `$` opens a new block,
/// named by the line's first whitespace-delimited token. The marker line and
/// every following line up to the next marker belong to the block verbatim,
/// terminators included. Lines before the first marker have no block to
/// attach to and are dropped.
///
/// Parsing never fails: text without a single marker line yields an empty
/// stream.
pub fn parse(source: &str) -> ControlStream {
    let mut stream = ControlStream::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in source.split_inclusive('\n') {
        if let Some(name) = marker_name(line) {
            if let Some((open_name, lines)) = current.take() {
                stream.add_block(open_name, Block::from_lines(lines));
            }
            current = Some((name.to_string(), vec![line.to_string()]));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line.to_string());
        }
    }
    if let Some((open_name, lines)) = current {
        stream.add_block(open_name, Block::from_lines(lines));
    }

    stream
}
