// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. model::ControlStream)
    clippy::module_name_repetitions
)]

//! # ctledit
//!
//! A block-level editor for NONMEM control streams.
//!
//! ctledit parses a `$`-sectioned control file into an ordered block model
//! and supports:
//! - Whole-block replacement through an opaque edit source
//! - An append-only change log of every accepted edit
//! - Deterministic replay of a saved log onto a fresh copy of the original
//! - Rendering back to control-file text
//!
//! Block bodies are opaque text: nothing here interprets NM-TRAN syntax, so
//! any `$`-sectioned file round-trips.
//!
//! ## Modules
//!
//! - [`model`]: Parsing, the ordered block model, and rendering
//! - [`journal`]: The change log and its JSON persistence
//! - [`edit`]: The edit-source seam for scripted or interactive edits
//! - [`replay`]: Rebuilding an edited stream from an original and a log
//! - [`error`]: Crate-wide error and result types

pub mod edit;
pub mod error;
pub mod journal;
pub mod model;
pub mod replay;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::edit::{EditSource, edit_block};
    pub use crate::error::{Error, Result};
    pub use crate::journal::{ChangeLog, ChangeLogEntry};
    pub use crate::model::{Block, ControlStream};
    pub use crate::replay::{replay, replay_file};
}
