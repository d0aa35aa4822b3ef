//! Notice model for checking a type checker's diagnostics against
//! expectations.
//!
//! A [`ProgramNotices`] holds [`FileNotices`] per location, which hold
//! [`LineNotices`] per line, which hold [`Notice`]s. All of them are
//! persistent values: changing one returns a new value and leaves the old
//! one intact.
//!
//! Targeted edits go through [`changers`], the one mutation primitive;
//! the [`expectations`] module builds the usual "add X to this line"
//! operations on top of it. Two `ProgramNotices` are compared with
//! [`ProgramNotices::diff`].

pub mod changers;
mod diff;
mod errors;
pub mod expectations;
mod notice;
mod severity;
mod tree;

pub use changers::{
    AppendToLine, ChangeOnMatch, Changed, FirstMatchOnly, ModifyFile, ModifyLatestMatch,
    ModifyLine, NoticeChanger,
};
pub use diff::{pair_up, split_lines, DiffFileNotices, DiffNotices, Pair};
pub use errors::MissingNotices;
pub use expectations::{AddErrors, AddNotes, AddRevealedTypes, RemoveFromRevealedType};
pub use notice::{sort_notices, Notice, REVEAL_PREFIX};
pub use severity::Severity;
pub use tree::{FileNotices, LineNotices, NameOrLine, ProgramNotices};
