//! The notice tree: program → file → line → notices.
//!
//! Every level is a persistent value. Read accessors never mutate, and every
//! `set_*` method returns a sibling value, leaving `self` valid.

mod file;
mod line;
mod program;

pub use file::{FileNotices, NameOrLine};
pub use line::LineNotices;
pub use program::ProgramNotices;
