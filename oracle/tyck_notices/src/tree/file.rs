use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::LineNotices;
use crate::Notice;

/// Target a line either directly or through a registered name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NameOrLine {
    Name(String),
    Line(u32),
}

impl From<&str> for NameOrLine {
    fn from(name: &str) -> Self {
        NameOrLine::Name(name.to_string())
    }
}

impl From<String> for NameOrLine {
    fn from(name: String) -> Self {
        NameOrLine::Name(name)
    }
}

impl From<u32> for NameOrLine {
    fn from(line_number: u32) -> Self {
        NameOrLine::Line(line_number)
    }
}

impl fmt::Display for NameOrLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameOrLine::Name(name) => f.write_str(name),
            NameOrLine::Line(line_number) => write!(f, "{line_number}"),
        }
    }
}

/// Notices for one file, keyed by line number, plus a table of names
/// aliasing line numbers.
///
/// Names survive independently of whether their line has notices.
#[derive(Clone, Debug, PartialEq)]
pub struct FileNotices {
    location: PathBuf,
    by_line_number: BTreeMap<u32, LineNotices>,
    name_to_line_number: FxHashMap<String, u32>,
}

impl FileNotices {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        FileNotices {
            location: location.into(),
            by_line_number: BTreeMap::new(),
            name_to_line_number: FxHashMap::default(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// True if any line holds at least one notice.
    pub fn has_notices(&self) -> bool {
        self.by_line_number.values().any(LineNotices::has_notices)
    }

    /// All notices in line order.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> + '_ {
        self.by_line_number.values().flat_map(LineNotices::iter)
    }

    pub fn known_line_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_line_number.keys().copied()
    }

    /// Registered names with their line numbers, sorted by name.
    pub fn known_names(&self) -> Vec<(&str, u32)> {
        let mut names: Vec<(&str, u32)> = self
            .name_to_line_number
            .iter()
            .map(|(name, line_number)| (name.as_str(), *line_number))
            .collect();
        names.sort_unstable();
        names
    }

    /// Resolve a target: a line number resolves to itself, a name to its
    /// registered line.
    pub fn get_line_number(&self, name_or_line: &NameOrLine) -> Option<u32> {
        match name_or_line {
            NameOrLine::Line(line_number) => Some(*line_number),
            NameOrLine::Name(name) => self.name_to_line_number.get(name).copied(),
        }
    }

    pub fn notices_at_line(&self, line_number: u32) -> Option<&LineNotices> {
        self.by_line_number.get(&line_number)
    }

    /// Make an empty `LineNotices` for a line of this file without
    /// attaching it.
    pub fn generate_notices_for_line(&self, line_number: u32) -> LineNotices {
        LineNotices::new(self.location.clone(), line_number)
    }

    #[must_use]
    pub fn set_name(&self, name: impl Into<String>, line_number: u32) -> Self {
        let mut next = self.clone();
        next.name_to_line_number.insert(name.into(), line_number);
        next
    }

    /// Replace lines by key. A `None` value removes the line.
    #[must_use]
    pub fn set_lines<I>(&self, lines: I) -> Self
    where
        I: IntoIterator<Item = (u32, Option<LineNotices>)>,
    {
        let mut next = self.clone();
        for (line_number, line_notices) in lines {
            match line_notices {
                Some(line_notices) => {
                    debug_assert_eq!(line_notices.line_number(), line_number);
                    debug_assert_eq!(line_notices.location(), self.location.as_path());
                    next.by_line_number.insert(line_number, line_notices);
                }
                None => {
                    next.by_line_number.remove(&line_number);
                }
            }
        }
        next
    }

    /// Drop every line, and the names too when `clear_names` is set.
    #[must_use]
    pub fn clear(&self, clear_names: bool) -> Self {
        FileNotices {
            location: self.location.clone(),
            by_line_number: BTreeMap::new(),
            name_to_line_number: if clear_names {
                FxHashMap::default()
            } else {
                self.name_to_line_number.clone()
            },
        }
    }
}
