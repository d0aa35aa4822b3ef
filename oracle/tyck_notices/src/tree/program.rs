use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::FileNotices;
use crate::diff::{DiffNotices, Side};
use crate::Notice;

/// Notices for a whole program run, keyed by file location.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgramNotices {
    notices: BTreeMap<PathBuf, FileNotices>,
}

impl ProgramNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_notices(&self) -> bool {
        self.notices.values().any(FileNotices::has_notices)
    }

    /// All notices by location, then line.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> + '_ {
        self.notices.values().flat_map(FileNotices::iter)
    }

    pub fn known_locations(&self) -> impl Iterator<Item = &Path> + '_ {
        self.notices.keys().map(PathBuf::as_path)
    }

    pub fn notices_at_location(&self, location: &Path) -> Option<&FileNotices> {
        self.notices.get(location)
    }

    /// Make an empty `FileNotices` without attaching it.
    pub fn generate_notices_for_location(&self, location: impl Into<PathBuf>) -> FileNotices {
        FileNotices::new(location)
    }

    /// Replace files by key. A `None` value removes the file.
    #[must_use]
    pub fn set_files<I>(&self, files: I) -> Self
    where
        I: IntoIterator<Item = (PathBuf, Option<FileNotices>)>,
    {
        let mut next = self.clone();
        for (location, file_notices) in files {
            match file_notices {
                Some(file_notices) => {
                    debug_assert_eq!(file_notices.location(), location.as_path());
                    next.notices.insert(location, file_notices);
                }
                None => {
                    next.notices.remove(&location);
                }
            }
        }
        next
    }

    /// Diff against `other`, with `self` on the left.
    ///
    /// Files are keyed by their path relative to `root`, or by the full path
    /// when they live outside it. Notices on each side are sorted and their
    /// multiline messages split into one notice per line.
    pub fn diff(&self, root: &Path, other: &ProgramNotices) -> DiffNotices {
        let mut diff = DiffNotices::default();
        for (side, program) in [(Side::Left, self), (Side::Right, other)] {
            for notice in program.iter() {
                let path = relative_display(root, &notice.location);
                diff.push(path, notice.line_number, side, notice.clone());
            }
        }
        diff.finish()
    }
}

fn relative_display(root: &Path, location: &Path) -> String {
    match location.strip_prefix(root) {
        Ok(relative) => relative.display().to_string(),
        Err(_) => location.display().to_string(),
    }
}
