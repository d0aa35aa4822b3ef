use std::path::{Path, PathBuf};

use crate::{Notice, Severity};

/// The notices reported for one line of one file, in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct LineNotices {
    location: PathBuf,
    line_number: u32,
    notices: Vec<Notice>,
}

impl LineNotices {
    /// An empty set of notices for a line.
    pub fn new(location: impl Into<PathBuf>, line_number: u32) -> Self {
        LineNotices {
            location: location.into(),
            line_number,
            notices: Vec::new(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notice> {
        self.notices.iter()
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }

    /// Replace every notice on this line.
    ///
    /// `None` entries are dropped. Returns `None` when nothing is left,
    /// unless `allow_empty` is set.
    #[must_use]
    pub fn set_notices<I, N>(&self, notices: I, allow_empty: bool) -> Option<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<Option<Notice>>,
    {
        let notices: Vec<Notice> = notices
            .into_iter()
            .filter_map(Into::<Option<Notice>>::into)
            .collect();
        if notices.is_empty() && !allow_empty {
            return None;
        }
        Some(LineNotices {
            location: self.location.clone(),
            line_number: self.line_number,
            notices,
        })
    }

    /// Keep only the notices `keep` accepts. The result may be empty.
    #[must_use]
    pub fn retained(&self, keep: impl Fn(&Notice) -> bool) -> Self {
        LineNotices {
            location: self.location.clone(),
            line_number: self.line_number,
            notices: self.notices.iter().filter(|notice| keep(notice)).cloned().collect(),
        }
    }

    /// Make a notice for this line without attaching it.
    pub fn generate_notice(&self, severity: Severity, message: impl Into<String>) -> Notice {
        Notice::new(self.location.clone(), self.line_number, severity, message)
    }
}

impl<'a> IntoIterator for &'a LineNotices {
    type Item = &'a Notice;
    type IntoIter = std::slice::Iter<'a, Notice>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
