//! Composable notice mutators.
//!
//! Every targeted edit of the notice tree goes through a [`NoticeChanger`]:
//! a pure function from a value to an optional replacement value. `None`
//! removes the target from its parent. Changers nest: a [`ModifyFile`]
//! holds a [`ModifyLine`] which holds an [`AppendToLine`] and so on.
//! Plain closures of the right shape are changers too.

use std::cell::Cell;
use std::path::PathBuf;

use crate::{
    FileNotices, LineNotices, MissingNotices, NameOrLine, Notice, ProgramNotices, Severity,
};

/// Result of a changer: a replacement value, or `None` to remove the target.
pub type Changed<T> = Result<Option<T>, MissingNotices>;

/// A pure change applied to one level of the notice tree.
pub trait NoticeChanger<T> {
    fn change(&self, target: T) -> Changed<T>;
}

impl<T, F> NoticeChanger<T> for F
where
    F: Fn(T) -> Changed<T>,
{
    fn change(&self, target: T) -> Changed<T> {
        self(target)
    }
}

/// Change the notices of one line, found by number or by name.
///
/// By default both the name and the line must already exist.
pub struct ModifyLine<C> {
    name_or_line: NameOrLine,
    name_must_exist: bool,
    line_must_exist: bool,
    change: C,
}

impl<C> ModifyLine<C> {
    pub fn new(name_or_line: impl Into<NameOrLine>, change: C) -> Self {
        ModifyLine {
            name_or_line: name_or_line.into(),
            name_must_exist: true,
            line_must_exist: true,
            change,
        }
    }

    #[must_use]
    pub fn name_must_exist(mut self, must_exist: bool) -> Self {
        self.name_must_exist = must_exist;
        self
    }

    #[must_use]
    pub fn line_must_exist(mut self, must_exist: bool) -> Self {
        self.line_must_exist = must_exist;
        self
    }
}

impl<C: NoticeChanger<LineNotices>> ModifyLine<C> {
    /// Apply to a file. Removing a line never removes the file itself, so
    /// this always yields a `FileNotices`.
    pub fn apply(&self, notices: &FileNotices) -> Result<FileNotices, MissingNotices> {
        let line_number = notices.get_line_number(&self.name_or_line);
        let existing = line_number.and_then(|line_number| notices.notices_at_line(line_number));

        let missing = (line_number.is_none() && self.name_must_exist)
            || (existing.is_none() && self.line_must_exist);
        if missing {
            return Err(MissingNotices::new(notices.location())
                .with_target(&self.name_or_line, line_number));
        }

        let Some(line_number) = line_number else {
            return Ok(notices.clone());
        };
        let line_notices = match existing {
            Some(existing) => existing.clone(),
            None => notices.generate_notices_for_line(line_number),
        };
        let changed = self.change.change(line_notices)?;
        Ok(notices.set_lines([(line_number, changed)]))
    }
}

impl<C: NoticeChanger<LineNotices>> NoticeChanger<FileNotices> for ModifyLine<C> {
    fn change(&self, notices: FileNotices) -> Changed<FileNotices> {
        self.apply(&notices).map(Some)
    }
}

/// Change the notices of one file.
pub struct ModifyFile<C> {
    location: PathBuf,
    must_exist: bool,
    change: C,
}

impl<C> ModifyFile<C> {
    pub fn new(location: impl Into<PathBuf>, change: C) -> Self {
        ModifyFile {
            location: location.into(),
            must_exist: true,
            change,
        }
    }

    #[must_use]
    pub fn must_exist(mut self, must_exist: bool) -> Self {
        self.must_exist = must_exist;
        self
    }
}

impl<C: NoticeChanger<FileNotices>> ModifyFile<C> {
    pub fn apply(&self, notices: &ProgramNotices) -> Result<ProgramNotices, MissingNotices> {
        let file_notices = match notices.notices_at_location(&self.location) {
            Some(existing) => existing.clone(),
            None if self.must_exist => return Err(MissingNotices::new(self.location.clone())),
            None => notices.generate_notices_for_location(self.location.clone()),
        };
        let changed = self.change.change(file_notices)?;
        Ok(notices.set_files([(self.location.clone(), changed)]))
    }
}

impl<C: NoticeChanger<FileNotices>> NoticeChanger<ProgramNotices> for ModifyFile<C> {
    fn change(&self, notices: ProgramNotices) -> Changed<ProgramNotices> {
        self.apply(&notices).map(Some)
    }
}

/// Append new notices to a line.
///
/// The maker sees the current line and returns the notices to add; `None`
/// entries are skipped. A line left empty is removed.
pub struct AppendToLine<F> {
    make_notices: F,
}

impl<F> AppendToLine<F>
where
    F: Fn(&LineNotices) -> Vec<Option<Notice>>,
{
    pub fn new(make_notices: F) -> Self {
        AppendToLine { make_notices }
    }
}

impl<F> NoticeChanger<LineNotices> for AppendToLine<F>
where
    F: Fn(&LineNotices) -> Vec<Option<Notice>>,
{
    fn change(&self, notices: LineNotices) -> Changed<LineNotices> {
        let made = (self.make_notices)(&notices);
        let combined = notices.iter().cloned().map(Some).chain(made);
        Ok(notices.set_notices(combined, false))
    }
}

/// Change the last notice on a line accepted by `matcher`.
///
/// The matcher is called on the notices from last to first and may keep
/// state between calls. When nothing matches and a match is not required,
/// `change` is applied to a fresh empty note which is then appended.
pub struct ModifyLatestMatch<M, C> {
    matcher: M,
    must_exist: bool,
    change: C,
}

impl<M, C> ModifyLatestMatch<M, C>
where
    M: Fn(&Notice) -> bool,
    C: NoticeChanger<Notice>,
{
    pub fn new(matcher: M, change: C) -> Self {
        ModifyLatestMatch {
            matcher,
            must_exist: true,
            change,
        }
    }

    #[must_use]
    pub fn must_exist(mut self, must_exist: bool) -> Self {
        self.must_exist = must_exist;
        self
    }
}

impl<M, C> NoticeChanger<LineNotices> for ModifyLatestMatch<M, C>
where
    M: Fn(&Notice) -> bool,
    C: NoticeChanger<Notice>,
{
    fn change(&self, notices: LineNotices) -> Changed<LineNotices> {
        let mut replaced: Vec<Option<Notice>> = notices.iter().cloned().map(Some).collect();
        match notices.notices().iter().rposition(|notice| (self.matcher)(notice)) {
            Some(index) => {
                replaced[index] = self.change.change(notices.notices()[index].clone())?;
            }
            None if self.must_exist => {
                let line_number = notices.line_number();
                return Err(MissingNotices::new(notices.location())
                    .with_target(&NameOrLine::Line(line_number), Some(line_number)));
            }
            None => {
                let fresh = notices.generate_notice(Severity::Note, "");
                replaced.push(self.change.change(fresh)?);
            }
        }
        Ok(notices.set_notices(replaced, false))
    }
}

/// Change every notice on a line that has `severity` and a message starting
/// with `message_prefix`; leave the rest alone.
pub struct ChangeOnMatch<C> {
    message_prefix: String,
    severity: Severity,
    change: C,
}

impl<C: NoticeChanger<Notice>> ChangeOnMatch<C> {
    pub fn new(message_prefix: impl Into<String>, severity: Severity, change: C) -> Self {
        ChangeOnMatch {
            message_prefix: message_prefix.into(),
            severity,
            change,
        }
    }

    fn applies_to(&self, notice: &Notice) -> bool {
        self.severity == notice.severity && notice.message.starts_with(&self.message_prefix)
    }
}

impl<C: NoticeChanger<Notice>> NoticeChanger<LineNotices> for ChangeOnMatch<C> {
    fn change(&self, notices: LineNotices) -> Changed<LineNotices> {
        let mut replaced: Vec<Option<Notice>> = Vec::with_capacity(notices.notices().len());
        for notice in &notices {
            if self.applies_to(notice) {
                replaced.push(self.change.change(notice.clone())?);
            } else {
                replaced.push(Some(notice.clone()));
            }
        }
        Ok(notices.set_notices(replaced, false))
    }
}

/// Apply the wrapped changer only on the first call; later calls pass the
/// target through unchanged.
pub struct FirstMatchOnly<C> {
    found: Cell<bool>,
    change: C,
}

impl<C> FirstMatchOnly<C> {
    pub fn new(change: C) -> Self {
        FirstMatchOnly {
            found: Cell::new(false),
            change,
        }
    }
}

impl<T, C: NoticeChanger<T>> NoticeChanger<T> for FirstMatchOnly<C> {
    fn change(&self, target: T) -> Changed<T> {
        if self.found.replace(true) {
            return Ok(Some(target));
        }
        self.change.change(target)
    }
}
