//! High-level changers for stating what a checker should report on a
//! named line.
//!
//! Each changer requires the name to be registered but not the line to
//! already hold notices, and is built from [`ModifyLine`] and
//! [`AppendToLine`].

use crate::changers::{AppendToLine, Changed, ModifyLine, NoticeChanger};
use crate::{FileNotices, LineNotices, MissingNotices, NameOrLine, Notice, Severity};

fn modify_named_line<C>(
    name: &str,
    notices: &FileNotices,
    change: C,
) -> Result<FileNotices, MissingNotices>
where
    C: NoticeChanger<LineNotices>,
{
    ModifyLine::new(name, change)
        .name_must_exist(true)
        .line_must_exist(false)
        .apply(notices)
}

/// Append one reveal note holding every revealed type, one per line.
///
/// With `replace`, existing reveal notes are dropped first.
#[derive(Clone, Debug)]
pub struct AddRevealedTypes {
    pub name: String,
    pub revealed: Vec<String>,
    pub replace: bool,
}

impl AddRevealedTypes {
    pub fn new<I, S>(name: impl Into<String>, revealed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AddRevealedTypes {
            name: name.into(),
            revealed: revealed.into_iter().map(Into::into).collect(),
            replace: false,
        }
    }

    #[must_use]
    pub fn replacing(mut self) -> Self {
        self.replace = true;
        self
    }

    pub fn apply(&self, notices: &FileNotices) -> Result<FileNotices, MissingNotices> {
        let message = self
            .revealed
            .iter()
            .map(|revealed| Notice::reveal_message(revealed))
            .collect::<Vec<_>>()
            .join("\n");
        let append = AppendToLine::new(|line: &LineNotices| {
            vec![Some(line.generate_notice(Severity::Note, message.clone()))]
        });
        modify_named_line(&self.name, notices, |line: LineNotices| -> Changed<LineNotices> {
            let line = if self.replace {
                line.retained(|notice| !notice.is_type_reveal())
            } else {
                line
            };
            append.change(line)
        })
    }
}

impl NoticeChanger<FileNotices> for AddRevealedTypes {
    fn change(&self, notices: FileNotices) -> Changed<FileNotices> {
        self.apply(&notices).map(Some)
    }
}

/// Append one error notice per `(subtype, message)` pair.
///
/// With `replace`, existing errors are dropped first.
#[derive(Clone, Debug)]
pub struct AddErrors {
    pub name: String,
    pub errors: Vec<(String, String)>,
    pub replace: bool,
}

impl AddErrors {
    pub fn new<I, T, M>(name: impl Into<String>, errors: I) -> Self
    where
        I: IntoIterator<Item = (T, M)>,
        T: Into<String>,
        M: Into<String>,
    {
        AddErrors {
            name: name.into(),
            errors: errors
                .into_iter()
                .map(|(subtype, message)| (subtype.into(), message.into()))
                .collect(),
            replace: false,
        }
    }

    #[must_use]
    pub fn replacing(mut self) -> Self {
        self.replace = true;
        self
    }

    pub fn apply(&self, notices: &FileNotices) -> Result<FileNotices, MissingNotices> {
        let append = AppendToLine::new(|line: &LineNotices| {
            self.errors
                .iter()
                .map(|(subtype, message)| {
                    Some(line.generate_notice(Severity::error(subtype.clone()), message.clone()))
                })
                .collect()
        });
        modify_named_line(&self.name, notices, |line: LineNotices| -> Changed<LineNotices> {
            let line = if self.replace {
                line.retained(|notice| !notice.severity.is_error())
            } else {
                line
            };
            append.change(line)
        })
    }
}

impl NoticeChanger<FileNotices> for AddErrors {
    fn change(&self, notices: FileNotices) -> Changed<FileNotices> {
        self.apply(&notices).map(Some)
    }
}

/// Append one note holding every given note, one per line.
///
/// With `replace`, existing notes are dropped first; reveal notes survive
/// that when `keep_reveals` is set, which is the default.
#[derive(Clone, Debug)]
pub struct AddNotes {
    pub name: String,
    pub notes: Vec<String>,
    pub replace: bool,
    pub keep_reveals: bool,
}

impl AddNotes {
    pub fn new<I, S>(name: impl Into<String>, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AddNotes {
            name: name.into(),
            notes: notes.into_iter().map(Into::into).collect(),
            replace: false,
            keep_reveals: true,
        }
    }

    #[must_use]
    pub fn replacing(mut self) -> Self {
        self.replace = true;
        self
    }

    #[must_use]
    pub fn keep_reveals(mut self, keep_reveals: bool) -> Self {
        self.keep_reveals = keep_reveals;
        self
    }

    pub fn apply(&self, notices: &FileNotices) -> Result<FileNotices, MissingNotices> {
        let message = self.notes.join("\n");
        let append = AppendToLine::new(|line: &LineNotices| {
            vec![Some(line.generate_notice(Severity::Note, message.clone()))]
        });
        modify_named_line(&self.name, notices, |line: LineNotices| -> Changed<LineNotices> {
            let line = if self.replace {
                line.retained(|notice| {
                    !notice.severity.is_note() || (self.keep_reveals && notice.is_type_reveal())
                })
            } else {
                line
            };
            append.change(line)
        })
    }
}

impl NoticeChanger<FileNotices> for AddNotes {
    fn change(&self, notices: FileNotices) -> Changed<FileNotices> {
        self.apply(&notices).map(Some)
    }
}

/// Remove a fragment of text from every reveal note on a named line.
///
/// With `must_exist`, the default, a line where no reveal note contains
/// the fragment is an error.
#[derive(Clone, Debug)]
pub struct RemoveFromRevealedType {
    pub name: String,
    pub remove: String,
    pub must_exist: bool,
}

impl RemoveFromRevealedType {
    pub fn new(name: impl Into<String>, remove: impl Into<String>) -> Self {
        RemoveFromRevealedType {
            name: name.into(),
            remove: remove.into(),
            must_exist: true,
        }
    }

    #[must_use]
    pub fn must_exist(mut self, must_exist: bool) -> Self {
        self.must_exist = must_exist;
        self
    }

    pub fn apply(&self, notices: &FileNotices) -> Result<FileNotices, MissingNotices> {
        modify_named_line(&self.name, notices, |line: LineNotices| -> Changed<LineNotices> {
            let mut found = false;
            let replaced: Vec<Notice> = line
                .iter()
                .map(|notice| {
                    if notice.is_type_reveal() && notice.message.contains(&self.remove) {
                        found = true;
                        notice.with_message(notice.message.replace(&self.remove, ""))
                    } else {
                        notice.clone()
                    }
                })
                .collect();
            if !found && self.must_exist {
                let target = NameOrLine::Name(self.name.clone());
                return Err(MissingNotices::new(line.location())
                    .with_target(&target, Some(line.line_number())));
            }
            Ok(line.set_notices(replaced, false))
        })
    }
}

impl NoticeChanger<FileNotices> for RemoveFromRevealedType {
    fn change(&self, notices: FileNotices) -> Changed<FileNotices> {
        self.apply(&notices).map(Some)
    }
}
