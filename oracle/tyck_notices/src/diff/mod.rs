//! Structural diff of two [`ProgramNotices`](crate::ProgramNotices).
//!
//! A diff is read-only: it is produced by
//! [`ProgramNotices::diff`](crate::ProgramNotices::diff) and iterated in
//! sorted path then line order.

use std::collections::BTreeMap;

use crate::Notice;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Left and right notices for each line of one file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiffFileNotices {
    by_line_number: BTreeMap<u32, (Vec<Notice>, Vec<Notice>)>,
}

impl DiffFileNotices {
    /// `(line_number, left, right)` in line order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Notice], &[Notice])> + '_ {
        self.by_line_number
            .iter()
            .map(|(line_number, (left, right))| (*line_number, left.as_slice(), right.as_slice()))
    }

    pub fn line(&self, line_number: u32) -> Option<(&[Notice], &[Notice])> {
        self.by_line_number
            .get(&line_number)
            .map(|(left, right)| (left.as_slice(), right.as_slice()))
    }
}

/// Per-file diffs keyed by display path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiffNotices {
    by_file: BTreeMap<String, DiffFileNotices>,
}

impl DiffNotices {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DiffFileNotices)> + '_ {
        self.by_file.iter().map(|(path, file)| (path.as_str(), file))
    }

    pub fn file(&self, path: &str) -> Option<&DiffFileNotices> {
        self.by_file.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }

    /// True when every line pairs up without a difference.
    pub fn is_match(&self) -> bool {
        self.by_file.values().all(|file| {
            file.iter()
                .all(|(_, left, right)| pair_up(left, right).iter().all(Pair::is_same))
        })
    }

    pub(crate) fn push(&mut self, path: String, line_number: u32, side: Side, notice: Notice) {
        let (left, right) = self
            .by_file
            .entry(path)
            .or_default()
            .by_line_number
            .entry(line_number)
            .or_default();
        match side {
            Side::Left => left.push(notice),
            Side::Right => right.push(notice),
        }
    }

    pub(crate) fn finish(mut self) -> Self {
        for file in self.by_file.values_mut() {
            for (left, right) in file.by_line_number.values_mut() {
                *left = split_lines(std::mem::take(left));
                *right = split_lines(std::mem::take(right));
            }
        }
        self
    }
}

/// Sort notices by [`Notice::pairing_key`], then split every multiline
/// message into one notice per physical line.
pub fn split_lines(mut notices: Vec<Notice>) -> Vec<Notice> {
    notices.sort_by(|left, right| left.pairing_key().cmp(&right.pairing_key()));
    notices
        .into_iter()
        .flat_map(|notice| {
            if notice.message.contains('\n') {
                notice
                    .message
                    .split('\n')
                    .map(|line| notice.with_message(line))
                    .collect()
            } else {
                vec![notice]
            }
        })
        .collect()
}

/// One positional pairing of a left and a right notice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pair<'a> {
    Same(&'a Notice),
    Different {
        left: Option<&'a Notice>,
        right: Option<&'a Notice>,
    },
}

impl Pair<'_> {
    pub fn is_same(&self) -> bool {
        matches!(self, Pair::Same(_))
    }
}

/// Pair left and right notices by position, padding the shorter side.
///
/// A pair is the same when the right notice matches the left one.
pub fn pair_up<'a>(left: &'a [Notice], right: &'a [Notice]) -> Vec<Pair<'a>> {
    (0..left.len().max(right.len()))
        .map(|index| match (left.get(index), right.get(index)) {
            (Some(got), Some(want)) if want.matches(got) => Pair::Same(got),
            (got, want) => Pair::Different {
                left: got,
                right: want,
            },
        })
        .collect()
}
