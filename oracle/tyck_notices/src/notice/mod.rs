//! A single diagnostic record.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::Severity;

/// Prefix of every type reveal message.
pub const REVEAL_PREFIX: &str = "Revealed type is \"";

/// A diagnostic at a location and line.
///
/// Notices are values: the `with_*` builders return a new notice with one
/// field replaced and leave the original untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub location: PathBuf,
    pub line_number: u32,
    pub column: Option<u32>,
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(
        location: impl Into<PathBuf>,
        line_number: u32,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Notice {
            location: location.into(),
            line_number,
            column: None,
            severity,
            message: message.into(),
        }
    }

    /// Build the message a type checker prints for a revealed type.
    pub fn reveal_message(revealed: &str) -> String {
        format!("{REVEAL_PREFIX}{revealed}\"")
    }

    #[must_use]
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_severity(&self, severity: Severity) -> Self {
        Notice {
            severity,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_column(&self, column: Option<u32>) -> Self {
        Notice {
            column,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_line_number(&self, line_number: u32) -> Self {
        Notice {
            line_number,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_location(&self, location: impl Into<PathBuf>) -> Self {
        Notice {
            location: location.into(),
            ..self.clone()
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// True for a note whose message is a revealed type.
    pub fn is_type_reveal(&self) -> bool {
        self.severity.is_note() && self.message.starts_with(REVEAL_PREFIX)
    }

    /// `col=<c> severity=<s>:: <message>`, without the column segment when
    /// there is no column.
    pub fn display(&self) -> String {
        match self.column {
            Some(column) => format!(
                "col={column} severity={}:: {}",
                self.severity, self.message
            ),
            None => format!("severity={}:: {}", self.severity, self.message),
        }
    }

    /// Equality used when diffing. Columns only count when both sides
    /// have one.
    pub fn matches(&self, other: &Notice) -> bool {
        let columns_agree = match (self.column, other.column) {
            (Some(left), Some(right)) => left == right,
            _ => true,
        };
        columns_agree
            && self.location == other.location
            && self.line_number == other.line_number
            && self.severity == other.severity
            && self.message == other.message
    }

    /// Order for lining up the notices of one line before pairing them in a
    /// diff. Leaves out the column and the error subtype, which only one
    /// side may carry.
    pub fn pairing_key(&self) -> (u8, &str) {
        let kind = match self.severity {
            Severity::Error(_) => 0,
            Severity::Note => 1,
            Severity::Warning => 2,
        };
        (kind, self.message.as_str())
    }

    /// Key notices are ordered by: location, line, then display.
    pub fn sort_key(&self) -> (&Path, u32, String) {
        (&self.location, self.line_number, self.display())
    }

    /// Total order over notices consistent with [`Notice::sort_key`].
    pub fn cmp_by_key(&self, other: &Notice) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Stable sort of notices by [`Notice::sort_key`].
pub fn sort_notices(notices: &mut [Notice]) {
    notices.sort_by(Notice::cmp_by_key);
}
