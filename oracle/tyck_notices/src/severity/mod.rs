//! Severity of a notice.
//!
//! An [`Severity::Error`] with an empty subtype acts as a wildcard: it is
//! equal to every other error regardless of subtype. Expected notices use
//! it when a fixture only cares that *some* error was reported.

use std::cmp::Ordering;
use std::fmt;

/// Severity level for a notice.
#[derive(Clone, Debug)]
pub enum Severity {
    Note,
    Warning,
    /// An error with a subtype such as `assignment` or `arg-type`.
    ///
    /// The empty subtype is the wildcard error.
    Error(String),
}

impl Severity {
    /// Create an error severity with the given subtype.
    pub fn error(subtype: impl Into<String>) -> Self {
        Severity::Error(subtype.into())
    }

    /// The error severity that matches any other error.
    pub fn any_error() -> Self {
        Severity::Error(String::new())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error(_))
    }

    pub fn is_note(&self) -> bool {
        matches!(self, Severity::Note)
    }

    /// True for an error with an empty subtype.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Severity::Error(subtype) if subtype.is_empty())
    }

    /// Compare against the displayed form of a severity.
    ///
    /// The wildcard error equals `"error"` and anything starting with
    /// `"error["`; every error equals the bare tokens `"error"` and
    /// `"error[]"`.
    pub fn matches_display(&self, display: &str) -> bool {
        match self {
            Severity::Error(subtype) if subtype.is_empty() => {
                display == "error" || display.starts_with("error[")
            }
            Severity::Error(_) if display == "error" || display == "error[]" => true,
            _ => self.to_string() == display,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error(subtype) => write!(f, "error[{subtype}]"),
        }
    }
}

impl PartialEq for Severity {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Severity::Note, Severity::Note) | (Severity::Warning, Severity::Warning) => true,
            (Severity::Error(left), Severity::Error(right)) => {
                left == right || left.is_empty() || right.is_empty()
            }
            _ => false,
        }
    }
}

impl PartialEq<str> for Severity {
    fn eq(&self, other: &str) -> bool {
        self.matches_display(other)
    }
}

impl PartialEq<&str> for Severity {
    fn eq(&self, other: &&str) -> bool {
        self.matches_display(other)
    }
}

/// Ordering is lexicographic on the displayed form, except that severities
/// which compare equal (through the wildcard) are ordered as equal.
///
/// Like equality, this is not transitive once the wildcard is involved:
/// `error[a]` and `error[z]` both order equal to `error[]` while
/// `error[a] < error[z]`. Sort with [`Notice::sort_key`](crate::Notice::sort_key)
/// or [`Notice::pairing_key`](crate::Notice::pairing_key) instead.
impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        Some(self.to_string().cmp(&other.to_string()))
    }
}
