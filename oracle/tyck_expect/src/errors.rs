//! Error taxonomy for fixture parsing, output parsing and comparison.

use std::io;
use std::path::PathBuf;

use tyck_notices::MissingNotices;

/// A fixture line that could not be read as an expectation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Looks like line is trying to be an expectation but it didn't pass the regex for one: {line}")]
    InvalidDirective { line: String },

    #[error("Only Error instructions should be of the form 'INSTRUCTION(error_type)': {line}")]
    SubtypeOnNonError { line: String },

    #[error("Must use `# ^ ERROR(error-type) ^` with the ERROR instruction: {line}")]
    MissingErrorSubtype { line: String },

    #[error("Must use `# ^ NAME[name] ^` with the NAME instruction: {line}")]
    MissingName { line: String },

    #[error("Expectations must come after the line they describe: {line}")]
    OrphanDirective { line: String },

    #[error("REVEAL must follow a line with an expression: {line}")]
    RevealWithoutExpression { line: String },

    #[error(transparent)]
    Target(#[from] MissingNotices),
}

impl ParseError {
    /// The raw fixture line that caused the error, if any.
    pub fn line(&self) -> Option<&str> {
        match self {
            ParseError::InvalidDirective { line }
            | ParseError::SubtypeOnNonError { line }
            | ParseError::MissingErrorSubtype { line }
            | ParseError::MissingName { line }
            | ParseError::OrphanDirective { line }
            | ParseError::RevealWithoutExpression { line } => Some(line),
            ParseError::Target(_) => None,
        }
    }
}

/// A line of checker output that could not be turned into a notice.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OutputError {
    #[error("Line from type checker output is invalid: {line}")]
    InvalidOutputLine { line: String },

    #[error("Unknown severity: {severity}")]
    UnknownSeverity { severity: String, line: String },

    #[error(transparent)]
    Target(#[from] MissingNotices),
}

/// Reading, writing or interpreting a fixture on disk failed.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("{} is outside of {}", .location.display(), .root.display())]
    LocationOutOfBounds { root: PathBuf, location: PathBuf },

    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse expectations in {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Contents of {} were not transformed when written to disk", .path.display())]
    FixtureChanged { path: PathBuf },

    #[error(transparent)]
    Target(#[from] MissingNotices),
}

/// Actual notices differ from expected ones. Carries the whole report.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("\n{report}")]
pub struct NoticeMismatch {
    pub report: String,
}

/// Any failure from this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Mismatch(#[from] NoticeMismatch),
}
