//! Type checker output parsing.
//!
//! Each line of checker output looks like
//!
//! ```text
//! path:line[:col]: severity: message  [tag]
//! ```
//!
//! and becomes one [`Notice`] at `root.join(path)`.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{instrument, trace};
use tyck_notices::{
    AppendToLine, LineNotices, ModifyFile, ModifyLine, Notice, ProgramNotices, Severity,
};

use crate::directive::compile;
use crate::errors::OutputError;

static OUTPUT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"^(?P<path>[^:]+):(?P<line>\d+)(:(?P<col>\d+))?: ",
        r"(?P<severity>[^:]+): (?P<message>.+?)",
        r"(\s+\[(?P<tag>[^\]]+)\])?$",
    ))
});

fn group<'h>(captures: &Captures<'h>, name: &str) -> &'h str {
    captures.name(name).map_or("", |found| found.as_str())
}

/// One parsed line of checker output.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputLine {
    /// Path as printed, relative to the directory the checker ran in.
    pub path: String,
    pub line_number: u32,
    pub column: Option<u32>,
    pub severity: Severity,
    pub message: String,
}

impl OutputLine {
    pub fn parse(line: &str) -> Result<Self, OutputError> {
        let invalid = || OutputError::InvalidOutputLine {
            line: line.to_string(),
        };
        let captures = OUTPUT_LINE.captures(line.trim()).ok_or_else(invalid)?;

        let line_number = group(&captures, "line")
            .parse::<u32>()
            .map_err(|_| invalid())?;
        let column = captures
            .name("col")
            .map(|col| col.as_str().parse::<u32>())
            .transpose()
            .map_err(|_| invalid())?;
        let severity = match group(&captures, "severity") {
            "error" => Severity::error(group(&captures, "tag")),
            "note" => Severity::Note,
            "warning" => Severity::Warning,
            other => {
                return Err(OutputError::UnknownSeverity {
                    severity: other.to_string(),
                    line: line.to_string(),
                })
            }
        };

        Ok(OutputLine {
            path: group(&captures, "path").to_string(),
            line_number,
            column,
            severity,
            message: group(&captures, "message").trim().to_string(),
        })
    }
}

/// Parse checker output into a fresh [`ProgramNotices`].
///
/// `normalise` sees every notice before it is attached and may rewrite it
/// or drop it by returning `None`.
pub fn parse_output<I, S, N>(
    lines: I,
    normalise: N,
    root: &Path,
) -> Result<ProgramNotices, OutputError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    N: Fn(Notice) -> Option<Notice>,
{
    parse_output_into(lines, normalise, ProgramNotices::new(), root)
}

/// Parse checker output, adding to existing notices.
#[instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub fn parse_output_into<I, S, N>(
    lines: I,
    normalise: N,
    into: ProgramNotices,
    root: &Path,
) -> Result<ProgramNotices, OutputError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    N: Fn(Notice) -> Option<Notice>,
{
    let mut notices = into;
    for line in lines {
        let parsed = OutputLine::parse(line.as_ref())?;
        trace!(
            path = %parsed.path,
            line = parsed.line_number,
            severity = %parsed.severity,
            "output line"
        );

        let append = AppendToLine::new(|line_notices: &LineNotices| {
            let notice = line_notices
                .generate_notice(parsed.severity.clone(), parsed.message.clone())
                .with_column(parsed.column);
            vec![normalise(notice)]
        });
        let change = ModifyLine::new(parsed.line_number, append).line_must_exist(false);
        notices = ModifyFile::new(root.join(&parsed.path), change)
            .must_exist(false)
            .apply(&notices)?;
    }
    Ok(notices)
}

/// Split raw checker stdout into the lines worth parsing.
///
/// Drops blank lines, `:debug:` lines and the trailing summary line.
pub fn clean_output(stdout: &str) -> Vec<String> {
    let mut lines: Vec<String> = stdout
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with(":debug:"))
        .map(str::to_string)
        .collect();
    if lines.last().is_some_and(|last| is_summary(last)) {
        lines.pop();
    }
    lines
}

fn is_summary(line: &str) -> bool {
    line.starts_with("Found ") || line.starts_with("Success: no issues")
}
