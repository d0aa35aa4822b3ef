//! Comparison Report
//!
//! Renders a [`DiffNotices`] as a line-by-line report with ticks for
//! matching notices and crosses for differences.

use std::path::Path;

use tracing::{debug, instrument};
use tyck_notices::{pair_up, DiffNotices, Notice, Pair, ProgramNotices};

use crate::errors::NoticeMismatch;

/// ANSI color codes for the report.
mod colors {
    pub const TICK: &str = "\x1b[1;32m"; // Bold green
    pub const CROSS: &str = "\x1b[1;31m"; // Bold red
    pub const RESET: &str = "\x1b[0m";
}

const TICK: &str = "✓";
const CROSS: &str = "✘";
const NONE: &str = "<NONE>";

/// Color output mode for the report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// A rendered comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    text: String,
    different: bool,
}

impl Report {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True if any line has a cross.
    pub fn is_different(&self) -> bool {
        self.different
    }

    /// `Err` carrying the whole report when anything differs.
    pub fn into_result(self) -> Result<(), NoticeMismatch> {
        if self.different {
            return Err(NoticeMismatch { report: self.text });
        }
        Ok(())
    }
}

/// Renders diffs, optionally with color.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer {
    colors: bool,
}

impl Renderer {
    /// A renderer that never emits color codes.
    pub fn plain() -> Self {
        Renderer { colors: false }
    }

    /// Create a renderer with an explicit color mode.
    pub fn with_color_mode(mode: ColorMode, is_tty: bool) -> Self {
        Renderer {
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn mark(&self, same: bool) -> String {
        let (symbol, color) = if same {
            (TICK, colors::TICK)
        } else {
            (CROSS, colors::CROSS)
        };
        if self.colors {
            format!("{color}{symbol}{}", colors::RESET)
        } else {
            symbol.to_string()
        }
    }

    /// Render every file and line of the diff.
    ///
    /// Left notices are what the checker reported (GOT), right notices are
    /// what the fixtures expect (WANT).
    pub fn render(&self, diff: &DiffNotices) -> Report {
        let mut out: Vec<String> = Vec::new();
        let mut different = false;

        for (path, file) in diff.iter() {
            out.push(format!("> {path}"));
            for (line_number, left, right) in file.iter() {
                let pairs = pair_up(left, right);
                let line_same = pairs.iter().all(Pair::is_same);
                different |= !line_same;

                if let [Pair::Same(notice)] = pairs.as_slice() {
                    out.push(format!(
                        "  | {} {line_number}: {}",
                        self.mark(true),
                        notice.display()
                    ));
                    continue;
                }

                out.push(format!("  | {} {line_number}:", self.mark(line_same)));
                for pair in &pairs {
                    match pair {
                        Pair::Same(notice) => {
                            out.push(format!("  | {} {}", self.mark(true), notice.display()));
                        }
                        Pair::Different { left, right } => {
                            out.push(format!(
                                "  | {} !! GOT  !! {}",
                                self.mark(false),
                                display_or_none(*left)
                            ));
                            out.push(format!("  |   !! WANT !! {}", display_or_none(*right)));
                        }
                    }
                }
            }
        }

        Report {
            text: out.join("\n"),
            different,
        }
    }
}

fn display_or_none(notice: Option<&Notice>) -> String {
    notice.map_or_else(|| NONE.to_string(), Notice::display)
}

/// Render without color and fail with the whole report on any difference.
pub fn render_and_raise(diff: &DiffNotices) -> Result<(), NoticeMismatch> {
    let report = Renderer::with_color_mode(ColorMode::Never, false).render(diff);
    debug!(different = report.is_different(), "compared notices");
    report.into_result()
}

/// Diff actual notices (left, GOT) against expected ones (right, WANT).
#[instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub fn diff(expected: &ProgramNotices, actual: &ProgramNotices, root: &Path) -> DiffNotices {
    actual.diff(root, expected)
}
