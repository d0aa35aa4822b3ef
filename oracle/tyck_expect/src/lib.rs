//! Expectation checking for type checker fixtures.
//!
//! Fixture files carry their expectations inline as directive comments:
//!
//! ```text
//! a: int = 1
//! # ^ REVEAL[a] ^ builtins.int
//! a = "nope"
//! # ^ ERROR(assignment) ^ Incompatible types in assignment
//! ```
//!
//! The [`parser`] turns a fixture into rewritten source plus expected
//! notices, [`output`] turns checker output into actual notices, and
//! [`compare`] diffs the two and renders a report.
//!
//! # Tracing
//!
//! Set `RUST_LOG=tyck_expect=debug` (or `trace`) and call [`init_tracing`]
//! to see directive handling and comparison results.

pub mod compare;
pub mod directive;
mod errors;
pub mod fixture;
pub mod output;
pub mod parser;
pub mod patch;

use std::path::Path;
use std::sync::Once;

use tyck_notices::{Notice, ProgramNotices};

pub use compare::{diff, render_and_raise, ColorMode, Renderer, Report};
pub use errors::{Error, FixtureError, NoticeMismatch, OutputError, ParseError};
pub use fixture::{expected_program_notices, Fixture};
pub use output::{clean_output, parse_output, parse_output_into, OutputLine};
pub use parser::{parse_fixture, FixtureParser, ParseOptions};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Only installs a subscriber when `RUST_LOG` is set. Safe to call multiple
/// times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        }
    });
}

/// Check raw checker stdout against expected notices.
///
/// Cleans and parses `stdout` relative to `root`, diffs it against
/// `expected` and fails with the rendered report on any difference.
pub fn check_output<N>(
    expected: &ProgramNotices,
    stdout: &str,
    normalise: N,
    root: &Path,
) -> Result<(), Error>
where
    N: Fn(Notice) -> Option<Notice>,
{
    let actual = parse_output(clean_output(stdout), normalise, root)?;
    render_and_raise(&diff(expected, &actual, root))?;
    Ok(())
}
