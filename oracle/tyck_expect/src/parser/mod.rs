//! Fixture parsing.
//!
//! Reads the directives in a fixture, rewrites the source so every REVEAL
//! has a probe call to report on, and produces the expected notices for
//! the rewritten text.
//!
//! Parsing runs in two phases. Planning walks the lines, resolves each
//! directive to the [`Slot`] it describes and queues patches and notice
//! changes. Applying lays out the patched text, which fixes every slot's
//! final line number, and only then attaches names and notices.

use std::cell::Cell;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, trace};
use tyck_notices::{
    AppendToLine, Changed, FileNotices, LineNotices, MissingNotices, ModifyLatestMatch,
    ModifyLine, Notice, Severity,
};

use crate::directive::{compile, Directive, Instruction};
use crate::errors::ParseError;
use crate::patch::{LinePatches, Slot};

/// A simple assignment, capturing the assigned name.
static ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<variable>[a-zA-Z0-9_]+)\s*(:[^=]+)?(=|$)"));

/// Settings for [`FixtureParser`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Function the checker treats as a type reveal.
    pub probe: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            probe: "reveal_type".to_string(),
        }
    }
}

/// A notice a directive asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Expected {
    Reveal(String),
    Error { subtype: String, message: String },
    Note(String),
}

impl Expected {
    fn attach(
        &self,
        notices: &FileNotices,
        line_number: u32,
    ) -> Result<FileNotices, MissingNotices> {
        match self {
            Expected::Reveal(revealed) => append(
                notices,
                line_number,
                Severity::Note,
                Notice::reveal_message(revealed),
            ),
            Expected::Error { subtype, message } => append(
                notices,
                line_number,
                Severity::error(subtype.clone()),
                message.clone(),
            ),
            Expected::Note(message) => merge_note(notices, line_number, message),
        }
    }
}

/// Work queued during planning.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Planned {
    Name(Slot, String),
    Notice(Slot, Expected),
}

impl Planned {
    fn slot_mut(&mut self) -> &mut Slot {
        match self {
            Planned::Name(slot, _) | Planned::Notice(slot, _) => slot,
        }
    }
}

/// Point work queued for `from` at `to`.
///
/// A probe inserted below an assignment lands above the directives already
/// seen for it, so once the text is rewritten those directives describe the
/// probe line.
fn retarget(planned: &mut [Planned], from: Slot, to: Slot) {
    for slot in planned.iter_mut().map(Planned::slot_mut) {
        if *slot == from {
            *slot = to;
        }
    }
}

fn append(
    notices: &FileNotices,
    line_number: u32,
    severity: Severity,
    message: String,
) -> Result<FileNotices, MissingNotices> {
    let make = AppendToLine::new(move |line: &LineNotices| {
        vec![Some(line.generate_notice(severity.clone(), message.clone()))]
    });
    ModifyLine::new(line_number, make)
        .line_must_exist(false)
        .apply(notices)
}

/// Add `message` as another line of the latest notice on the line if that
/// notice is a plain note; otherwise start a new note.
fn merge_note(
    notices: &FileNotices,
    line_number: u32,
    message: &str,
) -> Result<FileNotices, MissingNotices> {
    let stop = Cell::new(false);
    let latest_plain_note = |notice: &Notice| {
        if stop.get() {
            return false;
        }
        if notice.severity.is_note() && !notice.is_type_reveal() {
            return true;
        }
        stop.set(true);
        false
    };
    let extend = |notice: Notice| -> Changed<Notice> {
        let merged = if notice.message.is_empty() {
            message.to_string()
        } else {
            format!("{}\n{message}", notice.message)
        };
        Ok(Some(notice.with_severity(Severity::Note).with_message(merged)))
    };
    let change = ModifyLatestMatch::new(latest_plain_note, extend).must_exist(false);
    ModifyLine::new(line_number, change)
        .line_must_exist(false)
        .apply(notices)
}

/// Parses fixtures into rewritten text and expected notices.
#[derive(Clone, Debug, Default)]
pub struct FixtureParser {
    options: ParseOptions,
}

impl FixtureParser {
    pub fn new(options: ParseOptions) -> Self {
        FixtureParser { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `source`, returning the rewritten text and the expected
    /// notices.
    ///
    /// `existing` supplies the location; its notices and names are cleared
    /// before the fixture's expectations are added.
    #[instrument(level = "debug", skip_all, fields(location = %existing.location().display()))]
    pub fn parse(
        &self,
        source: &str,
        existing: &FileNotices,
    ) -> Result<(String, FileNotices), ParseError> {
        let mut patches = LinePatches::new(source);
        let mut planned: Vec<Planned> = Vec::new();
        let mut described: Option<Slot> = None;

        for (index, line) in source.split('\n').enumerate() {
            let Some(directive) = Directive::parse(line)? else {
                described = Some(Slot::Original(index));
                continue;
            };
            let Some(mut slot) = described else {
                return Err(ParseError::OrphanDirective {
                    line: line.to_string(),
                });
            };
            trace!(instruction = %directive.instruction, ?slot, "directive");

            match directive.instruction {
                Instruction::Name => {}
                Instruction::Reveal => {
                    let revealed = self.plan_reveal(&mut patches, slot, &directive.indent, line)?;
                    if revealed != slot {
                        retarget(&mut planned, slot, revealed);
                        slot = revealed;
                    }
                    described = Some(slot);
                    planned.push(Planned::Notice(slot, Expected::Reveal(directive.payload)));
                }
                Instruction::Error => planned.push(Planned::Notice(
                    slot,
                    Expected::Error {
                        subtype: directive.subtype,
                        message: directive.payload,
                    },
                )),
                Instruction::Note => {
                    planned.push(Planned::Notice(slot, Expected::Note(directive.payload)));
                }
            }

            if let Some(name) = directive.name {
                planned.push(Planned::Name(slot, name));
            }
        }

        let patched = patches.apply();
        let mut notices = existing.clear(true);
        for work in planned {
            notices = match work {
                Planned::Name(slot, name) => notices.set_name(name, patched.line_number(slot)),
                Planned::Notice(slot, expected) => {
                    expected.attach(&notices, patched.line_number(slot))?
                }
            };
        }

        debug!(rewritten = !patches.is_empty(), "parsed fixture");
        Ok((patched.into_text(), notices))
    }

    /// Make sure the slot holds a probe call, rewriting the source if it
    /// does not. Returns the slot the reveal now describes.
    fn plan_reveal(
        &self,
        patches: &mut LinePatches<'_>,
        slot: Slot,
        indent: &str,
        line: &str,
    ) -> Result<Slot, ParseError> {
        let target = patches.text(slot).trim().to_string();
        if target.is_empty() {
            return Err(ParseError::RevealWithoutExpression {
                line: line.to_string(),
            });
        }
        if self.is_probe(&target) {
            return Ok(slot);
        }

        let probe = &self.options.probe;
        let variable = ASSIGNMENT
            .captures(&target)
            .and_then(|captures| captures.name("variable"))
            .map(|found| found.as_str().to_string());
        match variable {
            Some(variable) => {
                Ok(patches.insert_after(slot, format!("{indent}{probe}({variable})")))
            }
            None => {
                patches.replace(slot, format!("{indent}{probe}({target})"));
                Ok(slot)
            }
        }
    }

    /// `probe(` followed by at least one argument character.
    fn is_probe(&self, target: &str) -> bool {
        target
            .strip_prefix(self.options.probe.as_str())
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.chars().next())
            .is_some_and(|first| first != ')')
    }
}

/// Parse a fixture with the default options.
pub fn parse_fixture(
    source: &str,
    existing: &FileNotices,
) -> Result<(String, FileNotices), ParseError> {
    FixtureParser::default().parse(source, existing)
}
