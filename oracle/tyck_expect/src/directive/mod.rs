//! Inline expectation directives.
//!
//! A directive is a comment line of the form
//!
//! ```text
//! # ^ INSTRUCTION(error-type)[name] ^ payload
//! ```
//!
//! where `(error-type)` is only allowed on `ERROR` and `[name]` names the
//! line the directive describes. Directives describe the nearest source
//! line above them.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::errors::ParseError;

/// Any line that looks like it wants to be a directive, including one that
/// lost its leading caret (`# REVEAL ^ int`).
static POTENTIAL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^\s*#\s*(\^|[a-zA-Z]+\s+\^)"));

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"^(?P<indent>\s*)#\s*\^\s*",
        r"(?P<instruction>NAME|REVEAL|ERROR|NOTE)",
        r"(\((?P<subtype>[^)]*)\))?",
        r"(\[(?P<name>[^\]]*)\])?",
        r"\s*\^\s*(?P<payload>.*)$",
    ))
});

#[allow(clippy::expect_used, reason = "patterns are string literals")]
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("literal pattern compiles")
}

fn group<'h>(captures: &Captures<'h>, name: &str) -> Option<&'h str> {
    captures.name(name).map(|found| found.as_str())
}

/// The instruction a directive carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Name the described line.
    Name,
    /// Expect a revealed type for the described expression.
    Reveal,
    /// Expect an error with a subtype.
    Error,
    /// Expect a note, merged with a note directly above it.
    Note,
}

impl Instruction {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "NAME" => Some(Instruction::Name),
            "REVEAL" => Some(Instruction::Reveal),
            "ERROR" => Some(Instruction::Error),
            "NOTE" => Some(Instruction::Note),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Name => write!(f, "NAME"),
            Instruction::Reveal => write!(f, "REVEAL"),
            Instruction::Error => write!(f, "ERROR"),
            Instruction::Note => write!(f, "NOTE"),
        }
    }
}

/// A parsed and validated directive line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    /// Whitespace before the `#`, reused for any inserted probe line.
    pub indent: String,
    pub instruction: Instruction,
    /// Error subtype, trimmed. Empty unless the instruction is `ERROR`.
    pub subtype: String,
    /// Name for the described line.
    pub name: Option<String>,
    /// Text after the closing `^`, trimmed.
    pub payload: String,
}

impl Directive {
    /// Parse a fixture line.
    ///
    /// Returns `Ok(None)` for ordinary source lines and an error for lines
    /// that start like a directive but are malformed.
    pub fn parse(line: &str) -> Result<Option<Directive>, ParseError> {
        if !POTENTIAL.is_match(line) {
            return Ok(None);
        }

        let raw = || line.to_string();
        let captures = DIRECTIVE
            .captures(line)
            .ok_or_else(|| ParseError::InvalidDirective { line: raw() })?;
        let instruction = group(&captures, "instruction")
            .and_then(Instruction::from_keyword)
            .ok_or_else(|| ParseError::InvalidDirective { line: raw() })?;
        let subtype = group(&captures, "subtype").unwrap_or_default().trim();
        let name = group(&captures, "name").filter(|name| !name.is_empty());

        if !subtype.is_empty() && instruction != Instruction::Error {
            return Err(ParseError::SubtypeOnNonError { line: raw() });
        }
        if subtype.is_empty() && instruction == Instruction::Error {
            return Err(ParseError::MissingErrorSubtype { line: raw() });
        }
        if name.is_none() && instruction == Instruction::Name {
            return Err(ParseError::MissingName { line: raw() });
        }

        Ok(Some(Directive {
            indent: group(&captures, "indent").unwrap_or_default().to_string(),
            instruction,
            subtype: subtype.to_string(),
            name: name.map(str::to_string),
            payload: group(&captures, "payload").unwrap_or_default().trim().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests;
