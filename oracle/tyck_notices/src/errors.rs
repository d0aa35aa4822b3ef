//! Errors raised while targeting notices.

use std::path::PathBuf;

use crate::NameOrLine;

/// A changer required notices that were not registered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "Failed to find registered notices for {}{}",
    .location.display(),
    describe_target(.line_number, .name)
)]
pub struct MissingNotices {
    pub location: PathBuf,
    pub line_number: Option<u32>,
    pub name: Option<String>,
}

impl MissingNotices {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        MissingNotices {
            location: location.into(),
            line_number: None,
            name: None,
        }
    }

    /// Record the line and, for a named target, the name.
    #[must_use]
    pub fn with_target(mut self, target: &NameOrLine, line_number: Option<u32>) -> Self {
        self.line_number = line_number;
        if let NameOrLine::Name(name) = target {
            self.name = Some(name.clone());
        }
        self
    }
}

fn describe_target(line_number: &Option<u32>, name: &Option<String>) -> String {
    let mut target = String::new();
    if let Some(line_number) = line_number {
        target.push_str(&format!(":{line_number}"));
    }
    if let Some(name) = name {
        target.push_str(&format!(" ({name})"));
    }
    target
}
