//! Fixtures on disk.
//!
//! A [`Fixture`] is a file under a root directory. Writing one stores the
//! rewritten text, so reading it back must not rewrite it again.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};
use tyck_notices::{FileNotices, NoticeChanger, ProgramNotices};

use crate::errors::FixtureError;
use crate::parser::FixtureParser;

/// A fixture file plus the expectation changers to apply on top of its
/// directives.
pub struct Fixture {
    root: PathBuf,
    path: PathBuf,
    parser: FixtureParser,
    expectations: Vec<Box<dyn NoticeChanger<FileNotices>>>,
}

impl Fixture {
    /// A fixture at `path` relative to `root`. The path must not leave the
    /// root.
    pub fn new(root: impl Into<PathBuf>, path: impl Into<PathBuf>) -> Result<Self, FixtureError> {
        let root = root.into();
        let path = path.into();
        if !stays_within_root(&path) {
            let location = root.join(&path);
            return Err(FixtureError::LocationOutOfBounds { root, location });
        }
        Ok(Fixture {
            root,
            path,
            parser: FixtureParser::default(),
            expectations: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_parser(mut self, parser: FixtureParser) -> Self {
        self.parser = parser;
        self
    }

    /// Queue a changer applied to the parsed notices.
    #[must_use]
    pub fn expect(mut self, changer: impl NoticeChanger<FileNotices> + 'static) -> Self {
        self.expectations.push(Box::new(changer));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn location(&self) -> PathBuf {
        self.root.join(&self.path)
    }

    /// Parse `content` and write the rewritten text in one replacement.
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub fn write(&self, content: &str) -> Result<FileNotices, FixtureError> {
        let location = self.location();
        let (rewritten, notices) = self
            .parser
            .parse(content, &FileNotices::new(location.clone()))
            .map_err(|source| FixtureError::Parse {
                path: location.clone(),
                source,
            })?;

        let directory = location.parent().unwrap_or(self.root.as_path());
        fs::create_dir_all(directory).map_err(|source| FixtureError::Io {
            path: directory.to_path_buf(),
            source,
        })?;
        let io_error = |source: io::Error| FixtureError::Io {
            path: location.clone(),
            source,
        };
        let mut file = NamedTempFile::new_in(directory).map_err(io_error)?;
        file.write_all(rewritten.as_bytes()).map_err(io_error)?;
        file.persist(&location).map_err(|error| io_error(error.error))?;

        debug!(bytes = rewritten.len(), "wrote fixture");
        Ok(notices)
    }

    /// Read the fixture and return its expected notices, or `None` when it
    /// expects nothing.
    ///
    /// Fails with [`FixtureError::FixtureChanged`] when the file on disk was
    /// not written through [`Fixture::write`] and would need rewriting.
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub fn notices(&self, into: &FileNotices) -> Result<Option<FileNotices>, FixtureError> {
        let location = self.location();
        let original = fs::read_to_string(&location).map_err(|source| FixtureError::Io {
            path: location.clone(),
            source,
        })?;
        let (rewritten, mut notices) =
            self.parser
                .parse(&original, into)
                .map_err(|source| FixtureError::Parse {
                    path: location.clone(),
                    source,
                })?;
        if rewritten != original {
            return Err(FixtureError::FixtureChanged { path: location });
        }

        for changer in &self.expectations {
            notices = changer.change(notices)?.unwrap_or_else(|| into.clear(true));
        }
        Ok(notices.has_notices().then_some(notices))
    }
}

/// Relative paths that never climb above where they start.
fn stays_within_root(path: &Path) -> bool {
    let mut depth: usize = 0;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => match depth.checked_sub(1) {
                Some(up) => depth = up,
                None => return false,
            },
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    depth > 0
}

/// Collect the expected notices of many fixtures.
pub fn expected_program_notices(fixtures: &[Fixture]) -> Result<ProgramNotices, FixtureError> {
    let mut program = ProgramNotices::new();
    for fixture in fixtures {
        let location = fixture.location();
        let into = match program.notices_at_location(&location) {
            Some(existing) => existing.clone(),
            None => program.generate_notices_for_location(location.clone()),
        };
        let notices = fixture.notices(&into)?;
        program = program.set_files([(location, notices)]);
    }
    Ok(program)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
