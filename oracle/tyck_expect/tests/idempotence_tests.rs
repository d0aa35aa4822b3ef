#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Idempotence of fixture rewriting.
//!
//! These tests verify that for every fixture under `tests/fixtures`:
//! 1. rewrite(rewrite(source)) == rewrite(source)
//! 2. Parsing the rewritten source yields the same notices

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tyck_expect::parse_fixture;
use tyck_notices::FileNotices;

/// Find all .py files in a directory recursively.
fn find_fixtures(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(find_fixtures(&path));
            } else if path.extension().is_some_and(|e| e == "py") {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

#[test]
fn test_fixtures_exist() {
    assert_eq!(find_fixtures(&fixtures_dir()).len(), 3);
}

#[test]
fn test_all_fixtures_rewrite_idempotently() {
    for path in find_fixtures(&fixtures_dir()) {
        let source = fs::read_to_string(&path).unwrap();
        let existing = FileNotices::new(path.clone());

        let (once, first) = parse_fixture(&source, &existing)
            .unwrap_or_else(|error| panic!("{}: {error}", path.display()));
        let (twice, second) = parse_fixture(&once, &existing)
            .unwrap_or_else(|error| panic!("{}: {error}", path.display()));

        assert_eq!(once, twice, "rewrite is not idempotent for {}", path.display());
        assert_eq!(first, second, "notices changed on reparse for {}", path.display());
        assert!(first.has_notices(), "{} expects nothing", path.display());
    }
}

#[test]
fn test_reveals_fixture_rewrite() {
    let path = fixtures_dir().join("reveals.py");
    let source = fs::read_to_string(&path).unwrap();
    let (rewritten, notices) = parse_fixture(&source, &FileNotices::new(path)).unwrap();

    let expected = "\
from typing import Literal

a: int = 1
reveal_type(a)
# ^ REVEAL[a] ^ builtins.int

b = \"hello\"
reveal_type(b)
# ^ REVEAL ^ builtins.str

reveal_type(len(b))
# ^ REVEAL[length] ^ builtins.int

c: Literal[1] = 1
reveal_type(c)
# ^ REVEAL ^ Literal[1]
# ^ REVEAL ^ Literal[1]?
";
    assert_eq!(rewritten, expected);
    assert_eq!(notices.known_names(), vec![("a", 4), ("length", 11)]);
    assert_eq!(
        notices.known_line_numbers().collect::<Vec<_>>(),
        vec![4, 8, 11, 15]
    );
    assert_eq!(notices.notices_at_line(15).map(|line| line.notices().len()), Some(2));
}

#[test]
fn test_nested_fixture_keeps_indentation() {
    let path = fixtures_dir().join("pkg").join("nested.py");
    let source = fs::read_to_string(&path).unwrap();
    let (rewritten, notices) = parse_fixture(&source, &FileNotices::new(path)).unwrap();

    assert!(rewritten.contains("    thing = Thing()\n    reveal_type(thing)\n"));
    assert!(rewritten.contains("    reveal_type(thing.method())\n"));
    assert_eq!(notices.known_names(), vec![("chained", 12), ("thing", 8)]);
}
