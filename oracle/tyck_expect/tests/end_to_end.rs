#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end checks: fixtures written to disk, simulated checker output,
//! comparison and report.

use std::path::Path;

use pretty_assertions::assert_eq;
use tyck_expect::{
    check_output, clean_output, diff, expected_program_notices, parse_output, render_and_raise,
    Error, Fixture,
};
use tyck_notices::{AddRevealedTypes, Notice, ProgramNotices, RemoveFromRevealedType, Severity};

const MAIN: &str = "\
a: int = 1
# ^ REVEAL[a] ^ builtins.int
a = \"no\"
# ^ ERROR(assignment) ^ Incompatible types in assignment (expression has type \"str\", variable has type \"int\")
";

const STDOUT: &str = "\
:debug: cache hit
main.py:2: note: Revealed type is \"builtins.int\"
main.py:4: error: Incompatible types in assignment (expression has type \"str\", variable has type \"int\")  [assignment]
Found 1 error in 1 file (checked 1 source file)
";

fn write_main(root: &Path) -> Vec<Fixture> {
    let fixture = Fixture::new(root, "main.py").unwrap();
    fixture.write(MAIN).unwrap();
    vec![fixture]
}

#[test]
fn test_output_line_becomes_one_notice() {
    let root = Path::new("/project");
    let program = parse_output(
        ["main.py:7: error: Incompatible types in assignment  [assignment]"],
        Some,
        root,
    )
    .unwrap();

    let notices: Vec<&Notice> = program.iter().collect();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].location, root.join("main.py"));
    assert_eq!(notices[0].line_number, 7);
    assert_eq!(notices[0].severity, Severity::error("assignment"));
    assert_eq!(notices[0].message, "Incompatible types in assignment");
}

#[test]
fn test_matching_output_passes() {
    let root = tempfile::tempdir().unwrap();
    let fixtures = write_main(root.path());
    let expected = expected_program_notices(&fixtures).unwrap();

    check_output(&expected, STDOUT, Some, root.path()).unwrap();
}

#[test]
fn test_mismatching_output_reports_every_line() {
    let root = tempfile::tempdir().unwrap();
    let fixtures = write_main(root.path());
    let expected = expected_program_notices(&fixtures).unwrap();

    let stdout = "main.py:2: note: Revealed type is \"builtins.str\"\nFound 1 error\n";
    let error = check_output(&expected, stdout, Some, root.path()).unwrap_err();
    let mismatch = match error {
        Error::Mismatch(mismatch) => mismatch,
        other => panic!("expected a mismatch, got {other:?}"),
    };
    assert_eq!(
        mismatch.report,
        "\
> main.py
  | ✘ 2:
  | ✘ !! GOT  !! severity=note:: Revealed type is \"builtins.str\"
  |   !! WANT !! severity=note:: Revealed type is \"builtins.int\"
  | ✘ 4:
  | ✘ !! GOT  !! <NONE>
  |   !! WANT !! severity=error[assignment]:: Incompatible types in assignment (expression has type \"str\", variable has type \"int\")"
    );
}

#[test]
fn test_queued_expectations_change_what_is_expected() {
    let root = tempfile::tempdir().unwrap();
    let fixture = Fixture::new(root.path(), "main.py")
        .unwrap()
        .expect(AddRevealedTypes::new("a", ["Literal[1]?"]))
        .expect(RemoveFromRevealedType::new("a", "?"));
    fixture.write(MAIN).unwrap();
    let expected = expected_program_notices(&[fixture]).unwrap();

    let stdout = "\
main.py:2: note: Revealed type is \"builtins.int\"
main.py:2: note: Revealed type is \"Literal[1]\"
main.py:4: error: Incompatible types in assignment (expression has type \"str\", variable has type \"int\")  [assignment]
";
    check_output(&expected, stdout, Some, root.path()).unwrap();
}

#[test]
fn test_normaliser_can_ignore_notes() {
    let root = tempfile::tempdir().unwrap();
    let fixture = Fixture::new(root.path(), "main.py").unwrap();
    fixture.write("x = 1\n").unwrap();
    let expected = expected_program_notices(&[fixture]).unwrap();
    assert!(!expected.has_notices());

    let stdout = "main.py:1: note: something chatty\nSuccess: no issues found in 1 source file\n";
    let ignore_notes = |notice: Notice| (!notice.severity.is_note()).then_some(notice);
    check_output(&expected, stdout, ignore_notes, root.path()).unwrap();
}

#[test]
fn test_invalid_output_is_an_error() {
    let error = check_output(&ProgramNotices::new(), "this is not output", Some, Path::new("/r"));
    assert!(matches!(error, Err(Error::Output(_))));
}

#[test]
fn test_diff_is_empty_without_notices() {
    let lines = clean_output("Success: no issues found in 3 source files\n");
    let actual = parse_output(lines, Some, Path::new("/r")).unwrap();
    let compared = diff(&ProgramNotices::new(), &actual, Path::new("/r"));
    assert!(compared.is_empty());
    assert_eq!(render_and_raise(&compared), Ok(()));
}

#[test]
fn test_init_tracing_is_idempotent() {
    tyck_expect::init_tracing();
    tyck_expect::init_tracing();
}

#[test]
fn test_output_columns_do_not_reorder_a_line() {
    let root = tempfile::tempdir().unwrap();
    let fixture = Fixture::new(root.path(), "main.py").unwrap();
    fixture
        .write("f(x, y)\n# ^ ERROR(arg-type) ^ b\n# ^ ERROR(arg-type) ^ a\n")
        .unwrap();
    let expected = expected_program_notices(&[fixture]).unwrap();

    let stdout = "main.py:1:2: error: b  [arg-type]\nmain.py:1:5: error: a  [arg-type]\n";
    check_output(&expected, stdout, Some, root.path()).unwrap();

    let wrong = "main.py:1:2: error: b  [arg-type]\nmain.py:1:5: error: c  [arg-type]\n";
    assert!(matches!(
        check_output(&expected, wrong, Some, root.path()),
        Err(Error::Mismatch(_))
    ));
}
