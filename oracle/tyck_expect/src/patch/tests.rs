use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_no_edits_round_trips_text() {
    let source = "a = 1\n\nb = 2\n";
    let patches = LinePatches::new(source);
    assert!(patches.is_empty());
    let patched = patches.apply();
    assert_eq!(patched.text(), source);
    assert_eq!(patched.line_number(Slot::Original(2)), 3);
}

#[test]
fn test_insert_shifts_following_lines() {
    let mut patches = LinePatches::new("a = 1\nb = 2\nc = 3");
    let probe = patches.insert_after(Slot::Original(0), "reveal_type(a)");
    assert_eq!(probe, Slot::Inserted(0));
    assert!(!patches.is_empty());

    let patched = patches.apply();
    assert_eq!(patched.text(), "a = 1\nreveal_type(a)\nb = 2\nc = 3");
    assert_eq!(patched.line_number(Slot::Original(0)), 1);
    assert_eq!(patched.line_number(probe), 2);
    assert_eq!(patched.line_number(Slot::Original(1)), 3);
    assert_eq!(patched.line_number(Slot::Original(2)), 4);
}

#[test]
fn test_replace_keeps_line_numbers() {
    let mut patches = LinePatches::new("foo()\nbar()");
    patches.replace(Slot::Original(1), "reveal_type(bar())");
    assert_eq!(patches.text(Slot::Original(1)), "reveal_type(bar())");

    let patched = patches.apply();
    assert_eq!(patched.clone().into_text(), "foo()\nreveal_type(bar())");
    assert_eq!(patched.line_number(Slot::Original(1)), 2);
}

#[test]
fn test_insertions_after_same_line_keep_order() {
    let mut patches = LinePatches::new("a, b = 1, 2\nend");
    let first = patches.insert_after(Slot::Original(0), "one");
    let second = patches.insert_after(first, "two");
    patches.replace(first, "ONE");

    let patched = patches.apply();
    assert_eq!(patched.text(), "a, b = 1, 2\nONE\ntwo\nend");
    assert_eq!(patched.line_number(first), 2);
    assert_eq!(patched.line_number(second), 3);
    assert_eq!(patched.line_number(Slot::Original(1)), 4);
}

#[test]
fn test_many_insertions_accumulate_drift() {
    let mut patches = LinePatches::new("x = 1\ny = 2\nz = 3");
    let probes: Vec<Slot> = (0..3)
        .map(|index| patches.insert_after(Slot::Original(index), format!("probe{index}")))
        .collect();
    let patched = patches.apply();
    let numbers: Vec<u32> = probes.iter().map(|slot| patched.line_number(*slot)).collect();
    assert_eq!(numbers, vec![2, 4, 6]);
}
