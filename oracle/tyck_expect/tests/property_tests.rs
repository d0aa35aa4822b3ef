//! Property-based tests for fixture rewriting.
//!
//! Generates fixtures from random source lines and directives and checks:
//! 1. Idempotence: rewriting a rewritten fixture changes nothing
//! 2. Reparsing the rewritten fixture yields equal notices
//! 3. Every REVEAL lands on a line holding a probe call
//! 4. Directive lines survive rewriting unchanged

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use tyck_expect::parse_fixture;
use tyck_notices::FileNotices;

// -- Fixture Generation Strategies --

fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,8}").expect("valid regex")
}

fn payload_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z. \\[\\]]{0,15}").expect("valid regex")
}

fn indent_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just("    ".to_string()), Just("\t".to_string())]
}

/// A line of target source: an assignment, a call, or an existing probe.
fn source_line_strategy() -> impl Strategy<Value = String> {
    (indent_strategy(), identifier_strategy(), 0..3u8).prop_map(|(indent, name, kind)| match kind {
        0 => format!("{indent}{name} = 1"),
        1 => format!("{indent}{name}.call()"),
        _ => format!("{indent}reveal_type({name})"),
    })
}

fn directive_strategy() -> impl Strategy<Value = String> {
    (
        indent_strategy(),
        0..4u8,
        prop::option::of(identifier_strategy()),
        identifier_strategy(),
        payload_strategy(),
    )
        .prop_map(|(indent, kind, name, subtype, payload)| {
            let name = name.map(|name| format!("[{name}]")).unwrap_or_default();
            match kind {
                0 => format!("{indent}# ^ REVEAL{name} ^ {payload}"),
                1 => format!("{indent}# ^ ERROR({subtype}){name} ^ {payload}"),
                2 => format!("{indent}# ^ NOTE{name} ^ {payload}"),
                _ => format!("{indent}# ^ NAME[{subtype}] ^"),
            }
        })
}

fn fixture_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (source_line_strategy(), prop::collection::vec(directive_strategy(), 0..4)),
        1..8,
    )
    .prop_map(|blocks| {
        let mut lines = Vec::new();
        for (source, directives) in blocks {
            lines.push(source);
            lines.extend(directives);
        }
        lines.join("\n")
    })
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    /// Rewriting twice is the same as rewriting once.
    #[test]
    fn prop_rewrite_idempotence(source in fixture_strategy()) {
        let existing = FileNotices::new("/root/fixture.py");
        let (once, first) = parse_fixture(&source, &existing).unwrap();
        let (twice, second) = parse_fixture(&once, &existing).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(first, second);
    }

    /// Every reveal is expected on a probe line of the rewritten text.
    #[test]
    fn prop_reveals_target_probe_lines(source in fixture_strategy()) {
        let existing = FileNotices::new("/root/fixture.py");
        let (rewritten, notices) = parse_fixture(&source, &existing).unwrap();
        let lines: Vec<&str> = rewritten.split('\n').collect();
        for notice in notices.iter().filter(|notice| notice.is_type_reveal()) {
            let index = usize::try_from(notice.line_number).unwrap() - 1;
            prop_assert!(lines[index].trim_start().starts_with("reveal_type("));
        }
    }

    /// Rewriting adds lines but never touches directives.
    #[test]
    fn prop_rewrite_keeps_directives(source in fixture_strategy()) {
        let existing = FileNotices::new("/root/fixture.py");
        let (rewritten, _) = parse_fixture(&source, &existing).unwrap();
        prop_assert!(rewritten.split('\n').count() >= source.split('\n').count());

        let directives = |text: &str| -> Vec<String> {
            text.split('\n')
                .filter(|line| line.trim_start().starts_with('#'))
                .map(|line| line.to_string())
                .collect()
        };
        prop_assert_eq!(directives(&source), directives(&rewritten));
    }
}
