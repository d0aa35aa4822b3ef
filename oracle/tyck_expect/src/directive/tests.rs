use super::*;
use pretty_assertions::assert_eq;

fn parsed(line: &str) -> Directive {
    match Directive::parse(line) {
        Ok(Some(directive)) => directive,
        other => panic!("expected a directive from {line:?}, got {other:?}"),
    }
}

#[test]
fn test_source_lines_are_not_directives() {
    assert_eq!(Directive::parse("a: int = 1"), Ok(None));
    assert_eq!(Directive::parse("# just a comment"), Ok(None));
    assert_eq!(Directive::parse(""), Ok(None));
    assert_eq!(Directive::parse("x = 1  # ^ REVEAL ^ int"), Ok(None));
}

#[test]
fn test_reveal() {
    assert_eq!(
        parsed("    # ^ REVEAL ^ builtins.int  "),
        Directive {
            indent: "    ".to_string(),
            instruction: Instruction::Reveal,
            subtype: String::new(),
            name: None,
            payload: "builtins.int".to_string(),
        }
    );
}

#[test]
fn test_error_with_subtype_and_name() {
    let directive = parsed("#^ERROR( assignment )[target]^ Incompatible types");
    assert_eq!(directive.instruction, Instruction::Error);
    assert_eq!(directive.subtype, "assignment");
    assert_eq!(directive.name.as_deref(), Some("target"));
    assert_eq!(directive.payload, "Incompatible types");
}

#[test]
fn test_name_with_empty_payload() {
    let directive = parsed("# ^ NAME[first] ^");
    assert_eq!(directive.instruction, Instruction::Name);
    assert_eq!(directive.name.as_deref(), Some("first"));
    assert_eq!(directive.payload, "");
}

#[test]
fn test_malformed_directive() {
    let line = "# ^ BOGUS ^ nope";
    assert_eq!(
        Directive::parse(line),
        Err(ParseError::InvalidDirective {
            line: line.to_string()
        })
    );
    assert!(Directive::parse("# ^ REVEAL missing caret").is_err());
}

#[test]
fn test_directive_missing_leading_caret_is_rejected() {
    let line = "# REVEAL ^ int";
    assert_eq!(
        Directive::parse(line),
        Err(ParseError::InvalidDirective {
            line: line.to_string()
        })
    );
    assert!(Directive::parse("    #  NOTE ^ hi").is_err());
    assert_eq!(Directive::parse("# plain words ^ here"), Ok(None));
}

#[test]
fn test_subtype_only_on_error() {
    let result = Directive::parse("# ^ NOTE(misc) ^ hi");
    assert!(matches!(result, Err(ParseError::SubtypeOnNonError { .. })));
}

#[test]
fn test_error_requires_subtype() {
    let error = Directive::parse("# ^ ERROR ^ boom").err();
    assert_eq!(
        error.map(|error| error.to_string()),
        Some(
            "Must use `# ^ ERROR(error-type) ^` with the ERROR instruction: # ^ ERROR ^ boom"
                .to_string()
        )
    );
    assert!(matches!(
        Directive::parse("# ^ ERROR( ) ^ boom"),
        Err(ParseError::MissingErrorSubtype { .. })
    ));
}

#[test]
fn test_name_requires_name() {
    let result = Directive::parse("# ^ NAME[] ^");
    assert!(matches!(result, Err(ParseError::MissingName { .. })));
    assert_eq!(
        result.err().as_ref().and_then(ParseError::line),
        Some("# ^ NAME[] ^")
    );
}

#[test]
fn test_instruction_display() {
    assert_eq!(Instruction::Reveal.to_string(), "REVEAL");
    assert_eq!(Instruction::Note.to_string(), "NOTE");
}
