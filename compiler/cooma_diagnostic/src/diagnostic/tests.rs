use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builder_collects_parts() {
    let diag = Diagnostic::error(ErrorCode::E6001)
        .with_message("division by zero")
        .with_label(Span::new(4, 9), "division by zero here")
        .with_secondary_label(Span::new(0, 12), "in this call")
        .with_note("divisor evaluated to 0")
        .with_suggestion("check the divisor before dividing");

    assert!(diag.is_error());
    assert_eq!(diag.primary_span(), Some(Span::new(4, 9)));
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.notes, vec!["divisor evaluated to 0".to_string()]);
}

#[test]
fn display_lists_labels_notes_and_help() {
    let diag = Diagnostic::error(ErrorCode::E6040)
        .with_message("non-exhaustive match")
        .with_label(Span::new(1, 2), "no alternative matched")
        .with_note("scrutinee was <None = {}>")
        .with_suggestion("add a wildcard alternative");

    assert_eq!(
        diag.to_string(),
        "error [E6040]: non-exhaustive match\n  \
         --> 1..2: no alternative matched\n  \
         = note: scrutinee was <None = {}>\n  \
         = help: add a wildcard alternative"
    );
}

#[test]
fn no_primary_span_without_labels() {
    let diag = Diagnostic::warning(ErrorCode::E6099).with_message("odd");
    assert_eq!(diag.primary_span(), None);
    assert!(!diag.is_error());
}

#[test]
fn error_codes_group_by_range() {
    assert!(ErrorCode::E6001.is_arithmetic());
    assert!(ErrorCode::E6005.is_arithmetic());
    assert!(!ErrorCode::E6010.is_arithmetic());
    assert_eq!(ErrorCode::E6031.to_string(), "E6031");
    assert_eq!(ErrorCode::E6020.description(), "unbound variable");
}
