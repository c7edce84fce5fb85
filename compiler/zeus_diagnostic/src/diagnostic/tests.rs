use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_builder_sets_location() {
    let diag = Diagnostic::error(ErrorCode::E3001)
        .with_message("Variable not defined")
        .with_location(FileId::new(2), Span::new(4, 7))
        .with_note("declare it first");
    assert!(diag.is_error());
    assert_eq!(diag.file, Some(FileId::new(2)));
    assert_eq!(diag.primary_span(), Some(Span::new(4, 7)));
    assert_eq!(diag.notes, vec!["declare it first".to_string()]);
}

#[test]
fn test_display_header() {
    let diag = Diagnostic::error(ErrorCode::E2003).with_message("Expected closing '}'");
    assert_eq!(diag.to_string(), "error[E2003]: Expected closing '}'");
}

#[test]
fn test_warning_is_not_error() {
    let diag = Diagnostic::warning(ErrorCode::E3003);
    assert!(!diag.is_error());
    assert_eq!(diag.span, None);
}

#[test]
fn test_internal_error_carries_note() {
    let diag = internal_error("ran out of registers");
    assert_eq!(diag.code, ErrorCode::E9001);
    assert_eq!(diag.notes.len(), 1);
}
