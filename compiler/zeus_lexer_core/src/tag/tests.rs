use super::*;

#[test]
fn trivia_classification() {
    assert!(RawTag::Whitespace.is_trivia());
    assert!(RawTag::BlockComment.is_trivia());
    assert!(!RawTag::Newline.is_trivia());
    assert!(!RawTag::Ident.is_trivia());
}

#[test]
fn error_classification() {
    assert!(RawTag::UnterminatedBlockComment { open: 2 }.is_error());
    assert!(RawTag::HashWithoutIdent.is_error());
    assert!(!RawTag::Directive.is_error());
    assert!(!RawTag::Eof.is_error());
}
