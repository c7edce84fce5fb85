use super::*;
use pretty_assertions::assert_eq;

fn cook_all(source: &str, tag: RawTag) -> Result<Option<TokenKind>, LexError> {
    let span = Span::new(0, u32::try_from(source.len()).unwrap());
    TokenCooker::new(source).cook(tag, span)
}

#[test]
fn trivia_is_dropped() {
    assert_eq!(cook_all("  ", RawTag::Whitespace), Ok(None));
    assert_eq!(cook_all("// x", RawTag::LineComment), Ok(None));
    assert_eq!(cook_all("/* x */", RawTag::BlockComment), Ok(None));
}

#[test]
fn identifiers_resolve_keywords() {
    assert_eq!(cook_all("proc", RawTag::Ident), Ok(Some(TokenKind::Proc)));
    assert_eq!(cook_all("process", RawTag::Ident), Ok(Some(TokenKind::Ident)));
}

#[test]
fn directives_resolve_or_fail() {
    assert_eq!(
        cook_all("#import", RawTag::Directive),
        Ok(Some(TokenKind::PoundImport))
    );
    let err = cook_all("#include", RawTag::Directive).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnknownDirective);
    assert_eq!(err.span, Span::new(0, 8));
}

#[test]
fn literals_are_validated() {
    assert_eq!(cook_all("42", RawTag::Int), Ok(Some(TokenKind::Int)));
    assert_eq!(
        cook_all("99999999999999999999", RawTag::Int).unwrap_err().kind,
        LexErrorKind::IntOverflow
    );
    assert_eq!(cook_all("'\\t'", RawTag::Char), Ok(Some(TokenKind::Char)));
    assert_eq!(
        cook_all("'ab'", RawTag::Char).unwrap_err().kind,
        LexErrorKind::InvalidCharLiteral
    );
}

#[test]
fn error_tags_map_to_kinds() {
    assert_eq!(
        cook_all("/*", RawTag::UnterminatedBlockComment { open: 1 })
            .unwrap_err()
            .kind,
        LexErrorKind::UnterminatedBlockComment { open: 1 }
    );
    assert_eq!(
        cook_all("$", RawTag::InvalidByte).unwrap_err().kind,
        LexErrorKind::InvalidCharacter
    );
}
