use super::*;
use pretty_assertions::assert_eq;

fn with_cursor(source: &str, f: impl FnOnce(&mut Cursor<'_>)) {
    let tokens = zeus_lexer::lex(source).unwrap();
    let interner = StringInterner::new();
    let mut cursor = Cursor::new(&tokens, source, &interner);
    f(&mut cursor);
}

#[test]
fn advance_stops_at_eof() {
    with_cursor("a", |cursor| {
        assert_eq!(cursor.advance().kind, TokenKind::Ident);
        assert_eq!(cursor.advance().kind, TokenKind::Eof);
        assert_eq!(cursor.advance().kind, TokenKind::Eof);
        assert!(cursor.is_at_end());
    });
}

#[test]
fn peek_past_end_is_eof() {
    with_cursor("a b", |cursor| {
        assert_eq!(cursor.peek_kind_at(1), TokenKind::Ident);
        assert_eq!(cursor.peek_kind_at(2), TokenKind::Eof);
        assert_eq!(cursor.peek_kind_at(50), TokenKind::Eof);
    });
}

#[test]
fn expect_ident_interns_text() {
    with_cursor("count 5", |cursor| {
        let (name, span) = cursor.expect_ident("Expected a name").unwrap();
        assert_eq!(cursor.interner().lookup(name), "count");
        assert_eq!(span, Span::new(0, 5));
        let err = cursor.expect_ident("Expected a name").unwrap_err();
        assert_eq!(err.code, ErrorCode::E2004);
        assert_eq!(err.span, Span::new(6, 7));
    });
}

#[test]
fn skip_newlines_and_eat() {
    with_cursor("\n\n)", |cursor| {
        cursor.skip_newlines();
        assert!(!cursor.eat(TokenKind::LParen));
        assert!(cursor.eat(TokenKind::RParen));
        assert_eq!(cursor.previous_span(), Span::new(2, 3));
    });
}

#[test]
fn expect_reports_current_token() {
    with_cursor("x", |cursor| {
        let err = cursor.expect(TokenKind::LParen, "Expected '('").unwrap_err();
        assert_eq!(err.message, "Expected '('");
        assert_eq!(err.span, Span::new(0, 1));
    });
}
