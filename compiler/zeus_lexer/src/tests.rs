use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).unwrap().iter().map(|t| t.kind).collect()
}

#[test]
fn empty_source_is_just_eof() {
    let tokens = lex("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens.kind(0), TokenKind::Eof);
    assert_eq!(tokens.get(0).unwrap().span, Span::point(0));
}

#[test]
fn declaration_tokens() {
    assert_eq!(
        kinds("x : s32 = 5\n"),
        vec![
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::TyS32,
            TokenKind::Eq,
            TokenKind::Int,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn proc_header_tokens() {
    assert_eq!(
        kinds("main :: proc(a: ^u8) -> (s64) {}"),
        vec![
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Colon,
            TokenKind::Proc,
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Caret,
            TokenKind::TyU8,
            TokenKind::RParen,
            TokenKind::Minus,
            TokenKind::Gt,
            TokenKind::LParen,
            TokenKind::TyS64,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn directives_and_ranges() {
    assert_eq!(
        kinds("#import \"a.zeus\"\n#stack_size 4096"),
        vec![
            TokenKind::PoundImport,
            TokenKind::Str,
            TokenKind::Newline,
            TokenKind::PoundStackSize,
            TokenKind::Int,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("0 ... 10 .. 2"),
        vec![
            TokenKind::Int,
            TokenKind::DotDotDot,
            TokenKind::Int,
            TokenKind::DotDot,
            TokenKind::Int,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        kinds("a // tail\n/* one /* two */ */ b"),
        vec![
            TokenKind::Ident,
            TokenKind::Newline,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn spans_cover_token_text() {
    let source = "count := 12.5";
    let tokens = lex(source).unwrap();
    let texts: Vec<&str> = tokens
        .iter()
        .map(|t| &source[t.span.to_range()])
        .collect();
    assert_eq!(texts, vec!["count", ":", "=", "12.5", ""]);
    assert_eq!(tokens.kind(3), TokenKind::Decimal);
}

#[test]
fn literal_kinds() {
    assert_eq!(
        kinds("'a' '\\n' \"hi\" true false"),
        vec![
            TokenKind::Char,
            TokenKind::Char,
            TokenKind::Str,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unterminated_string_is_an_error() {
    let err = lex("x := \"abc\n").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.span.start, 5);
    assert_eq!(err.message(), "Expected ending double quotes");
}

#[test]
fn two_decimal_points_is_an_error() {
    let err = lex("1.2.3").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::MultipleDecimalPoints);
}

#[test]
fn unknown_directive_is_an_error() {
    let err = lex("#include").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnknownDirective);
    assert_eq!(err.span, Span::new(0, 8));
}

#[test]
fn invalid_character_is_an_error() {
    let err = lex("a $ b").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidCharacter);
    assert_eq!(err.span.start, 2);
}

#[test]
fn unterminated_block_comment_counts_depth() {
    let err = lex("/* /* */").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedBlockComment { open: 1 });
}

#[test]
fn integer_overflow_is_an_error() {
    let err = lex("x := 18446744073709551616").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IntOverflow);
}

mod properties {
    use super::*;

    fn trivia() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just(" ".to_string()),
                Just("\t".to_string()),
                Just("/* c */".to_string()),
            ],
            0..4,
        )
        .prop_map(|parts| parts.concat())
    }

    fn literal() -> impl Strategy<Value = (String, TokenKind)> {
        prop_oneof![
            (0u64..=u64::MAX).prop_map(|n| (n.to_string(), TokenKind::Int)),
            (0u32..100_000, 0u32..1000)
                .prop_map(|(a, b)| (format!("{a}.{b}"), TokenKind::Decimal)),
            "[a-z_][a-z0-9_]{0,8}"
                .prop_filter("keyword", |s| keywords::lookup(s).is_none())
                .prop_map(|s| (s, TokenKind::Ident)),
            "[a-zA-Z0-9 ]{0,12}".prop_map(|s| (format!("\"{s}\""), TokenKind::Str)),
        ]
    }

    proptest! {
        #[test]
        fn single_literal_survives_trivia(
            before in trivia(),
            (text, kind) in literal(),
            after in trivia(),
        ) {
            let source = format!("{before}{text}{after}");
            let tokens = lex(&source).unwrap();
            prop_assert_eq!(tokens.len(), 2);
            prop_assert_eq!(tokens.kind(0), kind);
            let span = tokens.get(0).unwrap().span;
            prop_assert_eq!(&source[span.to_range()], text.as_str());
        }

        #[test]
        fn trivia_does_not_change_kinds(sep in trivia()) {
            let plain = "a = b + 1";
            let spaced = format!("a{sep} ={sep} b {sep}+{sep} 1");
            prop_assert_eq!(kinds(plain), kinds(&spaced));
        }
    }
}
