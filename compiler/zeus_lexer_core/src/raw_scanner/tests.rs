use super::*;
use crate::SourceBuffer;
use pretty_assertions::assert_eq;

fn scan_tags(source: &str) -> Vec<RawTag> {
    tokenize(source).into_iter().map(|t| t.tag).collect()
}

/// Tags with the source text of each token.
fn scan_texts(source: &str) -> Vec<(RawTag, &str)> {
    let mut pos = 0usize;
    tokenize(source)
        .into_iter()
        .map(|t| {
            let start = pos;
            pos += t.len as usize;
            (t.tag, &source[start..pos])
        })
        .collect()
}

#[test]
fn empty_source_is_eof() {
    let buf = SourceBuffer::new("");
    let mut scanner = RawScanner::new(buf.cursor());
    assert_eq!(scanner.next_token(), RawToken { tag: RawTag::Eof, len: 0 });
    assert_eq!(scanner.next_token().tag, RawTag::Eof);
}

#[test]
fn declaration_line() {
    assert_eq!(
        scan_texts("x : s32 = 5\n"),
        vec![
            (RawTag::Ident, "x"),
            (RawTag::Whitespace, " "),
            (RawTag::Colon, ":"),
            (RawTag::Whitespace, " "),
            (RawTag::Ident, "s32"),
            (RawTag::Whitespace, " "),
            (RawTag::Eq, "="),
            (RawTag::Whitespace, " "),
            (RawTag::Int, "5"),
            (RawTag::Newline, "\n"),
        ]
    );
}

#[test]
fn carriage_return_is_whitespace() {
    assert_eq!(
        scan_tags("a\r\nb"),
        vec![RawTag::Ident, RawTag::Whitespace, RawTag::Newline, RawTag::Ident]
    );
}

#[test]
fn numbers_with_separators_and_points() {
    assert_eq!(scan_texts("1_000"), vec![(RawTag::Int, "1_000")]);
    assert_eq!(scan_texts("3.25"), vec![(RawTag::Decimal, "3.25")]);
    assert_eq!(
        scan_texts("1.2.3"),
        vec![(RawTag::MultipleDecimalPoints, "1.2.3")]
    );
}

#[test]
fn number_before_range_stays_integer() {
    assert_eq!(
        scan_texts("0...10..2"),
        vec![
            (RawTag::Int, "0"),
            (RawTag::DotDotDot, "..."),
            (RawTag::Int, "10"),
            (RawTag::DotDot, ".."),
            (RawTag::Int, "2"),
        ]
    );
}

#[test]
fn dots() {
    assert_eq!(
        scan_tags("a.b"),
        vec![RawTag::Ident, RawTag::Dot, RawTag::Ident]
    );
    assert_eq!(scan_tags("...."), vec![RawTag::DotDotDot, RawTag::Dot]);
}

#[test]
fn escaped_quote_does_not_terminate_string() {
    assert_eq!(
        scan_texts(r#""say \"hi\"" x"#),
        vec![
            (RawTag::String, r#""say \"hi\"""#),
            (RawTag::Whitespace, " "),
            (RawTag::Ident, "x"),
        ]
    );
}

#[test]
fn unterminated_string_stops_at_newline() {
    assert_eq!(
        scan_texts("\"abc\nx"),
        vec![
            (RawTag::UnterminatedString, "\"abc"),
            (RawTag::Newline, "\n"),
            (RawTag::Ident, "x"),
        ]
    );
    assert_eq!(scan_tags("\"abc"), vec![RawTag::UnterminatedString]);
}

#[test]
fn char_literals() {
    assert_eq!(scan_texts("'a'"), vec![(RawTag::Char, "'a'")]);
    assert_eq!(scan_texts(r"'\''"), vec![(RawTag::Char, r"'\''")]);
    assert_eq!(scan_tags("'a"), vec![RawTag::UnterminatedChar]);
}

#[test]
fn line_comment_keeps_newline() {
    assert_eq!(
        scan_texts("// hi\nx"),
        vec![
            (RawTag::LineComment, "// hi"),
            (RawTag::Newline, "\n"),
            (RawTag::Ident, "x"),
        ]
    );
}

#[test]
fn nested_block_comment() {
    assert_eq!(
        scan_texts("/* a /* b */ c */x"),
        vec![
            (RawTag::BlockComment, "/* a /* b */ c */"),
            (RawTag::Ident, "x"),
        ]
    );
}

#[test]
fn unterminated_block_comment_counts_open_levels() {
    assert_eq!(
        scan_tags("/* /* */"),
        vec![RawTag::UnterminatedBlockComment { open: 1 }]
    );
    assert_eq!(
        scan_tags("/* /* /*"),
        vec![RawTag::UnterminatedBlockComment { open: 3 }]
    );
}

#[test]
fn directives() {
    assert_eq!(
        scan_texts("#import \"a\""),
        vec![
            (RawTag::Directive, "#import"),
            (RawTag::Whitespace, " "),
            (RawTag::String, "\"a\""),
        ]
    );
    assert_eq!(
        scan_texts("# x"),
        vec![
            (RawTag::HashWithoutIdent, "#"),
            (RawTag::Whitespace, " "),
            (RawTag::Ident, "x"),
        ]
    );
}

#[test]
fn invalid_bytes() {
    assert_eq!(scan_tags("$"), vec![RawTag::InvalidByte]);
    assert_eq!(scan_texts("é"), vec![(RawTag::InvalidByte, "é")]);
    assert_eq!(
        scan_tags("a\0b"),
        vec![RawTag::Ident, RawTag::InvalidByte, RawTag::Ident]
    );
}

#[test]
fn all_printable_ascii_produce_tokens() {
    for b in 0x20u8..0x7F {
        let source = (b as char).to_string();
        let tokens = tokenize(&source);
        assert!(!tokens.is_empty(), "byte {b:#x} produced no token");
        let total: u32 = tokens.iter().map(|t| t.len).sum();
        assert_eq!(total, 1, "byte {b:#x}");
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn lengths_cover_source(source in "[ -~\n\t]{0,80}") {
            let total: u32 = tokenize(&source).iter().map(|t| t.len).sum();
            prop_assert_eq!(total as usize, source.len());
        }

        #[test]
        fn every_token_is_nonempty(source in "[ -~\n\t]{0,80}") {
            for tok in tokenize(&source) {
                prop_assert!(tok.len > 0);
            }
        }
    }
}
