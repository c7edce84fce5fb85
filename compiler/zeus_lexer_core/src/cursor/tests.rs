use crate::SourceBuffer;

#[test]
fn current_and_peeks() {
    let buf = SourceBuffer::new("abc");
    let cursor = buf.cursor();
    assert_eq!(cursor.current(), b'a');
    assert_eq!(cursor.peek(), b'b');
    assert_eq!(cursor.peek2(), b'c');
}

#[test]
fn peeks_past_end_return_sentinel() {
    let buf = SourceBuffer::new("a");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.peek(), 0);
    cursor.advance();
    assert!(cursor.is_eof());
    assert_eq!(cursor.current(), 0);
    assert_eq!(cursor.peek2(), 0);
}

#[test]
fn interior_zero_is_not_eof() {
    let buf = SourceBuffer::new("a\0b");
    let mut cursor = buf.cursor();
    cursor.advance();
    assert_eq!(cursor.current(), 0);
    assert!(!cursor.is_eof());
}

#[test]
fn eat_while_stops_at_eof() {
    let buf = SourceBuffer::new("12_3");
    let mut cursor = buf.cursor();
    cursor.eat_while(|b| b.is_ascii_digit() || b == b'_');
    assert!(cursor.is_eof());
    assert_eq!(cursor.slice_from(0), "12_3");
}

#[test]
fn whitespace_includes_carriage_return() {
    let buf = SourceBuffer::new(" \t\r\nx");
    let mut cursor = buf.cursor();
    cursor.eat_whitespace();
    assert_eq!(cursor.current(), b'\n');
    assert_eq!(cursor.pos(), 3);
}

#[test]
fn line_skip_stops_before_newline() {
    let buf = SourceBuffer::new("// note\nx");
    let mut cursor = buf.cursor();
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.pos(), 7);
    assert_eq!(cursor.current(), b'\n');
}

#[test]
fn line_skip_without_newline_reaches_eof() {
    let buf = SourceBuffer::new("// tail");
    let mut cursor = buf.cursor();
    cursor.eat_until_newline_or_eof();
    assert!(cursor.is_eof());
}

#[test]
fn quote_skip_finds_escape_before_quote() {
    let buf = SourceBuffer::new("ab\\\"c\"");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_quote_delim(b'"'), b'\\');
    assert_eq!(cursor.pos(), 2);
    cursor.advance_n(2);
    assert_eq!(cursor.skip_to_quote_delim(b'"'), b'"');
    assert_eq!(cursor.pos(), 5);
}

#[test]
fn quote_skip_hits_newline_or_eof() {
    let buf = SourceBuffer::new("abc\n'");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_quote_delim(b'\''), b'\n');
    let buf = SourceBuffer::new("abc");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_quote_delim(b'\''), 0);
    assert!(cursor.is_eof());
}

#[test]
fn comment_skip_finds_slash_or_star() {
    let buf = SourceBuffer::new("text * more /");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_comment_delim(), b'*');
    assert_eq!(cursor.pos(), 5);
    cursor.advance();
    assert_eq!(cursor.skip_to_comment_delim(), b'/');
    cursor.advance();
    assert_eq!(cursor.skip_to_comment_delim(), 0);
}

#[test]
fn slice_clamps_to_content() {
    let buf = SourceBuffer::new("hello");
    let cursor = buf.cursor();
    assert_eq!(cursor.slice(1, 4), "ell");
    assert_eq!(cursor.slice(3, 99), "lo");
}
