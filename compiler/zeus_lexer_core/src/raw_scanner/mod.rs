//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! The scanner works on a sentinel-terminated [`Cursor`] and never
//! allocates. It does not resolve keywords or decode literals; the cooking
//! layer does that from the token text.
//!
//! Main dispatch covers all 256 byte values. Each arm calls a focused method
//! that advances the cursor and returns the token.

use crate::cursor::Cursor;
use crate::tag::{RawTag, RawToken};

/// Allocation-free scanner. Errors are encoded as [`RawTag`] variants.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> RawScanner<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self { cursor }
    }

    /// Byte offset of the next token.
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Produce the next raw token.
    ///
    /// Returns `RawTag::Eof` with `len == 0` when the source is exhausted,
    /// and keeps returning it on further calls.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        match self.cursor.current() {
            0 => self.zero(start),
            b' ' | b'\t' | b'\r' => self.whitespace(start),
            b'\n' => self.single(start, RawTag::Newline),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start),
            b'0'..=b'9' => self.number(start),
            b'"' => self.quoted(start, b'"', RawTag::String, RawTag::UnterminatedString),
            b'\'' => self.quoted(start, b'\'', RawTag::Char, RawTag::UnterminatedChar),
            b'/' => self.slash_or_comment(start),
            b'#' => self.hash(start),
            b'.' => self.dot(start),
            b'+' => self.single(start, RawTag::Plus),
            b'-' => self.single(start, RawTag::Minus),
            b'*' => self.single(start, RawTag::Star),
            b'%' => self.single(start, RawTag::Percent),
            b'=' => self.single(start, RawTag::Eq),
            b':' => self.single(start, RawTag::Colon),
            b',' => self.single(start, RawTag::Comma),
            b'^' => self.single(start, RawTag::Caret),
            b'(' => self.single(start, RawTag::LParen),
            b')' => self.single(start, RawTag::RParen),
            b'{' => self.single(start, RawTag::LBrace),
            b'}' => self.single(start, RawTag::RBrace),
            b'[' => self.single(start, RawTag::LBracket),
            b']' => self.single(start, RawTag::RBracket),
            b'<' => self.single(start, RawTag::Lt),
            b'>' => self.single(start, RawTag::Gt),
            b'!' => self.single(start, RawTag::Bang),
            b'&' => self.single(start, RawTag::Amp),
            b'|' => self.single(start, RawTag::Pipe),
            b';' => self.single(start, RawTag::Semicolon),
            b'~' => self.single(start, RawTag::Tilde),
            b'?' => self.single(start, RawTag::Question),
            b'@' => self.single(start, RawTag::At),
            // `$`, backtick, backslash, control bytes, DEL and non-ASCII.
            1..=8 | 11..=12 | 14..=31 | b'$' | b'`' | b'\\' | 127..=255 => {
                self.invalid_byte(start)
            }
        }
    }

    #[inline]
    fn token(&self, start: u32, tag: RawTag) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    /// Sentinel at EOF, or a literal NUL inside the content.
    fn zero(&mut self, start: u32) -> RawToken {
        if self.cursor.is_eof() {
            RawToken {
                tag: RawTag::Eof,
                len: 0,
            }
        } else {
            self.cursor.advance();
            self.token(start, RawTag::InvalidByte)
        }
    }

    #[inline]
    fn single(&mut self, start: u32, tag: RawTag) -> RawToken {
        self.cursor.advance();
        self.token(start, tag)
    }

    #[inline]
    fn whitespace(&mut self, start: u32) -> RawToken {
        self.cursor.eat_whitespace();
        self.token(start, RawTag::Whitespace)
    }

    #[inline]
    fn identifier(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        self.token(start, RawTag::Ident)
    }

    // ─── Numbers ───

    /// Digits and `_`. A `.` not followed by another `.` makes the literal a
    /// decimal; a second such point makes it malformed. The whole run is
    /// consumed either way so the error covers the literal.
    fn number(&mut self, start: u32) -> RawToken {
        let mut tag = RawTag::Int;
        self.eat_digits();
        while self.cursor.current() == b'.' && self.cursor.peek() != b'.' {
            tag = if tag == RawTag::Int {
                RawTag::Decimal
            } else {
                RawTag::MultipleDecimalPoints
            };
            self.cursor.advance();
            self.eat_digits();
        }
        self.token(start, tag)
    }

    #[inline]
    fn eat_digits(&mut self) {
        self.cursor.eat_while(|b| b.is_ascii_digit() || b == b'_');
    }

    // ─── Quoted literals ───

    /// String or character literal. A backslash escapes the next byte, so
    /// `\"` does not terminate. Newline or EOF before the closing quote is
    /// an error; the newline is left for the next token.
    fn quoted(&mut self, start: u32, quote: u8, ok: RawTag, unterminated: RawTag) -> RawToken {
        self.cursor.advance();
        loop {
            match self.cursor.skip_to_quote_delim(quote) {
                b'\\' => {
                    self.cursor.advance();
                    if !self.cursor.is_eof() && self.cursor.current() != b'\n' {
                        self.cursor.advance();
                    }
                }
                b'\n' | 0 => return self.token(start, unterminated),
                _ => {
                    // Closing quote.
                    self.cursor.advance();
                    return self.token(start, ok);
                }
            }
        }
    }

    // ─── Comments ───

    fn slash_or_comment(&mut self, start: u32) -> RawToken {
        match self.cursor.peek() {
            b'/' => {
                self.cursor.advance_n(2);
                self.cursor.eat_until_newline_or_eof();
                self.token(start, RawTag::LineComment)
            }
            b'*' => self.block_comment(start),
            _ => self.single(start, RawTag::Slash),
        }
    }

    /// `/* ... */` with nesting tracked by an open-comment counter.
    fn block_comment(&mut self, start: u32) -> RawToken {
        self.cursor.advance_n(2);
        let mut open: u32 = 1;
        loop {
            match self.cursor.skip_to_comment_delim() {
                0 => return self.token(start, RawTag::UnterminatedBlockComment { open }),
                b'/' if self.cursor.peek() == b'*' => {
                    self.cursor.advance_n(2);
                    open += 1;
                }
                b'*' if self.cursor.peek() == b'/' => {
                    self.cursor.advance_n(2);
                    open -= 1;
                    if open == 0 {
                        return self.token(start, RawTag::BlockComment);
                    }
                }
                _ => self.cursor.advance(),
            }
        }
    }

    // ─── Punctuation with lookahead ───

    fn dot(&mut self, start: u32) -> RawToken {
        if self.cursor.peek() != b'.' {
            return self.single(start, RawTag::Dot);
        }
        if self.cursor.peek2() == b'.' {
            self.cursor.advance_n(3);
            self.token(start, RawTag::DotDotDot)
        } else {
            self.cursor.advance_n(2);
            self.token(start, RawTag::DotDot)
        }
    }

    /// `#name` directive. The name is looked up by the cooking layer.
    fn hash(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        if matches!(self.cursor.current(), b'a'..=b'z' | b'A'..=b'Z' | b'_') {
            self.cursor.eat_while(is_ident_continue);
            self.token(start, RawTag::Directive)
        } else {
            self.token(start, RawTag::HashWithoutIdent)
        }
    }

    /// Skip one whole UTF-8 sequence so spans stay on character boundaries.
    fn invalid_byte(&mut self, start: u32) -> RawToken {
        let width = match self.cursor.current() {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        let remaining = self.cursor.source_len() - start;
        self.cursor.advance_n(width.min(remaining));
        self.token(start, RawTag::InvalidByte)
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let tok = self.next_token();
        if tok.tag == RawTag::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

/// 256-byte lookup table for identifier continuation bytes.
/// The sentinel byte (0x00) maps to `false`, terminating loops.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_'
        );
        i += 1;
    }
    table
};

#[inline]
fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}

/// Scan `source` and collect every raw token except the final `Eof`.
pub fn tokenize(source: &str) -> Vec<RawToken> {
    let buf = crate::SourceBuffer::new(source);
    RawScanner::new(buf.cursor()).collect()
}

#[cfg(test)]
mod tests;
