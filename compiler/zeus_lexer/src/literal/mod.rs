//! Literal decoding shared by the lexer and the parser.
//!
//! Tokens carry no values; both stages decode from the token's source text
//! with these helpers so they always agree.

/// Parse decimal integer text, skipping `_` separators. `None` on overflow
/// or a non-digit byte.
#[inline]
pub fn parse_int(text: &str) -> Option<u64> {
    let mut result: u64 = 0;
    let mut digits = 0;
    for b in text.bytes() {
        if b == b'_' {
            continue;
        }
        if !b.is_ascii_digit() {
            return None;
        }
        digits += 1;
        result = result.checked_mul(10)?;
        result = result.checked_add(u64::from(b - b'0'))?;
    }
    (digits > 0).then_some(result)
}

/// Parse decimal text (`1.5`, `1_000.25`, `3.`). Allocates only when
/// separators are present.
#[inline]
pub fn parse_decimal(text: &str) -> Option<f64> {
    if text.contains('_') {
        text.replace('_', "").parse().ok()
    } else {
        text.parse().ok()
    }
}

/// Strip the surrounding quotes of a string or character token.
#[inline]
pub fn quoted_body(text: &str) -> &str {
    let inner = text.strip_prefix(['"', '\'']).unwrap_or(text);
    inner.strip_suffix(['"', '\'']).unwrap_or(inner)
}

/// Decode a character literal body (without quotes): one byte, or one of
/// the escapes `\n \t \r \0 \\ \' \"`.
pub fn decode_char(body: &str) -> Option<u8> {
    match body.as_bytes() {
        [b'\\', escaped] => decode_escape(*escaped),
        [byte] if byte.is_ascii() && *byte != b'\\' => Some(*byte),
        _ => None,
    }
}

/// Byte value of the escape `\<escaped>`.
#[inline]
pub fn decode_escape(escaped: u8) -> Option<u8> {
    match escaped {
        b'n' => Some(b'\n'),
        b't' => Some(b'\t'),
        b'r' => Some(b'\r'),
        b'0' => Some(0),
        b'\\' => Some(b'\\'),
        b'\'' => Some(b'\''),
        b'"' => Some(b'"'),
        _ => None,
    }
}
