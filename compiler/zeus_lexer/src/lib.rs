//! Lexer for Zeus.
//!
//! Produces a flat [`TokenList`] of kinds and spans, or the first
//! [`LexError`]. Newlines are tokens; spaces, tabs, carriage returns and
//! comments are not. The list always ends with a zero-length `Eof`.
//!
//! Literal values are not stored in tokens. The parser decodes them from
//! the source text with the helpers in [`literal`].

mod cooker;
pub mod keywords;
pub mod lex_error;
pub mod literal;

pub use lex_error::{LexError, LexErrorKind};

use zeus_ir::{Span, Token, TokenKind, TokenList};
use zeus_lexer_core::{RawScanner, RawTag, SourceBuffer};

use cooker::TokenCooker;

/// Lex `source` into a token list.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let source_len = u32::try_from(source.len())
        .map_err(|_| LexError::new(Span::DUMMY, LexErrorKind::FileTooLarge))?;

    let buf = SourceBuffer::new(source);
    let mut scanner = RawScanner::new(buf.cursor());
    let cooker = TokenCooker::new(source);
    let mut tokens = TokenList::with_capacity(source.len() / 4 + 1);

    let mut offset = 0u32;
    loop {
        let raw = scanner.next_token();
        if raw.tag == RawTag::Eof {
            break;
        }
        let span = Span::new(offset, offset + raw.len);
        offset += raw.len;
        if let Some(kind) = cooker.cook(raw.tag, span)? {
            tracing::trace!(?kind, %span, "token");
            tokens.push(Token::new(kind, span));
        }
    }

    tokens.push(Token::new(TokenKind::Eof, Span::point(source_len)));
    tracing::debug!(tokens = tokens.len(), "lexed");
    Ok(tokens)
}

#[cfg(test)]
mod tests;
