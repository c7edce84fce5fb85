//! Recursive descent parser for Zeus.
//!
//! Produces one [`Module`] per file: an index arena plus the top-level
//! statement list. There is no error recovery; the first [`ParseError`]
//! ends the parse.

mod cursor;
mod error;
mod grammar;
mod snapshot;

pub use cursor::Cursor;
pub use error::ParseError;

use snapshot::ParserSnapshot;
use zeus_ir::{AstArena, Module, Span, StringInterner, TokenList};

/// Parser state for one file.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: AstArena,
    /// Open `(` groups, across nested expressions.
    parens: u32,
    /// `parens` when the innermost expression started.
    paren_base: u32,
    /// First token of the innermost expression, for bracket errors.
    expr_start: Span,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, source: &'a str, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens, source, interner),
            arena: AstArena::with_capacity(source.len()),
            parens: 0,
            paren_base: 0,
            expr_start: Span::DUMMY,
        }
    }

    /// Parse the whole file.
    pub fn parse_module(mut self) -> Result<Module, ParseError> {
        let mut module = Module::new(AstArena::new());
        self.parse_file(&mut module)?;
        module.arena = self.arena;
        Ok(module)
    }

    fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot::new(self.cursor.position(), self.arena.checkpoint(), self.parens)
    }

    /// Rewind the cursor and drop every node allocated since `snapshot`.
    fn restore(&mut self, snapshot: ParserSnapshot) {
        self.cursor.set_position(snapshot.cursor_pos);
        self.arena.rollback(snapshot.arena);
        self.parens = snapshot.parens;
    }

    /// Span from `start` to the end of the last consumed token.
    #[inline]
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }
}

/// Parse one file's tokens.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(
    tokens: &TokenList,
    source: &str,
    interner: &StringInterner,
) -> Result<Module, ParseError> {
    let module = Parser::new(tokens, source, interner).parse_module()?;
    tracing::debug!(
        items = module.items.len(),
        imports = module.imports.len(),
        exprs = module.arena.expr_count(),
        "parsed"
    );
    Ok(module)
}
