//! Grammar Modules
//!
//! Each module extends `Parser` with methods for one family of productions:
//!
//! - [`directive`]: `#import` and `#stack_size` at file scope
//! - [`expr`]: expressions, with precedence fixed by rotation
//! - [`item`]: `name :: struct` and `name :: proc`
//! - [`stmt`]: statements and bodies
//! - [`ty`]: type references
//!
//! Statements are newline terminated. A body is `{ ... }` or `:` followed
//! by exactly one statement.

mod directive;
mod expr;
mod item;
mod stmt;
mod ty;

use crate::{ParseError, Parser};
use zeus_diagnostic::ErrorCode;
use zeus_ir::{Module, StmtRange, TokenKind};

impl Parser<'_> {
    /// Top level: directives and statements until `Eof`.
    pub(crate) fn parse_file(&mut self, module: &mut Module) -> Result<(), ParseError> {
        self.cursor.skip_newlines();
        while !self.cursor.is_at_end() {
            match self.cursor.current_kind() {
                TokenKind::PoundImport => {
                    let import = self.parse_import()?;
                    module.imports.push(import);
                }
                TokenKind::PoundStackSize => {
                    module.stack_size = Some(self.parse_stack_size()?);
                }
                _ => {
                    let stmt = self.parse_statement()?;
                    module.items.push(stmt);
                }
            }
            self.end_statement()?;
        }
        Ok(())
    }

    /// `{ stmt* }` or `: stmt`.
    pub(crate) fn parse_body(&mut self) -> Result<StmtRange, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::LBrace => {
                let open = self.cursor.advance();
                self.cursor.skip_newlines();
                let mut stmts = Vec::new();
                while !self.cursor.check(TokenKind::RBrace) {
                    if self.cursor.is_at_end() {
                        return Err(ParseError::new(
                            ErrorCode::E2003,
                            "Expected closing '}'",
                            open.span,
                        ));
                    }
                    stmts.push(self.parse_statement()?);
                    self.end_statement()?;
                }
                self.cursor.advance();
                Ok(self.arena.alloc_stmt_list(stmts))
            }
            TokenKind::Colon => {
                self.cursor.advance();
                let stmt = self.parse_statement()?;
                Ok(self.arena.alloc_stmt_list([stmt]))
            }
            _ => Err(self
                .cursor
                .error(ErrorCode::E2006, "Expected '{' or ':'")),
        }
    }

    /// After a statement: newlines, or the end of the enclosing body.
    fn end_statement(&mut self) -> Result<(), ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Newline => {
                self.cursor.skip_newlines();
                Ok(())
            }
            TokenKind::Eof | TokenKind::RBrace => Ok(()),
            _ => Err(self
                .cursor
                .error(ErrorCode::E2001, "Expected a newline after the statement")),
        }
    }
}
