//! Type references: `^*` followed by a type keyword or a structure name.

use crate::{ParseError, Parser};
use zeus_diagnostic::ErrorCode;
use zeus_ir::{TokenKind, Type, TypeRef, TypeRefKind};

impl Parser<'_> {
    pub(crate) fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        let start = self.cursor.current_span();
        let pointer_depth = self.parse_carets()?;
        let kind = self.cursor.current_kind();
        let kind = if let Some(ty) = Type::from_keyword(kind) {
            self.cursor.advance();
            TypeRefKind::Builtin(ty)
        } else if kind == TokenKind::Ident {
            let (name, _) = self.cursor.expect_ident("Expected a type")?;
            TypeRefKind::Named(name)
        } else {
            return Err(self.cursor.error(ErrorCode::E2005, "Expected a type"));
        };
        Ok(TypeRef {
            kind,
            pointer_depth,
            span: self.span_from(start),
        })
    }

    /// Count a run of `^`.
    pub(crate) fn parse_carets(&mut self) -> Result<u8, ParseError> {
        let mut depth: u8 = 0;
        while self.cursor.check(TokenKind::Caret) {
            depth = depth.checked_add(1).ok_or_else(|| {
                self.cursor
                    .error(ErrorCode::E2001, "Too many pointer levels")
            })?;
            self.cursor.advance();
        }
        Ok(depth)
    }
}
