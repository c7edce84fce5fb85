use zeus_diagnostic::{Diagnostic, ErrorCode};
use zeus_ir::FileId;
use zeus_lexer::{LexError, LexErrorKind};

use super::IntoDiagnostic;

fn lex_code(kind: &LexErrorKind) -> ErrorCode {
    match kind {
        LexErrorKind::InvalidCharacter => ErrorCode::E1001,
        LexErrorKind::UnterminatedString => ErrorCode::E1002,
        LexErrorKind::UnterminatedChar => ErrorCode::E1003,
        LexErrorKind::MultipleDecimalPoints | LexErrorKind::IntOverflow => ErrorCode::E1004,
        LexErrorKind::UnterminatedBlockComment { .. } => ErrorCode::E1005,
        LexErrorKind::HashWithoutIdent => ErrorCode::E1006,
        LexErrorKind::UnknownDirective => ErrorCode::E1007,
        LexErrorKind::InvalidCharLiteral => ErrorCode::E1008,
        LexErrorKind::FileTooLarge => ErrorCode::E9003,
    }
}

impl IntoDiagnostic for LexError {
    #[cold]
    fn into_diagnostic(&self, file: FileId) -> Diagnostic {
        let diagnostic = Diagnostic::error(lex_code(&self.kind)).with_message(self.message());
        match self.kind {
            LexErrorKind::FileTooLarge => diagnostic,
            _ => diagnostic.with_location(file, self.span),
        }
    }
}
