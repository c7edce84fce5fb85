use zeus_diagnostic::Diagnostic;
use zeus_ir::FileId;
use zeus_parse::ParseError;

use super::IntoDiagnostic;

impl IntoDiagnostic for ParseError {
    #[cold]
    fn into_diagnostic(&self, file: FileId) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_location(file, self.span)
    }
}
