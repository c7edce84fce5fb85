use zeus_check::{CheckError, CheckErrorKind};
use zeus_diagnostic::Diagnostic;
use zeus_ir::FileId;

use super::IntoDiagnostic;

impl IntoDiagnostic for CheckError {
    /// Checker errors know their own file; `_file` is ignored.
    #[cold]
    fn into_diagnostic(&self, _file: FileId) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_location(self.file, self.span);
        match self.kind {
            CheckErrorKind::ExplicitCast => {
                diagnostic.with_note("the value is wider than the destination type")
            }
            CheckErrorKind::ImportCycle { .. } => {
                diagnostic.with_note("files may not import each other in a cycle")
            }
            _ => diagnostic,
        }
    }
}
