use zeus_codegen::CodegenError;
use zeus_diagnostic::{internal_error, Diagnostic, ErrorCode};
use zeus_ir::FileId;

use super::IntoDiagnostic;

impl IntoDiagnostic for CodegenError {
    /// Code generation runs on checked programs, so an unsupported
    /// construct is a limitation of the backend and everything else is a
    /// compiler bug.
    #[cold]
    fn into_diagnostic(&self, _file: FileId) -> Diagnostic {
        match self {
            CodegenError::Unsupported { .. } | CodegenError::TooManyOutputs { .. } => {
                Diagnostic::error(ErrorCode::E9001).with_message(self.to_string())
            }
            _ => internal_error(self.to_string()),
        }
    }
}
