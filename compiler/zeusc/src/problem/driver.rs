use zeus_diagnostic::{internal_error, Diagnostic, ErrorCode};
use zeus_ir::FileId;

use super::IntoDiagnostic;
use crate::DriverError;

impl IntoDiagnostic for DriverError {
    /// Driver errors carry no span. The loader attaches the `#import`
    /// location itself.
    #[cold]
    fn into_diagnostic(&self, _file: FileId) -> Diagnostic {
        match self {
            DriverError::Read { .. } | DriverError::Write { .. } => {
                Diagnostic::error(ErrorCode::E9003).with_message(self.to_string())
            }
            DriverError::Import { .. } => {
                Diagnostic::error(ErrorCode::E9004).with_message(self.to_string())
            }
            DriverError::PoolStopped => internal_error(self.to_string()),
        }
    }
}
