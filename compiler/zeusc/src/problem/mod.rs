//! Conversion of stage errors into diagnostics.
//!
//! Every stage reports its first failure as a plain error value. The
//! driver turns it into a [`Diagnostic`] located in the file being
//! processed and queues it for the terminal emitter.

mod check;
mod codegen;
mod driver;
mod lex;
mod parse;

use zeus_diagnostic::Diagnostic;
use zeus_ir::FileId;

/// Error values that can be rendered for the user.
pub trait IntoDiagnostic {
    /// `file` is where the failing stage was working. Errors that carry
    /// their own file ignore it.
    fn into_diagnostic(&self, file: FileId) -> Diagnostic;
}
