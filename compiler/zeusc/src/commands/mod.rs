//! Command handlers for the `zeus` binary.
//!
//! Each handler renders its own diagnostics and returns the process exit
//! code.

mod check;
mod compile;
mod debug;

pub use check::check_file;
pub use compile::compile_file;
pub use debug::{lex_file, parse_file};

use std::process::ExitCode;

use crate::CompilationContext;

/// Render whatever stopped the run and fail.
fn fail(ctx: &mut CompilationContext) -> ExitCode {
    ctx.emit_to_stderr();
    ExitCode::FAILURE
}
