//! The `compile` command: the whole pipeline, written to a file.

use std::path::Path;
use std::process::ExitCode;

use zeus_ir::FileId;

use super::fail;
use crate::problem::IntoDiagnostic;
use crate::{CompilationContext, CompileOptions, DriverError};

/// Compile `input` and write the assembly to `options.output`.
///
/// Nothing is written when any stage fails.
pub fn compile_file(input: &str, options: &CompileOptions) -> ExitCode {
    let mut ctx = CompilationContext::new(options.clone());
    let Some(asm) = ctx.compile(Path::new(input)) else {
        return fail(&mut ctx);
    };

    if let Err(source) = std::fs::write(&options.output, asm) {
        let error = DriverError::Write {
            path: options.output.clone(),
            source,
        };
        ctx.report(error.into_diagnostic(FileId::ENTRY));
        return fail(&mut ctx);
    }
    tracing::info!(output = %options.output.display(), "assembly written");
    ExitCode::SUCCESS
}
