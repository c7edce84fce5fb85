//! The `check` command: load and check a program without generating code.

use std::path::Path;
use std::process::ExitCode;

use super::fail;
use crate::{CompilationContext, CompileOptions};

pub fn check_file(path: &str, options: &CompileOptions) -> ExitCode {
    let mut ctx = CompilationContext::new(options.clone());
    let Some(program) = ctx.load(Path::new(path)) else {
        return fail(&mut ctx);
    };
    let Some(checked) = ctx.check(&program) else {
        return fail(&mut ctx);
    };

    println!(
        "OK: {path} ({} files, {} procedures, {} structures, {} globals)",
        program.len(),
        checked.procs.len(),
        checked.structs.len(),
        checked.globals.len()
    );
    ExitCode::SUCCESS
}
