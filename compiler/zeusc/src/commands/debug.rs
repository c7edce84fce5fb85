//! Debug commands: `lex` and `parse` for inspecting compiler internals.
//!
//! Both work on a single file and ignore its imports.

use std::path::Path;
use std::process::ExitCode;

use zeus_ir::ast::dump::dump_module;

use super::fail;
use crate::problem::IntoDiagnostic;
use crate::{CompilationContext, CompileOptions};

/// Lex a file and display the token stream.
pub fn lex_file(path: &str, options: &CompileOptions) -> ExitCode {
    let mut ctx = CompilationContext::new(options.clone());
    let Some(file) = ctx.read_source(Path::new(path)) else {
        return fail(&mut ctx);
    };

    match zeus_lexer::lex(ctx.source_text(file)) {
        Ok(tokens) => {
            println!("Tokens for '{path}' ({} tokens):", tokens.len());
            for token in tokens.iter() {
                println!("  {:?} @ {}", token.kind, token.span);
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            ctx.report(error.into_diagnostic(file));
            fail(&mut ctx)
        }
    }
}

/// Parse a file and print its syntax tree.
pub fn parse_file(path: &str, options: &CompileOptions) -> ExitCode {
    let mut ctx = CompilationContext::new(options.clone());
    let Some(file) = ctx.read_source(Path::new(path)) else {
        return fail(&mut ctx);
    };

    let source = ctx.source_text(file);
    let parsed = zeus_lexer::lex(source)
        .map_err(|error| error.into_diagnostic(file))
        .and_then(|tokens| {
            zeus_parse::parse(&tokens, source, ctx.interner())
                .map_err(|error| error.into_diagnostic(file))
        });

    match parsed {
        Ok(module) => {
            println!("Parse result for '{path}':");
            println!("  Items: {}", module.items.len());
            println!("  Imports: {}", module.imports.len());
            println!("  Expressions: {}", module.arena.expr_count());
            println!();
            print!("{}", dump_module(&module, ctx.interner()));
            ExitCode::SUCCESS
        }
        Err(diagnostic) => {
            ctx.report(diagnostic);
            fail(&mut ctx)
        }
    }
}
