//! State shared by the stages of one compilation.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use zeus_check::{CheckedProgram, Program};
use zeus_codegen::{CodegenOptions, DEFAULT_STACK_SIZE_KB};
use zeus_diagnostic::queue::too_many_errors;
use zeus_diagnostic::{
    Diagnostic, DiagnosticConfig, DiagnosticEmitter, DiagnosticQueue, SourceMap, TerminalEmitter,
};
use zeus_ir::FileId;

use crate::load::load_program;
use crate::problem::IntoDiagnostic;
use crate::{CompileOptions, DriverError};

/// Interner, loaded sources and queued diagnostics for one run.
///
/// Each stage method returns `None` after queueing the diagnostic that
/// stopped it; [`emit_diagnostics`](Self::emit_diagnostics) renders them.
pub struct CompilationContext {
    options: CompileOptions,
    interner: Arc<zeus_ir::StringInterner>,
    sources: SourceMap,
    diagnostics: DiagnosticQueue,
}

impl CompilationContext {
    pub fn new(options: CompileOptions) -> Self {
        CompilationContext {
            options,
            interner: Arc::new(zeus_ir::StringInterner::new()),
            sources: SourceMap::new(),
            diagnostics: DiagnosticQueue::with_config(DiagnosticConfig::default()),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn interner(&self) -> &zeus_ir::StringInterner {
        &self.interner
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    pub fn diagnostics(&self) -> &DiagnosticQueue {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(code = %diagnostic.code, message = %diagnostic.message, "diagnostic");
        self.diagnostics.add(diagnostic);
    }

    /// Read a single file without following its imports.
    pub fn read_source(&mut self, path: &Path) -> Option<FileId> {
        match std::fs::read_to_string(path) {
            Ok(content) => Some(self.sources.add(path, content)),
            Err(source) => {
                let error = DriverError::Read {
                    path: path.to_path_buf(),
                    source,
                };
                self.report(error.into_diagnostic(FileId::ENTRY));
                None
            }
        }
    }

    /// Source text of a registered file.
    pub fn source_text(&self, file: FileId) -> &str {
        self.sources.get(file).map_or("", |source| source.content())
    }

    /// Load the entry file and all of its imports.
    ///
    /// Replaces any previously loaded sources, since source ids must match
    /// the new program's file ids.
    pub fn load(&mut self, entry: &Path) -> Option<Program> {
        self.sources = SourceMap::new();
        match load_program(entry, &self.interner, self.options.jobs, &mut self.sources) {
            Ok(program) => Some(program),
            Err(diagnostic) => {
                self.report(diagnostic);
                None
            }
        }
    }

    pub fn check(&mut self, program: &Program) -> Option<CheckedProgram> {
        match zeus_check::check_program(program, &self.interner) {
            Ok(checked) => Some(checked),
            Err(error) => {
                self.report(error.into_diagnostic(error.file));
                None
            }
        }
    }

    /// Program stack in KiB: the command line wins over the entry file's
    /// `#stack_size`, which wins over the default.
    pub fn stack_size_kb(&self, program: &Program) -> u64 {
        let directive = program
            .files
            .first()
            .and_then(|entry| entry.module.stack_size)
            .map(|(size, _)| size);
        self.options
            .stack_size
            .or(directive)
            .unwrap_or(DEFAULT_STACK_SIZE_KB)
    }

    pub fn generate(&mut self, program: &Program, checked: &CheckedProgram) -> Option<String> {
        let options = CodegenOptions {
            stack_size_kb: self.stack_size_kb(program),
        };
        match zeus_codegen::generate(program, checked, &self.interner, options) {
            Ok(asm) => Some(asm),
            Err(error) => {
                self.report(error.into_diagnostic(FileId::ENTRY));
                None
            }
        }
    }

    /// The whole pipeline, from the entry path to assembly text.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn compile(&mut self, entry: &Path) -> Option<String> {
        let program = self.load(entry)?;
        let checked = self.check(&program)?;
        self.generate(&program, &checked)
    }

    /// Render and clear the queued diagnostics, most recent first.
    ///
    /// Returns the number of errors rendered.
    pub fn emit_diagnostics<W: Write>(&mut self, writer: W, is_tty: bool) -> usize {
        let dropped = self.diagnostics.dropped_count();
        let limit = DiagnosticConfig::default().error_limit;
        let mut diagnostics = self.diagnostics.flush();
        if dropped > 0 {
            diagnostics.push(too_many_errors(limit, dropped));
        }
        let errors = diagnostics.iter().filter(|diag| diag.is_error()).count();
        let warnings = diagnostics.len() - errors;

        let mut emitter = TerminalEmitter::with_color_mode(writer, self.options.color, is_tty)
            .with_sources(&self.sources);
        emitter.emit_all(&diagnostics);
        if !diagnostics.is_empty() {
            emitter.emit_summary(errors, warnings);
        }
        emitter.flush();
        errors
    }

    /// [`emit_diagnostics`](Self::emit_diagnostics) to stderr.
    pub fn emit_to_stderr(&mut self) -> usize {
        let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
        self.emit_diagnostics(std::io::stderr(), is_tty)
    }
}

#[cfg(test)]
mod tests;
