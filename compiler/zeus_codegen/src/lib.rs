//! RISC-V code generation for Zeus.
//!
//! Turns a checked program into one assembly text: the header, the data
//! section (pooled strings, then hoisted globals) and the text section with
//! one label per procedure. The entry procedure `main` becomes
//! `_zeus_main`, which reserves the program stack on entry.
//!
//! Files are lowered independently in parallel and concatenated in
//! dependency order.
//!
//! # Module Structure
//!
//! - `isa`: registers and instruction selection
//! - `emitter`: assembly text buffer and labels
//! - `register`: the allocatable bank and its states
//! - `frame`: Areas, slots and input passing
//! - `literal`: literal bit patterns
//! - `lower`: procedure lowering
//! - `data`: header and data section

mod data;
mod emitter;
mod error;
mod frame;
mod isa;
mod literal;
mod lower;
mod register;

pub use error::CodegenError;

use rayon::prelude::*;
use zeus_check::{CheckedProgram, Program};
use zeus_ir::{Name, StringInterner};

/// Stack reserved by `_zeus_main` when neither the source nor the command
/// line says otherwise, in KiB.
pub const DEFAULT_STACK_SIZE_KB: u64 = 64;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CodegenOptions {
    /// Stack reserved by the entry procedure, in KiB.
    pub stack_size_kb: u64,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions {
            stack_size_kb: DEFAULT_STACK_SIZE_KB,
        }
    }
}

/// Everything shared by the per-file lowering jobs.
pub(crate) struct Context<'a> {
    pub program: &'a Program,
    pub checked: &'a CheckedProgram,
    pub interner: &'a StringInterner,
    pub options: CodegenOptions,
}

impl Context<'_> {
    #[inline]
    pub fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    pub fn stack_bytes(&self) -> u64 {
        self.options.stack_size_kb.saturating_mul(1024)
    }
}

/// Generate the assembly for a checked program.
#[tracing::instrument(level = "debug", skip_all, fields(files = program.len()))]
pub fn generate(
    program: &Program,
    checked: &CheckedProgram,
    interner: &StringInterner,
    options: CodegenOptions,
) -> Result<String, CodegenError> {
    let ctx = Context {
        program,
        checked,
        interner,
        options,
    };

    let mut output = data::emit_data(&ctx)?;
    output.push_str(".text\n");

    let texts = checked
        .order
        .par_iter()
        .map(|&id| lower::lower_file(&ctx, id))
        .collect::<Result<Vec<_>, _>>()?;
    for text in texts {
        output.push_str(&text);
    }

    tracing::debug!(bytes = output.len(), "generated");
    Ok(output)
}
