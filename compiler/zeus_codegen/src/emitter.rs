//! Assembly text buffer.
//!
//! The `Emitter` owns the output of one file's text section: instructions,
//! labels and the per-file label counter.

use std::fmt::{self, Write};

use zeus_ir::FileId;

use crate::isa::{fits_imm12, Reg};

/// Emit one instruction line: `emit!(out, "li {}, {}", reg, value)`.
macro_rules! emit {
    ($out:expr, $($arg:tt)*) => {
        $out.instruction(format_args!($($arg)*))
    };
}
pub(crate) use emit;

/// Output buffer for generated assembly.
pub struct Emitter {
    output: String,
    file: FileId,
    /// Counter for unique local labels.
    label_counter: u32,
}

impl Emitter {
    pub fn new(file: FileId) -> Self {
        Self {
            output: String::with_capacity(4096),
            file,
            label_counter: 0,
        }
    }

    /// A fresh local label, unique across the program: `.L<file>_<n>`.
    pub fn fresh_label(&mut self) -> String {
        let n = self.label_counter;
        self.label_counter += 1;
        format!(".L{}_{n}", self.file.index())
    }

    /// Write an indented instruction line.
    pub fn instruction(&mut self, args: fmt::Arguments<'_>) {
        self.output.push_str("    ");
        // Writing into a String cannot fail.
        let _ = self.output.write_fmt(args);
        self.output.push('\n');
    }

    /// Write `label:` on its own line.
    pub fn label(&mut self, label: &str) {
        self.output.push_str(label);
        self.output.push_str(":\n");
    }

    /// Write a line verbatim.
    pub fn line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    /// Memory operand for `offset(x5)`.
    ///
    /// Offsets outside the 12-bit immediate range are materialized in the
    /// scratch register first, so the operand is only valid for the next
    /// instruction.
    pub fn frame_slot(&mut self, offset: i64) -> String {
        if fits_imm12(offset) {
            return format!("{offset}({})", Reg::FP);
        }
        emit!(self, "li {}, {offset}", Reg::SCRATCH);
        emit!(self, "add {}, {}, {}", Reg::SCRATCH, Reg::SCRATCH, Reg::FP);
        format!("0({})", Reg::SCRATCH)
    }

    /// `dest = src + offset`, going through the scratch register when the
    /// offset does not fit an immediate.
    pub fn add_immediate(&mut self, dest: Reg, src: Reg, offset: i64) {
        if fits_imm12(offset) {
            emit!(self, "addi {dest}, {src}, {offset}");
        } else {
            emit!(self, "li {}, {offset}", Reg::SCRATCH);
            emit!(self, "add {dest}, {src}, {}", Reg::SCRATCH);
        }
    }

    /// Get the generated output.
    #[cfg(test)]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Take the generated output, leaving an empty buffer.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
