//! Program header and data section.
//!
//! Pooled string literals come first as `_L<n>: .ascii "..."`, followed
//! by one label per hoisted global sized by its width. String globals hold
//! the address of their pooled literal.

use std::fmt::Write;

use zeus_check::GlobalInit;

use crate::isa::data_directive;
use crate::literal::{literal_bits, Literal};
use crate::lower::string_label;
use crate::{CodegenError, Context};

pub(crate) fn emit_data(ctx: &Context<'_>) -> Result<String, CodegenError> {
    let mut out = String::with_capacity(1024);
    out.push_str(".global _zeus_main\n");
    out.push_str(".data\n");

    for (slot, body) in ctx.checked.strings.iter() {
        let _ = writeln!(
            out,
            "{}: .ascii \"{}\"",
            string_label(slot),
            ctx.name(body)
        );
    }

    for global in &ctx.checked.globals {
        let directive = data_directive(global.info.size_bytes())?;
        let name = ctx.name(global.name);
        let _ = match global.init {
            GlobalInit::Str(slot) => writeln!(out, "{name}: {directive} {}", string_label(slot)),
            GlobalInit::Int(value) => writeln!(
                out,
                "{name}: {directive} {}",
                literal_bits(Literal::Int(value), global.info)
            ),
            GlobalInit::Decimal(value) => writeln!(
                out,
                "{name}: {directive} {}",
                literal_bits(Literal::Decimal(value), global.info)
            ),
            GlobalInit::Char(value) => writeln!(
                out,
                "{name}: {directive} {}",
                literal_bits(Literal::Char(value), global.info)
            ),
        };
    }
    Ok(out)
}
