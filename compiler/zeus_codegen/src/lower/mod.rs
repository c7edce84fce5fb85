//! Lowering of checked procedures to RISC-V assembly.
//!
//! # Module Structure
//!
//! - `expr`: values into registers, literals, arithmetic
//! - `place`: addresses of field chains, pointer accesses and indexing
//! - `call`: the call sequence on both sides
//! - `stmt`: declarations, assignments and control flow

mod call;
mod expr;
mod place;
mod stmt;

use zeus_check::{CheckedFile, CheckedProgram, ProcEntity, TypeInfo};
use zeus_ir::{
    AstArena, ExprId, ExprKind, FileId, Name, ProcSignature, StmtKind, StmtRange, StringInterner,
    Type,
};

use crate::emitter::{emit, Emitter};
use crate::frame::{Frame, InputLayout, InputLocation, Local, Slot};
use crate::isa::{load_op, Reg};
use crate::register::{self, RegisterBank};
use crate::{CodegenError, Context};

/// A value held in a register.
///
/// Owned operands are temporaries the holder must release; borrowed ones
/// are cached variables or global addresses that stay in the bank.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct Operand {
    pub reg: Reg,
    pub owned: bool,
}

impl Operand {
    fn owned(reg: Reg) -> Self {
        Operand { reg, owned: true }
    }

    fn borrowed(reg: Reg) -> Self {
        Operand { reg, owned: false }
    }
}

/// Claimable registers below which a held operand is parked in the frame
/// instead of staying in the bank. Enough for the non-recursive part of
/// lowering any single operand.
const SPILL_THRESHOLD: usize = 4;

/// Label of a procedure. The entry procedure is `_zeus_main`.
pub(crate) fn proc_label(interner: &StringInterner, name: Name) -> String {
    match interner.lookup(name) {
        "main" => "_zeus_main".to_owned(),
        other => other.to_owned(),
    }
}

/// Label of a pooled string literal.
pub(crate) fn string_label(slot: usize) -> String {
    format!("_L{slot}")
}

/// Lower every procedure defined in one file into its text section.
#[tracing::instrument(level = "debug", skip_all, fields(file = id.index()))]
pub(crate) fn lower_file(ctx: &Context<'_>, id: FileId) -> Result<String, CodegenError> {
    let file = ctx.program.file(id);
    let arena = &file.module.arena;
    let mut out = Emitter::new(id);
    for &item in &file.module.items {
        if let StmtKind::ProcDef { sig, body } = &arena.stmt(item).kind {
            let proc = ctx
                .checked
                .proc(sig.name)
                .ok_or_else(|| CodegenError::UnknownProcedure(ctx.name(sig.name).to_owned()))?;
            ProcLowering::new(ctx, arena, ctx.checked.file(id), &mut out, proc).lower(sig, *body)?;
        }
    }
    Ok(out.take_output())
}

/// State for lowering one procedure body.
pub(crate) struct ProcLowering<'a, 'o> {
    ctx: &'a Context<'a>,
    checked: &'a CheckedProgram,
    arena: &'a AstArena,
    types: &'a CheckedFile,
    out: &'o mut Emitter,
    bank: RegisterBank,
    frame: Frame,
    proc: &'a ProcEntity,
    is_entry: bool,
}

impl<'a, 'o> ProcLowering<'a, 'o> {
    fn new(
        ctx: &'a Context<'a>,
        arena: &'a AstArena,
        types: &'a CheckedFile,
        out: &'o mut Emitter,
        proc: &'a ProcEntity,
    ) -> Self {
        ProcLowering {
            ctx,
            checked: ctx.checked,
            arena,
            types,
            out,
            bank: RegisterBank::new(),
            frame: Frame::new(),
            proc,
            is_entry: ctx.name(proc.name) == "main",
        }
    }

    fn lower(mut self, sig: &ProcSignature, body: StmtRange) -> Result<(), CodegenError> {
        self.check_outputs(self.proc)?;
        let label = proc_label(self.ctx.interner, sig.name);
        tracing::trace!(%label, "lower procedure");
        self.out.line("");
        self.out.label(&label);

        if self.is_entry {
            emit!(self.out, "li {}, {}", Reg::SCRATCH, self.ctx.stack_bytes());
            emit!(self.out, "sub {}, {}, {}", Reg::SP, Reg::SP, Reg::SCRATCH);
            emit!(self.out, "mv {}, {}", Reg::FP, Reg::SP);
        }

        self.bind_inputs(sig)?;
        self.lower_block(body)?;

        let arena = self.arena;
        let returns = arena
            .stmt_list(body)
            .last()
            .is_some_and(|&last| matches!(arena.stmt(last).kind, StmtKind::Return(_)));
        if !returns {
            self.bank.flush(self.out)?;
            self.exit();
        }
        tracing::trace!(%label, frame = self.frame.high_water(), "lowered");
        Ok(())
    }

    /// Give every input a home: register inputs get a slot in the frame and
    /// stay cached in their argument register; stack inputs are named where
    /// the caller put them.
    fn bind_inputs(&mut self, sig: &ProcSignature) -> Result<(), CodegenError> {
        let arena = self.arena;
        let layout = InputLayout::new(&self.proc.inputs);
        let names = arena
            .stmt_list(sig.inputs)
            .iter()
            .filter_map(|&stmt| match &arena.stmt(stmt).kind {
                StmtKind::Decl { targets, .. } => Some(arena.expr_list(*targets)),
                _ => None,
            })
            .flatten();

        for ((&target, &location), &info) in names
            .zip(&layout.locations)
            .zip(&self.proc.inputs)
        {
            let name = self.var_name(target)?;
            match location {
                InputLocation::Register(reg) => {
                    let local = self.frame.declare(name, info);
                    self.bank.bind(reg, local.generation, local.slot, true);
                }
                InputLocation::Stack(offset) => {
                    let slot = Slot::for_value(layout.callee_offset(offset), info);
                    self.frame.bind(name, slot, info);
                }
            }
        }
        Ok(())
    }

    /// Restore the stack pointer in the entry procedure and return.
    fn exit(&mut self) {
        if self.is_entry {
            emit!(self.out, "li {}, {}", Reg::SCRATCH, self.ctx.stack_bytes());
            emit!(self.out, "add {}, {}, {}", Reg::SP, Reg::SP, Reg::SCRATCH);
        }
        emit!(self.out, "ret");
    }

    fn info(&self, id: ExprId) -> Result<TypeInfo, CodegenError> {
        self.types
            .expr(id)
            .ok_or(CodegenError::MissingType(id.raw()))
    }

    fn var_name(&self, id: ExprId) -> Result<Name, CodegenError> {
        match self.arena.expr(id).kind {
            ExprKind::Var { name, .. } => Ok(name),
            _ => Err(CodegenError::Unsupported {
                what: "declaration targets other than names",
            }),
        }
    }

    fn release(&mut self, operand: Operand) {
        if operand.owned {
            self.bank.release(operand.reg);
        }
    }

    /// Allocate a register while keeping `keep` from being evicted.
    fn allocate_keeping(&mut self, keep: &[Operand]) -> Result<Reg, CodegenError> {
        for operand in keep.iter().filter(|operand| !operand.owned) {
            self.bank.lock(operand.reg);
        }
        let reg = self.bank.allocate(self.out);
        for operand in keep.iter().filter(|operand| !operand.owned) {
            self.bank.unlock(operand.reg);
        }
        reg
    }

    /// Keep `held` while `next` evaluates another operand.
    ///
    /// When the bank is nearly exhausted `held` is stored to a hidden slot
    /// first and reloaded into a fresh temporary afterwards, so arbitrarily
    /// deep operands never run out of registers.
    fn hold_across(
        &mut self,
        held: Operand,
        next: impl FnOnce(&mut Self) -> Result<Operand, CodegenError>,
    ) -> Result<(Operand, Operand), CodegenError> {
        if self.bank.available() > SPILL_THRESHOLD {
            self.bank.lock(held.reg);
            let other = next(self);
            self.bank.unlock(held.reg);
            return Ok((held, other?));
        }

        let slot = self.frame.hidden_slot(TypeInfo::builtin(Type::U64));
        tracing::trace!(reg = %held.reg, offset = slot.offset, "spill operand");
        self.store_slot(held.reg, slot)?;
        self.release(held);
        let other = next(self)?;
        let reg = self.allocate_keeping(&[other])?;
        self.load_slot(reg, slot)?;
        Ok((Operand::owned(reg), other))
    }

    /// An owned register holding the same value as `operand`.
    fn make_owned(&mut self, operand: Operand) -> Result<Operand, CodegenError> {
        if operand.owned {
            return Ok(operand);
        }
        let reg = self.allocate_keeping(&[operand])?;
        emit!(self.out, "mv {reg}, {}", operand.reg);
        Ok(Operand::owned(reg))
    }

    /// Load `slot` into `reg`.
    fn load_slot(&mut self, reg: Reg, slot: Slot) -> Result<(), CodegenError> {
        let op = load_op(slot.size, slot.signed)?;
        let operand = self.out.frame_slot(slot.offset);
        emit!(self.out, "{op} {reg}, {operand}");
        Ok(())
    }

    fn store_slot(&mut self, reg: Reg, slot: Slot) -> Result<(), CodegenError> {
        register::store(self.out, reg, slot)
    }

    /// The register caching `local`, loading it on first use.
    fn local_register(&mut self, local: Local) -> Result<Reg, CodegenError> {
        if let Some(reg) = self.bank.find_bound(local.slot.offset) {
            return Ok(reg);
        }
        let reg = self.bank.allocate(self.out)?;
        self.load_slot(reg, local.slot)?;
        self.bank.bind(reg, local.generation, local.slot, false);
        Ok(reg)
    }

    /// Write a cached dirty value back so memory accesses through the
    /// slot's address see it.
    fn sync_slot(&mut self, slot: Slot) -> Result<(), CodegenError> {
        if let Some(reg) = self.bank.find_bound(slot.offset) {
            if let register::RegisterState::Bound {
                generation,
                dirty: true,
                ..
            } = self.bank.state(reg)
            {
                self.store_slot(reg, slot)?;
                self.bank.bind(reg, generation, slot, false);
            }
        }
        Ok(())
    }

    fn push_area(&mut self) {
        self.frame.push_area();
    }

    /// Leave a scope. Its variables are dead, so their registers are
    /// dropped without storing.
    fn pop_area(&mut self) {
        let generation = self.frame.pop_area();
        self.bank.forget_from(generation);
    }
}
