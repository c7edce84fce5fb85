//! Statements and control flow.
//!
//! Registers are flushed before every branch and label so every path into
//! a label agrees on what lives in memory.

use zeus_check::TypeInfo;
use zeus_ir::{ExprId, ExprKind, ExprRange, ForKind, RangeLoop, StmtId, StmtKind, StmtRange, Type};
use zeus_stack::ensure_sufficient_stack;

use super::{Operand, ProcLowering};
use crate::emitter::emit;
use crate::frame::{offset_of, Local};
use crate::isa::{fits_imm12, store_op, Reg};
use crate::CodegenError;

impl ProcLowering<'_, '_> {
    pub(super) fn lower_block(&mut self, body: StmtRange) -> Result<(), CodegenError> {
        let arena = self.arena;
        for &stmt in arena.stmt_list(body) {
            self.lower_stmt(stmt)?;
        }
        Ok(())
    }

    /// Lower a block in its own Area.
    fn lower_scoped_block(&mut self, body: StmtRange) -> Result<(), CodegenError> {
        self.push_area();
        let result = self.lower_block(body);
        self.pop_area();
        result
    }

    fn lower_stmt(&mut self, id: StmtId) -> Result<(), CodegenError> {
        ensure_sufficient_stack(|| self.lower_stmt_inner(id))
    }

    fn lower_stmt_inner(&mut self, id: StmtId) -> Result<(), CodegenError> {
        let arena = self.arena;
        let stmt = arena.stmt(id);
        tracing::trace!(kind = stmt.kind.name(), span = %stmt.span, "lower statement");
        match &stmt.kind {
            StmtKind::Decl { targets, init, .. } => self.lower_decl(*targets, *init),
            StmtKind::Assign { targets, value } => self.lower_assign(*targets, *value),
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => self.lower_if(*cond, *then_body, *else_body),
            StmtKind::For { kind, body } => match kind {
                ForKind::Forever => self.lower_forever(*body),
                ForKind::While { cond } => self.lower_while(*cond, *body),
                ForKind::Range(range) => self.lower_range(id, range, *body),
            },
            StmtKind::Return(values) => self.lower_return(*values),
            StmtKind::Expr(expr) => {
                if let ExprKind::Call { name, args } = arena.expr(*expr).kind {
                    self.lower_call(name, args)?;
                } else {
                    let value = self.lower_expr(*expr)?;
                    self.release(value);
                }
                Ok(())
            }
            // Layout lives in the structure table; nested procedures are
            // rejected by the checker.
            StmtKind::Struct { .. } | StmtKind::ProcDef { .. } | StmtKind::ProcDecl(_) => Ok(()),
        }
    }

    fn lower_decl(&mut self, targets: ExprRange, init: Option<ExprId>) -> Result<(), CodegenError> {
        let arena = self.arena;
        let targets = arena.expr_list(targets);
        if let (Some(init), [_, _, ..]) = (init, targets) {
            let ExprKind::Call { name, args } = arena.expr(init).kind else {
                return Err(CodegenError::Unsupported {
                    what: "multiple targets without a call",
                });
            };
            let results = self.lower_call(name, args)?;
            for (&target, &(slot, _)) in targets.iter().zip(&results) {
                let local = self.declare_target(target)?;
                let reg = self.bank.allocate(self.out)?;
                self.load_slot(reg, slot)?;
                self.store_slot(reg, local.slot)?;
                self.bank.bind(reg, local.generation, local.slot, false);
            }
            return Ok(());
        }

        for &target in targets {
            let local = self.declare_target(target)?;
            if local.info.is_struct_value() {
                self.initialize_struct(local, init)?;
                continue;
            }
            let value = match init {
                Some(init) => self.lower_value(init, local.info)?,
                None => self.constant(0)?,
            };
            self.store_slot(value.reg, local.slot)?;
            if value.owned {
                self.bank.bind(value.reg, local.generation, local.slot, false);
            }
        }
        Ok(())
    }

    fn declare_target(&mut self, target: ExprId) -> Result<Local, CodegenError> {
        let name = self.var_name(target)?;
        let info = self.info(target)?;
        Ok(self.frame.declare(name, info))
    }

    /// Zero, member-wise initialize or copy a structure value into its slot.
    fn initialize_struct(&mut self, local: Local, init: Option<ExprId>) -> Result<(), CodegenError> {
        let arena = self.arena;
        match init.map(|init| (init, &arena.expr(init).kind)) {
            None => {
                let mut done = 0;
                let size = local.slot.size;
                while done < size {
                    let chunk = [8, 4, 2, 1]
                        .into_iter()
                        .find(|&chunk| size - done >= chunk)
                        .unwrap_or(1);
                    let op = store_op(chunk)?;
                    let operand = self.out.frame_slot(local.slot.offset + offset_of(done));
                    emit!(self.out, "{op} {}, {operand}", Reg::ZERO);
                    done += chunk;
                }
                Ok(())
            }
            Some((_, ExprKind::InitList(elements))) => {
                let dest = self.slot_address(local.slot.offset)?;
                self.store_members(dest, local.info, *elements)
            }
            Some((init, _)) => {
                let source = self.place_address(init, None)?;
                self.bank.lock(source.reg);
                let dest = self.slot_address(local.slot.offset);
                self.bank.unlock(source.reg);
                self.copy_bytes(source, dest?, local.slot.size)
            }
        }
    }

    /// Store an initializer list member by member into the structure at
    /// `dest`. Consumes `dest`.
    fn store_members(
        &mut self,
        dest: Operand,
        info: TypeInfo,
        elements: ExprRange,
    ) -> Result<(), CodegenError> {
        let arena = self.arena;
        let checked = self.checked;
        let Some(id) = info.ty.struct_id() else {
            return Err(CodegenError::Unsupported {
                what: "initializer lists for non-structures",
            });
        };
        let members = &checked.structs.get(id).members;
        for (&element, member) in arena.expr_list(elements).iter().zip(members) {
            let offset = offset_of(member.offset_bits / 8);
            if member.info.is_struct_value() {
                self.bank.lock(dest.reg);
                let source = self.place_address(element, None);
                let target = self.allocate_keeping(&[dest]);
                self.bank.unlock(dest.reg);
                let (source, target) = (source?, target?);
                self.out.add_immediate(target, dest.reg, offset);
                self.copy_bytes(source, Operand::owned(target), member.info.size_bytes())?;
                continue;
            }
            self.bank.lock(dest.reg);
            let value = self.lower_value(element, member.info);
            self.bank.unlock(dest.reg);
            let value = value?;
            let op = store_op(member.info.size_bytes())?;
            if fits_imm12(offset) {
                emit!(self.out, "{op} {}, {offset}({})", value.reg, dest.reg);
            } else {
                self.out.add_immediate(Reg::SCRATCH, dest.reg, offset);
                emit!(self.out, "{op} {}, 0({})", value.reg, Reg::SCRATCH);
            }
            self.release(value);
        }
        self.release(dest);
        Ok(())
    }

    fn lower_assign(&mut self, targets: ExprRange, value: ExprId) -> Result<(), CodegenError> {
        let arena = self.arena;
        let targets = arena.expr_list(targets);
        let [target] = targets else {
            let ExprKind::Call { name, args } = arena.expr(value).kind else {
                return Err(CodegenError::Unsupported {
                    what: "multiple targets without a call",
                });
            };
            let results = self.lower_call(name, args)?;
            for (&target, &(slot, _)) in targets.iter().zip(&results) {
                let reg = self.bank.allocate(self.out)?;
                self.load_slot(reg, slot)?;
                self.assign_to(target, Operand::owned(reg))?;
            }
            return Ok(());
        };

        let info = self.info(*target)?;
        if info.is_struct_value() {
            let dest = self.place_address(*target, None)?;
            if let ExprKind::InitList(elements) = arena.expr(value).kind {
                return self.store_members(dest, info, elements);
            }
            self.bank.lock(dest.reg);
            let source = self.place_address(value, None);
            self.bank.unlock(dest.reg);
            return self.copy_bytes(source?, dest, info.size_bytes());
        }

        let value = self.lower_value(value, info)?;
        self.assign_to(*target, value)
    }

    /// Move a computed value into a place. Locals keep the value in their
    /// register and are marked dirty; everything else is stored directly.
    fn assign_to(&mut self, target: ExprId, value: Operand) -> Result<(), CodegenError> {
        let arena = self.arena;
        if let ExprKind::Var { name, deref: 0 } = arena.expr(target).kind {
            if let Some(local) = self.frame.lookup(name) {
                match self.bank.find_bound(local.slot.offset) {
                    Some(reg) => {
                        if reg != value.reg {
                            emit!(self.out, "mv {reg}, {}", value.reg);
                            self.release(value);
                        }
                        self.bank.mark_dirty(reg);
                    }
                    None if value.owned => {
                        self.bank.bind(value.reg, local.generation, local.slot, true);
                    }
                    None => {
                        let reg = self.allocate_keeping(&[value])?;
                        emit!(self.out, "mv {reg}, {}", value.reg);
                        self.bank.bind(reg, local.generation, local.slot, true);
                    }
                }
                return Ok(());
            }
        }
        let info = self.info(target)?;
        self.store_to_place(target, value, info)
    }

    fn lower_if(
        &mut self,
        cond: ExprId,
        then_body: StmtRange,
        else_body: StmtRange,
    ) -> Result<(), CodegenError> {
        let cond = self.lower_expr(cond)?;
        self.bank.flush(self.out)?;
        let else_label = self.out.fresh_label();
        emit!(self.out, "beqz {}, {else_label}", cond.reg);
        self.release(cond);

        self.lower_scoped_block(then_body)?;
        self.bank.flush(self.out)?;
        if else_body.is_empty() {
            self.out.label(&else_label);
            return Ok(());
        }

        let end_label = self.out.fresh_label();
        emit!(self.out, "j {end_label}");
        self.out.label(&else_label);
        self.lower_scoped_block(else_body)?;
        self.bank.flush(self.out)?;
        self.out.label(&end_label);
        Ok(())
    }

    fn lower_forever(&mut self, body: StmtRange) -> Result<(), CodegenError> {
        self.bank.flush(self.out)?;
        let top = self.out.fresh_label();
        self.out.label(&top);
        self.lower_scoped_block(body)?;
        self.bank.flush(self.out)?;
        emit!(self.out, "j {top}");
        Ok(())
    }

    fn lower_while(&mut self, cond: ExprId, body: StmtRange) -> Result<(), CodegenError> {
        self.bank.flush(self.out)?;
        let top = self.out.fresh_label();
        let end = self.out.fresh_label();
        self.out.label(&top);
        let cond = self.lower_expr(cond)?;
        self.bank.flush(self.out)?;
        emit!(self.out, "beqz {}, {end}", cond.reg);
        self.release(cond);

        self.lower_scoped_block(body)?;
        self.bank.flush(self.out)?;
        emit!(self.out, "j {top}");
        self.out.label(&end);
        Ok(())
    }

    /// `for i := start ... end .. step`: runs while `i < end`, the end is
    /// evaluated once, and the step defaults to one. Pointer iterators
    /// step in elements.
    fn lower_range(
        &mut self,
        id: StmtId,
        range: &RangeLoop,
        body: StmtRange,
    ) -> Result<(), CodegenError> {
        let iter_info = self
            .types
            .range_iter(id)
            .ok_or(CodegenError::MissingType(range.start.raw()))?;
        let counter = if iter_info.is_pointer() {
            TypeInfo::builtin(Type::S64)
        } else {
            iter_info
        };
        let scale = if iter_info.is_pointer() {
            self.pointee_size(iter_info)
        } else {
            1
        };

        self.push_area();
        let iter = self.frame.declare(range.iter, iter_info);
        let start = self.lower_value(range.start, iter_info)?;
        self.store_slot(start.reg, iter.slot)?;
        self.release(start);

        let end_slot = self.frame.hidden_slot(iter_info);
        let end = self.lower_value(range.end, iter_info)?;
        self.store_slot(end.reg, end_slot)?;
        self.release(end);

        let arena = self.arena;
        let step = match range.step.map(|step| (step, &arena.expr(step).kind)) {
            None => Step::Immediate(offset_of(scale)),
            Some((_, &ExprKind::Int(value))) => match i64::try_from(value) {
                Ok(value) => Step::Immediate(value.saturating_mul(offset_of(scale))),
                Err(_) => return Err(CodegenError::Unsupported { what: "loop steps this large" }),
            },
            Some((step, _)) => {
                let slot = self.frame.hidden_slot(counter);
                let value = self.lower_value(step, counter)?;
                self.store_slot(value.reg, slot)?;
                self.release(value);
                Step::Slot(slot)
            }
        };

        self.bank.flush(self.out)?;
        let top = self.out.fresh_label();
        let exit = self.out.fresh_label();
        self.out.label(&top);
        let current = self.local_register(iter)?;
        self.bank.lock(current);
        let limit = self.bank.allocate(self.out);
        self.bank.unlock(current);
        let limit = limit?;
        self.load_slot(limit, end_slot)?;
        self.bank.flush(self.out)?;
        let branch = if end_slot.signed { "bge" } else { "bgeu" };
        emit!(self.out, "{branch} {current}, {limit}, {exit}");
        self.bank.release(limit);

        self.lower_scoped_block(body)?;
        self.bank.flush(self.out)?;

        let current = self.local_register(iter)?;
        match step {
            Step::Immediate(value) => self.out.add_immediate(current, current, value),
            Step::Slot(slot) => {
                self.bank.lock(current);
                let amount = self.bank.allocate(self.out);
                self.bank.unlock(current);
                let amount = amount?;
                self.load_slot(amount, slot)?;
                let amount = self.scale(Operand::owned(amount), scale, &[])?;
                emit!(self.out, "add {current}, {current}, {}", amount.reg);
                self.release(amount);
            }
        }
        self.bank.mark_dirty(current);
        self.bank.flush(self.out)?;
        emit!(self.out, "j {top}");
        self.out.label(&exit);
        self.pop_area();
        Ok(())
    }
}

/// Increment of a counted loop.
#[derive(Copy, Clone)]
enum Step {
    Immediate(i64),
    Slot(crate::frame::Slot),
}
