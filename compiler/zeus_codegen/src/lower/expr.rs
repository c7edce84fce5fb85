//! Values into registers.

use smallvec::SmallVec;
use zeus_check::TypeInfo;
use zeus_ir::{BinaryOp, ExprId, ExprKind, Type};
use zeus_stack::ensure_sufficient_stack;

use super::{string_label, Operand, ProcLowering};
use crate::emitter::emit;
use crate::isa::Reg;
use crate::literal::{is_float_slot, literal_bits, register_value, Literal};
use crate::CodegenError;

impl ProcLowering<'_, '_> {
    /// Evaluate `id` into a register.
    pub(super) fn lower_expr(&mut self, id: ExprId) -> Result<Operand, CodegenError> {
        ensure_sufficient_stack(|| self.lower_expr_inner(id))
    }

    fn lower_expr_inner(&mut self, id: ExprId) -> Result<Operand, CodegenError> {
        let arena = self.arena;
        let expr = arena.expr(id);
        match expr.kind {
            ExprKind::Int(value) => self.constant(i64::from_ne_bytes(value.to_ne_bytes())),
            ExprKind::Decimal(value) => {
                self.constant(i64::from_ne_bytes(value.to_bits().to_ne_bytes()))
            }
            ExprKind::Char(value) => self.constant(i64::from(value)),
            ExprKind::Bool(value) => self.constant(i64::from(value)),
            ExprKind::Str(body) => {
                let slot = self
                    .checked
                    .strings
                    .lookup(body)
                    .ok_or(CodegenError::MissingType(id.raw()))?;
                let reg = self.bank.allocate(self.out)?;
                emit!(self.out, "la {reg}, {}", string_label(slot));
                Ok(Operand::owned(reg))
            }
            ExprKind::Var { .. } | ExprKind::Modifier { .. } | ExprKind::Index { .. } => {
                self.place_value(id, None)
            }
            ExprKind::Call { name, args } => {
                let results = self.lower_call(name, args)?;
                let Some(&(slot, _)) = results.first() else {
                    return Err(CodegenError::Unsupported {
                        what: "procedures without outputs as values",
                    });
                };
                let reg = self.bank.allocate(self.out)?;
                self.load_slot(reg, slot)?;
                Ok(Operand::owned(reg))
            }
            ExprKind::InitList(_) => Err(CodegenError::Unsupported {
                what: "initializer lists outside structure declarations",
            }),
            ExprKind::Binary { op, lhs, rhs, .. } => self.lower_binary(id, op, lhs, rhs),
        }
    }

    /// `li` into a fresh temporary.
    pub(super) fn constant(&mut self, value: i64) -> Result<Operand, CodegenError> {
        let reg = self.bank.allocate(self.out)?;
        emit!(self.out, "li {reg}, {value}");
        Ok(Operand::owned(reg))
    }

    /// Evaluate `id` for storing into a slot of type `target`.
    ///
    /// Literals are converted at compile time. Computed values that may not
    /// fit a narrow slot are wrapped so the register agrees with what the
    /// slot will hold.
    pub(super) fn lower_value(
        &mut self,
        id: ExprId,
        target: TypeInfo,
    ) -> Result<Operand, CodegenError> {
        let arena = self.arena;
        let kind = &arena.expr(id).kind;
        let literal = match *kind {
            ExprKind::Int(value) => Some(Literal::Int(value)),
            ExprKind::Decimal(value) => Some(Literal::Decimal(value)),
            ExprKind::Char(value) => Some(Literal::Char(value)),
            _ => None,
        };
        if let Some(literal) = literal {
            let bits = literal_bits(literal, target);
            return self.constant(register_value(bits, target));
        }

        let value = self.info(id)?;
        let converts = if is_float_slot(target) {
            float_width(value) != float_width(target)
        } else {
            float_width(value).is_some()
        };
        if converts {
            return Err(CodegenError::Unsupported {
                what: "floating point conversion",
            });
        }
        let computed = matches!(kind, ExprKind::Binary { .. } | ExprKind::Call { .. });
        let operand = self.lower_expr(id)?;
        let narrow = target.is_scalar() && target.size_bits < 64 && !is_float_slot(target);
        if narrow && (computed || value.size_bits > target.size_bits) {
            return self.wrap_to(operand, target);
        }
        Ok(operand)
    }

    /// Truncate to `target`'s width, extending by its signedness.
    fn wrap_to(&mut self, operand: Operand, target: TypeInfo) -> Result<Operand, CodegenError> {
        let operand = self.make_owned(operand)?;
        let reg = operand.reg;
        let shift = 64 - target.size_bits;
        let right = if target.ty.is_signed() { "srai" } else { "srli" };
        emit!(self.out, "slli {reg}, {reg}, {shift}");
        emit!(self.out, "{right} {reg}, {reg}, {shift}");
        Ok(operand)
    }

    fn lower_binary(
        &mut self,
        id: ExprId,
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    ) -> Result<Operand, CodegenError> {
        let result = self.info(id)?;
        if is_float_slot(result) {
            return Err(CodegenError::Unsupported {
                what: "floating point arithmetic",
            });
        }
        let left_info = self.info(lhs)?;
        let right_info = self.info(rhs)?;

        let left = self.lower_expr(lhs)?;
        let (mut left, mut right) = self.hold_across(left, |this| this.lower_expr(rhs))?;

        // Pointer arithmetic counts in elements.
        if left_info.is_pointer() && !right_info.is_pointer() {
            right = self.scale(right, self.pointee_size(left_info), &[left])?;
        } else if right_info.is_pointer() && !left_info.is_pointer() {
            left = self.scale(left, self.pointee_size(right_info), &[right])?;
        }

        let dest = if left.owned {
            left.reg
        } else if right.owned {
            right.reg
        } else {
            self.allocate_keeping(&[left, right])?
        };
        let signed = !result.is_pointer() && result.ty.is_signed();
        let mnemonic = match (op, signed) {
            (BinaryOp::Add, _) => "add",
            (BinaryOp::Sub, _) => "sub",
            (BinaryOp::Mul, _) => "mul",
            (BinaryOp::Div, true) => "div",
            (BinaryOp::Div, false) => "divu",
            (BinaryOp::Mod, true) => "rem",
            (BinaryOp::Mod, false) => "remu",
        };
        emit!(self.out, "{mnemonic} {dest}, {}, {}", left.reg, right.reg);
        for operand in [left, right] {
            if operand.reg != dest {
                self.release(operand);
            }
        }
        Ok(Operand::owned(dest))
    }

    /// Size in bytes of what a pointer of type `info` points at.
    pub(super) fn pointee_size(&self, info: TypeInfo) -> u64 {
        self.checked
            .structs
            .deref(info, 1)
            .map_or(1, |pointee| pointee.size_bytes().max(1))
    }

    /// Multiply an index by an element size.
    pub(super) fn scale(
        &mut self,
        operand: Operand,
        size: u64,
        keep: &[Operand],
    ) -> Result<Operand, CodegenError> {
        if size == 1 {
            return Ok(operand);
        }
        let dest = if operand.owned {
            operand.reg
        } else {
            let mut keep: SmallVec<[Operand; 4]> = keep.iter().copied().collect();
            keep.push(operand);
            self.allocate_keeping(&keep)?
        };
        if size.is_power_of_two() {
            emit!(self.out, "slli {dest}, {}, {}", operand.reg, size.trailing_zeros());
        } else {
            emit!(self.out, "li {}, {size}", Reg::SCRATCH);
            emit!(self.out, "mul {dest}, {}, {}", operand.reg, Reg::SCRATCH);
        }
        Ok(Operand::owned(dest))
    }
}

/// Precision class of a float value; compile-time decimals are doubles.
fn float_width(info: TypeInfo) -> Option<u64> {
    match info.ty {
        _ if info.is_pointer() => None,
        Type::F32 => Some(32),
        Type::F64 | Type::CompDecimal => Some(64),
        _ => None,
    }
}
