//! Expression typing.
//!
//! Every checked expression gets its [`TypeInfo`] recorded in the file's
//! side table.

use smallvec::SmallVec;
use zeus_ir::{BinaryOp, ExprId, ExprKind, ExprRange, Name, Span, StructId, Type};
use zeus_stack::ensure_sufficient_stack;

use super::FileChecker;
use crate::{CheckError, CheckErrorKind, TypeInfo};

pub(super) type Outputs = SmallVec<[TypeInfo; 2]>;

impl FileChecker<'_> {
    /// Type of an expression in value position.
    pub(super) fn check_expr(&mut self, id: ExprId) -> Result<TypeInfo, CheckError> {
        ensure_sufficient_stack(|| self.check_expr_inner(id))
    }

    fn check_expr_inner(&mut self, id: ExprId) -> Result<TypeInfo, CheckError> {
        let arena = self.arena;
        let expr = arena.expr(id);
        let info = match expr.kind {
            ExprKind::Int(_) => TypeInfo::builtin(Type::CompInteger),
            ExprKind::Decimal(_) => TypeInfo::builtin(Type::CompDecimal),
            ExprKind::Char(_) => TypeInfo::builtin(Type::Char),
            ExprKind::Bool(_) => TypeInfo::builtin(Type::Bool),
            ExprKind::Str(body) => {
                self.state.strings.intern(body);
                TypeInfo::builtin(Type::CompString)
            }
            ExprKind::Var { .. } | ExprKind::Modifier { .. } | ExprKind::Index { .. } => {
                return self.check_place(id, None);
            }
            ExprKind::Call { name, args } => {
                let outputs = self.check_call(id, name, args, expr.span)?;
                match outputs.as_slice() {
                    [single] => *single,
                    _ => return Err(self.error(expr.span, CheckErrorKind::NotSingleValue)),
                }
            }
            ExprKind::InitList(_) => {
                return Err(self.error(expr.span, CheckErrorKind::InitListNotAllowed));
            }
            ExprKind::Binary { op, lhs, rhs, .. } => self.check_binary(op, lhs, rhs, expr.span)?,
        };
        self.out.record(id, info);
        Ok(info)
    }

    /// Type of a variable, field chain or index expression.
    ///
    /// Inside a field chain `in_struct` is the structure the next link is
    /// looked up in; otherwise links resolve through the scope chain.
    pub(super) fn check_place(
        &mut self,
        id: ExprId,
        in_struct: Option<StructId>,
    ) -> Result<TypeInfo, CheckError> {
        let arena = self.arena;
        let expr = arena.expr(id);
        let info = match expr.kind {
            ExprKind::Var { name, deref } => {
                let base = self.resolve_link(name, expr.span, in_struct)?;
                self.apply_deref(base, deref, expr.span)?
            }
            ExprKind::Modifier { name, deref, child } => {
                let base = self.resolve_link(name, expr.span, in_struct)?;
                let value = self.apply_deref(base, deref, expr.span)?;
                let struct_id = match value.ty {
                    Type::Struct(struct_id) if !value.is_pointer() => struct_id,
                    _ => return Err(self.error(expr.span, CheckErrorKind::NotAStructure)),
                };
                ensure_sufficient_stack(|| self.check_place(child, Some(struct_id)))?
            }
            ExprKind::Index { base, index } => {
                let base_info = self.check_place(base, in_struct)?;
                if !base_info.is_pointer() {
                    return Err(self.error(arena.expr(base).span, CheckErrorKind::IndexNonPointer));
                }
                let index_info = self.check_expr(index)?;
                if index_info.is_pointer() || !index_info.ty.is_integer() {
                    return Err(self.error(arena.expr(index).span, CheckErrorKind::InvalidIndex));
                }
                self.apply_deref(base_info, 1, expr.span)?
            }
            _ => return self.check_expr(id),
        };
        self.out.record(id, info);
        Ok(info)
    }

    fn resolve_link(
        &self,
        name: Name,
        span: Span,
        in_struct: Option<StructId>,
    ) -> Result<TypeInfo, CheckError> {
        match in_struct {
            None => self
                .lookup_var(name)
                .map(|var| var.info)
                .ok_or_else(|| self.error(span, CheckErrorKind::VariableNotDefined)),
            Some(id) => self
                .state
                .structs
                .get(id)
                .member(name)
                .map(|member| member.info)
                .ok_or_else(|| {
                    self.error(
                        span,
                        CheckErrorKind::FieldNotFound {
                            name: self.interner.lookup(name).to_owned(),
                        },
                    )
                }),
        }
    }

    fn apply_deref(&self, info: TypeInfo, levels: u8, span: Span) -> Result<TypeInfo, CheckError> {
        if levels == 0 {
            return Ok(info);
        }
        self.state
            .structs
            .deref(info, levels)
            .ok_or_else(|| self.error(span, CheckErrorKind::DerefNonPointer))
    }

    /// Check a call's arguments against the callee and return its outputs.
    ///
    /// The call node itself is recorded with its first output, if any.
    pub(super) fn check_call(
        &mut self,
        id: ExprId,
        name: Name,
        args: ExprRange,
        span: Span,
    ) -> Result<Outputs, CheckError> {
        let (inputs, outputs) = match self.lookup_proc(name) {
            Some(proc) => (proc.inputs.clone(), proc.outputs.clone()),
            None => return Err(self.error(span, CheckErrorKind::ProcedureNotDefined)),
        };

        let arena = self.arena;
        let args = arena.expr_list(args);
        if args.len() != inputs.len() {
            return Err(self.error(
                span,
                CheckErrorKind::ArgumentCount {
                    expected: inputs.len(),
                    found: args.len(),
                },
            ));
        }
        for (&arg, &input) in args.iter().zip(&inputs) {
            let value = self.check_expr(arg)?;
            self.check_assignable(input, value, arena.expr(arg).span)?;
        }

        self.out
            .record(id, outputs.first().copied().unwrap_or(TypeInfo::INVALID));
        Ok(outputs)
    }

    fn check_binary(
        &mut self,
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
        span: Span,
    ) -> Result<TypeInfo, CheckError> {
        let left = self.check_expr(lhs)?;
        let right = self.check_expr(rhs)?;

        if left.is_pointer() && right.is_pointer() {
            return Err(self.error(span, CheckErrorKind::TwoPointers));
        }
        if left.is_struct_value() || right.is_struct_value() {
            return Err(self.error(span, CheckErrorKind::StructOperands));
        }
        let is_string = |info: TypeInfo| !info.is_pointer() && info.ty == Type::CompString;
        if is_string(left) || is_string(right) {
            return Err(self.error(span, CheckErrorKind::StringOperands));
        }

        match (left.is_pointer(), right.is_pointer()) {
            // `p + n`, `p - n`
            (true, false) => {
                if !matches!(op, BinaryOp::Add | BinaryOp::Sub) || !right.ty.is_integer() {
                    return Err(self.error(span, CheckErrorKind::InvalidPointerArithmetic));
                }
                Ok(left)
            }
            // `n + p`
            (false, true) => {
                if op != BinaryOp::Add || !left.ty.is_integer() {
                    return Err(self.error(span, CheckErrorKind::InvalidPointerArithmetic));
                }
                Ok(right)
            }
            _ => Ok(TypeInfo::builtin(left.ty.min(right.ty))),
        }
    }
}
