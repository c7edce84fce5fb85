//! Statements inside procedure bodies and blocks.

use smallvec::{smallvec, SmallVec};
use zeus_ir::{
    ExprId, ExprKind, ExprRange, ForKind, RangeLoop, Span, StmtId, StmtKind, StmtRange, Type,
    TypeRef,
};
use zeus_stack::ensure_sufficient_stack;

use super::expr::Outputs;
use super::FileChecker;
use crate::scope::ScopeKind;
use crate::{CheckError, CheckErrorKind, TypeInfo};

impl FileChecker<'_> {
    pub(super) fn check_block(&mut self, body: StmtRange) -> Result<(), CheckError> {
        let arena = self.arena;
        for &stmt in arena.stmt_list(body) {
            self.check_stmt(stmt)?;
        }
        Ok(())
    }

    pub(super) fn check_stmt(&mut self, id: StmtId) -> Result<(), CheckError> {
        ensure_sufficient_stack(|| self.check_stmt_inner(id))
    }

    fn check_stmt_inner(&mut self, id: StmtId) -> Result<(), CheckError> {
        let arena = self.arena;
        let stmt = arena.stmt(id);
        tracing::trace!(kind = stmt.kind.name(), span = %stmt.span, "check statement");
        match &stmt.kind {
            StmtKind::Decl { targets, ty, init } => {
                self.check_decl(*targets, ty.as_ref(), *init, stmt.span)
            }
            StmtKind::Assign { targets, value } => self.check_assign(*targets, *value, stmt.span),
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => {
                self.check_condition(*cond)?;
                self.with_scope(ScopeKind::Block, |this| this.check_block(*then_body))?;
                if !else_body.is_empty() {
                    self.with_scope(ScopeKind::Block, |this| this.check_block(*else_body))?;
                }
                Ok(())
            }
            StmtKind::For { kind, body } => match kind {
                ForKind::Forever => {
                    self.with_scope(ScopeKind::Block, |this| this.check_block(*body))
                }
                ForKind::While { cond } => {
                    self.check_condition(*cond)?;
                    self.with_scope(ScopeKind::Block, |this| this.check_block(*body))
                }
                ForKind::Range(range) => self.check_range_loop(id, range, *body),
            },
            StmtKind::Return(values) => self.check_return(*values, stmt.span),
            StmtKind::ProcDef { sig, .. } | StmtKind::ProcDecl(sig) => {
                Err(self.error(sig.name_span, CheckErrorKind::NestedProcedure))
            }
            StmtKind::Struct {
                name,
                name_span,
                body,
            } => self.check_struct(*name, *name_span, *body),
            StmtKind::Expr(expr) => {
                // A call statement may discard any number of outputs.
                if let ExprKind::Call { name, args } = arena.expr(*expr).kind {
                    self.check_call(*expr, name, args, arena.expr(*expr).span)?;
                } else {
                    self.check_expr(*expr)?;
                }
                Ok(())
            }
        }
    }

    /// Local declaration, possibly with several targets.
    pub(super) fn check_decl(
        &mut self,
        targets: ExprRange,
        ty: Option<&TypeRef>,
        init: Option<ExprId>,
        span: Span,
    ) -> Result<(), CheckError> {
        let arena = self.arena;
        let targets = arena.expr_list(targets);
        let declared = ty.map(|ty| self.resolve_type(ty)).transpose()?;

        let infos: SmallVec<[TypeInfo; 4]> = match init {
            None => smallvec![declared.unwrap_or(TypeInfo::INVALID); targets.len()],
            Some(init) if targets.len() > 1 => {
                let outputs = self.check_catching_call(init, targets.len())?;
                let mut infos = SmallVec::new();
                for output in outputs {
                    match declared {
                        Some(declared) => {
                            self.check_assignable(declared, output, arena.expr(init).span)?;
                            infos.push(declared);
                        }
                        None => infos.push(output),
                    }
                }
                infos
            }
            Some(init) => match declared {
                Some(declared) => {
                    self.check_initializer(declared, init)?;
                    smallvec![declared]
                }
                None => smallvec![self.check_expr(init)?],
            },
        };

        for (&target, &info) in targets.iter().zip(&infos) {
            let target_expr = arena.expr(target);
            let ExprKind::Var { name, .. } = target_expr.kind else {
                return Err(self.error(span, CheckErrorKind::VariableNotDefined));
            };
            self.declare_var(name, info, target_expr.span)?;
            self.out.record(target, info);
        }
        Ok(())
    }

    /// Check `init` against a declared or assigned `target` type. An
    /// initializer list is accepted only for a structure value.
    pub(super) fn check_initializer(
        &mut self,
        target: TypeInfo,
        init: ExprId,
    ) -> Result<(), CheckError> {
        let arena = self.arena;
        let expr = arena.expr(init);
        let ExprKind::InitList(elements) = expr.kind else {
            let value = self.check_expr(init)?;
            return self.check_assignable(target, value, expr.span);
        };

        let struct_id = match target.ty {
            Type::Struct(id) if !target.is_pointer() => id,
            _ => return Err(self.error(expr.span, CheckErrorKind::InitListNotAllowed)),
        };
        let members: SmallVec<[TypeInfo; 8]> = self
            .state
            .structs
            .get(struct_id)
            .members
            .iter()
            .map(|member| member.info)
            .collect();
        let elements = arena.expr_list(elements);
        if elements.len() != members.len() {
            return Err(self.error(
                expr.span,
                CheckErrorKind::InitListCount {
                    expected: members.len(),
                    found: elements.len(),
                },
            ));
        }
        for (&element, &member) in elements.iter().zip(&members) {
            let value = self.check_expr(element)?;
            self.check_assignable(member, value, arena.expr(element).span)?;
        }
        self.out.record(init, target);
        Ok(())
    }

    /// The right side of a multi-target statement: a call returning exactly
    /// `targets` values.
    fn check_catching_call(
        &mut self,
        value: ExprId,
        targets: usize,
    ) -> Result<Outputs, CheckError> {
        let arena = self.arena;
        let expr = arena.expr(value);
        let ExprKind::Call { name, args } = expr.kind else {
            return Err(self.error(expr.span, CheckErrorKind::MultiTargetNeedsCall));
        };
        let outputs = self.check_call(value, name, args, expr.span)?;
        if outputs.len() > targets {
            return Err(self.error(expr.span, CheckErrorKind::TooManyValues));
        }
        if outputs.len() < targets {
            return Err(self.error(expr.span, CheckErrorKind::TooFewValues));
        }
        Ok(outputs)
    }

    fn check_assign(
        &mut self,
        targets: ExprRange,
        value: ExprId,
        span: Span,
    ) -> Result<(), CheckError> {
        let arena = self.arena;
        let targets = arena.expr_list(targets);
        let mut infos: SmallVec<[TypeInfo; 4]> = SmallVec::new();
        for &target in targets {
            infos.push(self.check_place(target, None)?);
        }

        match infos.as_slice() {
            [single] => self.check_initializer(*single, value),
            [] => Err(self.error(span, CheckErrorKind::VariableNotDefined)),
            _ => {
                let outputs = self.check_catching_call(value, targets.len())?;
                for (&target, &output) in infos.iter().zip(&outputs) {
                    self.check_assignable(target, output, arena.expr(value).span)?;
                }
                Ok(())
            }
        }
    }

    fn check_condition(&mut self, cond: ExprId) -> Result<(), CheckError> {
        let info = self.check_expr(cond)?;
        if info.is_struct_value() {
            return Err(self.error(self.arena.expr(cond).span, CheckErrorKind::InvalidCondition));
        }
        Ok(())
    }

    fn check_range_loop(
        &mut self,
        id: StmtId,
        range: &RangeLoop,
        body: StmtRange,
    ) -> Result<(), CheckError> {
        let arena = self.arena;
        if self.lookup_var(range.iter).is_some() {
            return Err(self.error(range.iter_span, CheckErrorKind::IteratorDefined));
        }

        let start = self.check_expr(range.start)?;
        let end = self.check_expr(range.end)?;
        let bounds = self.range_bounds(start, end, arena.expr(range.end).span)?;

        if let Some(step) = range.step {
            let info = self.check_expr(step)?;
            if info.is_pointer() || !info.ty.is_number() {
                return Err(self.error(arena.expr(step).span, CheckErrorKind::InvalidStep));
            }
        }

        let iter = match &range.ty {
            Some(written) => {
                let declared = self.resolve_type(written)?;
                self.check_assignable(declared, start, arena.expr(range.start).span)?;
                declared
            }
            None => bounds,
        };
        if !iter.is_pointer() && !iter.ty.is_integer() {
            return Err(self.error(range.iter_span, CheckErrorKind::InvalidIterator));
        }

        self.out.record_iter(id, iter);
        self.with_scope(ScopeKind::Block, |this| {
            this.declare_var(range.iter, iter, range.iter_span)?;
            this.check_block(body)
        })
    }

    /// Common type of a range's bounds. A compile-time integer adapts to an
    /// integer bound on the other side.
    fn range_bounds(
        &self,
        start: TypeInfo,
        end: TypeInfo,
        span: Span,
    ) -> Result<TypeInfo, CheckError> {
        if start.pointer_depth != end.pointer_depth {
            return Err(self.error(span, CheckErrorKind::PointerDepthMismatch));
        }
        if start.ty == end.ty {
            return Ok(start);
        }
        let adapts = |comp: TypeInfo, other: TypeInfo| {
            comp.ty == Type::CompInteger && !other.is_pointer() && other.ty.is_integer()
        };
        if adapts(start, end) {
            return Ok(end);
        }
        if adapts(end, start) {
            return Ok(start);
        }
        Err(self.error(span, CheckErrorKind::RangeMismatch))
    }

    fn check_return(&mut self, values: ExprRange, span: Span) -> Result<(), CheckError> {
        let Some(proc) = self.current_proc else {
            return Err(self.error(span, CheckErrorKind::ReturnOutsideProc));
        };
        let outputs = self
            .state
            .procs
            .get(&proc)
            .map(|entity| entity.outputs.clone())
            .unwrap_or_default();

        let arena = self.arena;
        let values = arena.expr_list(values);
        if values.len() != outputs.len() {
            return Err(self.error(
                span,
                CheckErrorKind::ReturnCount {
                    expected: outputs.len(),
                    found: values.len(),
                },
            ));
        }
        for (&value, &output) in values.iter().zip(&outputs) {
            self.check_initializer(output, value)?;
        }
        Ok(())
    }
}
