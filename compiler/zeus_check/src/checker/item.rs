//! Top-level items: global declarations, structures and procedures.

use smallvec::SmallVec;
use zeus_ir::{
    ExprId, ExprKind, ExprRange, Name, ProcSignature, Span, StmtId, StmtKind, StmtRange, StructId,
    Type, TypeRef,
};

use super::FileChecker;
use crate::scope::ScopeKind;
use crate::{CheckError, CheckErrorKind, GlobalInit, GlobalVar, Member, ProcEntity, TypeInfo};

/// A resolved procedure input.
struct Input {
    name: Name,
    target: ExprId,
    span: Span,
    info: TypeInfo,
}

impl FileChecker<'_> {
    pub(super) fn check_global_item(&mut self, id: StmtId) -> Result<(), CheckError> {
        let arena = self.arena;
        let stmt = arena.stmt(id);
        tracing::trace!(kind = stmt.kind.name(), span = %stmt.span, "check item");
        match &stmt.kind {
            StmtKind::Decl { targets, ty, init } => {
                self.check_global_decl(*targets, ty.as_ref(), *init, stmt.span)
            }
            StmtKind::Struct {
                name,
                name_span,
                body,
            } => self.check_struct(*name, *name_span, *body),
            StmtKind::ProcDef { sig, body } => self.check_proc(sig, Some(*body)),
            StmtKind::ProcDecl(sig) => self.check_proc(sig, None),
            other => Err(self.error(
                stmt.span,
                CheckErrorKind::NotAllowedAtGlobalScope { what: other.name() },
            )),
        }
    }

    /// A file-scope variable: one target, a literal initializer, and a name
    /// no other file declares globally. It is hoisted into the program's
    /// global list.
    fn check_global_decl(
        &mut self,
        targets: ExprRange,
        ty: Option<&TypeRef>,
        init: Option<ExprId>,
        span: Span,
    ) -> Result<(), CheckError> {
        let arena = self.arena;
        let (target, name) = match arena.expr_list(targets) {
            [target] => match arena.expr(*target).kind {
                ExprKind::Var { name, .. } => (*target, name),
                _ => return Err(self.error(span, CheckErrorKind::GlobalTargetCount)),
            },
            _ => return Err(self.error(span, CheckErrorKind::GlobalTargetCount)),
        };
        let target_span = arena.expr(target).span;

        let Some(init) = init.filter(|&init| arena.expr(init).kind.is_literal()) else {
            return Err(self.error(span, CheckErrorKind::GlobalNotLiteral));
        };

        self.check_symbol(name, target_span)?;
        if self.state.procs.contains_key(&name) {
            return Err(self.error(target_span, CheckErrorKind::GlobalProcedureClash));
        }
        let elsewhere = self
            .state
            .globals
            .iter()
            .find(|global| global.name == name && global.file != self.file.id);
        if let Some(global) = elsewhere {
            let file = self.program.file(global.file).name.clone();
            return Err(self.error(target_span, CheckErrorKind::GlobalRedefinition { file }));
        }

        let value = self.check_expr(init)?;
        let info = match ty {
            Some(written) => {
                let declared = self.resolve_type(written)?;
                self.check_assignable(declared, value, arena.expr(init).span)?;
                declared
            }
            None => value,
        };
        self.declare_var(name, info, target_span)?;
        self.out.record(target, info);

        let init = match arena.expr(init).kind {
            ExprKind::Int(value) => GlobalInit::Int(value),
            ExprKind::Decimal(value) => GlobalInit::Decimal(value),
            ExprKind::Char(value) => GlobalInit::Char(value),
            ExprKind::Str(body) => GlobalInit::Str(self.state.strings.intern(body)),
            _ => return Err(self.error(span, CheckErrorKind::GlobalNotLiteral)),
        };
        self.state.globals.push(GlobalVar {
            file: self.file.id,
            name,
            span: target_span,
            info,
            init,
        });
        Ok(())
    }

    /// Register a structure and lay out its members.
    pub(super) fn check_struct(
        &mut self,
        name: Name,
        name_span: Span,
        body: StmtRange,
    ) -> Result<(), CheckError> {
        if self.state.structs.lookup(name).is_some() {
            return Err(self.error(name_span, CheckErrorKind::StructureRedefinition));
        }
        let id = self.state.structs.declare(name, self.file.id);
        let members = self.with_scope(ScopeKind::Struct, |this| this.check_struct_body(id, body))?;
        self.state.structs.complete(id, members);
        Ok(())
    }

    fn check_struct_body(
        &mut self,
        id: StructId,
        body: StmtRange,
    ) -> Result<Vec<Member>, CheckError> {
        let arena = self.arena;
        let mut members = Vec::new();
        let mut offset_bits = 0;
        for &stmt_id in arena.stmt_list(body) {
            let stmt = arena.stmt(stmt_id);
            let StmtKind::Decl {
                targets,
                ty: Some(written),
                init: None,
            } = &stmt.kind
            else {
                return Err(self.error(stmt.span, CheckErrorKind::InvalidStructBody));
            };

            let info = self.resolve_type(written)?;
            if info.is_struct_value() && info.ty == Type::Struct(id) {
                return Err(self.error(written.span, CheckErrorKind::RecursiveStructure));
            }
            for &target in arena.expr_list(*targets) {
                let target_expr = arena.expr(target);
                let ExprKind::Var { name, .. } = target_expr.kind else {
                    return Err(self.error(target_expr.span, CheckErrorKind::InvalidStructBody));
                };
                self.declare_var(name, info, target_expr.span)?;
                self.out.record(target, info);
                members.push(Member {
                    name,
                    info,
                    offset_bits,
                });
                offset_bits += info.size_bits;
            }
        }
        Ok(members)
    }

    /// Procedure definition or bodiless declaration.
    ///
    /// The signature is registered before the body is checked so the body
    /// may call the procedure recursively.
    fn check_proc(
        &mut self,
        sig: &ProcSignature,
        body: Option<StmtRange>,
    ) -> Result<(), CheckError> {
        if !self.at_global_scope() {
            return Err(self.error(sig.name_span, CheckErrorKind::NestedProcedure));
        }

        let inputs = self.resolve_inputs(sig.inputs)?;
        let mut outputs = SmallVec::new();
        for written in self.arena.type_list(sig.outputs) {
            outputs.push(self.resolve_type(written)?);
        }
        self.register_proc(ProcEntity {
            name: sig.name,
            file: self.file.id,
            span: sig.name_span,
            inputs: inputs.iter().map(|input| input.info).collect(),
            outputs,
            defined: body.is_some(),
        })?;

        let Some(body) = body else {
            return Ok(());
        };
        self.with_proc(sig.name, |this| {
            for input in &inputs {
                this.declare_var(input.name, input.info, input.span)?;
                this.out.record(input.target, input.info);
            }
            this.check_block(body)
        })
    }

    fn resolve_inputs(&self, inputs: StmtRange) -> Result<SmallVec<[Input; 4]>, CheckError> {
        let arena = self.arena;
        let mut resolved = SmallVec::new();
        for &stmt_id in arena.stmt_list(inputs) {
            let stmt = arena.stmt(stmt_id);
            let StmtKind::Decl {
                targets,
                ty: Some(written),
                init: None,
            } = &stmt.kind
            else {
                return Err(self.error(stmt.span, CheckErrorKind::InputDefault));
            };
            let info = self.resolve_type(written)?;
            for &target in arena.expr_list(*targets) {
                let target_expr = arena.expr(target);
                if let ExprKind::Var { name, .. } = target_expr.kind {
                    resolved.push(Input {
                        name,
                        target,
                        span: target_expr.span,
                        info,
                    });
                }
            }
        }
        Ok(resolved)
    }

    /// Procedure names are unique across the program. A definition may
    /// complete an earlier declaration in the same file when the
    /// signatures agree.
    fn register_proc(&mut self, entity: ProcEntity) -> Result<(), CheckError> {
        let name = entity.name;
        self.check_symbol(name, entity.span)?;
        if self.state.globals.iter().any(|global| global.name == name) {
            return Err(CheckError::new(
                self.file.id,
                entity.span,
                CheckErrorKind::GlobalProcedureClash,
            ));
        }
        if let Some(existing) = self.state.procs.get_mut(&name) {
            let completes = !existing.defined && entity.defined && existing.file == entity.file;
            if !completes {
                return Err(CheckError::new(
                    self.file.id,
                    entity.span,
                    CheckErrorKind::ProcedureRedefinition,
                ));
            }
            if !existing.same_signature(&entity) {
                return Err(CheckError::new(
                    self.file.id,
                    entity.span,
                    CheckErrorKind::SignatureMismatch,
                ));
            }
            existing.defined = true;
            existing.span = entity.span;
        } else {
            tracing::trace!(name = self.interner.lookup(name), "register procedure");
            self.state.procs.insert(name, entity);
        }

        if let Some(global) = self.scopes.first_mut() {
            global.procs.insert(name);
        }
        Ok(())
    }

    /// Globals and procedures become assembly labels under their own
    /// names, so they must stay clear of the labels the backend generates.
    fn check_symbol(&self, name: Name, span: Span) -> Result<(), CheckError> {
        let text = self.interner.lookup(name);
        if is_reserved_label(text) {
            return Err(self.error(
                span,
                CheckErrorKind::ReservedName {
                    name: text.to_owned(),
                },
            ));
        }
        Ok(())
    }
}

/// `_zeus_main` and the pooled string labels `_L<n>`.
fn is_reserved_label(name: &str) -> bool {
    name == "_zeus_main"
        || name
            .strip_prefix("_L")
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
