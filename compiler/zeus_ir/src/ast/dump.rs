//! Human-readable rendering of a parsed file.
//!
//! Expressions print as prefix S-expressions so operator grouping is
//! visible: `1 + 2 * 3` renders as `(+ 1 (* 2 3))`. Statements print one per
//! line with bodies indented by two spaces.

use super::{ExprId, ExprKind, ForKind, Module, ProcSignature, StmtId, StmtKind, TypeRef};
use super::{AstArena, TypeRefKind};
use crate::StringInterner;

/// Render one expression.
pub fn dump_expr(arena: &AstArena, interner: &StringInterner, id: ExprId) -> String {
    let mut out = String::new();
    Dumper { arena, interner, out: &mut out }.expr(id);
    out
}

/// Render one written type.
pub fn dump_type(interner: &StringInterner, ty: &TypeRef) -> String {
    let mut out = "^".repeat(usize::from(ty.pointer_depth));
    match ty.kind {
        TypeRefKind::Builtin(builtin) => out.push_str(builtin.name()),
        TypeRefKind::Named(name) => out.push_str(interner.lookup(name)),
    }
    out
}

/// Render a whole file: directives first, then every top-level statement.
pub fn dump_module(module: &Module, interner: &StringInterner) -> String {
    let mut out = String::new();
    for import in &module.imports {
        out.push_str("#import \"");
        out.push_str(interner.lookup(import.path));
        out.push_str("\"\n");
    }
    if let Some((size, _)) = module.stack_size {
        out.push_str(&format!("#stack_size {size}\n"));
    }
    let mut dumper = Dumper {
        arena: &module.arena,
        interner,
        out: &mut out,
    };
    for &item in &module.items {
        dumper.stmt(item, 0);
    }
    out
}

struct Dumper<'a> {
    arena: &'a AstArena,
    interner: &'a StringInterner,
    out: &'a mut String,
}

impl Dumper<'_> {
    fn name(&mut self, name: crate::Name) {
        self.out.push_str(self.interner.lookup(name));
    }

    fn carets(&mut self, deref: u8) {
        for _ in 0..deref {
            self.out.push('^');
        }
    }

    fn expr_list(&mut self, ids: &[ExprId]) {
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(id);
        }
    }

    fn expr(&mut self, id: ExprId) {
        let arena = self.arena;
        match &arena.expr(id).kind {
            ExprKind::Int(value) => self.out.push_str(&value.to_string()),
            ExprKind::Decimal(value) => self.out.push_str(&format!("{value:?}")),
            ExprKind::Char(byte) => {
                self.out.push('\'');
                self.out
                    .push_str(&std::ascii::escape_default(*byte).to_string());
                self.out.push('\'');
            }
            ExprKind::Str(raw) => {
                self.out.push('"');
                self.name(*raw);
                self.out.push('"');
            }
            ExprKind::Bool(value) => self.out.push_str(if *value { "true" } else { "false" }),
            ExprKind::Var { name, deref } => {
                self.name(*name);
                self.carets(*deref);
            }
            ExprKind::Modifier { name, deref, child } => {
                self.name(*name);
                self.carets(*deref);
                self.out.push('.');
                self.expr(*child);
            }
            ExprKind::Index { base, index } => {
                self.expr(*base);
                self.out.push('[');
                self.expr(*index);
                self.out.push(']');
            }
            ExprKind::Call { name, args } => {
                self.name(*name);
                self.out.push('(');
                self.expr_list(arena.expr_list(*args));
                self.out.push(')');
            }
            ExprKind::InitList(elements) => {
                self.out.push('{');
                self.expr_list(arena.expr_list(*elements));
                self.out.push('}');
            }
            ExprKind::Binary { op, lhs, rhs, .. } => {
                self.out.push('(');
                self.out.push_str(op.as_symbol());
                self.out.push(' ');
                self.expr(*lhs);
                self.out.push(' ');
                self.expr(*rhs);
                self.out.push(')');
            }
        }
    }

    fn ty(&mut self, ty: &TypeRef) {
        let text = dump_type(self.interner, ty);
        self.out.push_str(&text);
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
    }

    fn body(&mut self, stmts: &[StmtId], depth: usize) {
        for &stmt in stmts {
            self.stmt(stmt, depth);
        }
    }

    fn signature(&mut self, keyword: &str, sig: &ProcSignature) {
        let arena = self.arena;
        self.out.push_str(keyword);
        self.out.push(' ');
        self.name(sig.name);
        self.out.push('(');
        for (i, &input) in arena.stmt_list(sig.inputs).iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.decl_inline(input);
        }
        self.out.push(')');
        let outputs = arena.type_list(sig.outputs);
        if !outputs.is_empty() {
            self.out.push_str(" -> (");
            for (i, ty) in outputs.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                self.ty(ty);
            }
            self.out.push(')');
        }
    }

    /// Declaration without the leading keyword, used for procedure inputs.
    fn decl_inline(&mut self, id: StmtId) {
        let arena = self.arena;
        if let StmtKind::Decl { targets, ty, init } = &arena.stmt(id).kind {
            self.expr_list(arena.expr_list(*targets));
            match ty {
                Some(ty) => {
                    self.out.push_str(" : ");
                    self.ty(ty);
                    if let Some(init) = init {
                        self.out.push_str(" = ");
                        self.expr(*init);
                    }
                }
                None => {
                    if let Some(init) = init {
                        self.out.push_str(" := ");
                        self.expr(*init);
                    }
                }
            }
        } else {
            self.out.push_str(arena.stmt(id).kind.name());
        }
    }

    fn stmt(&mut self, id: StmtId, depth: usize) {
        let arena = self.arena;
        self.indent(depth);
        match &arena.stmt(id).kind {
            StmtKind::Decl { .. } => {
                self.out.push_str("decl ");
                self.decl_inline(id);
                self.out.push('\n');
            }
            StmtKind::Assign { targets, value } => {
                self.out.push_str("assign ");
                self.expr_list(arena.expr_list(*targets));
                self.out.push_str(" = ");
                self.expr(*value);
                self.out.push('\n');
            }
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => {
                self.out.push_str("if ");
                self.expr(*cond);
                self.out.push('\n');
                self.body(arena.stmt_list(*then_body), depth + 1);
                if !else_body.is_empty() {
                    self.indent(depth);
                    self.out.push_str("else\n");
                    self.body(arena.stmt_list(*else_body), depth + 1);
                }
            }
            StmtKind::For { kind, body } => {
                self.out.push_str("for");
                match kind {
                    ForKind::Forever => {}
                    ForKind::While { cond } => {
                        self.out.push(' ');
                        self.expr(*cond);
                    }
                    ForKind::Range(range) => {
                        self.out.push(' ');
                        self.name(range.iter);
                        self.out.push_str(" :");
                        if let Some(ty) = &range.ty {
                            self.out.push(' ');
                            self.ty(ty);
                            self.out.push(' ');
                        }
                        self.out.push_str("= ");
                        self.expr(range.start);
                        self.out.push_str(" ... ");
                        self.expr(range.end);
                        if let Some(step) = range.step {
                            self.out.push_str(" .. ");
                            self.expr(step);
                        }
                    }
                }
                self.out.push('\n');
                self.body(arena.stmt_list(*body), depth + 1);
            }
            StmtKind::Return(values) => {
                self.out.push_str("return");
                if !values.is_empty() {
                    self.out.push(' ');
                    self.expr_list(arena.expr_list(*values));
                }
                self.out.push('\n');
            }
            StmtKind::ProcDef { sig, body } => {
                self.signature("proc", sig);
                self.out.push('\n');
                self.body(arena.stmt_list(*body), depth + 1);
            }
            StmtKind::ProcDecl(sig) => {
                self.signature("proc decl", sig);
                self.out.push('\n');
            }
            StmtKind::Struct { name, body, .. } => {
                self.out.push_str("struct ");
                self.name(*name);
                self.out.push('\n');
                self.body(arena.stmt_list(*body), depth + 1);
            }
            StmtKind::Expr(expr) => {
                self.out.push_str("expr ");
                self.expr(*expr);
                self.out.push('\n');
            }
        }
    }
}
