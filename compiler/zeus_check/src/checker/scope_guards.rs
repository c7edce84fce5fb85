//! Scope management and name lookup for `FileChecker`.

use zeus_ir::{Name, Span};

use super::FileChecker;
use crate::scope::{Scope, ScopeKind};
use crate::{CheckError, CheckErrorKind, ProcEntity, TypeInfo, VariableEntity};

impl FileChecker<'_> {
    /// Run `f` inside a fresh scope of `kind`.
    ///
    /// Checking stops at the first error, so the scope is popped on both
    /// paths without further bookkeeping.
    pub(super) fn with_scope<T, F>(&mut self, kind: ScopeKind, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        self.scopes.push(Scope::new(kind));
        let result = f(self);
        self.scopes.pop();
        result
    }

    /// Run `f` with `proc` as the enclosing procedure.
    pub(super) fn with_proc<T, F>(&mut self, proc: Name, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        let saved = self.current_proc.replace(proc);
        let result = self.with_scope(ScopeKind::Proc, f);
        self.current_proc = saved;
        result
    }

    pub(super) fn at_global_scope(&self) -> bool {
        self.scopes.len() == 1
    }

    /// Global scopes of the direct imports, last import innermost.
    fn import_scopes(&self) -> impl Iterator<Item = &Scope> {
        self.file
            .deps
            .iter()
            .rev()
            .filter_map(|dep| self.state.file_scopes[dep.index()].as_ref())
    }

    /// Innermost binding of `name`.
    pub(super) fn lookup_var(&self, name: Name) -> Option<&VariableEntity> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.var(name))
            .or_else(|| self.import_scopes().find_map(|scope| scope.var(name)))
    }

    /// Signature of a procedure visible from the current file.
    pub(super) fn lookup_proc(&self, name: Name) -> Option<&ProcEntity> {
        let visible = self.scopes.iter().any(|scope| scope.has_proc(name))
            || self.import_scopes().any(|scope| scope.has_proc(name));
        if visible {
            self.state.procs.get(&name)
        } else {
            None
        }
    }

    /// Bind `name` in the innermost scope. Outer bindings may be shadowed.
    pub(super) fn declare_var(
        &mut self,
        name: Name,
        info: TypeInfo,
        span: Span,
    ) -> Result<(), CheckError> {
        let file = self.file.id;
        let Some(scope) = self.scopes.last_mut() else {
            return Err(CheckError::new(file, span, CheckErrorKind::Redefinition));
        };
        if scope.vars.contains_key(&name) {
            return Err(CheckError::new(file, span, CheckErrorKind::Redefinition));
        }
        tracing::trace!(name = self.interner.lookup(name), kind = ?scope.kind, "declare");
        scope.vars.insert(name, VariableEntity { info, span });
        Ok(())
    }
}
