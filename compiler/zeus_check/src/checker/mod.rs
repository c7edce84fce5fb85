//! Checker core.
//!
//! Files are checked one at a time, dependencies first. Program-wide tables
//! live in [`ProgramState`]; everything scoped to one file lives in
//! [`FileChecker`].
//!
//! # Module Structure
//!
//! - `scope_guards`: scope push/pop and name lookup
//! - `compat`: written types and assignment compatibility
//! - `expr`: expression typing
//! - `stmt`: statements inside procedures and blocks
//! - `item`: global declarations, structures and procedures

mod compat;
mod expr;
mod item;
mod scope_guards;
mod stmt;

use rustc_hash::FxHashMap;
use zeus_ir::{AstArena, Name, Span, StringInterner};

use crate::scope::{Scope, ScopeKind};
use crate::{
    CheckError, CheckErrorKind, CheckedFile, GlobalVar, ProcEntity, Program, ProgramFile,
    StringPool, StructTable,
};

/// Tables shared by every file of the program.
#[derive(Default)]
pub(crate) struct ProgramState {
    pub structs: StructTable,
    pub procs: FxHashMap<Name, ProcEntity>,
    pub globals: Vec<GlobalVar>,
    pub strings: StringPool,
    /// Global scope of every file checked so far, indexed by `FileId`.
    pub file_scopes: Vec<Option<Scope>>,
}

impl ProgramState {
    pub fn new(file_count: usize) -> Self {
        ProgramState {
            file_scopes: vec![None; file_count],
            ..Self::default()
        }
    }
}

/// Checks one file against the program state.
pub(crate) struct FileChecker<'a> {
    state: &'a mut ProgramState,
    program: &'a Program,
    file: &'a ProgramFile,
    arena: &'a AstArena,
    interner: &'a StringInterner,
    /// Own global scope first, innermost last. Imported global scopes are
    /// searched after these, see `scope_guards`.
    scopes: Vec<Scope>,
    /// Procedure whose body is being checked.
    current_proc: Option<Name>,
    out: CheckedFile,
}

impl<'a> FileChecker<'a> {
    pub fn new(
        state: &'a mut ProgramState,
        program: &'a Program,
        file: &'a ProgramFile,
        interner: &'a StringInterner,
    ) -> Self {
        let arena = &file.module.arena;
        FileChecker {
            state,
            program,
            file,
            arena,
            interner,
            scopes: Vec::new(),
            current_proc: None,
            out: CheckedFile::new(file.id, arena.expr_count()),
        }
    }

    /// Check every top-level statement, then publish the file's global
    /// scope for the files importing it.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.file.name))]
    pub fn check(mut self) -> Result<CheckedFile, CheckError> {
        let file = self.file;
        self.scopes.push(Scope::new(ScopeKind::Global));
        for &item in &file.module.items {
            self.check_global_item(item)?;
        }
        let global = self.scopes.pop();
        self.state.file_scopes[file.id.index()] = global;
        Ok(self.out)
    }

    #[cold]
    fn error(&self, span: Span, kind: CheckErrorKind) -> CheckError {
        CheckError::new(self.file.id, span, kind)
    }

    /// Display name of a type for diagnostics, e.g. `^^s32` or `Point`.
    fn type_name(&self, info: crate::TypeInfo) -> String {
        let base = match info.ty.struct_id() {
            Some(id) => self.interner.lookup(self.state.structs.get(id).name),
            None => info.ty.name(),
        };
        let mut name = "^".repeat(usize::from(info.pointer_depth));
        name.push_str(base);
        name
    }
}
