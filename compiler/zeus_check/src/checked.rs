//! Checker output consumed by code generation.

use rustc_hash::FxHashMap;
use zeus_ir::{ExprId, FileId, Name, StmtId};

use crate::{GlobalVar, ProcEntity, StringPool, StructTable, TypeInfo};

/// Per-file side tables.
#[derive(Clone, Debug, Default)]
pub struct CheckedFile {
    pub id: FileId,
    /// Resolved type of every checked expression, declaration targets
    /// included, indexed by [`ExprId`].
    exprs: Vec<Option<TypeInfo>>,
    /// Iterator type of each counted `for`.
    range_iters: FxHashMap<StmtId, TypeInfo>,
}

impl CheckedFile {
    pub(crate) fn new(id: FileId, expr_count: usize) -> Self {
        CheckedFile {
            id,
            exprs: vec![None; expr_count],
            range_iters: FxHashMap::default(),
        }
    }

    pub(crate) fn record(&mut self, id: ExprId, info: TypeInfo) {
        self.exprs[id.index()] = Some(info);
    }

    pub(crate) fn record_iter(&mut self, stmt: StmtId, info: TypeInfo) {
        self.range_iters.insert(stmt, info);
    }

    pub fn expr(&self, id: ExprId) -> Option<TypeInfo> {
        self.exprs.get(id.index()).copied().flatten()
    }

    pub fn range_iter(&self, stmt: StmtId) -> Option<TypeInfo> {
        self.range_iters.get(&stmt).copied()
    }
}

/// A fully checked program.
#[derive(Clone, Debug, Default)]
pub struct CheckedProgram {
    /// Files, dependencies first.
    pub order: Vec<FileId>,
    /// Indexed by [`FileId`].
    pub files: Vec<CheckedFile>,
    pub structs: StructTable,
    pub procs: FxHashMap<Name, ProcEntity>,
    /// Hoisted globals in declaration order.
    pub globals: Vec<GlobalVar>,
    pub strings: StringPool,
}

impl CheckedProgram {
    #[inline]
    pub fn file(&self, id: FileId) -> &CheckedFile {
        &self.files[id.index()]
    }

    pub fn proc(&self, name: Name) -> Option<&ProcEntity> {
        self.procs.get(&name)
    }

    pub fn global(&self, name: Name) -> Option<&GlobalVar> {
        self.globals.iter().find(|global| global.name == name)
    }
}
