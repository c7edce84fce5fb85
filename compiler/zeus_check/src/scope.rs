//! Lexical scopes.

use rustc_hash::{FxHashMap, FxHashSet};
use zeus_ir::Name;

use crate::VariableEntity;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ScopeKind {
    /// A file's top level.
    Global,
    /// Procedure inputs and body.
    Proc,
    /// `if`, `else` and `for` bodies.
    Block,
    /// Transient scope for structure members.
    Struct,
}

/// One level of the scope chain.
#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub vars: FxHashMap<Name, VariableEntity>,
    /// Procedures visible from this scope. Only global scopes hold any.
    pub procs: FxHashSet<Name>,
}

impl Scope {
    pub fn new(kind: ScopeKind) -> Self {
        Scope {
            kind,
            vars: FxHashMap::default(),
            procs: FxHashSet::default(),
        }
    }

    pub fn var(&self, name: Name) -> Option<&VariableEntity> {
        self.vars.get(&name)
    }

    pub fn has_proc(&self, name: Name) -> bool {
        self.procs.contains(&name)
    }
}
