//! Semantic checking for Zeus.
//!
//! Walks every file of a [`Program`] in dependency order, resolving names
//! through a chain of scopes and assigning a [`TypeInfo`] to every
//! expression and declared variable. The result, a [`CheckedProgram`],
//! carries everything code generation needs: per-file side tables, the
//! structure table, procedure signatures, hoisted globals and the string
//! pool.
//!
//! Checking stops at the first [`CheckError`].

mod checked;
mod checker;
mod entity;
mod error;
mod program;
mod scope;
mod string_pool;

pub use checked::{CheckedFile, CheckedProgram};
pub use entity::{
    GlobalInit, GlobalVar, Member, ProcEntity, StructEntity, StructTable, TypeInfo,
    VariableEntity,
};
pub use error::{CheckError, CheckErrorKind};
pub use program::{dependency_order, Program, ProgramFile};
pub use scope::{Scope, ScopeKind};
pub use string_pool::StringPool;

use checker::{FileChecker, ProgramState};
use zeus_ir::StringInterner;

/// Check a whole program. Every file is checked exactly once, after all
/// of the files it imports.
#[tracing::instrument(level = "debug", skip_all, fields(files = program.len()))]
pub fn check_program(
    program: &Program,
    interner: &StringInterner,
) -> Result<CheckedProgram, CheckError> {
    let order = dependency_order(program)?;
    let mut state = ProgramState::new(program.len());
    let mut files = vec![CheckedFile::default(); program.len()];

    for &id in &order {
        let file = program.file(id);
        files[id.index()] = FileChecker::new(&mut state, program, file, interner).check()?;
    }

    tracing::debug!(
        structs = state.structs.len(),
        procs = state.procs.len(),
        globals = state.globals.len(),
        strings = state.strings.len(),
        "checked"
    );
    Ok(CheckedProgram {
        order,
        files,
        structs: state.structs,
        procs: state.procs,
        globals: state.globals,
        strings: state.strings,
    })
}

#[cfg(test)]
mod tests;
