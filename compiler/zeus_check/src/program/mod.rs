//! The set of parsed files making up one compilation.

use smallvec::SmallVec;
use zeus_ir::{FileId, Module, Span};

use crate::{CheckError, CheckErrorKind};

/// One parsed source file and its resolved direct imports.
#[derive(Clone, Debug)]
pub struct ProgramFile {
    pub id: FileId,
    /// Path as written on the command line or in `#import`.
    pub name: String,
    pub module: Module,
    /// `deps[i]` is the file named by `module.imports[i]`.
    pub deps: SmallVec<[FileId; 4]>,
}

/// Every file of a compilation, indexed by [`FileId`]. File 0 is the entry.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub files: Vec<ProgramFile>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file, assigning it the next id.
    pub fn add_file(&mut self, name: impl Into<String>, module: Module) -> FileId {
        let index = u32::try_from(self.files.len()).unwrap_or(u32::MAX);
        let id = FileId::new(index);
        self.files.push(ProgramFile {
            id,
            name: name.into(),
            module,
            deps: SmallVec::new(),
        });
        id
    }

    #[inline]
    pub fn file(&self, id: FileId) -> &ProgramFile {
        &self.files[id.index()]
    }

    #[inline]
    pub fn file_mut(&mut self, id: FileId) -> &mut ProgramFile {
        &mut self.files[id.index()]
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum Visit {
    New,
    Active,
    Done,
}

/// Files ordered so that every file comes after all of its imports.
///
/// Importing the same file twice is fine; an import cycle is an error
/// reported at the `#import` that closes it.
pub fn dependency_order(program: &Program) -> Result<Vec<FileId>, CheckError> {
    let mut state = vec![Visit::New; program.len()];
    let mut order = Vec::with_capacity(program.len());
    for file in &program.files {
        visit(program, file.id, &mut state, &mut order)?;
    }
    Ok(order)
}

fn visit(
    program: &Program,
    id: FileId,
    state: &mut [Visit],
    order: &mut Vec<FileId>,
) -> Result<(), CheckError> {
    match state[id.index()] {
        // Active files are caught before recursing.
        Visit::Done | Visit::Active => return Ok(()),
        Visit::New => {}
    }
    state[id.index()] = Visit::Active;

    let file = program.file(id);
    for (position, &dep) in file.deps.iter().enumerate() {
        if state[dep.index()] == Visit::Active {
            let span = file
                .module
                .imports
                .get(position)
                .map_or(Span::DUMMY, |import| import.span);
            return Err(CheckError::new(
                id,
                span,
                CheckErrorKind::ImportCycle {
                    file: program.file(dep).name.clone(),
                },
            ));
        }
        zeus_stack::ensure_sufficient_stack(|| visit(program, dep, state, order))?;
    }

    state[id.index()] = Visit::Done;
    order.push(id);
    Ok(())
}
