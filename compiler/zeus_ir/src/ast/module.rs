//! Parsed file.

use super::{AstArena, StmtId};
use crate::{Name, Span};

/// `#import "path"` directive. The path is relative to the importing file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Import {
    pub path: Name,
    pub span: Span,
}

/// One parsed source file: its arena and top-level statements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Module {
    pub arena: AstArena,
    pub items: Vec<StmtId>,
    pub imports: Vec<Import>,
    /// `#stack_size N` in kilobytes, with the directive's span.
    pub stack_size: Option<(u64, Span)>,
}

impl Module {
    pub fn new(arena: AstArena) -> Self {
        Module {
            arena,
            items: Vec::new(),
            imports: Vec::new(),
            stack_size: None,
        }
    }
}
