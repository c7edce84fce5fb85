//! Parser snapshots for speculative parsing.
//!
//! Statements that start with an identifier are either a declaration or
//! assignment (`a, b.c = ...`, `x : s32`) or an expression (`f(x)`). The
//! parser reads a target list speculatively and rewinds when no `:` or `=`
//! follows. Unlike a pure lookahead, the speculative parse allocates nodes,
//! so the snapshot also records the arena position and restoring drops
//! those nodes.

use zeus_ir::ast::ArenaCheckpoint;

#[derive(Clone, Copy, Debug)]
pub(crate) struct ParserSnapshot {
    pub(crate) cursor_pos: usize,
    pub(crate) arena: ArenaCheckpoint,
    pub(crate) parens: u32,
}

impl ParserSnapshot {
    #[inline]
    pub(crate) fn new(cursor_pos: usize, arena: ArenaCheckpoint, parens: u32) -> Self {
        Self {
            cursor_pos,
            arena,
            parens,
        }
    }
}
