//! Zeus IR - tokens, AST, types and interning shared by every stage.
//!
//! - Spans for source locations and [`FileId`]s for files
//! - Names for interned identifiers
//! - Tokens and `TokenList` for lexer output
//! - The arena-backed AST produced by the parser
//! - The [`Type`] lattice used by the checker and code generator

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod interner;
mod name;
mod span;
mod token;
mod ty;

pub use ast::{
    AstArena, BinaryOp, Expr, ExprId, ExprKind, ExprRange, ForKind, Import, Module,
    ProcSignature, RangeLoop, Stmt, StmtId, StmtKind, StmtRange, TypeRange, TypeRef, TypeRefKind,
};
pub use interner::StringInterner;
pub use name::Name;
pub use span::{FileId, Span};
pub use token::{Token, TokenKind, TokenList};
pub use ty::{StructId, Type};

static_assert_size!(Name, 4);
static_assert_size!(Token, 12);
