//! Flat AST types using arena allocation.
//!
//! - No `Box<Expr>`, nodes reference each other by `ExprId`/`StmtId`
//! - Child lists are contiguous ranges into side tables of the arena
//! - One [`AstArena`] per file, dropped with the file
//!
//! # Module Structure
//!
//! - `ids`: indices and ranges
//! - `expr`: expression nodes
//! - `stmt`: statement nodes and written types
//! - `operators`: binary operators
//! - `arena`: storage with checkpoint/rollback for speculative parsing
//! - `module`: a parsed file
//! - `dump`: S-expression rendering

mod arena;
pub mod dump;
mod expr;
mod ids;
mod module;
mod operators;
mod stmt;

pub use arena::{ArenaCheckpoint, AstArena};
pub use expr::{Expr, ExprKind};
pub use ids::{ExprId, ExprRange, StmtId, StmtRange, TypeRange};
pub use module::{Import, Module};
pub use operators::BinaryOp;
pub use stmt::{ForKind, ProcSignature, RangeLoop, Stmt, StmtKind, TypeRef, TypeRefKind};
