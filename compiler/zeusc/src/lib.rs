//! Zeus compiler driver.
//!
//! Reads the entry file, follows its `#import`s, checks the whole program
//! and writes RISC-V assembly. Every failure ends up as a diagnostic in
//! the [`CompilationContext`] queue, rendered once the run stops.
//!
//! # Module Structure
//!
//! - `options`: command-line flags
//! - `context`: interner, sources and diagnostics of one run
//! - `load`: file reading and import waves
//! - `pool`: worker pool used by `load`
//! - `problem`: stage errors to diagnostics
//! - `commands`: handlers behind the `zeus` binary

pub mod commands;
mod context;
mod error;
mod load;
pub mod options;
mod pool;
pub mod problem;
mod tracing_setup;

pub use context::CompilationContext;
pub use error::DriverError;
pub use load::load_program;
pub use options::{parse_args, CompileOptions, ParsedArgs};
pub use pool::WorkerPool;
pub use tracing_setup::init_tracing;
