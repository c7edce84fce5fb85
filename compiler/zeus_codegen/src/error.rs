//! Code generation errors.
//!
//! Every well-typed program should lower. These errors mark constructs the
//! backend cannot express yet or broken invariants between the checker and
//! the backend, so the driver reports them as internal errors.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("{what} not supported by the RISC-V backend")]
    Unsupported { what: &'static str },

    #[error("ran out of registers: every register holds a live temporary")]
    OutOfRegisters,

    #[error("no type recorded for expression {0}")]
    MissingType(u32),

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("unknown procedure `{0}`")]
    UnknownProcedure(String),

    #[error("unknown structure member `{0}`")]
    UnknownMember(String),

    #[error("procedure `{name}` returns {count} values but only {max} fit in registers")]
    TooManyOutputs {
        name: String,
        count: usize,
        max: usize,
    },
}
