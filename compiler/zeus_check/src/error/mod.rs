//! Semantic errors.
//!
//! The checker stops at the first error. Each [`CheckErrorKind`] carries the
//! user-facing message through `thiserror` and maps onto a stable
//! [`ErrorCode`] for the diagnostic layer.

use thiserror::Error;
use zeus_diagnostic::ErrorCode;
use zeus_ir::{FileId, Span};

/// A semantic error located in one file.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct CheckError {
    pub file: FileId,
    pub span: Span,
    pub kind: CheckErrorKind,
}

impl CheckError {
    #[cold]
    pub fn new(file: FileId, span: Span, kind: CheckErrorKind) -> Self {
        CheckError { file, span, kind }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror hands format arguments over by reference"
)]
fn plural(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror hands format arguments over by reference"
)]
fn was_were(count: &usize) -> &'static str {
    if *count == 1 {
        "was"
    } else {
        "were"
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CheckErrorKind {
    // Name resolution
    #[error("Variable not defined")]
    VariableNotDefined,
    #[error("Procedure not defined")]
    ProcedureNotDefined,
    #[error("Structure not defined")]
    StructureNotDefined,
    #[error("Redefinition")]
    Redefinition,
    #[error("Procedure already defined")]
    ProcedureRedefinition,
    #[error("Structure already defined")]
    StructureRedefinition,
    #[error("Iterator defined before")]
    IteratorDefined,
    #[error("A global variable and a procedure cannot share a name")]
    GlobalProcedureClash,
    #[error("'{name}' is reserved for compiler generated labels")]
    ReservedName { name: String },

    // Type compatibility
    #[error("Explicit cast required")]
    ExplicitCast,
    #[error("Expression tree pointer depth is not equal to type pointer depth")]
    PointerDepthMismatch,
    #[error("Expected {expected} but found {found}")]
    TypeMismatch { expected: String, found: String },
    #[error("Procedure definition does not match its declaration")]
    SignatureMismatch,
    #[error("Condition must be a scalar value or a pointer")]
    InvalidCondition,
    #[error("Range start and end types do not match")]
    RangeMismatch,
    #[error("Initializer lists can only initialize a structure declaration")]
    InitListNotAllowed,

    // Binary operands
    #[error("Cannot perform binary operation with 2 pointers")]
    TwoPointers,
    #[error("Cannot perform binary operation with structures")]
    StructOperands,
    #[error("Cannot perform binary operation with strings")]
    StringOperands,
    #[error("Pointer arithmetic only supports '+' and '-' with an integer offset")]
    InvalidPointerArithmetic,

    // Structures
    #[error("{name} does not belong to the defined structure")]
    FieldNotFound { name: String },
    #[error("Field access requires a structure")]
    NotAStructure,
    #[error("Structure bodies may only contain declarations without initializers")]
    InvalidStructBody,
    #[error("Structure cannot contain itself")]
    RecursiveStructure,

    // Counts
    #[error(
        "Procedure defined with {} input{} but you provided {} input{}",
        .expected, plural(.expected), .found, plural(.found)
    )]
    ArgumentCount { expected: usize, found: usize },
    #[error("RHS returns more than what LHS can catch")]
    TooManyValues,
    #[error("RHS returns less than what LHS can catch")]
    TooFewValues,
    #[error("Procedure used as a value must return exactly one value")]
    NotSingleValue,
    #[error(
        "Procedure returns {} value{} but {} {} provided",
        .expected, plural(.expected), .found, was_were(.found)
    )]
    ReturnCount { expected: usize, found: usize },
    #[error(
        "Structure has {} member{} but the initializer provides {}",
        .expected, plural(.expected), .found
    )]
    InitListCount { expected: usize, found: usize },
    #[error("Multiple targets require a procedure call on the right")]
    MultiTargetNeedsCall,

    // Placement
    #[error("Return outside of a procedure")]
    ReturnOutsideProc,
    #[error("Procedures can only be defined at global scope")]
    NestedProcedure,
    #[error("{what} statements are not allowed at global scope")]
    NotAllowedAtGlobalScope { what: &'static str },
    #[error("Procedure inputs cannot have default values")]
    InputDefault,

    // Globals
    #[error("Variable already declared at global scope in {file}")]
    GlobalRedefinition { file: String },
    #[error("Global declarations take exactly one variable")]
    GlobalTargetCount,
    #[error("Global variables must be initialized with a literal")]
    GlobalNotLiteral,

    // Loops
    #[error("Step must be a number and not a pointer")]
    InvalidStep,
    #[error("Loop iterator must be an integer or a pointer")]
    InvalidIterator,

    // Pointer access
    #[error("Cannot dereference a non-pointer")]
    DerefNonPointer,
    #[error("Only pointers can be indexed")]
    IndexNonPointer,
    #[error("Index must be an integer")]
    InvalidIndex,

    #[error("Import cycle through {file}")]
    ImportCycle { file: String },
}

impl CheckErrorKind {
    pub fn code(&self) -> ErrorCode {
        use CheckErrorKind::{
            ArgumentCount, DerefNonPointer, ExplicitCast, FieldNotFound, GlobalNotLiteral,
            GlobalProcedureClash, GlobalRedefinition, GlobalTargetCount, ImportCycle, IndexNonPointer, InitListCount,
            InitListNotAllowed, InputDefault, InvalidCondition, InvalidIndex, InvalidIterator,
            InvalidPointerArithmetic, InvalidStep, InvalidStructBody, IteratorDefined,
            MultiTargetNeedsCall, NestedProcedure, NotAStructure, NotAllowedAtGlobalScope,
            NotSingleValue, PointerDepthMismatch, ProcedureNotDefined, ProcedureRedefinition,
            RangeMismatch, RecursiveStructure, Redefinition, ReservedName, ReturnCount,
            ReturnOutsideProc,
            SignatureMismatch, StringOperands, StructOperands, StructureNotDefined,
            StructureRedefinition, TooFewValues, TooManyValues, TwoPointers, TypeMismatch,
            VariableNotDefined,
        };
        match self {
            VariableNotDefined | ProcedureNotDefined | StructureNotDefined => ErrorCode::E3001,
            Redefinition
            | ProcedureRedefinition
            | StructureRedefinition
            | IteratorDefined
            | GlobalProcedureClash
            | ReservedName { .. } => ErrorCode::E3002,
            ExplicitCast
            | PointerDepthMismatch
            | TypeMismatch { .. }
            | SignatureMismatch
            | InvalidCondition
            | RangeMismatch
            | InitListNotAllowed => ErrorCode::E3003,
            TwoPointers | StructOperands | StringOperands | InvalidPointerArithmetic => {
                ErrorCode::E3004
            }
            FieldNotFound { .. } | NotAStructure => ErrorCode::E3005,
            ArgumentCount { .. }
            | TooManyValues
            | TooFewValues
            | NotSingleValue
            | ReturnCount { .. }
            | InitListCount { .. }
            | MultiTargetNeedsCall => ErrorCode::E3006,
            ReturnOutsideProc | NestedProcedure | NotAllowedAtGlobalScope { .. } | InputDefault => {
                ErrorCode::E3007
            }
            GlobalRedefinition { .. } | GlobalTargetCount | GlobalNotLiteral => ErrorCode::E3008,
            InvalidStructBody | RecursiveStructure => ErrorCode::E3009,
            InvalidStep | InvalidIterator => ErrorCode::E3010,
            DerefNonPointer | IndexNonPointer | InvalidIndex => ErrorCode::E3011,
            ImportCycle { .. } => ErrorCode::E9004,
        }
    }
}

#[cfg(test)]
mod tests;
