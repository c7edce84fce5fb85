//! Diagnostic system for Zeus error reporting.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - File and span (where it went wrong)
//! - A bounded queue the driver flushes before exiting
//! - A terminal emitter that prints the offending line with carets

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod queue;
pub mod source_map;
pub mod span_utils;

pub use diagnostic::{internal_error, Diagnostic, Severity};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
pub use source_map::{SourceFile, SourceMap};
