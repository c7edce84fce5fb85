//! Low-level scanner for Zeus source text.
//!
//! - [`SourceBuffer`]: sentinel-terminated, cache-line padded copy of the source
//! - [`Cursor`]: byte cursor with `memchr` accelerated skips
//! - [`RawScanner`]: `(RawTag, len)` tokens without keyword or literal decoding
//!
//! This crate has no `zeus_*` dependencies.

mod cursor;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use raw_scanner::{tokenize, RawScanner};
pub use source_buffer::SourceBuffer;
pub use tag::{RawTag, RawToken};
