//! Keyword and pound-directive resolution.
//!
//! The identifier's length is a first-pass filter (keywords are 2-6 bytes),
//! then the text is matched against the keywords of that length. Matching
//! is exact and case-sensitive.

use zeus_ir::TokenKind;

/// Look up a reserved keyword. `None` for ordinary identifiers.
#[inline]
pub fn lookup(text: &str) -> Option<TokenKind> {
    match text.len() {
        2 => match text {
            "u8" => Some(TokenKind::TyU8),
            "s8" => Some(TokenKind::TyS8),
            "if" => Some(TokenKind::If),
            _ => None,
        },
        3 => match text {
            "f32" => Some(TokenKind::TyF32),
            "f64" => Some(TokenKind::TyF64),
            "u16" => Some(TokenKind::TyU16),
            "u32" => Some(TokenKind::TyU32),
            "u64" => Some(TokenKind::TyU64),
            "s16" => Some(TokenKind::TyS16),
            "s32" => Some(TokenKind::TyS32),
            "s64" => Some(TokenKind::TyS64),
            "for" => Some(TokenKind::For),
            _ => None,
        },
        4 => match text {
            "char" => Some(TokenKind::TyChar),
            "bool" => Some(TokenKind::TyBool),
            "proc" => Some(TokenKind::Proc),
            "true" => Some(TokenKind::True),
            "else" => Some(TokenKind::Else),
            _ => None,
        },
        5 => match text {
            "false" => Some(TokenKind::False),
            "const" => Some(TokenKind::Const),
            _ => None,
        },
        6 => match text {
            "struct" => Some(TokenKind::Struct),
            "return" => Some(TokenKind::Return),
            _ => None,
        },
        _ => None,
    }
}

/// Look up a pound directive by the text after `#`.
#[inline]
pub fn lookup_directive(name: &str) -> Option<TokenKind> {
    match name {
        "import" => Some(TokenKind::PoundImport),
        "stack_size" => Some(TokenKind::PoundStackSize),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
