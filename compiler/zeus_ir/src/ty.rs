//! The Zeus type lattice.
//!
//! Types are totally ordered by rank. The derived `Ord` follows declaration
//! order, which is the widening order used by the checker: a value may be
//! stored into a slot whose type ranks at or below the value's type, and a
//! binary expression takes the lower-ranked operand type. Struct types rank
//! above every built-in type.

use crate::TokenKind;
use std::fmt;

/// Index into the program-wide structure table.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct StructId(u32);

impl StructId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        StructId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Type {
    Invalid,
    Bool,
    F64,
    S64,
    U64,
    F32,
    S32,
    U32,
    S16,
    U16,
    Char,
    S8,
    U8,
    /// Type of a decimal literal before it is stored anywhere.
    CompDecimal,
    /// Type of an integer literal before it is stored anywhere.
    CompInteger,
    /// Type of a string literal (address of pooled bytes).
    CompString,
    Struct(StructId),
}

impl Type {
    /// Built-in type named by a type keyword.
    pub fn from_keyword(kind: TokenKind) -> Option<Type> {
        Some(match kind {
            TokenKind::TyBool => Type::Bool,
            TokenKind::TyF64 => Type::F64,
            TokenKind::TyS64 => Type::S64,
            TokenKind::TyU64 => Type::U64,
            TokenKind::TyF32 => Type::F32,
            TokenKind::TyS32 => Type::S32,
            TokenKind::TyU32 => Type::U32,
            TokenKind::TyS16 => Type::S16,
            TokenKind::TyU16 => Type::U16,
            TokenKind::TyChar => Type::Char,
            TokenKind::TyS8 => Type::S8,
            TokenKind::TyU8 => Type::U8,
            _ => return None,
        })
    }

    #[inline]
    pub fn is_struct(self) -> bool {
        matches!(self, Type::Struct(_))
    }

    #[inline]
    pub fn struct_id(self) -> Option<StructId> {
        match self {
            Type::Struct(id) => Some(id),
            _ => None,
        }
    }

    /// Integer or floating point value usable in arithmetic and as a loop step.
    pub fn is_number(self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Type::S64
                | Type::U64
                | Type::S32
                | Type::U32
                | Type::S16
                | Type::U16
                | Type::S8
                | Type::U8
                | Type::CompInteger
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Type::F64 | Type::F32 | Type::CompDecimal)
    }

    /// Signed for the purpose of loads, division and comparisons.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Type::S64 | Type::S32 | Type::S16 | Type::S8 | Type::CompInteger
        )
    }

    /// Size in bits of a built-in type. `None` for structs and `Invalid`.
    pub fn builtin_bits(self) -> Option<u32> {
        match self {
            Type::CompString
            | Type::CompDecimal
            | Type::CompInteger
            | Type::S64
            | Type::U64
            | Type::F64 => Some(64),
            Type::Bool | Type::S32 | Type::U32 | Type::F32 => Some(32),
            Type::S16 | Type::U16 => Some(16),
            Type::Char | Type::S8 | Type::U8 => Some(8),
            Type::Invalid | Type::Struct(_) => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Type::Invalid => "<invalid>",
            Type::Bool => "bool",
            Type::F64 => "f64",
            Type::S64 => "s64",
            Type::U64 => "u64",
            Type::F32 => "f32",
            Type::S32 => "s32",
            Type::U32 => "u32",
            Type::S16 => "s16",
            Type::U16 => "u16",
            Type::Char => "char",
            Type::S8 => "s8",
            Type::U8 => "u8",
            Type::CompDecimal => "compile-time decimal",
            Type::CompInteger => "compile-time integer",
            Type::CompString => "compile-time string",
            Type::Struct(_) => "struct",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Struct(id) => write!(f, "struct#{}", id.index()),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests;
