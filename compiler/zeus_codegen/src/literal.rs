//! Bit patterns of literals stored into typed slots.
//!
//! Integer slots take integer literals wrapped to their width and decimal
//! literals truncated toward zero. Float slots take the IEEE bit pattern of
//! the value at their precision.

use zeus_check::TypeInfo;
use zeus_ir::Type;

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Literal {
    Int(u64),
    Decimal(f64),
    Char(u8),
}

/// Whether a slot of this type holds a floating point bit pattern.
pub fn is_float_slot(info: TypeInfo) -> bool {
    !info.is_pointer() && info.ty.is_float()
}

/// Raw bits of `literal` stored into a slot of type `target`, masked to
/// the slot's width.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "literal conversions follow the target slot's representation"
)]
pub fn literal_bits(literal: Literal, target: TypeInfo) -> u64 {
    if is_float_slot(target) {
        let value = match literal {
            Literal::Int(value) => value as f64,
            Literal::Decimal(value) => value,
            Literal::Char(value) => f64::from(value),
        };
        return if target.ty == Type::F32 {
            u64::from((value as f32).to_bits())
        } else {
            value.to_bits()
        };
    }
    let bits = match literal {
        Literal::Int(value) => value,
        Literal::Decimal(value) => value.trunc() as i64 as u64,
        Literal::Char(value) => u64::from(value),
    };
    mask(bits, target.size_bits)
}

/// The value a register holds after loading `bits` from a slot of type
/// `target`: narrow signed slots sign-extend.
pub fn register_value(bits: u64, target: TypeInfo) -> i64 {
    let width = target.size_bits;
    let raw = i64::from_ne_bytes(bits.to_ne_bytes());
    if target.is_pointer() || !target.ty.is_signed() || width == 0 || width >= 64 {
        return raw;
    }
    let shift = 64 - width;
    (raw << shift) >> shift
}

fn mask(bits: u64, width: u64) -> u64 {
    if width == 0 || width >= 64 {
        bits
    } else {
        bits & ((1 << width) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn info(ty: Type) -> TypeInfo {
        TypeInfo::builtin(ty)
    }

    #[test]
    fn integers_wrap_to_the_slot() {
        assert_eq!(literal_bits(Literal::Int(300), info(Type::U8)), 44);
        assert_eq!(literal_bits(Literal::Int(5), info(Type::S32)), 5);
        assert_eq!(literal_bits(Literal::Int(u64::MAX), info(Type::U64)), u64::MAX);
        assert_eq!(literal_bits(Literal::Char(b'a'), info(Type::Char)), 97);
    }

    #[test]
    fn decimals_truncate_into_integers() {
        assert_eq!(literal_bits(Literal::Decimal(3.9), info(Type::S32)), 3);
        assert_eq!(literal_bits(Literal::Decimal(-2.5), info(Type::S8)), 0xFE);
    }

    #[test]
    fn floats_keep_their_bit_pattern() {
        assert_eq!(
            literal_bits(Literal::Decimal(1.5), info(Type::F64)),
            1.5f64.to_bits()
        );
        assert_eq!(
            literal_bits(Literal::Decimal(1.5), info(Type::F32)),
            u64::from(1.5f32.to_bits())
        );
        assert_eq!(
            literal_bits(Literal::Int(2), info(Type::CompDecimal)),
            2.0f64.to_bits()
        );
    }

    #[test]
    fn signed_registers_sign_extend() {
        assert_eq!(register_value(0xFE, info(Type::S8)), -2);
        assert_eq!(register_value(0xFE, info(Type::U8)), 0xFE);
        assert_eq!(register_value(u64::MAX, info(Type::U64)), -1);
    }
}
