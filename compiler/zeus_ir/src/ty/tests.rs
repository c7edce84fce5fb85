use super::*;

#[test]
fn test_rank_order() {
    assert!(Type::Invalid < Type::Bool);
    assert!(Type::Bool < Type::F64);
    assert!(Type::U64 < Type::S32);
    assert!(Type::S32 < Type::U8);
    assert!(Type::U8 < Type::CompDecimal);
    assert!(Type::CompDecimal < Type::CompInteger);
    assert!(Type::CompInteger < Type::CompString);
    assert!(Type::CompString < Type::Struct(StructId::new(0)));
    assert!(Type::Struct(StructId::new(0)) < Type::Struct(StructId::new(1)));
}

#[test]
fn test_binary_result_is_lower_rank() {
    assert_eq!(Type::S32.min(Type::CompInteger), Type::S32);
    assert_eq!(Type::U64.min(Type::U8), Type::U64);
}

#[test]
fn test_builtin_bits() {
    assert_eq!(Type::S64.builtin_bits(), Some(64));
    assert_eq!(Type::F32.builtin_bits(), Some(32));
    assert_eq!(Type::Bool.builtin_bits(), Some(32));
    assert_eq!(Type::U16.builtin_bits(), Some(16));
    assert_eq!(Type::Char.builtin_bits(), Some(8));
    assert_eq!(Type::Struct(StructId::new(2)).builtin_bits(), None);
}

#[test]
fn test_number_classes() {
    assert!(Type::CompInteger.is_number());
    assert!(Type::F64.is_number());
    assert!(!Type::Char.is_number());
    assert!(!Type::Bool.is_number());
    assert!(!Type::CompString.is_number());
}

#[test]
fn test_from_keyword() {
    assert_eq!(Type::from_keyword(TokenKind::TyS32), Some(Type::S32));
    assert_eq!(Type::from_keyword(TokenKind::TyChar), Some(Type::Char));
    assert_eq!(Type::from_keyword(TokenKind::Proc), None);
}
