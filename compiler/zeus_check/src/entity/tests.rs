use super::*;
use pretty_assertions::assert_eq;
use zeus_ir::StringInterner;

#[test]
fn builtin_sizes() {
    assert_eq!(TypeInfo::builtin(Type::U8).size_bits, 8);
    assert_eq!(TypeInfo::builtin(Type::Bool).size_bits, 32);
    assert_eq!(TypeInfo::builtin(Type::CompInteger).size_bits, 64);
    assert_eq!(TypeInfo::builtin(Type::S16).size_bytes(), 2);
}

#[test]
fn pointers_are_eight_bytes() {
    let table = StructTable::new();
    let info = table.info(Type::U8, 2);
    assert_eq!(info.size_bits, 64);
    assert!(info.is_pointer());

    let once = table.deref(info, 1).unwrap();
    assert_eq!(once.size_bits, 64);
    let value = table.deref(info, 2).unwrap();
    assert_eq!(value, TypeInfo::builtin(Type::U8));
    assert_eq!(table.deref(info, 3), None);
}

#[test]
fn struct_members_are_packed() {
    let interner = StringInterner::new();
    let mut table = StructTable::new();
    let id = table.declare(interner.intern("Pair"), FileId::ENTRY);
    let a = interner.intern("a");
    let b = interner.intern("b");
    table.complete(
        id,
        vec![
            Member {
                name: a,
                info: TypeInfo::builtin(Type::U8),
                offset_bits: 0,
            },
            Member {
                name: b,
                info: TypeInfo::builtin(Type::S32),
                offset_bits: 8,
            },
        ],
    );

    let entity = table.get(id);
    assert_eq!(entity.size_bits, 40);
    assert_eq!(entity.member(b).map(|m| m.offset_bits), Some(8));
    assert_eq!(entity.member(interner.intern("c")), None);
    assert_eq!(table.info(Type::Struct(id), 0).size_bits, 40);
    assert_eq!(table.info(Type::Struct(id), 1).size_bits, 64);
    assert_eq!(table.lookup(interner.intern("Pair")), Some(id));
}

#[test]
fn struct_values_are_not_scalar() {
    let table = StructTable::new();
    let info = TypeInfo {
        ty: Type::Struct(StructId::new(0)),
        pointer_depth: 0,
        size_bits: 64,
    };
    assert!(info.is_struct_value());
    assert!(!info.is_scalar());
    assert!(table.info(Type::S64, 1).is_scalar());
}
