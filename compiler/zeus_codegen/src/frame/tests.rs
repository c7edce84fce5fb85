use super::*;
use pretty_assertions::assert_eq;
use zeus_check::StructTable;
use zeus_ir::{StringInterner, StructId, Type};

fn info(ty: Type) -> TypeInfo {
    TypeInfo::builtin(ty)
}

#[test]
fn locals_are_naturally_aligned() {
    let interner = StringInterner::new();
    let mut frame = Frame::new();
    let a = frame.declare(interner.intern("a"), info(Type::U8));
    let b = frame.declare(interner.intern("b"), info(Type::S32));
    let c = frame.declare(interner.intern("c"), info(Type::S64));
    let d = frame.declare(interner.intern("d"), info(Type::U16));
    assert_eq!(a.slot.offset, 0);
    assert_eq!(b.slot.offset, 4);
    assert_eq!(c.slot.offset, 8);
    assert_eq!(d.slot.offset, 16);
    assert_eq!(frame.top(), 24);
    assert!(b.slot.signed);
    assert!(!d.slot.signed);
}

#[test]
fn inner_areas_start_where_the_parent_ends() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let y = interner.intern("y");
    let mut frame = Frame::new();
    frame.declare(x, info(Type::S64));
    assert_eq!(frame.generation(), 1);

    frame.push_area();
    assert_eq!(frame.generation(), 2);
    let inner = frame.declare(y, info(Type::S64));
    assert_eq!(inner.slot.offset, 8);
    assert_eq!(inner.generation, 2);
    assert_eq!(frame.lookup(x).map(|local| local.generation), Some(1));

    assert_eq!(frame.pop_area(), 2);
    assert_eq!(frame.lookup(y), None);
    assert_eq!(frame.top(), 8);
    assert_eq!(frame.high_water(), 16);

    // The space is reused by the next sibling scope.
    frame.push_area();
    assert_eq!(frame.declare(y, info(Type::S32)).slot.offset, 8);
}

#[test]
fn shadowing_resolves_innermost_first() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut frame = Frame::new();
    frame.declare(x, info(Type::S64));
    frame.push_area();
    frame.declare(x, info(Type::U8));
    assert_eq!(frame.lookup(x).map(|local| local.info.ty), Some(Type::U8));
    frame.pop_area();
    assert_eq!(frame.lookup(x).map(|local| local.info.ty), Some(Type::S64));
}

#[test]
fn first_eight_scalars_go_in_registers() {
    let mut inputs = vec![info(Type::S64); 10];
    let pointer = StructTable::new().info(Type::U8, 1);
    inputs[1] = pointer;
    let layout = InputLayout::new(&inputs);
    assert_eq!(layout.locations[0], InputLocation::Register(Reg::argument(0)));
    assert_eq!(layout.locations[7], InputLocation::Register(Reg::argument(7)));
    assert_eq!(layout.locations[8], InputLocation::Stack(0));
    assert_eq!(layout.locations[9], InputLocation::Stack(8));
    assert_eq!(layout.stack_size, 16);
    assert_eq!(layout.callee_offset(0), -32);
    assert_eq!(layout.callee_offset(8), -24);
}

#[test]
fn structure_values_go_on_the_stack() {
    let point = TypeInfo {
        ty: Type::Struct(StructId::new(0)),
        pointer_depth: 0,
        size_bits: 96,
    };
    let layout = InputLayout::new(&[info(Type::U8), point, info(Type::S32)]);
    assert_eq!(
        layout.locations.as_slice(),
        &[
            InputLocation::Register(Reg::argument(0)),
            InputLocation::Stack(0),
            InputLocation::Register(Reg::argument(1)),
        ]
    );
    assert_eq!(layout.stack_size, 16);
}
