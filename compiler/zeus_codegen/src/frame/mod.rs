//! Procedure frames.
//!
//! A frame is addressed from the frame pointer `x5` and grows upward. Each
//! lexical scope of a procedure pushes an [`Area`] that hands out slots
//! from where its parent stopped; popping the Area gives its space back.
//! Stack-passed inputs and the caller's link area sit just below `x5`.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use zeus_check::TypeInfo;
use zeus_ir::Name;

use crate::isa::Reg;

/// Bytes below the frame pointer holding the caller's `x1` and `x5`.
pub const LINK_AREA: i64 = 16;

/// A frame location: offset from `x5`, width in bytes and how narrow
/// values extend when loaded.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Slot {
    pub offset: i64,
    pub size: u64,
    pub signed: bool,
}

impl Slot {
    pub fn for_value(offset: i64, info: TypeInfo) -> Self {
        Slot {
            offset,
            size: info.size_bytes(),
            signed: !info.is_pointer() && info.ty.is_signed(),
        }
    }
}

/// A variable visible in the current procedure.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Local {
    pub slot: Slot,
    pub info: TypeInfo,
    /// Depth of the Area that declared it.
    pub generation: u32,
}

/// Variables of one lexical scope.
#[derive(Clone, Debug, Default)]
pub struct Area {
    vars: FxHashMap<Name, Local>,
    /// First free byte.
    next: u64,
}

/// The Area stack of one procedure.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    areas: Vec<Area>,
    /// Largest extent reached by any Area.
    high_water: u64,
}

impl Frame {
    pub fn new() -> Self {
        Frame {
            areas: vec![Area::default()],
            high_water: 0,
        }
    }

    /// Current Area depth; the generation of values declared now.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "scope nesting is far below u32::MAX"
    )]
    pub fn generation(&self) -> u32 {
        self.areas.len() as u32
    }

    pub fn push_area(&mut self) {
        let next = self.areas.last().map_or(0, |area| area.next);
        self.areas.push(Area {
            vars: FxHashMap::default(),
            next,
        });
    }

    /// Pop the innermost Area, returning the generation it had.
    pub fn pop_area(&mut self) -> u32 {
        let generation = self.generation();
        if self.areas.len() > 1 {
            self.areas.pop();
        }
        generation
    }

    /// Reserve `size` bytes aligned to `align` in the innermost Area.
    pub fn reserve(&mut self, size: u64, align: u64) -> i64 {
        let Some(area) = self.areas.last_mut() else {
            return 0;
        };
        let offset = area.next.next_multiple_of(align.max(1));
        area.next = offset + size;
        self.high_water = self.high_water.max(area.next);
        offset_of(offset)
    }

    /// Reserve a slot for a value of `info` without naming it.
    pub fn hidden_slot(&mut self, info: TypeInfo) -> Slot {
        let offset = self.reserve(info.size_bytes(), alignment(info));
        Slot::for_value(offset, info)
    }

    /// Declare a variable in the innermost Area.
    pub fn declare(&mut self, name: Name, info: TypeInfo) -> Local {
        let slot = self.hidden_slot(info);
        self.bind(name, slot, info)
    }

    /// Name an existing slot, such as a stack-passed input.
    pub fn bind(&mut self, name: Name, slot: Slot, info: TypeInfo) -> Local {
        let local = Local {
            slot,
            info,
            generation: self.generation(),
        };
        if let Some(area) = self.areas.last_mut() {
            area.vars.insert(name, local);
        }
        local
    }

    /// Innermost visible variable called `name`.
    pub fn lookup(&self, name: Name) -> Option<Local> {
        self.areas
            .iter()
            .rev()
            .find_map(|area| area.vars.get(&name).copied())
    }

    /// End of the live part of the frame, where a callee's arguments and
    /// link area go.
    pub fn top(&self) -> i64 {
        let next = self.areas.last().map_or(0, |area| area.next);
        offset_of(next.next_multiple_of(8))
    }

    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}

pub(crate) fn offset_of(bytes: u64) -> i64 {
    i64::try_from(bytes).unwrap_or(i64::MAX)
}

/// Natural alignment: scalars align to their width, structures to 8.
pub fn alignment(info: TypeInfo) -> u64 {
    if info.is_struct_value() {
        8
    } else {
        info.size_bytes().clamp(1, 8)
    }
}

/// Where one procedure input travels.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum InputLocation {
    Register(Reg),
    /// Offset from the start of the stack argument block.
    Stack(i64),
}

/// How a signature's inputs are passed. Caller and callee derive it from
/// the same signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputLayout {
    pub locations: SmallVec<[InputLocation; 4]>,
    /// Bytes of the stack argument block, a multiple of 8.
    pub stack_size: i64,
}

impl InputLayout {
    /// The first eight register-sized inputs use `x6`..`x13`; the rest and
    /// every structure value go on the stack.
    pub fn new(inputs: &[TypeInfo]) -> Self {
        let mut locations = SmallVec::new();
        let mut registers = 0;
        let mut stack: u64 = 0;
        for &input in inputs {
            if input.is_scalar() && registers < Reg::ARGUMENT_REGISTERS {
                locations.push(InputLocation::Register(Reg::argument(registers)));
                registers += 1;
            } else {
                let offset = stack.next_multiple_of(alignment(input));
                stack = offset + input.size_bytes();
                locations.push(InputLocation::Stack(offset_of(offset)));
            }
        }
        InputLayout {
            locations,
            stack_size: offset_of(stack.next_multiple_of(8)),
        }
    }

    /// Offset from the callee's frame pointer of a stack input.
    pub fn callee_offset(&self, stack_offset: i64) -> i64 {
        stack_offset - self.stack_size - LINK_AREA
    }
}

#[cfg(test)]
mod tests;
