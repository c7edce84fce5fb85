//! Program entities produced by checking: resolved value types, the
//! structure table, procedure signatures and hoisted globals.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use zeus_ir::{FileId, Name, Span, StructId, Type};

/// Resolved type of a value: base type, pointer depth and width in bits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeInfo {
    pub ty: Type,
    pub pointer_depth: u8,
    pub size_bits: u64,
}

impl TypeInfo {
    pub const INVALID: TypeInfo = TypeInfo {
        ty: Type::Invalid,
        pointer_depth: 0,
        size_bits: 0,
    };

    /// A non-pointer built-in value. Structures go through
    /// [`StructTable::info`] since their size lives in the table.
    pub fn builtin(ty: Type) -> Self {
        TypeInfo {
            ty,
            pointer_depth: 0,
            size_bits: ty.builtin_bits().map_or(0, u64::from),
        }
    }

    #[inline]
    pub fn is_pointer(&self) -> bool {
        self.pointer_depth > 0
    }

    /// A structure held by value (not behind a pointer).
    #[inline]
    pub fn is_struct_value(&self) -> bool {
        self.pointer_depth == 0 && self.ty.is_struct()
    }

    #[inline]
    pub fn size_bytes(&self) -> u64 {
        self.size_bits / 8
    }

    /// Whether the value lives in one register.
    pub fn is_scalar(&self) -> bool {
        self.is_pointer() || !self.ty.is_struct()
    }
}

/// A variable bound in a scope.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct VariableEntity {
    pub info: TypeInfo,
    pub span: Span,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Member {
    pub name: Name,
    pub info: TypeInfo,
    pub offset_bits: u64,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StructEntity {
    pub name: Name,
    pub file: FileId,
    /// Members in declaration order, packed without padding.
    pub members: Vec<Member>,
    pub size_bits: u64,
}

impl StructEntity {
    pub fn member(&self, name: Name) -> Option<&Member> {
        self.members.iter().find(|member| member.name == name)
    }
}

/// Program-wide structure table.
#[derive(Clone, Debug, Default)]
pub struct StructTable {
    entries: Vec<StructEntity>,
    by_name: FxHashMap<Name, StructId>,
}

impl StructTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty structure. Members are filled in once the body
    /// has been checked, so a member may point back at its own structure.
    pub(crate) fn declare(&mut self, name: Name, file: FileId) -> StructId {
        let index = u32::try_from(self.entries.len()).unwrap_or(u32::MAX);
        let id = StructId::new(index);
        self.entries.push(StructEntity {
            name,
            file,
            members: Vec::new(),
            size_bits: 0,
        });
        self.by_name.insert(name, id);
        id
    }

    pub(crate) fn complete(&mut self, id: StructId, members: Vec<Member>) {
        let entry = &mut self.entries[id.index()];
        entry.size_bits = members.iter().map(|m| m.info.size_bits).sum();
        entry.members = members;
    }

    pub fn lookup(&self, name: Name) -> Option<StructId> {
        self.by_name.get(&name).copied()
    }

    #[inline]
    pub fn get(&self, id: StructId) -> &StructEntity {
        &self.entries[id.index()]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructEntity> {
        self.entries.iter()
    }

    /// Type info for `ty` behind `pointer_depth` levels of indirection.
    ///
    /// Pointers are always 64 bits wide.
    pub fn info(&self, ty: Type, pointer_depth: u8) -> TypeInfo {
        let size_bits = if pointer_depth > 0 {
            64
        } else {
            match ty {
                Type::Struct(id) => self.get(id).size_bits,
                other => other.builtin_bits().map_or(0, u64::from),
            }
        };
        TypeInfo {
            ty,
            pointer_depth,
            size_bits,
        }
    }

    /// Remove `levels` of indirection, or `None` if there are not enough.
    pub fn deref(&self, info: TypeInfo, levels: u8) -> Option<TypeInfo> {
        let depth = info.pointer_depth.checked_sub(levels)?;
        Some(self.info(info.ty, depth))
    }
}

/// A procedure signature. Registered before the body is checked, so
/// procedures may call themselves.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ProcEntity {
    pub name: Name,
    pub file: FileId,
    pub span: Span,
    pub inputs: SmallVec<[TypeInfo; 4]>,
    pub outputs: SmallVec<[TypeInfo; 2]>,
    /// `false` for a bodiless declaration.
    pub defined: bool,
}

impl ProcEntity {
    pub fn same_signature(&self, other: &ProcEntity) -> bool {
        self.inputs == other.inputs && self.outputs == other.outputs
    }
}

/// Literal initial value of a hoisted global.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum GlobalInit {
    Int(u64),
    Decimal(f64),
    Char(u8),
    /// Index into the [`StringPool`](crate::StringPool).
    Str(usize),
}

/// A file-scope declaration, emitted into the data section.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GlobalVar {
    pub file: FileId,
    pub name: Name,
    pub span: Span,
    pub info: TypeInfo,
    pub init: GlobalInit,
}

#[cfg(test)]
mod tests;
