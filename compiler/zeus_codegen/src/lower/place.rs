//! Addresses of places: field chains, pointer accesses and indexing.
//!
//! A field chain `a.b^.c` is right-threaded: each link is resolved in the
//! structure the previous link produced, starting from the scope chain.

use zeus_check::TypeInfo;
use zeus_ir::{ExprId, ExprKind, Name, StructId};
use zeus_stack::ensure_sufficient_stack;

use super::{Operand, ProcLowering};
use crate::emitter::emit;
use crate::frame::offset_of;
use crate::isa::{load_op, store_op, Reg};
use crate::CodegenError;

/// Address of a structure and its type, where the next link is found.
type StructBase = (Operand, StructId);

impl ProcLowering<'_, '_> {
    /// Current value of a place.
    pub(super) fn place_value(
        &mut self,
        id: ExprId,
        base: Option<StructBase>,
    ) -> Result<Operand, CodegenError> {
        let info = self.info(id)?;
        if info.is_struct_value() {
            return Err(CodegenError::Unsupported {
                what: "structure values in registers",
            });
        }

        // Plain locals come straight from the register bank.
        let arena = self.arena;
        if let (None, &ExprKind::Var { name, deref }) = (base, &arena.expr(id).kind) {
            if let Some(local) = self.frame.lookup(name) {
                let reg = self.local_register(local)?;
                if deref == 0 {
                    return Ok(Operand::borrowed(reg));
                }
                let mut address = Operand::borrowed(reg);
                for _ in 1..deref {
                    address = self.load_pointer(address)?;
                }
                return self.load_through(address, info);
            }
        }

        let address = self.place_address(id, base)?;
        self.load_through(address, info)
    }

    /// Address of the memory a place names.
    pub(super) fn place_address(
        &mut self,
        id: ExprId,
        base: Option<StructBase>,
    ) -> Result<Operand, CodegenError> {
        let arena = self.arena;
        match arena.expr(id).kind {
            ExprKind::Var { name, deref } => {
                self.link_address(name, deref, base).map(|(address, _)| address)
            }
            ExprKind::Modifier { name, deref, child } => {
                let (address, info) = self.link_address(name, deref, base)?;
                let id = info
                    .ty
                    .struct_id()
                    .filter(|_| !info.is_pointer())
                    .ok_or(CodegenError::Unsupported {
                        what: "field access on a non-structure",
                    })?;
                ensure_sufficient_stack(|| self.place_address(child, Some((address, id))))
            }
            ExprKind::Index {
                base: pointer,
                index,
            } => {
                let pointer = self.place_value(pointer, base)?;
                let (pointer, index) = self.hold_across(pointer, |this| this.lower_expr(index))?;
                let element = self.info(id)?.size_bytes().max(1);
                let index = self.scale(index, element, &[pointer])?;

                let dest = if pointer.owned {
                    pointer.reg
                } else if index.owned {
                    index.reg
                } else {
                    self.allocate_keeping(&[pointer, index])?
                };
                emit!(self.out, "add {dest}, {}, {}", pointer.reg, index.reg);
                for operand in [pointer, index] {
                    if operand.reg != dest {
                        self.release(operand);
                    }
                }
                Ok(Operand::owned(dest))
            }
            _ => Err(CodegenError::Unsupported {
                what: "storing into a value that is not a place",
            }),
        }
    }

    /// Address of one link of a chain after `deref` pointer accesses,
    /// with the type found there.
    fn link_address(
        &mut self,
        name: Name,
        deref: u8,
        base: Option<StructBase>,
    ) -> Result<(Operand, TypeInfo), CodegenError> {
        let (mut address, info) = match base {
            None => match self.frame.lookup(name) {
                Some(local) if deref > 0 && local.info.is_scalar() => {
                    // The pointer itself is cached in a register.
                    let reg = self.local_register(local)?;
                    let mut address = Operand::borrowed(reg);
                    for _ in 1..deref {
                        address = self.load_pointer(address)?;
                    }
                    return Ok((address, self.deref_info(local.info, deref)?));
                }
                Some(local) => {
                    self.sync_slot(local.slot)?;
                    let reg = self.bank.allocate(self.out)?;
                    self.out.add_immediate(reg, Reg::FP, local.slot.offset);
                    (Operand::owned(reg), local.info)
                }
                None => {
                    let info = self
                        .checked
                        .global(name)
                        .map(|global| global.info)
                        .ok_or_else(|| {
                            CodegenError::UnknownVariable(self.ctx.name(name).to_owned())
                        })?;
                    (self.global_address(name)?, info)
                }
            },
            Some((address, id)) => {
                let member = self
                    .checked
                    .structs
                    .get(id)
                    .member(name)
                    .copied()
                    .ok_or_else(|| CodegenError::UnknownMember(self.ctx.name(name).to_owned()))?;
                let address = self.offset_address(address, offset_of(member.offset_bits / 8))?;
                (address, member.info)
            }
        };
        for _ in 0..deref {
            address = self.load_pointer(address)?;
        }
        Ok((address, self.deref_info(info, deref)?))
    }

    fn deref_info(&self, info: TypeInfo, levels: u8) -> Result<TypeInfo, CodegenError> {
        self.checked
            .structs
            .deref(info, levels)
            .ok_or(CodegenError::Unsupported {
                what: "dereferencing a non-pointer",
            })
    }

    /// The cached address of a global, loading it on first use.
    fn global_address(&mut self, name: Name) -> Result<Operand, CodegenError> {
        if let Some(reg) = self.bank.find_global(name) {
            return Ok(Operand::borrowed(reg));
        }
        let reg = self.bank.allocate(self.out)?;
        emit!(self.out, "la {reg}, {}", self.ctx.name(name));
        self.bank.bind_global(reg, name);
        Ok(Operand::borrowed(reg))
    }

    fn offset_address(&mut self, address: Operand, offset: i64) -> Result<Operand, CodegenError> {
        if offset == 0 {
            return Ok(address);
        }
        let dest = if address.owned {
            address.reg
        } else {
            self.allocate_keeping(&[address])?
        };
        self.out.add_immediate(dest, address.reg, offset);
        Ok(Operand::owned(dest))
    }

    /// Follow one pointer.
    fn load_pointer(&mut self, address: Operand) -> Result<Operand, CodegenError> {
        let dest = if address.owned {
            address.reg
        } else {
            self.allocate_keeping(&[address])?
        };
        emit!(self.out, "ld {dest}, 0({})", address.reg);
        Ok(Operand::owned(dest))
    }

    /// Load a scalar of type `info` from `address`.
    fn load_through(&mut self, address: Operand, info: TypeInfo) -> Result<Operand, CodegenError> {
        let op = load_op(info.size_bytes(), !info.is_pointer() && info.ty.is_signed())?;
        let dest = if address.owned {
            address.reg
        } else {
            self.allocate_keeping(&[address])?
        };
        emit!(self.out, "{op} {dest}, 0({})", address.reg);
        Ok(Operand::owned(dest))
    }

    /// Store a scalar into a field, pointer or index target.
    pub(super) fn store_to_place(
        &mut self,
        target: ExprId,
        value: Operand,
        info: TypeInfo,
    ) -> Result<(), CodegenError> {
        self.bank.lock(value.reg);
        let address = self.place_address(target, None);
        self.bank.unlock(value.reg);
        let address = address?;
        let op = store_op(info.size_bytes())?;
        emit!(self.out, "{op} {}, 0({})", value.reg, address.reg);
        self.release(address);
        self.release(value);
        Ok(())
    }

    /// Copy `size` bytes between two addresses. Both registers are
    /// consumed.
    pub(super) fn copy_bytes(
        &mut self,
        source: Operand,
        dest: Operand,
        size: u64,
    ) -> Result<(), CodegenError> {
        self.bank.lock(dest.reg);
        let source = self.make_owned(source);
        self.bank.unlock(dest.reg);
        let source = source?;
        let dest = self.make_owned(dest)?;
        let data = self.allocate_keeping(&[source, dest])?;

        let mut copied = 0;
        let mut window = 0;
        while copied < size {
            let chunk = [8, 4, 2, 1]
                .into_iter()
                .find(|&chunk| size - copied >= chunk)
                .unwrap_or(1);
            if copied - window + chunk > 2047 {
                let advance = offset_of(copied - window);
                self.out.add_immediate(source.reg, source.reg, advance);
                self.out.add_immediate(dest.reg, dest.reg, advance);
                window = copied;
            }
            let at = copied - window;
            let load = load_op(chunk, false)?;
            let store = store_op(chunk)?;
            emit!(self.out, "{load} {data}, {at}({})", source.reg);
            emit!(self.out, "{store} {data}, {at}({})", dest.reg);
            copied += chunk;
        }

        self.bank.release(data);
        self.release(source);
        self.release(dest);
        Ok(())
    }

    /// Address of a frame slot in a fresh register.
    pub(super) fn slot_address(&mut self, offset: i64) -> Result<Operand, CodegenError> {
        let reg = self.bank.allocate(self.out)?;
        self.out.add_immediate(reg, Reg::FP, offset);
        Ok(Operand::owned(reg))
    }
}
