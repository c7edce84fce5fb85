//! The allocatable register bank, `x6`..`x30`.
//!
//! Each register is in one [`RegisterState`]. Variables are cached in
//! registers bound to their frame slot and tagged with the generation
//! (Area depth) they belong to. When the bank is full the bound register
//! of the lowest generation is evicted, stored back first when dirty.
//! Temporaries are never evicted, and neither are registers locked while
//! an enclosing expression still needs them. Lowering keeps the bank from
//! filling with temporaries by parking held operands in the frame once
//! [`RegisterBank::available`] runs low.

use smallvec::SmallVec;
use zeus_ir::Name;

use crate::emitter::{emit, Emitter};
use crate::frame::Slot;
use crate::isa::{store_op, Reg};
use crate::CodegenError;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum RegisterState {
    #[default]
    Free,
    /// An untracked temporary owned by the expression that produced it.
    Constant,
    /// Holds the address of a global.
    GlobalAddress { name: Name, generation: u32 },
    /// Caches the variable stored at `slot`. `dirty` values differ from
    /// memory and must be stored before the register is reused.
    Bound {
        generation: u32,
        slot: Slot,
        dirty: bool,
    },
}

/// A register that must survive a call, with the state to restore.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct LiveRegister {
    pub reg: Reg,
    pub state: RegisterState,
}

#[derive(Clone, Debug, Default)]
pub struct RegisterBank {
    states: [RegisterState; Reg::BANK_SIZE],
    locks: [u8; Reg::BANK_SIZE],
}

impl RegisterBank {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self, reg: Reg) -> RegisterState {
        reg.bank_index()
            .map_or(RegisterState::Free, |index| self.states[index])
    }

    fn set(&mut self, reg: Reg, state: RegisterState) {
        if let Some(index) = reg.bank_index() {
            self.states[index] = state;
        }
    }

    /// Claim a register as a temporary, evicting if necessary.
    pub fn allocate(&mut self, out: &mut Emitter) -> Result<Reg, CodegenError> {
        let index = match self.states.iter().position(|s| *s == RegisterState::Free) {
            Some(index) => index,
            None => self.evict(out)?,
        };
        self.states[index] = RegisterState::Constant;
        Ok(Reg::bank(index))
    }

    /// Free the unlocked bound register (or global address) of the lowest
    /// generation.
    fn evict(&mut self, out: &mut Emitter) -> Result<usize, CodegenError> {
        let victim = self
            .states
            .iter()
            .enumerate()
            .filter(|&(index, _)| self.locks[index] == 0)
            .filter_map(|(index, state)| match *state {
                RegisterState::Bound { generation, .. }
                | RegisterState::GlobalAddress { generation, .. } => Some((generation, index)),
                RegisterState::Free | RegisterState::Constant => None,
            })
            .min()
            .map(|(_, index)| index)
            .ok_or(CodegenError::OutOfRegisters)?;

        let reg = Reg::bank(victim);
        tracing::trace!(%reg, "evict");
        if let RegisterState::Bound {
            slot, dirty: true, ..
        } = self.states[victim]
        {
            store(out, reg, slot)?;
        }
        self.states[victim] = RegisterState::Free;
        Ok(victim)
    }

    /// Registers an allocation could still claim: free ones and unlocked
    /// bound or global-address ones.
    pub fn available(&self) -> usize {
        self.states
            .iter()
            .zip(&self.locks)
            .filter(|&(state, &locks)| match state {
                RegisterState::Free => true,
                RegisterState::Constant => false,
                RegisterState::Bound { .. } | RegisterState::GlobalAddress { .. } => locks == 0,
            })
            .count()
    }

    /// Return a temporary to the bank.
    pub fn release(&mut self, reg: Reg) {
        if self.state(reg) == RegisterState::Constant {
            self.set(reg, RegisterState::Free);
        }
    }

    /// The register currently caching `slot`.
    pub fn find_bound(&self, offset: i64) -> Option<Reg> {
        self.states
            .iter()
            .position(|state| {
                matches!(state, RegisterState::Bound { slot, .. } if slot.offset == offset)
            })
            .map(Reg::bank)
    }

    pub fn find_global(&self, name: Name) -> Option<Reg> {
        self.states
            .iter()
            .position(|state| {
                matches!(state, RegisterState::GlobalAddress { name: held, .. } if *held == name)
            })
            .map(Reg::bank)
    }

    /// Make `reg` the cached copy of `slot`, dropping any other register
    /// bound to the same slot.
    pub fn bind(&mut self, reg: Reg, generation: u32, slot: Slot, dirty: bool) {
        if let Some(previous) = self.find_bound(slot.offset) {
            if previous != reg {
                self.set(previous, RegisterState::Free);
            }
        }
        self.set(
            reg,
            RegisterState::Bound {
                generation,
                slot,
                dirty,
            },
        );
    }

    pub fn bind_global(&mut self, reg: Reg, name: Name) {
        self.set(
            reg,
            RegisterState::GlobalAddress {
                name,
                generation: 0,
            },
        );
    }

    pub fn mark_dirty(&mut self, reg: Reg) {
        if let Some(index) = reg.bank_index() {
            if let RegisterState::Bound { dirty, .. } = &mut self.states[index] {
                *dirty = true;
            }
        }
    }

    /// Keep `reg` from being evicted until the matching [`unlock`](Self::unlock).
    pub fn lock(&mut self, reg: Reg) {
        if let Some(index) = reg.bank_index() {
            self.locks[index] += 1;
        }
    }

    pub fn unlock(&mut self, reg: Reg) {
        if let Some(index) = reg.bank_index() {
            self.locks[index] = self.locks[index].saturating_sub(1);
        }
    }

    /// Store every dirty register and forget all bindings. Temporaries are
    /// kept.
    pub fn flush(&mut self, out: &mut Emitter) -> Result<(), CodegenError> {
        for index in 0..Reg::BANK_SIZE {
            match self.states[index] {
                RegisterState::Bound { slot, dirty, .. } => {
                    if dirty {
                        store(out, Reg::bank(index), slot)?;
                    }
                    self.states[index] = RegisterState::Free;
                }
                RegisterState::GlobalAddress { .. } => self.states[index] = RegisterState::Free,
                RegisterState::Free | RegisterState::Constant => {}
            }
        }
        Ok(())
    }

    /// Drop bindings of Areas at or above `generation` without storing
    /// them. Those variables are out of scope.
    pub fn forget_from(&mut self, generation: u32) {
        for state in &mut self.states {
            if matches!(*state, RegisterState::Bound { generation: g, .. } if g >= generation) {
                *state = RegisterState::Free;
            }
        }
    }

    /// Registers a call would clobber while they are still in use:
    /// temporaries and locked registers.
    pub fn live(&self) -> SmallVec<[LiveRegister; 8]> {
        self.states
            .iter()
            .enumerate()
            .filter(|&(index, state)| {
                *state == RegisterState::Constant
                    || (self.locks[index] > 0 && *state != RegisterState::Free)
            })
            .map(|(index, &state)| LiveRegister {
                reg: Reg::bank(index),
                state,
            })
            .collect()
    }

    /// Mark every register free, as after a call.
    pub fn clobber_all(&mut self) {
        self.states = [RegisterState::Free; Reg::BANK_SIZE];
    }

    /// Put back a register saved across a call. A bound register comes
    /// back clean since the flush stored it.
    pub fn restore(&mut self, live: LiveRegister) {
        let state = match live.state {
            RegisterState::Bound {
                generation, slot, ..
            } => RegisterState::Bound {
                generation,
                slot,
                dirty: false,
            },
            other => other,
        };
        self.set(live.reg, state);
    }
}

/// Store `reg` into its frame slot.
pub fn store(out: &mut Emitter, reg: Reg, slot: Slot) -> Result<(), CodegenError> {
    let op = store_op(slot.size)?;
    let operand = out.frame_slot(slot.offset);
    emit!(out, "{op} {reg}, {operand}");
    Ok(())
}
