//! The call sequence.
//!
//! Caller side, in order: arguments are evaluated into hidden slots, live
//! temporaries are saved, dirty registers are flushed, stack arguments are
//! copied above the frame and register arguments loaded into `x6`.., the
//! caller's `x1` and `x5` go in a two-slot link area right below the
//! callee's frame, and `x5` moves up. After `call` the link is restored,
//! results arrive in `x6`.. and are parked in hidden slots, and the saved
//! temporaries are reloaded.

use smallvec::SmallVec;
use zeus_check::{ProcEntity, TypeInfo};
use zeus_ir::{ExprRange, Name, Type};

use super::ProcLowering;
use crate::emitter::emit;
use crate::frame::{InputLayout, InputLocation, Slot, LINK_AREA};
use crate::isa::Reg;
use crate::register::LiveRegister;
use crate::CodegenError;

/// Frame slots holding a call's results, with their types.
pub(super) type CallResults = SmallVec<[(Slot, TypeInfo); 2]>;

impl ProcLowering<'_, '_> {
    pub(super) fn lower_call(
        &mut self,
        name: Name,
        args: ExprRange,
    ) -> Result<CallResults, CodegenError> {
        let checked = self.checked;
        let callee = checked
            .proc(name)
            .ok_or_else(|| CodegenError::UnknownProcedure(self.ctx.name(name).to_owned()))?;
        self.check_outputs(callee)?;
        if callee.outputs.iter().any(TypeInfo::is_struct_value) {
            return Err(CodegenError::Unsupported {
                what: "structure return values",
            });
        }
        let layout = InputLayout::new(&callee.inputs);
        let label = super::proc_label(self.ctx.interner, name);
        tracing::trace!(%label, inputs = callee.inputs.len(), "call");

        let arena = self.arena;
        let mut arg_slots: SmallVec<[(Slot, TypeInfo); 8]> = SmallVec::new();
        for (&arg, &input) in arena.expr_list(args).iter().zip(&callee.inputs) {
            let slot = self.frame.hidden_slot(input);
            if input.is_struct_value() {
                let source = self.place_address(arg, None)?;
                self.bank.lock(source.reg);
                let dest = self.slot_address(slot.offset);
                self.bank.unlock(source.reg);
                self.copy_bytes(source, dest?, slot.size)?;
            } else {
                let value = self.lower_value(arg, input)?;
                self.store_slot(value.reg, slot)?;
                self.release(value);
            }
            arg_slots.push((slot, input));
        }

        let saved = self.save_live()?;
        self.bank.flush(self.out)?;
        self.bank.clobber_all();

        let top = self.frame.top();
        // Stack arguments first: register arguments then own x6.. untouched.
        for (&(slot, info), &location) in arg_slots.iter().zip(&layout.locations) {
            if let InputLocation::Stack(offset) = location {
                let source = self.slot_address(slot.offset)?;
                let dest = self.slot_address(top + offset)?;
                self.copy_bytes(source, dest, info.size_bytes())?;
            }
        }
        self.bank.clobber_all();
        for (&(slot, _), &location) in arg_slots.iter().zip(&layout.locations) {
            if let InputLocation::Register(reg) = location {
                self.load_slot(reg, slot)?;
            }
        }

        let link = top + layout.stack_size;
        let ra = self.out.frame_slot(link);
        emit!(self.out, "sd {}, {ra}", Reg::RA);
        let fp = self.out.frame_slot(link + 8);
        emit!(self.out, "sd {}, {fp}", Reg::FP);
        self.out.add_immediate(Reg::FP, Reg::FP, link + LINK_AREA);
        emit!(self.out, "call {label}");
        emit!(self.out, "ld {}, -16({})", Reg::RA, Reg::FP);
        emit!(self.out, "ld {}, -8({})", Reg::FP, Reg::FP);

        let mut results = CallResults::new();
        for (index, &output) in callee.outputs.iter().enumerate() {
            let slot = self.frame.hidden_slot(output);
            self.store_slot(Reg::argument(index), slot)?;
            results.push((slot, output));
        }

        for (live, slot) in saved {
            self.load_slot(live.reg, slot)?;
            self.bank.restore(live);
        }
        Ok(results)
    }

    /// Store every register still in use to a hidden slot.
    fn save_live(&mut self) -> Result<SmallVec<[(LiveRegister, Slot); 8]>, CodegenError> {
        let mut saved = SmallVec::new();
        for live in self.bank.live() {
            let slot = self.frame.hidden_slot(TypeInfo::builtin(Type::U64));
            self.store_slot(live.reg, slot)?;
            saved.push((live, slot));
        }
        Ok(saved)
    }

    /// Every output must have its own result register.
    pub(super) fn check_outputs(&self, proc: &ProcEntity) -> Result<(), CodegenError> {
        if proc.outputs.len() > Reg::RESULT_REGISTERS {
            return Err(CodegenError::TooManyOutputs {
                name: self.ctx.name(proc.name).to_owned(),
                count: proc.outputs.len(),
                max: Reg::RESULT_REGISTERS,
            });
        }
        Ok(())
    }

    /// Move return values into `x6`.. and leave the procedure.
    pub(super) fn lower_return(&mut self, values: ExprRange) -> Result<(), CodegenError> {
        let arena = self.arena;
        let proc = self.proc;
        let outputs = &proc.outputs;
        let mut slots: SmallVec<[Slot; 2]> = SmallVec::new();
        for (&value, &output) in arena.expr_list(values).iter().zip(outputs) {
            if output.is_struct_value() {
                return Err(CodegenError::Unsupported {
                    what: "structure return values",
                });
            }
            let slot = self.frame.hidden_slot(output);
            let operand = self.lower_value(value, output)?;
            self.store_slot(operand.reg, slot)?;
            self.release(operand);
            slots.push(slot);
        }

        self.bank.flush(self.out)?;
        for (index, &slot) in slots.iter().enumerate() {
            self.load_slot(Reg::argument(index), slot)?;
        }
        self.exit();
        Ok(())
    }
}
