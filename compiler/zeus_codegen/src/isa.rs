//! RISC-V registers and instruction selection helpers.

use std::fmt;

use crate::CodegenError;

/// An integer register `x0`..`x31`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Reg(u8);

impl Reg {
    pub const ZERO: Reg = Reg(0);
    pub const RA: Reg = Reg(1);
    pub const SP: Reg = Reg(2);
    pub const FP: Reg = Reg(5);
    /// Address scratch, never allocated. Only used inside one emitted
    /// instruction sequence.
    pub const SCRATCH: Reg = Reg(31);

    /// First register of the allocatable bank, also the first argument and
    /// result register.
    pub const FIRST_ALLOCATABLE: u8 = 6;
    pub const BANK_SIZE: usize = 25;
    /// Inputs passed in registers, `x6`..`x13`.
    pub const ARGUMENT_REGISTERS: usize = 8;
    /// Outputs returned in registers, `x6`..`x13`.
    pub const RESULT_REGISTERS: usize = 8;

    /// The `index`-th register of the allocatable bank.
    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "bank index is below BANK_SIZE"
    )]
    pub const fn bank(index: usize) -> Reg {
        Reg(Self::FIRST_ALLOCATABLE + index as u8)
    }

    /// The `index`-th argument and result register, `x6` upwards.
    #[inline]
    pub const fn argument(index: usize) -> Reg {
        Self::bank(index)
    }

    /// Position in the allocatable bank, if this register belongs to it.
    #[inline]
    pub fn bank_index(self) -> Option<usize> {
        let index = usize::from(self.0.checked_sub(Self::FIRST_ALLOCATABLE)?);
        (index < Self::BANK_SIZE).then_some(index)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Whether `value` fits a 12-bit signed immediate.
#[inline]
pub fn fits_imm12(value: i64) -> bool {
    (-2048..=2047).contains(&value)
}

/// Load mnemonic for a scalar of `bytes` width.
pub fn load_op(bytes: u64, signed: bool) -> Result<&'static str, CodegenError> {
    Ok(match (bytes, signed) {
        (1, true) => "lb",
        (1, false) => "lbu",
        (2, true) => "lh",
        (2, false) => "lhu",
        (4, true) => "lw",
        (4, false) => "lwu",
        (8, _) => "ld",
        _ => return Err(CodegenError::Unsupported { what: "loads of this width" }),
    })
}

/// Store mnemonic for a scalar of `bytes` width.
pub fn store_op(bytes: u64) -> Result<&'static str, CodegenError> {
    Ok(match bytes {
        1 => "sb",
        2 => "sh",
        4 => "sw",
        8 => "sd",
        _ => return Err(CodegenError::Unsupported { what: "stores of this width" }),
    })
}

/// Data directive for a global of `bytes` width.
pub fn data_directive(bytes: u64) -> Result<&'static str, CodegenError> {
    Ok(match bytes {
        1 => ".byte",
        2 => ".half",
        4 => ".word",
        8 => ".dword",
        _ => return Err(CodegenError::Unsupported { what: "globals of this width" }),
    })
}
