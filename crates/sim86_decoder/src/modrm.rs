use crate::errors::{DecodeError, Result};
use crate::window::Window;
use sim86_instruction::ByteRegister::*;
use sim86_instruction::WordRegister::{self, *};
use sim86_instruction::{EffectiveAddress, Operand, Register, Width};

/// Register lookup table, indexed by `code << 1 | w`.
const REGISTERS: [Register; 16] = [
    Register::Byte(Al),
    Register::Word(Ax),
    Register::Byte(Cl),
    Register::Word(Cx),
    Register::Byte(Dl),
    Register::Word(Dx),
    Register::Byte(Bl),
    Register::Word(Bx),
    Register::Byte(Ah),
    Register::Word(Sp),
    Register::Byte(Ch),
    Register::Word(Bp),
    Register::Byte(Dh),
    Register::Word(Si),
    Register::Byte(Bh),
    Register::Word(Di),
];

/// Base/index pair for each of the 8 non-direct r/m codes.
const EFFECTIVE_ADDRESSES: [(Option<WordRegister>, Option<WordRegister>); 8] = [
    (Some(Bx), Some(Si)),
    (Some(Bx), Some(Di)),
    (Some(Bp), Some(Si)),
    (Some(Bp), Some(Di)),
    (Some(Si), None),
    (Some(Di), None),
    (Some(Bp), None),
    (Some(Bx), None),
];

pub(crate) fn register_from_encoding(code: u8, width: Width) -> Result<Register> {
    let w = match width {
        Width::Byte => 0,
        Width::Word => 1,
    };
    let index = usize::from(code << 1 | w);

    REGISTERS
        .get(index)
        .copied()
        .ok_or(DecodeError::InvalidRegisterCode(code))
}

/// The register-or-memory half of a mod reg r/m byte.
#[derive(Debug, PartialEq)]
pub(crate) enum RegisterOrMemory {
    Register(Register),
    Memory(EffectiveAddress),
}

impl RegisterOrMemory {
    /// Decodes the mod and r/m fields, reading displacement bytes from the
    /// window as the mod field demands.
    pub fn try_from_modrm(modrm_byte: u8, width: Width, window: &mut Window) -> Result<Self> {
        let mode = modrm_byte >> 6;
        let rm = modrm_byte & 0b111;

        match mode {
            0b11 => Ok(RegisterOrMemory::Register(register_from_encoding(
                rm, width,
            )?)),

            // Direct address: mod=00 normally carries no displacement, but
            // r/m=110 forces a 16-bit one.
            0b00 if rm == 0b110 => Ok(RegisterOrMemory::Memory(EffectiveAddress {
                base: None,
                index: None,
                displacement: window.read_u16()? as i16,
            })),

            _ => {
                let (base, index) = EFFECTIVE_ADDRESSES[usize::from(rm)];
                let displacement = match mode {
                    0b00 => 0,
                    0b01 => i16::from(window.read_u8()? as i8),
                    _ => window.read_u16()? as i16,
                };

                Ok(RegisterOrMemory::Memory(EffectiveAddress {
                    base,
                    index,
                    displacement,
                }))
            }
        }
    }

    pub fn is_memory(&self) -> bool {
        matches!(self, RegisterOrMemory::Memory(_))
    }

    pub fn into_operand(self) -> Operand {
        match self {
            RegisterOrMemory::Register(register) => Operand::Register(register),
            RegisterOrMemory::Memory(address) => Operand::Memory(address),
        }
    }
}
