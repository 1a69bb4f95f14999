use bitflags::bitflags;
use sim86_instruction::{ByteRegister, WordRegister};
use std::fmt::{Display, Formatter};
use tracing::warn;

bitflags! {
    /// The status flags tracked by the simulator. Bit positions match the
    /// 8086 flags word.
    pub struct Flags : u16 {
        const ZERO = 1 << 6;
        const SIGN = 1 << 7;
    }
}

impl Display for Flags {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.contains(Flags::SIGN) {
            write!(f, "S")?;
        }
        if self.contains(Flags::ZERO) {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

/// Default size of the simulated memory arena.
pub const MEMORY_SIZE: usize = 0x10000;

/// The register file, flags and memory arena one simulation run mutates.
///
/// Only the executor writes to it; decoding is storage-agnostic.
pub struct MachineState {
    registers: [u16; 8],
    memory: Vec<u8>,

    pub ip: u16,
    pub flags: Flags,
}

impl MachineState {
    pub fn new() -> Self {
        Self::with_memory_size(MEMORY_SIZE)
    }

    pub fn with_memory_size(size: usize) -> Self {
        Self {
            registers: [0; 8],
            memory: vec![0; size],
            ip: 0,
            flags: Flags::empty(),
        }
    }

    #[inline(always)]
    pub fn register(&self, register: WordRegister) -> u16 {
        self.registers[register as usize]
    }

    #[inline(always)]
    pub fn set_register(&mut self, register: WordRegister, value: u16) {
        self.registers[register as usize] = value;
    }

    pub fn byte_register(&self, register: ByteRegister) -> u8 {
        let word = self.register(register.word());
        if register.is_high() {
            (word >> 8) as u8
        } else {
            word as u8
        }
    }

    pub fn set_byte_register(&mut self, register: ByteRegister, value: u8) {
        let word = self.register(register.word());
        let word = if register.is_high() {
            (word & 0x00FF) | u16::from(value) << 8
        } else {
            (word & 0xFF00) | u16::from(value)
        };
        self.set_register(register.word(), word);
    }

    pub fn read_byte(&self, address: u16) -> u8 {
        match self.memory.get(usize::from(address)) {
            Some(&byte) => byte,
            None => {
                warn!("reading outside of memory bounds ({:#06x})", address);
                0
            }
        }
    }

    pub fn write_byte(&mut self, address: u16, value: u8) {
        match self.memory.get_mut(usize::from(address)) {
            Some(byte) => *byte = value,
            None => warn!("writing outside of memory bounds ({:#06x})", address),
        }
    }

    pub fn read_word(&self, address: u16) -> u16 {
        u16::from_le_bytes([
            self.read_byte(address),
            self.read_byte(address.wrapping_add(1)),
        ])
    }

    pub fn write_word(&mut self, address: u16, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.write_byte(address, low);
        self.write_byte(address.wrapping_add(1), high);
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MachineState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use WordRegister::*;

        for register in [Ax, Bx, Cx, Dx, Sp, Bp, Si, Di] {
            let value = self.register(register);
            writeln!(f, "      {}: {:#06x} ({})", register, value, value)?;
        }
        writeln!(f, "      ip: {:#06x} ({})", self.ip, self.ip)?;

        if !self.flags.is_empty() {
            writeln!(f, "   flags: {}", self.flags)?;
        }

        Ok(())
    }
}
