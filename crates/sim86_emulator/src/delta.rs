use crate::state::Flags;
use sim86_instruction::WordRegister;
use std::fmt::{Display, Formatter};

/// Before/after value of a register written during execution. Byte-half
/// writes report the parent word register.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegisterDelta {
    pub register: WordRegister,
    pub from: u16,
    pub to: u16,
}

/// A flag image transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlagsDelta {
    pub from: Flags,
    pub to: Flags,
}

/// The observable effects of executing a single instruction. The executor
/// produces this record; rendering it is a separate concern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExecResult {
    /// The register written by the instruction, if any.
    pub register: Option<RegisterDelta>,

    /// The instruction pointer before and after.
    pub ip: (u16, u16),

    /// Present only when the flag image changed.
    pub flags: Option<FlagsDelta>,
}

impl Display for ExecResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ";")?;

        if let Some(delta) = &self.register {
            write!(f, " {}:{:#x}->{:#x}", delta.register, delta.from, delta.to)?;
        }

        let (from, to) = self.ip;
        if from != to {
            write!(f, " ip:{:#x}->{:#x}", from, to)?;
        }

        if let Some(delta) = &self.flags {
            write!(f, " flags:{}->{}", delta.from, delta.to)?;
        }

        Ok(())
    }
}
