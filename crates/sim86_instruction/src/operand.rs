use crate::{Register, WordRegister};
use std::fmt::{Display, Formatter};

/// 8-bit vs 16-bit operand size, as selected by the width bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    Byte,
    Word,
}

impl Display for Width {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Width::Byte => write!(f, "byte"),
            Width::Word => write!(f, "word"),
        }
    }
}

/// An immediate value.
///
/// `width` is the explicit size marker used when the instruction would
/// otherwise be ambiguous (a memory destination); it reflects the encoded
/// immediate size, which for sign-extended immediates is narrower than the
/// arithmetic width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Immediate {
    pub value: i32,
    pub width: Option<Width>,
}

impl Immediate {
    pub fn new(value: i32) -> Self {
        Self { value, width: None }
    }

    pub fn with_width(value: i32, width: Width) -> Self {
        Self {
            value,
            width: Some(width),
        }
    }
}

impl Display for Immediate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(width) = self.width {
            write!(f, "{} ", width)?;
        }
        write!(f, "{}", self.value)
    }
}

/// A memory operand computed from an optional base register, an optional
/// index register and a displacement. No base and no index means direct
/// addressing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectiveAddress {
    pub base: Option<WordRegister>,
    pub index: Option<WordRegister>,
    pub displacement: i16,
}

impl Display for EffectiveAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;

        let mut has_term = false;
        if let Some(base) = self.base {
            write!(f, "{}", base)?;
            has_term = true;
        }
        if let Some(index) = self.index {
            if has_term {
                write!(f, " + ")?;
            }
            write!(f, "{}", index)?;
            has_term = true;
        }

        if self.displacement != 0 || !has_term {
            if !has_term {
                write!(f, "{}", self.displacement)?;
            } else if self.displacement < 0 {
                write!(f, " - {}", -(self.displacement as i32))?;
            } else {
                write!(f, " + {}", self.displacement)?;
            }
        }

        write!(f, "]")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Immediate(Immediate),
    Memory(EffectiveAddress),
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Register(register) => register.fmt(f),
            Operand::Immediate(immediate) => immediate.fmt(f),
            Operand::Memory(address) => address.fmt(f),
        }
    }
}
