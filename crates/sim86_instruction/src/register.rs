use std::fmt::{Display, Formatter};

/// One of the eight 16-bit general purpose registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordRegister {
    Ax,
    Cx,
    Dx,
    Bx,
    Sp,
    Bp,
    Si,
    Di,
}

/// One of the eight addressable byte halves of ax, cx, dx and bx.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteRegister {
    Al,
    Cl,
    Dl,
    Bl,
    Ah,
    Ch,
    Dh,
    Bh,
}

impl ByteRegister {
    /// The word register this byte half belongs to.
    pub fn word(self) -> WordRegister {
        use ByteRegister::*;

        match self {
            Al | Ah => WordRegister::Ax,
            Cl | Ch => WordRegister::Cx,
            Dl | Dh => WordRegister::Dx,
            Bl | Bh => WordRegister::Bx,
        }
    }

    pub fn is_high(self) -> bool {
        use ByteRegister::*;

        matches!(self, Ah | Ch | Dh | Bh)
    }
}

/// A register operand as it appears in an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    Byte(ByteRegister),
    Word(WordRegister),
}

impl Display for WordRegister {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use WordRegister::*;

        match self {
            Ax => write!(f, "ax"),
            Cx => write!(f, "cx"),
            Dx => write!(f, "dx"),
            Bx => write!(f, "bx"),
            Sp => write!(f, "sp"),
            Bp => write!(f, "bp"),
            Si => write!(f, "si"),
            Di => write!(f, "di"),
        }
    }
}

impl Display for ByteRegister {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use ByteRegister::*;

        match self {
            Al => write!(f, "al"),
            Cl => write!(f, "cl"),
            Dl => write!(f, "dl"),
            Bl => write!(f, "bl"),
            Ah => write!(f, "ah"),
            Ch => write!(f, "ch"),
            Dh => write!(f, "dh"),
            Bh => write!(f, "bh"),
        }
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Register::Byte(register) => register.fmt(f),
            Register::Word(register) => register.fmt(f),
        }
    }
}
