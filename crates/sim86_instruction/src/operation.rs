use std::fmt::{Display, Formatter};

/// Condition codes for the short-jump and loop family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpCondition {
    Jo,
    Jno,
    Jb,
    Jnb,
    Je,
    Jnz,
    Jbe,
    Ja,
    Js,
    Jns,
    Jp,
    Jnp,
    Jl,
    Jnl,
    Jle,
    Jg,
    Loopnz,
    Loopz,
    Loop,
    Jcxz,
}

impl Display for JumpCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use JumpCondition::*;

        match self {
            Jo => write!(f, "jo"),
            Jno => write!(f, "jno"),
            Jb => write!(f, "jb"),
            Jnb => write!(f, "jnb"),
            Je => write!(f, "je"),
            Jnz => write!(f, "jnz"),
            Jbe => write!(f, "jbe"),
            Ja => write!(f, "ja"),
            Js => write!(f, "js"),
            Jns => write!(f, "jns"),
            Jp => write!(f, "jp"),
            Jnp => write!(f, "jnp"),
            Jl => write!(f, "jl"),
            Jnl => write!(f, "jnl"),
            Jle => write!(f, "jle"),
            Jg => write!(f, "jg"),
            Loopnz => write!(f, "loopnz"),
            Loopz => write!(f, "loopz"),
            Loop => write!(f, "loop"),
            Jcxz => write!(f, "jcxz"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Mov,
    Add,
    Sub,
    Cmp,
    ConditionalJump(JumpCondition),
}

impl Operation {
    /// Whether the computed result is stored back to the destination.
    pub fn writes_result(&self) -> bool {
        !matches!(self, Operation::Cmp | Operation::ConditionalJump(_))
    }

    /// Whether the zero and sign flags are recomputed from the result.
    pub fn updates_flags(&self) -> bool {
        matches!(self, Operation::Add | Operation::Sub | Operation::Cmp)
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Mov => write!(f, "mov"),
            Operation::Add => write!(f, "add"),
            Operation::Sub => write!(f, "sub"),
            Operation::Cmp => write!(f, "cmp"),
            Operation::ConditionalJump(condition) => condition.fmt(f),
        }
    }
}
