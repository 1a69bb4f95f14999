use crate::{Operand, Operation};
use std::fmt::{Display, Formatter};

/// A single decoded 8086 instruction.
///
/// ```rust
/// use sim86_instruction::*;
///
/// // mov ax, bx
/// let i = Instruction::new(
///     Operation::Mov,
///     Operand::Register(Register::Word(WordRegister::Ax)),
///     Some(Operand::Register(Register::Word(WordRegister::Bx))),
///     2,
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instruction {
    pub operation: Operation,
    pub destination: Operand,
    pub source: Option<Operand>,
    pub bytes_consumed: u8,
}

impl Instruction {
    pub fn new(
        operation: Operation,
        destination: Operand,
        source: Option<Operand>,
        bytes_consumed: u8,
    ) -> Self {
        Self {
            operation,
            destination,
            source,
            bytes_consumed,
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.operation, self.destination)?;
        if let Some(source) = &self.source {
            write!(f, ", {}", source)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Immediate, JumpCondition, Register, WordRegister};

    #[test]
    fn two_operand_rendering() {
        let instruction = Instruction::new(
            Operation::Mov,
            Operand::Register(Register::Word(WordRegister::Ax)),
            Some(Operand::Register(Register::Word(WordRegister::Bx))),
            2,
        );
        assert_eq!(instruction.to_string(), "mov ax, bx");
    }

    #[test]
    fn jump_rendering_omits_source() {
        let instruction = Instruction::new(
            Operation::ConditionalJump(JumpCondition::Jnz),
            Operand::Immediate(Immediate::new(-2)),
            None,
            2,
        );
        assert_eq!(instruction.to_string(), "jnz -2");
    }
}
