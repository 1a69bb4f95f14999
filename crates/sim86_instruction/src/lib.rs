mod instruction;
mod operand;
mod operation;
mod register;

pub use instruction::Instruction;
pub use operand::{EffectiveAddress, Immediate, Operand, Width};
pub use operation::{JumpCondition, Operation};
pub use register::{ByteRegister, Register, WordRegister};
