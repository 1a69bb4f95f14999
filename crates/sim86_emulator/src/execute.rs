use crate::delta::{ExecResult, FlagsDelta, RegisterDelta};
use crate::state::{Flags, MachineState};
use sim86_instruction::{
    EffectiveAddress, Instruction, JumpCondition, Operand, Operation, Register,
};
use tracing::warn;

/// Applies a decoded instruction to the machine state and returns the
/// observable delta.
///
/// The instruction pointer advances by `bytes_consumed` before the operation
/// applies; a taken conditional jump then adds its displacement, which is
/// relative to the end of the 2-byte jump encoding.
pub fn execute(instruction: &Instruction, state: &mut MachineState) -> ExecResult {
    let ip_before = state.ip;
    state.ip = ip_before.wrapping_add(u16::from(instruction.bytes_consumed));

    if let Operation::ConditionalJump(condition) = instruction.operation {
        if jump_taken(condition, state.flags) {
            let displacement = match instruction.destination {
                Operand::Immediate(immediate) => immediate.value as i16,
                _ => 0,
            };
            state.ip = state.ip.wrapping_add(displacement as u16);
        }

        return ExecResult {
            register: None,
            ip: (ip_before, state.ip),
            flags: None,
        };
    }

    let source_value = instruction
        .source
        .map(|operand| read_operand(&operand, state))
        .unwrap_or(0);
    let current = read_operand(&instruction.destination, state);

    let result = match instruction.operation {
        Operation::Mov => source_value,
        Operation::Add => current.wrapping_add(source_value),
        Operation::Sub | Operation::Cmp => current.wrapping_sub(source_value),
        Operation::ConditionalJump(_) => unreachable!(),
    };

    let flags_before = state.flags;
    if instruction.operation.updates_flags() {
        let mut flags = Flags::empty();
        flags.set(Flags::ZERO, result == 0);
        flags.set(Flags::SIGN, result & 0x8000 != 0);
        state.flags = flags;
    }
    let flags = (state.flags != flags_before).then_some(FlagsDelta {
        from: flags_before,
        to: state.flags,
    });

    let register = if instruction.operation.writes_result() {
        write_destination(&instruction.destination, result, state)
    } else {
        None
    };

    ExecResult {
        register,
        ip: (ip_before, state.ip),
        flags,
    }
}

/// Whether a conditional jump is taken under the current flags.
///
/// Only the not-zero condition is modeled; every other condition code
/// reports not taken, because the machine state tracks only the zero and
/// sign flags.
fn jump_taken(condition: JumpCondition, flags: Flags) -> bool {
    match condition {
        JumpCondition::Jnz => !flags.contains(Flags::ZERO),
        condition => {
            warn!(
                "jump condition {} is not modeled, treating as not taken",
                condition
            );
            false
        }
    }
}

fn read_operand(operand: &Operand, state: &MachineState) -> u16 {
    match operand {
        Operand::Register(Register::Word(register)) => state.register(*register),
        Operand::Register(Register::Byte(register)) => u16::from(state.byte_register(*register)),
        Operand::Immediate(immediate) => immediate.value as u16,
        Operand::Memory(address) => state.read_word(resolve_effective_address(address, state)),
    }
}

fn write_destination(
    destination: &Operand,
    value: u16,
    state: &mut MachineState,
) -> Option<RegisterDelta> {
    match destination {
        Operand::Register(Register::Word(register)) => {
            let from = state.register(*register);
            state.set_register(*register, value);
            Some(RegisterDelta {
                register: *register,
                from,
                to: value,
            })
        }

        Operand::Register(Register::Byte(register)) => {
            let word = register.word();
            let from = state.register(word);
            state.set_byte_register(*register, value as u8);
            Some(RegisterDelta {
                register: word,
                from,
                to: state.register(word),
            })
        }

        Operand::Memory(address) => {
            // Memory destinations are always word sized.
            state.write_word(resolve_effective_address(address, state), value);
            None
        }

        Operand::Immediate(_) => None,
    }
}

fn resolve_effective_address(address: &EffectiveAddress, state: &MachineState) -> u16 {
    let mut offset = address.displacement as u16;
    if let Some(base) = address.base {
        offset = offset.wrapping_add(state.register(base));
    }
    if let Some(index) = address.index {
        offset = offset.wrapping_add(state.register(index));
    }
    offset
}
