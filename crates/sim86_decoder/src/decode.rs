use crate::errors::{DecodeError, Result};
use crate::modrm::{register_from_encoding, RegisterOrMemory};
use crate::window::Window;
use sim86_instruction::{
    EffectiveAddress, Immediate, Instruction, JumpCondition, Operand, Operation, Width,
};

trait OpCodeExt {
    fn width(self) -> Width;
}

impl OpCodeExt for u8 {
    fn width(self) -> Width {
        if self & 1 == 0 {
            Width::Byte
        } else {
            Width::Word
        }
    }
}

/// Maps the 3-bit arithmetic sub-field to an operation. Values outside the
/// add/sub/cmp subset classify the whole instruction as unknown.
fn group_operation(bits: u8, op_code: u8) -> Result<Operation> {
    match bits & 0b111 {
        0b000 => Ok(Operation::Add),
        0b101 => Ok(Operation::Sub),
        0b111 => Ok(Operation::Cmp),
        _ => Err(DecodeError::UnknownOpCode(op_code)),
    }
}

/// Takes a byte window positioned at an instruction boundary and decodes one
/// instruction, returning it together with the number of bytes consumed.
///
/// The window must hold the complete encoding (at most 6 bytes); running out
/// of bytes mid-encoding fails with [DecodeError::TruncatedInput].
pub fn decode(window: &[u8]) -> Result<(Instruction, u8)> {
    let mut window = Window::new(window);
    let op_code = window.read_u8()?;

    let (operation, destination, source) = match op_code {
        0x70..=0x7F | 0xE0..=0xE3 => jump(op_code, &mut window)?,

        _ if op_code >> 2 == 0b100010 => {
            register_or_memory_and_register(Operation::Mov, op_code, &mut window)?
        }

        _ if op_code >> 4 == 0b1011 => immediate_to_register(op_code, &mut window)?,

        _ if matches!(op_code >> 2, 0b000000 | 0b001010 | 0b001110) => {
            let operation = group_operation(op_code >> 3, op_code)?;
            register_or_memory_and_register(operation, op_code, &mut window)?
        }

        _ if op_code >> 1 == 0b1100011 || op_code >> 2 == 0b100000 => {
            immediate_to_register_or_memory(op_code, &mut window)?
        }

        _ if matches!(op_code >> 1, 0b1010000 | 0b1010001) => {
            accumulator_and_memory(op_code, &mut window)?
        }

        _ if matches!(op_code >> 1, 0b0000010 | 0b0010110 | 0b0011110) => {
            immediate_to_accumulator(op_code, &mut window)?
        }

        _ => return Err(DecodeError::UnknownOpCode(op_code)),
    };

    let consumed = window.consumed();
    Ok((
        Instruction::new(operation, destination, source, consumed),
        consumed,
    ))
}

type Decoded = (Operation, Operand, Option<Operand>);

// All short jumps are a single op code byte followed by a signed 8-bit
// displacement relative to the end of the encoding.
fn jump(op_code: u8, window: &mut Window) -> Result<Decoded> {
    use JumpCondition::*;

    let condition = match op_code {
        0x70 => Jo,
        0x71 => Jno,
        0x72 => Jb,
        0x73 => Jnb,
        0x74 => Je,
        0x75 => Jnz,
        0x76 => Jbe,
        0x77 => Ja,
        0x78 => Js,
        0x79 => Jns,
        0x7A => Jp,
        0x7B => Jnp,
        0x7C => Jl,
        0x7D => Jnl,
        0x7E => Jle,
        0x7F => Jg,
        0xE0 => Loopnz,
        0xE1 => Loopz,
        0xE2 => Loop,
        0xE3 => Jcxz,
        _ => unreachable!(),
    };

    let displacement = window.read_u8()? as i8;

    Ok((
        Operation::ConditionalJump(condition),
        Operand::Immediate(Immediate::new(i32::from(displacement))),
        None,
    ))
}

// x x x x x x d w | mod reg r/m | (disp-lo) | (disp-hi)
fn register_or_memory_and_register(
    operation: Operation,
    op_code: u8,
    window: &mut Window,
) -> Result<Decoded> {
    let reg_first = (op_code >> 1) & 1 == 1;
    let width = op_code.width();

    let modrm_byte = window.read_u8()?;
    let register = Operand::Register(register_from_encoding(modrm_byte >> 3 & 0b111, width)?);
    let register_or_memory =
        RegisterOrMemory::try_from_modrm(modrm_byte, width, window)?.into_operand();

    Ok(if reg_first {
        (operation, register, Some(register_or_memory))
    } else {
        (operation, register_or_memory, Some(register))
    })
}

// 1 0 1 1 w reg | data | data if w = 1
fn immediate_to_register(op_code: u8, window: &mut Window) -> Result<Decoded> {
    let width = (op_code >> 3).width();
    let register = register_from_encoding(op_code & 0b111, width)?;
    let value = i32::from(window.read_data(width)?);

    Ok((
        Operation::Mov,
        Operand::Register(register),
        Some(Operand::Immediate(Immediate::new(value))),
    ))
}

// 1 1 0 0 0 1 1 w | mod reg r/m | data...        (mov)
// 1 0 0 0 0 0 s w | mod op  r/m | data...        (add/sub/cmp)
fn immediate_to_register_or_memory(op_code: u8, window: &mut Window) -> Result<Decoded> {
    let width = op_code.width();
    let modrm_byte = window.read_u8()?;
    let register_or_memory = RegisterOrMemory::try_from_modrm(modrm_byte, width, window)?;

    let (operation, data_width, sign_extend) = if op_code >> 1 == 0b1100011 {
        (Operation::Mov, width, false)
    } else {
        let sign_extend = (op_code >> 1) & 1 == 1;
        let data_width = if sign_extend { Width::Byte } else { width };
        (
            group_operation(modrm_byte >> 3, op_code)?,
            data_width,
            sign_extend,
        )
    };

    let raw = window.read_data(data_width)?;
    // A narrow immediate with the sign-extend bit set widens to word for the
    // arithmetic, but the explicit size marker keeps the encoded width.
    let value = if sign_extend {
        i32::from(raw as u8 as i8)
    } else {
        i32::from(raw)
    };

    let immediate = if register_or_memory.is_memory() {
        Immediate::with_width(value, data_width)
    } else {
        Immediate::new(value)
    };

    Ok((
        operation,
        register_or_memory.into_operand(),
        Some(Operand::Immediate(immediate)),
    ))
}

// 1 0 1 0 0 0 d w | addr | addr if w = 1
fn accumulator_and_memory(op_code: u8, window: &mut Window) -> Result<Decoded> {
    let width = op_code.width();
    let accumulator = Operand::Register(register_from_encoding(0b000, width)?);

    let memory = Operand::Memory(EffectiveAddress {
        base: None,
        index: None,
        displacement: window.read_data(width)? as i16,
    });

    Ok(if (op_code >> 1) & 1 == 0 {
        (Operation::Mov, accumulator, Some(memory))
    } else {
        (Operation::Mov, memory, Some(accumulator))
    })
}

// 0 0 op 1 0 w | data | data if w = 1
fn immediate_to_accumulator(op_code: u8, window: &mut Window) -> Result<Decoded> {
    let operation = group_operation(op_code >> 3, op_code)?;
    let width = op_code.width();
    let accumulator = Operand::Register(register_from_encoding(0b000, width)?);
    let value = i32::from(window.read_data(width)?);

    Ok((
        operation,
        accumulator,
        Some(Operand::Immediate(Immediate::new(value))),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim86_instruction::ByteRegister::*;
    use sim86_instruction::Register;
    use sim86_instruction::WordRegister::*;

    fn decoded(bytes: &[u8]) -> (Instruction, u8) {
        decode(bytes).unwrap()
    }

    fn rendered(bytes: &[u8]) -> String {
        decoded(bytes).0.to_string()
    }

    #[test]
    fn mov_register_to_register() {
        let (instruction, consumed) = decoded(&[0x89, 0xD8]);
        assert_eq!(consumed, 2);
        assert_eq!(instruction.bytes_consumed, 2);
        assert_eq!(
            instruction,
            Instruction::new(
                Operation::Mov,
                Operand::Register(Register::Word(Ax)),
                Some(Operand::Register(Register::Word(Bx))),
                2,
            )
        );
        assert_eq!(instruction.to_string(), "mov ax, bx");
    }

    #[test]
    fn direction_bit_swaps_operands() {
        assert_eq!(rendered(&[0x8B, 0xD8]), "mov bx, ax");
        assert_eq!(rendered(&[0x88, 0xC5]), "mov ch, al");
    }

    #[test]
    fn mov_immediate_to_register() {
        let (instruction, consumed) = decoded(&[0xB8, 0x05, 0x00]);
        assert_eq!(consumed, 3);
        assert_eq!(instruction.to_string(), "mov ax, 5");

        let (instruction, consumed) = decoded(&[0xB1, 0x0C]);
        assert_eq!(consumed, 2);
        assert_eq!(
            instruction.destination,
            Operand::Register(Register::Byte(Cl))
        );
        assert_eq!(instruction.to_string(), "mov cl, 12");
    }

    #[test]
    fn mov_with_memory_operands() {
        assert_eq!(rendered(&[0x8A, 0x00]), "mov al, [bx + si]");
        assert_eq!(rendered(&[0x8A, 0x60, 0x04]), "mov ah, [bx + si + 4]");
        assert_eq!(rendered(&[0x8A, 0x80, 0x87, 0x13]), "mov al, [bx + si + 4999]");
        assert_eq!(rendered(&[0x89, 0x09]), "mov [bx + di], cx");
        assert_eq!(rendered(&[0x8B, 0x56, 0xFC]), "mov dx, [bp - 4]");
    }

    #[test]
    fn zero_displacement_renders_without_offset_term() {
        let (instruction, consumed) = decoded(&[0x8B, 0x46, 0x00]);
        assert_eq!(consumed, 3);
        assert_eq!(instruction.to_string(), "mov ax, [bp]");
    }

    #[test]
    fn direct_address_special_case() {
        let (instruction, consumed) = decoded(&[0x8B, 0x2E, 0x05, 0x00]);
        assert_eq!(consumed, 4);
        assert_eq!(instruction.to_string(), "mov bp, [5]");
    }

    #[test]
    fn bytes_consumed_per_mod_field() {
        // mod=11, mod=00, mod=01, mod=10, and the direct-address special
        // case, all on the same mov op code.
        for (bytes, expected) in [
            (&[0x8B, 0xD8][..], 2),
            (&[0x8B, 0x00][..], 2),
            (&[0x8B, 0x40, 0x04][..], 3),
            (&[0x8B, 0x80, 0x04, 0x00][..], 4),
            (&[0x8B, 0x06, 0x04, 0x00][..], 4),
        ] {
            let (instruction, consumed) = decoded(bytes);
            assert_eq!(consumed, expected, "bytes: {:02x?}", bytes);
            assert_eq!(instruction.bytes_consumed, expected);
            assert_eq!(usize::from(consumed), bytes.len());
        }
    }

    #[test]
    fn mov_immediate_to_memory_carries_size_marker() {
        assert_eq!(rendered(&[0xC6, 0x03, 0x07]), "mov [bp + di], byte 7");
        assert_eq!(
            rendered(&[0xC7, 0x85, 0x85, 0x03, 0x5B, 0x01]),
            "mov [di + 901], word 347"
        );
    }

    #[test]
    fn mov_immediate_to_register_via_modrm_has_no_marker() {
        assert_eq!(rendered(&[0xC7, 0xC3, 0x2A, 0x00]), "mov bx, 42");
    }

    #[test]
    fn arithmetic_register_or_memory_forms() {
        assert_eq!(rendered(&[0x01, 0xD8]), "add ax, bx");
        assert_eq!(rendered(&[0x03, 0x18]), "add bx, [bx + si]");
        assert_eq!(rendered(&[0x29, 0xD8]), "sub ax, bx");
        assert_eq!(rendered(&[0x39, 0xD8]), "cmp ax, bx");
        assert_eq!(rendered(&[0x3B, 0x1E, 0xE8, 0x03]), "cmp bx, [1000]");
    }

    #[test]
    fn arithmetic_immediate_forms() {
        let (instruction, consumed) = decoded(&[0x83, 0xC6, 0x02]);
        assert_eq!(consumed, 3);
        assert_eq!(instruction.to_string(), "add si, 2");

        assert_eq!(rendered(&[0x80, 0x07, 0x22]), "add [bx], byte 34");
        assert_eq!(
            rendered(&[0x81, 0x29, 0xE8, 0x03]),
            "sub [bx + di], word 1000"
        );
    }

    #[test]
    fn sign_extended_immediate_keeps_encoded_width_marker() {
        // s=1 w=1: one immediate byte, sign-extended to word for the value,
        // but still rendered with the byte marker on a memory destination.
        let (instruction, consumed) = decoded(&[0x83, 0x06, 0xE8, 0x03, 0xFE]);
        assert_eq!(consumed, 5);
        assert_eq!(
            instruction.source,
            Some(Operand::Immediate(Immediate::with_width(-2, Width::Byte)))
        );
        assert_eq!(instruction.to_string(), "add [1000], byte -2");
    }

    #[test]
    fn accumulator_memory_transfers() {
        let (instruction, consumed) = decoded(&[0xA1, 0xFB, 0x09]);
        assert_eq!(consumed, 3);
        assert_eq!(instruction.to_string(), "mov ax, [2555]");

        assert_eq!(rendered(&[0xA3, 0x0F, 0x00]), "mov [15], ax");

        // Byte-wide accumulator transfers read a single address byte.
        let (instruction, consumed) = decoded(&[0xA0, 0x2D]);
        assert_eq!(consumed, 2);
        assert_eq!(instruction.to_string(), "mov al, [45]");
    }

    #[test]
    fn accumulator_immediate_arithmetic() {
        assert_eq!(rendered(&[0x04, 0x09]), "add al, 9");
        assert_eq!(rendered(&[0x2D, 0xE8, 0x03]), "sub ax, 1000");
        assert_eq!(rendered(&[0x3D, 0xE8, 0x03]), "cmp ax, 1000");
    }

    #[test]
    fn short_jumps_and_loops() {
        let (instruction, consumed) = decoded(&[0x75, 0xFE]);
        assert_eq!(consumed, 2);
        assert_eq!(
            instruction.operation,
            Operation::ConditionalJump(JumpCondition::Jnz)
        );
        assert_eq!(instruction.to_string(), "jnz -2");

        assert_eq!(rendered(&[0x74, 0xFD]), "je -3");
        assert_eq!(rendered(&[0xE2, 0xF8]), "loop -8");
        assert_eq!(rendered(&[0xE3, 0x02]), "jcxz 2");
    }

    #[test]
    fn unknown_op_codes() {
        assert_eq!(decode(&[0x0F, 0x00]), Err(DecodeError::UnknownOpCode(0x0F)));
        assert_eq!(decode(&[0xF4]), Err(DecodeError::UnknownOpCode(0xF4)));
        // Valid immediate-group op code, but the sub-field selects an
        // operation outside the subset (or).
        assert_eq!(
            decode(&[0x80, 0x0F, 0x01]),
            Err(DecodeError::UnknownOpCode(0x80))
        );
    }

    #[test]
    fn truncated_input() {
        assert_eq!(decode(&[]), Err(DecodeError::TruncatedInput));
        assert_eq!(decode(&[0x89]), Err(DecodeError::TruncatedInput));
        assert_eq!(decode(&[0xB8, 0x05]), Err(DecodeError::TruncatedInput));
        assert_eq!(decode(&[0x8B, 0x46]), Err(DecodeError::TruncatedInput));
        assert_eq!(decode(&[0x75]), Err(DecodeError::TruncatedInput));
    }
}
