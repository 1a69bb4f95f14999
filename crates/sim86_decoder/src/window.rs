use crate::errors::{DecodeError, Result};
use sim86_instruction::Width;

/// A bounded view over the instruction stream that tracks how many bytes
/// have been consumed, so the caller can advance its cursor by exactly the
/// encoded length.
pub(crate) struct Window<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Window<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        match self.bytes.get(self.position) {
            Some(&byte) => {
                self.position += 1;
                Ok(byte)
            }
            None => Err(DecodeError::TruncatedInput),
        }
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes([self.read_u8()?, self.read_u8()?]))
    }

    /// Reads an immediate or address of the given width, zero-extended.
    pub fn read_data(&mut self, width: Width) -> Result<u16> {
        match width {
            Width::Byte => Ok(u16::from(self.read_u8()?)),
            Width::Word => self.read_u16(),
        }
    }

    pub fn consumed(&self) -> u8 {
        self.position as u8
    }
}
