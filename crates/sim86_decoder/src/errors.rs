use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// No classification matched the first byte (or the arithmetic sub-field
    /// selected an operation outside the subset). Fatal for the run, since
    /// no further instruction alignment can be assumed.
    #[error("unknown op code ({0:#04x})")]
    UnknownOpCode(u8),

    /// The window ended before the encoding was complete.
    #[error("instruction stream ended inside an encoding")]
    TruncatedInput,

    /// Unreachable for a well-formed 3-bit register field; guards against
    /// malformed callers.
    #[error("invalid register encoding ({0:#05b})")]
    InvalidRegisterCode(u8),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
