use crate::StateSnapshot;
use std::collections::HashMap;
use std::error;
use std::fmt;

/// The error type returned from the public [Processor](crate::Processor) API.
///
/// Wraps the [ErrorDetail] that caused the fault together with a snapshot of the machine
/// state at the moment the fault occurred, so hosting applications can report or inspect it.
#[derive(Debug, PartialEq)]
pub struct SuperChipError {
    /// Extended snapshot of the processor state when the error was raised
    pub state_snapshot_dump: StateSnapshot,
    /// The underlying fault
    pub inner_error: ErrorDetail,
}

impl error::Error for SuperChipError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.inner_error)
    }
}

impl fmt::Display for SuperChipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "superchip error: {}", self.inner_error)
    }
}

/// An enum used throughout the crate to communicate runtime faults.
#[derive(Debug, PartialEq)]
pub enum ErrorDetail {
    /// An unrecognised opcode was read from memory (non-fatal, the instruction is skipped)
    UnknownInstruction { opcode: u16 },
    /// One or more operands fall outside expected ranges and cannot be safely used
    OperandsOutOfBounds { operands: HashMap<String, usize> },
    /// An attempt was made to pop an item off the stack while it is empty
    PopEmptyStack,
    /// An attempt was made to push an item on to the stack while it is full
    PushFullStack,
    /// An attempt was made to read/write from an address outside the addressable range
    MemoryAddressOutOfBounds { address: u16 },
    /// A key ordinal was referenced that is outside the valid keypad range (0x0 to 0xF)
    InvalidKey { key: u8 },
    /// A cycle was requested after the program exited or the processor crashed
    ExecutionHalted,
}

impl error::Error for ErrorDetail {}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorDetail::UnknownInstruction { opcode } => {
                write!(f, "an unrecognised opcode {:#06X} was decoded", opcode)
            }
            ErrorDetail::OperandsOutOfBounds { operands } => {
                write!(f, "an opcode contains invalid operands: {:?}", operands)
            }
            ErrorDetail::PopEmptyStack => {
                write!(f, "an attempt was made to pop the stack while empty")
            }
            ErrorDetail::PushFullStack => {
                write!(f, "an attempt was made to push to the stack while full")
            }
            ErrorDetail::MemoryAddressOutOfBounds { address } => {
                write!(f, "memory was accessed out of bounds at {:#06X}", address)
            }
            ErrorDetail::InvalidKey { key } => {
                write!(f, "an invalid key {:#04X} was specified", key)
            }
            ErrorDetail::ExecutionHalted => {
                write!(f, "execution was requested after the processor halted")
            }
        }
    }
}
