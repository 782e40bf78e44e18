use std::fmt;

use crate::core::opcodes::opcode_name;

/// The reason a run aborted. Every fault is terminal: the dispatch loop stops at the
/// instruction that raised it and never resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Fault {
    /// A push would take the stack past 1024 items.
    #[error("stack overflow")]
    StackOverflow,

    /// An instruction needed more stack items than were present.
    #[error("stack underflow")]
    StackUnderflow,

    /// A jump target is out of range or does not hold `JUMPDEST`.
    #[error("invalid jump destination")]
    InvalidJump,

    /// The opcode byte has no entry in the opcode metadata table.
    #[error("unrecognized opcode")]
    UnrecognizedOpcode,

    /// The configured gas limit was exhausted.
    #[error("gas limit exceeded")]
    GasExceeded,

    /// Reserved. Memory is addressed at arbitrary byte offsets, so no instruction raises this.
    #[error("unaligned memory access")]
    MemoryUnalignedAccess,

    /// A memory access reached past the configured memory limit.
    #[error("memory limit exceeded")]
    MemoryLimitExceeded,

    /// The configured instruction budget was exhausted.
    #[error("step limit exceeded")]
    StepLimitExceeded,
}

/// An aborted run: the [`Fault`] plus the opcode and program counter that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Abort {
    /// The fault that terminated the run.
    pub fault: Fault,

    /// The opcode byte being executed when the fault was raised.
    pub opcode: u8,

    /// The program counter of that opcode.
    pub pc: usize,
}

impl fmt::Display for Abort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at pc {} ({} {:#04x})",
            self.fault,
            self.pc,
            opcode_name(self.opcode),
            self.opcode
        )
    }
}

impl std::error::Error for Abort {}

/// Error type for the VM crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A byte sequence longer than a word was converted into a [`Word`](crate::Word).
    #[error("{0} bytes do not fit in a 32-byte word")]
    WordOverflow(usize),

    /// Execution aborted with a fault.
    #[error("execution aborted: {0}")]
    Aborted(#[from] Abort),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::opcodes;

    #[test]
    fn test_abort_display_includes_context() {
        let abort = Abort { fault: Fault::UnrecognizedOpcode, opcode: 0x00, pc: 0 };
        assert_eq!(abort.to_string(), "unrecognized opcode at pc 0 (unknown 0x00)");

        let abort = Abort { fault: Fault::InvalidJump, opcode: opcodes::JUMP, pc: 2 };
        assert_eq!(abort.to_string(), "invalid jump destination at pc 2 (JUMP 0x56)");
    }

    #[test]
    fn test_error_from_abort() {
        let abort = Abort { fault: Fault::StackUnderflow, opcode: opcodes::SWAP1, pc: 7 };
        let error: Error = abort.into();
        assert!(matches!(error, Error::Aborted(a) if a.fault == Fault::StackUnderflow));
    }
}
