use crate::{
    core::vm::{handlers, ExecutionState},
    error::Fault,
};

/// An instruction family, as decoded from the [`OPCODE_INFO_TABLE`](super::OPCODE_INFO_TABLE).
///
/// Families parameterized by a width or depth (`PUSHn`, `DUPn`, `SWAPn`) carry it inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// PUSH0-PUSH32: push the next n bytecode bytes as a word
    Push(u8),
    /// DUP1-DUP16: duplicate the nth stack item
    Dup(u8),
    /// SWAP1-SWAP16: exchange the top and the (n+1)th stack items
    Swap(u8),
    /// POP: discard the top stack item
    Pop,
    /// SHL: shift left
    Shl,
    /// SHR: logical shift right
    Shr,
    /// MLOAD: load a word from memory
    MLoad,
    /// MSTORE: store a word to memory
    MStore,
    /// MSTORE8: store a byte to memory
    MStore8,
    /// MSIZE: size of active memory in bytes
    MSize,
    /// JUMP: unconditional jump
    Jump,
    /// JUMPI: conditional jump
    JumpI,
    /// JUMPDEST: jump destination marker
    JumpDest,
    /// PC: program counter of this instruction
    Pc,
}

/// A single state transition of the machine.
pub trait Execute {
    /// Applies exactly one instruction's effect to `state`, or returns the fault that stops
    /// the run.
    fn execute(&self, state: &mut ExecutionState) -> Result<(), Fault>;
}

impl Execute for Operation {
    fn execute(&self, state: &mut ExecutionState) -> Result<(), Fault> {
        match *self {
            Operation::Push(n) => handlers::stack::push_n(state, n as usize),
            Operation::Dup(n) => handlers::stack::dup_n(state, n as usize),
            Operation::Swap(n) => handlers::stack::swap_n(state, n as usize),
            Operation::Pop => handlers::stack::pop(state),

            Operation::Shl => handlers::bitwise::shl(state),
            Operation::Shr => handlers::bitwise::shr(state),

            Operation::MLoad => handlers::memory::mload(state),
            Operation::MStore => handlers::memory::mstore(state),
            Operation::MStore8 => handlers::memory::mstore8(state),
            Operation::MSize => handlers::memory::msize(state),

            Operation::Jump => handlers::control::jump(state),
            Operation::JumpI => handlers::control::jumpi(state),
            Operation::JumpDest => handlers::control::jumpdest(),
            Operation::Pc => handlers::control::pc(state),
        }
    }
}
