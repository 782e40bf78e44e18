//! Opcode handlers organized by category.
//!
//! Each handler applies one instruction's effect to the [`ExecutionState`](super::ExecutionState)
//! and either succeeds or reports the [`Fault`](crate::Fault) that stops the run. Handlers check
//! stack depth before popping anything, so a stack fault never leaves a partially applied
//! instruction behind.

/// Bitwise operations: SHL, SHR
pub mod bitwise;

/// Control flow: JUMP, JUMPI, JUMPDEST, PC
pub mod control;

/// Memory operations: MLOAD, MSTORE, MSTORE8, MSIZE
pub mod memory;

/// Stack operations: POP, PUSH0-PUSH32, DUP1-DUP16, SWAP1-SWAP16
pub mod stack;
