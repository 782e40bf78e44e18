//! evmi EVM interpreter
//!
//! This crate provides a small, deterministic interpreter for a subset of the Ethereum Virtual
//! Machine: a 256-bit word type, a bounded operand stack, growable byte-addressable memory, a
//! static opcode metadata table, and a fetch/decode/execute loop that either halts normally or
//! aborts with a typed [`Fault`].

/// Error and fault types for the interpreter
pub mod error;

/// Core VM implementation, including words, memory, stack, opcodes and the dispatch loop
pub mod core;

/// Extensions to the core VM, such as the disassembler
pub mod ext;

pub use crate::core::{
    memory::Memory,
    opcodes::{OpCodeInfo, Operation},
    stack::Stack,
    trace::{StackDump, StackObserver, TracingObserver, DEFAULT_MEMORY_WINDOW},
    vm::{ExecutionResult, ExecutionState, Instruction, Limits, Status, VM},
    word::{Word, WordExt},
};
pub use error::{Abort, Error, Fault};
