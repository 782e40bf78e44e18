//! The dispatch loop and the state it drives.
//!
//! [`VM`] owns an [`ExecutionState`] and repeatedly fetches the opcode at the program counter,
//! looks it up in the [`OPCODE_INFO_TABLE`](crate::core::opcodes::OPCODE_INFO_TABLE) and
//! executes the matching [`Operation`](crate::Operation) until the program counter runs off the
//! end of the bytecode or an instruction faults.

mod core;
mod execution;

/// Opcode handlers organized by category.
pub mod handlers;

pub use self::core::VM;
pub use execution::{ExecutionResult, ExecutionState, Instruction, Limits, Status};
