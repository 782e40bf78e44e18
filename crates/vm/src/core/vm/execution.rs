use bytes::Bytes;

use crate::{
    core::{
        memory::{Memory, DEFAULT_MEMORY_LIMIT},
        stack::Stack,
        word::Word,
    },
    error::{Abort, Error, Fault},
};

/// Resource ceilings for a single run, checked once per dispatch iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Total gas the run may consume. `None` disables metering.
    pub gas_limit: Option<u64>,

    /// Number of instructions the run may execute. `None` means unbounded.
    pub step_limit: Option<u64>,

    /// Maximum memory size in bytes, rounded down to a multiple of 32 since memory grows in
    /// whole words.
    pub memory_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits { gas_limit: None, step_limit: None, memory_limit: DEFAULT_MEMORY_LIMIT }
    }
}

impl Limits {
    /// Sets the gas limit.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Sets the step limit.
    pub fn with_step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = Some(step_limit);
        self
    }

    /// Sets the memory limit.
    pub fn with_memory_limit(mut self, memory_limit: usize) -> Self {
        self.memory_limit = memory_limit;
        self
    }
}

/// [`ExecutionState`] is the machine state every opcode handler operates on: the program
/// counter, the immutable bytecode, the stack and memory.
///
/// Handlers receive it by exclusive reference, so there is exactly one writer at any time.
#[derive(Clone, Debug)]
pub struct ExecutionState {
    /// The byte offset of the instruction being executed.
    pub program_counter: usize,

    /// The operand stack.
    pub stack: Stack,

    /// The byte-addressable memory.
    pub memory: Memory,

    /// Gas charged so far. Tallied even when no gas limit is set.
    pub gas_used: u64,

    bytecode: Bytes,
    gas_limit: Option<u64>,
}

impl ExecutionState {
    /// Creates a fresh state for `bytecode`: empty stack, empty memory, program counter 0.
    pub fn new(bytecode: Bytes, limits: &Limits) -> ExecutionState {
        ExecutionState {
            program_counter: 0,
            stack: Stack::new(),
            memory: Memory::with_limit(limits.memory_limit),
            gas_used: 0,
            bytecode,
            gas_limit: limits.gas_limit,
        }
    }

    /// The bytecode being executed. Fixed for the lifetime of the state.
    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// Charges `amount` gas. Fails with [`Fault::GasExceeded`] once the gas limit, if any, is
    /// passed.
    pub fn consume_gas(&mut self, amount: u64) -> Result<(), Fault> {
        let gas_used = self.gas_used.saturating_add(amount);
        if let Some(gas_limit) = self.gas_limit {
            if gas_used > gas_limit {
                self.gas_used = gas_limit;
                return Err(Fault::GasExceeded);
            }
        }
        self.gas_used = gas_used;
        Ok(())
    }

    /// Charges for and performs the memory growth needed to access `size` bytes at `offset`.
    pub fn expand_memory(&mut self, offset: usize, size: usize) -> Result<(), Fault> {
        let gas_cost = self.memory.expansion_cost(offset, size)?;
        self.consume_gas(gas_cost)?;
        self.memory.extend(offset, size)
    }
}

/// The state of the dispatch loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// More instructions may be executed.
    Running,

    /// The program counter reached the end of the bytecode.
    Halted,

    /// An instruction faulted.
    Aborted(Abort),
}

/// [`Instruction`] is a single executed instruction, as returned by
/// [`VM::step`](super::VM::step). It carries the stack items the instruction consumed and
/// produced, for tracing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// The position of this instruction in the bytecode.
    pub pc: usize,

    /// The opcode value of the instruction.
    pub opcode: u8,

    /// The top stack items before execution, as many as the opcode reads.
    pub inputs: Vec<Word>,

    /// The top stack items after execution, as many as the opcode writes.
    pub outputs: Vec<Word>,
}

/// [`ExecutionResult`] is the result of a complete run.
#[derive(Clone, Debug)]
pub struct ExecutionResult {
    /// How the run ended: [`Status::Halted`] or [`Status::Aborted`].
    pub status: Status,

    /// The stack when the run ended.
    pub stack: Stack,

    /// The memory when the run ended.
    pub memory: Memory,

    /// The number of instructions executed.
    pub steps: u64,

    /// The gas consumed.
    pub gas_used: u64,

    /// The final program counter.
    pub program_counter: usize,
}

impl ExecutionResult {
    /// Whether the run halted normally.
    pub fn is_success(&self) -> bool {
        self.status == Status::Halted
    }

    /// The abort, if the run faulted.
    pub fn abort(&self) -> Option<&Abort> {
        match &self.status {
            Status::Aborted(abort) => Some(abort),
            _ => None,
        }
    }

    /// Converts an aborted run into an [`Error`].
    pub fn check(&self) -> Result<(), Error> {
        match self.abort() {
            Some(abort) => Err(Error::Aborted(*abort)),
            None => Ok(()),
        }
    }
}
