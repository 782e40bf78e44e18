use std::io::{self, Write};

use tracing::{debug, trace, Level};

use evmi_common::utils::strings::encode_hex;

use super::{
    opcodes::opcode_name,
    stack::Stack,
    vm::{ExecutionState, Instruction},
    word::WORD_SIZE,
};

/// How many leading bytes of memory [`StackDump::with_memory`] shows by default.
pub const DEFAULT_MEMORY_WINDOW: usize = 10 * WORD_SIZE;

/// Receives the stack after every successfully executed instruction.
///
/// Observers only read: the stack is passed by shared reference and cannot be changed.
pub trait StackObserver {
    /// Called once per executed instruction, after its effect has been applied.
    fn observe(&mut self, instruction: &Instruction, stack: &Stack);

    /// Called by the VM with the whole machine state. Observers that only need the stack keep
    /// the default, which forwards to [`StackObserver::observe`].
    fn observe_state(&mut self, instruction: &Instruction, state: &ExecutionState) {
        self.observe(instruction, &state.stack);
    }
}

impl<F> StackObserver for F
where
    F: FnMut(&Instruction, &Stack),
{
    fn observe(&mut self, instruction: &Instruction, stack: &Stack) {
        self(instruction, stack)
    }
}

/// Writes a top-to-bottom dump of the stack to `W` after each step.
///
/// ```
/// use evmi_vm::{Limits, StackDump, VM};
///
/// let mut vm = VM::new(vec![0x60, 0xff], Limits::default());
/// vm.set_observer(Some(Box::new(StackDump::new(std::io::sink()))));
/// assert!(vm.execute().is_success());
/// ```
#[derive(Debug)]
pub struct StackDump<W: Write> {
    writer: W,
    memory_window: Option<usize>,
}

impl<W: Write> StackDump<W> {
    /// Creates a dump writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, memory_window: None }
    }

    /// Also dumps the first `window` bytes of memory after the stack, 32 bytes per row.
    ///
    /// ```
    /// use evmi_vm::{Limits, StackDump, VM, DEFAULT_MEMORY_WINDOW};
    ///
    /// // PUSH1 0x0a PUSH1 0x00 MSTORE
    /// let mut vm = VM::new(vec![0x60, 0x0a, 0x60, 0x00, 0x52], Limits::default());
    /// vm.set_observer(Some(Box::new(
    ///     StackDump::new(std::io::sink()).with_memory(DEFAULT_MEMORY_WINDOW),
    /// )));
    /// assert!(vm.execute().is_success());
    /// ```
    pub fn with_memory(mut self, window: usize) -> Self {
        self.memory_window = Some(window);
        self
    }

    /// Consumes the dump, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_dump(&mut self, instruction: &Instruction, stack: &Stack) -> io::Result<()> {
        writeln!(
            self.writer,
            "{:06x} {} (stack: {})",
            instruction.pc,
            opcode_name(instruction.opcode),
            stack.size()
        )?;
        for (depth, word) in stack.render().iter().enumerate() {
            writeln!(self.writer, "  {depth:>4}: {word}")?;
        }
        Ok(())
    }

    fn write_memory(&mut self, memory: &[u8], window: usize) -> io::Result<()> {
        let shown = &memory[..window.min(memory.len())];
        writeln!(self.writer, "  memory ({} of {} bytes):", shown.len(), memory.len())?;
        for (row, chunk) in shown.chunks(WORD_SIZE).enumerate() {
            writeln!(self.writer, "  {:06x}: {}", row * WORD_SIZE, encode_hex(chunk))?;
        }
        Ok(())
    }
}

impl<W: Write> StackObserver for StackDump<W> {
    fn observe(&mut self, instruction: &Instruction, stack: &Stack) {
        if let Err(e) = self.write_dump(instruction, stack) {
            debug!("failed to write stack dump: {e}");
        }
    }

    fn observe_state(&mut self, instruction: &Instruction, state: &ExecutionState) {
        self.observe(instruction, &state.stack);
        if let Some(window) = self.memory_window {
            if let Err(e) = self.write_memory(state.memory.as_slice(), window) {
                debug!("failed to write memory dump: {e}");
            }
        }
    }
}

/// Emits the stack as a `trace`-level event after each step.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TracingObserver {
    /// Whether the installed subscriber records this observer's events, so attaching it is
    /// worth the cost of rendering the stack.
    pub fn is_enabled() -> bool {
        tracing::enabled!(Level::TRACE)
    }
}

impl StackObserver for TracingObserver {
    fn observe(&mut self, instruction: &Instruction, stack: &Stack) {
        trace!(
            pc = instruction.pc,
            opcode = opcode_name(instruction.opcode),
            stack = ?stack.render(),
            "stack after step"
        );
    }
}
