use std::fmt;

use bytes::Bytes;
use tracing::{debug, warn};

#[cfg(feature = "step-tracing")]
use tracing::trace;

use crate::{
    core::{
        opcodes::{opcode_name, Execute, OpCodeInfo},
        trace::StackObserver,
    },
    error::{Abort, Fault},
};

use super::execution::{ExecutionResult, ExecutionState, Instruction, Limits, Status};

/// The [`VM`] struct is a single interpreter instance. \
/// It owns the bytecode, the [`ExecutionState`] the handlers operate on, and an optional
/// [`StackObserver`] that is shown the stack after every instruction.
pub struct VM {
    bytecode: Bytes,
    limits: Limits,
    state: ExecutionState,
    status: Status,
    steps: u64,
    observer: Option<Box<dyn StackObserver>>,
}

impl fmt::Debug for VM {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VM")
            .field("limits", &self.limits)
            .field("state", &self.state)
            .field("status", &self.status)
            .field("steps", &self.steps)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl VM {
    /// Creates a new [`VM`] ready to execute `bytecode` from offset 0.
    ///
    /// ```
    /// use evmi_vm::{Limits, Status, VM};
    ///
    /// let vm = VM::new(vec![0x60, 0xff], Limits::default());
    /// assert_eq!(vm.status(), Status::Running);
    /// assert_eq!(vm.state().program_counter, 0);
    /// ```
    pub fn new(bytecode: impl Into<Bytes>, limits: Limits) -> VM {
        let bytecode = bytecode.into();
        VM {
            state: ExecutionState::new(bytecode.clone(), &limits),
            bytecode,
            limits,
            status: Status::Running,
            steps: 0,
            observer: None,
        }
    }

    /// Attaches an observer, returning the VM.
    pub fn with_observer(mut self, observer: Box<dyn StackObserver>) -> VM {
        self.observer = Some(observer);
        self
    }

    /// Replaces the observer. `None` detaches it.
    pub fn set_observer(&mut self, observer: Option<Box<dyn StackObserver>>) {
        self.observer = observer;
    }

    /// Loads new bytecode, discarding all state from the previous run.
    ///
    /// ```
    /// use evmi_vm::{Limits, VM};
    ///
    /// let mut vm = VM::new(vec![0x60, 0x01], Limits::default());
    /// vm.execute();
    ///
    /// vm.load(vec![0x60, 0x02, 0x60, 0x03]);
    /// let result = vm.execute();
    /// assert_eq!(result.stack.size(), 2);
    /// ```
    pub fn load(&mut self, bytecode: impl Into<Bytes>) {
        self.bytecode = bytecode.into();
        self.reset();
    }

    /// Resets the VM to run the current bytecode again from offset 0.
    pub fn reset(&mut self) {
        self.state = ExecutionState::new(self.bytecode.clone(), &self.limits);
        self.status = Status::Running;
        self.steps = 0;
    }

    /// The state the handlers operate on.
    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    /// Whether the VM is running, halted or aborted.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The number of instructions executed since the last load or reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The resource limits applied to every run.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Executes the instruction at the program counter.
    ///
    /// Returns `Ok(None)` once the VM has halted, and the same [`Abort`] on every call after
    /// an instruction faulted.
    ///
    /// ```
    /// use evmi_vm::{Fault, Limits, Status, VM};
    ///
    /// let mut vm = VM::new(vec![0x60, 0x01, 0x00], Limits::default());
    ///
    /// let instruction = vm.step().unwrap().expect("PUSH1 executed");
    /// assert_eq!(instruction.pc, 0);
    ///
    /// let abort = vm.step().unwrap_err();
    /// assert_eq!(abort.fault, Fault::UnrecognizedOpcode);
    /// assert_eq!(abort.pc, 2);
    /// assert_eq!(vm.status(), Status::Aborted(abort));
    /// ```
    pub fn step(&mut self) -> Result<Option<Instruction>, Abort> {
        match self.status {
            Status::Halted => return Ok(None),
            Status::Aborted(abort) => return Err(abort),
            Status::Running => {}
        }

        let pc = self.state.program_counter;
        let Some(&opcode) = self.bytecode.get(pc) else {
            self.halt();
            return Ok(None);
        };

        match self.dispatch(pc, opcode) {
            Ok(instruction) => {
                if let Some(observer) = self.observer.as_mut() {
                    observer.observe_state(&instruction, &self.state);
                }
                if self.state.program_counter >= self.bytecode.len() {
                    self.halt();
                }
                Ok(Some(instruction))
            }
            Err(fault) => {
                let abort = Abort { fault, opcode, pc };
                self.state.program_counter = pc;
                self.status = Status::Aborted(abort);
                warn!(
                    fault = %fault,
                    opcode = opcode_name(opcode),
                    pc,
                    steps = self.steps,
                    "execution aborted"
                );
                Err(abort)
            }
        }
    }

    /// Executes until the VM halts or aborts.
    ///
    /// ```
    /// use evmi_vm::{Limits, VM, Word};
    ///
    /// // PUSH1 0x0a PUSH1 0x00 MSTORE PUSH1 0x00 MLOAD
    /// let mut vm = VM::new(
    ///     vec![0x60, 0x0a, 0x60, 0x00, 0x52, 0x60, 0x00, 0x51],
    ///     Limits::default(),
    /// );
    ///
    /// let result = vm.execute();
    /// assert!(result.is_success());
    /// assert_eq!(result.stack.peek(0), Ok(Word::from(10)));
    /// ```
    pub fn execute(&mut self) -> ExecutionResult {
        while let Ok(Some(_)) = self.step() {}

        ExecutionResult {
            status: self.status,
            stack: self.state.stack.clone(),
            memory: self.state.memory.clone(),
            steps: self.steps,
            gas_used: self.state.gas_used,
            program_counter: self.state.program_counter,
        }
    }

    fn halt(&mut self) {
        self.status = Status::Halted;
        debug!(
            pc = self.state.program_counter,
            steps = self.steps,
            gas_used = self.state.gas_used,
            "execution halted"
        );
    }

    /// Fetch, decode and execute a single opcode.
    fn dispatch(&mut self, pc: usize, opcode: u8) -> Result<Instruction, Fault> {
        let info = OpCodeInfo::lookup(opcode).ok_or(Fault::UnrecognizedOpcode)?;

        if self.limits.step_limit.is_some_and(|step_limit| self.steps >= step_limit) {
            return Err(Fault::StepLimitExceeded);
        }
        // an instruction that cannot run is not charged
        self.state.stack.require(info.inputs() as usize)?;
        self.state.consume_gas(u64::from(info.min_gas()))?;

        let inputs = self.state.stack.peek_n(info.inputs() as usize);

        #[cfg(feature = "step-tracing")]
        trace!(
            pc,
            opcode = info.name(),
            inputs = ?inputs.iter().map(|x| format!("{x:#x}")).collect::<Vec<String>>(),
            "executing opcode"
        );

        info.operation().execute(&mut self.state)?;
        self.steps += 1;

        // jumps leave the program counter on their JUMPDEST, which is stepped over here too
        self.state.program_counter =
            self.state.program_counter.saturating_add(1 + info.immediate());

        let outputs = self.state.stack.peek_n(info.outputs() as usize);

        #[cfg(feature = "step-tracing")]
        trace!(
            pc,
            opcode = info.name(),
            outputs = ?outputs.iter().map(|x| format!("{x:#x}")).collect::<Vec<String>>(),
            stack_size = self.state.stack.size(),
            mem_size = self.state.memory.size(),
            "done executing opcode"
        );

        Ok(Instruction { pc, opcode, inputs, outputs })
    }
}
