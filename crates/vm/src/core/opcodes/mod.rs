//! EVM opcodes and their static metadata.
//!
//! The [`OPCODE_INFO_TABLE`] maps every opcode byte to an optional [`OpCodeInfo`]. A byte with
//! no entry is not an instruction of this machine; the dispatch loop turns it into
//! [`Fault::UnrecognizedOpcode`](crate::Fault::UnrecognizedOpcode).

/// The closed set of operations the interpreter can execute
pub mod operation;
pub use operation::{Execute, Operation};

/// Information about an opcode: its name, what it executes, and its static costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpCodeInfo {
    /// Name
    name: &'static str,
    /// The operation the opcode executes.
    operation: Operation,
    /// Stack inputs.
    inputs: u8,
    /// Stack outputs.
    outputs: u8,
    /// Static gas cost of the opcode.
    gas: u16,
}

impl OpCodeInfo {
    /// Creates a new opcode info with the given name and operation.
    pub const fn new(name: &'static str, operation: Operation) -> Self {
        Self { name, operation, inputs: 0, outputs: 0, gas: 0 }
    }

    /// Looks up the info for an opcode byte, or `None` if the byte is not an instruction.
    ///
    /// ```
    /// use evmi_vm::core::opcodes::{self, OpCodeInfo};
    ///
    /// assert_eq!(OpCodeInfo::lookup(opcodes::PUSH2).unwrap().immediate(), 2);
    /// assert!(OpCodeInfo::lookup(0x00).is_none());
    /// ```
    #[inline]
    pub fn lookup(opcode: u8) -> Option<&'static OpCodeInfo> {
        OPCODE_INFO_TABLE[opcode as usize].as_ref()
    }

    /// Returns the name of the opcode.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the operation this opcode executes.
    #[inline]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the number of immediate bytes following the opcode in the bytecode.
    #[inline]
    pub const fn immediate(&self) -> usize {
        match self.operation {
            Operation::Push(n) => n as usize,
            _ => 0,
        }
    }

    /// Returns the number of stack inputs.
    #[inline]
    pub const fn inputs(&self) -> u8 {
        self.inputs
    }

    /// Returns the number of stack outputs.
    #[inline]
    pub const fn outputs(&self) -> u8 {
        self.outputs
    }

    /// Returns the static gas cost of the opcode.
    #[inline]
    pub const fn min_gas(&self) -> u16 {
        self.gas
    }
}

/// Sets the number of stack inputs and outputs.
#[inline]
pub const fn stack_io(mut op: OpCodeInfo, inputs: u8, outputs: u8) -> OpCodeInfo {
    op.inputs = inputs;
    op.outputs = outputs;
    op
}

/// Sets the gas required to execute the opcode.
#[inline]
pub const fn min_gas(mut op: OpCodeInfo, gas: u16) -> OpCodeInfo {
    op.gas = gas;
    op
}

macro_rules! opcodes {
    ($($val:literal => $name:ident => $operation:expr $(, $modifier:ident $(( $($modifier_arg:expr),* ))?)*);* $(;)?) => {
        // create a constant for each opcode
        $(
            #[doc = concat!("The `", stringify!($val), "` (\"", stringify!($name),"\") opcode.")]
            pub const $name: u8 = $val;
        )*

        /// Maps each opcode to its info. Built once at compile time and never mutated.
        pub static OPCODE_INFO_TABLE: [Option<OpCodeInfo>; 256] = {
            let mut map = [None; 256];
            let mut prev: u8 = 0;
            $(
                let val: u8 = $val;
                assert!(val == 0 || val > prev, "opcodes must be sorted in ascending order");
                prev = val;
                let info = OpCodeInfo::new(stringify!($name), $operation);
                $(
                let info = $modifier(info, $($($modifier_arg),*)?);
                )*
                map[$val] = Some(info);
            )*
            let _ = prev;
            map
        };

        /// Maps each opcode to its name. (So we dont need to load [`OpCodeInfo`] to get the name)
        pub static OPCODE_NAME_TABLE: [&'static str; 256] = {
            let mut map = ["unknown"; 256];
            $(
                map[$val] = stringify!($name);
            )*
            map
        };
    }
}

/// Get the name of an opcode.
#[inline]
pub fn opcode_name(opcode: u8) -> &'static str {
    OPCODE_NAME_TABLE[opcode as usize]
}

opcodes! {
    0x1b => SHL => Operation::Shl, stack_io(2, 1), min_gas(3);
    0x1c => SHR => Operation::Shr, stack_io(2, 1), min_gas(3);

    0x50 => POP => Operation::Pop, stack_io(1, 0), min_gas(2);
    0x51 => MLOAD => Operation::MLoad, stack_io(1, 1), min_gas(3);
    0x52 => MSTORE => Operation::MStore, stack_io(2, 0), min_gas(3);
    0x53 => MSTORE8 => Operation::MStore8, stack_io(2, 0), min_gas(3);
    0x56 => JUMP => Operation::Jump, stack_io(1, 0), min_gas(8);
    0x57 => JUMPI => Operation::JumpI, stack_io(2, 0), min_gas(10);
    0x58 => PC => Operation::Pc, stack_io(0, 1), min_gas(2);
    0x59 => MSIZE => Operation::MSize, stack_io(0, 1), min_gas(2);
    0x5b => JUMPDEST => Operation::JumpDest, min_gas(1);

    0x5f => PUSH0 => Operation::Push(0), stack_io(0, 1), min_gas(2);
    0x60 => PUSH1 => Operation::Push(1), stack_io(0, 1), min_gas(3);
    0x61 => PUSH2 => Operation::Push(2), stack_io(0, 1), min_gas(3);
    0x62 => PUSH3 => Operation::Push(3), stack_io(0, 1), min_gas(3);
    0x63 => PUSH4 => Operation::Push(4), stack_io(0, 1), min_gas(3);
    0x64 => PUSH5 => Operation::Push(5), stack_io(0, 1), min_gas(3);
    0x65 => PUSH6 => Operation::Push(6), stack_io(0, 1), min_gas(3);
    0x66 => PUSH7 => Operation::Push(7), stack_io(0, 1), min_gas(3);
    0x67 => PUSH8 => Operation::Push(8), stack_io(0, 1), min_gas(3);
    0x68 => PUSH9 => Operation::Push(9), stack_io(0, 1), min_gas(3);
    0x69 => PUSH10 => Operation::Push(10), stack_io(0, 1), min_gas(3);
    0x6a => PUSH11 => Operation::Push(11), stack_io(0, 1), min_gas(3);
    0x6b => PUSH12 => Operation::Push(12), stack_io(0, 1), min_gas(3);
    0x6c => PUSH13 => Operation::Push(13), stack_io(0, 1), min_gas(3);
    0x6d => PUSH14 => Operation::Push(14), stack_io(0, 1), min_gas(3);
    0x6e => PUSH15 => Operation::Push(15), stack_io(0, 1), min_gas(3);
    0x6f => PUSH16 => Operation::Push(16), stack_io(0, 1), min_gas(3);
    0x70 => PUSH17 => Operation::Push(17), stack_io(0, 1), min_gas(3);
    0x71 => PUSH18 => Operation::Push(18), stack_io(0, 1), min_gas(3);
    0x72 => PUSH19 => Operation::Push(19), stack_io(0, 1), min_gas(3);
    0x73 => PUSH20 => Operation::Push(20), stack_io(0, 1), min_gas(3);
    0x74 => PUSH21 => Operation::Push(21), stack_io(0, 1), min_gas(3);
    0x75 => PUSH22 => Operation::Push(22), stack_io(0, 1), min_gas(3);
    0x76 => PUSH23 => Operation::Push(23), stack_io(0, 1), min_gas(3);
    0x77 => PUSH24 => Operation::Push(24), stack_io(0, 1), min_gas(3);
    0x78 => PUSH25 => Operation::Push(25), stack_io(0, 1), min_gas(3);
    0x79 => PUSH26 => Operation::Push(26), stack_io(0, 1), min_gas(3);
    0x7a => PUSH27 => Operation::Push(27), stack_io(0, 1), min_gas(3);
    0x7b => PUSH28 => Operation::Push(28), stack_io(0, 1), min_gas(3);
    0x7c => PUSH29 => Operation::Push(29), stack_io(0, 1), min_gas(3);
    0x7d => PUSH30 => Operation::Push(30), stack_io(0, 1), min_gas(3);
    0x7e => PUSH31 => Operation::Push(31), stack_io(0, 1), min_gas(3);
    0x7f => PUSH32 => Operation::Push(32), stack_io(0, 1), min_gas(3);

    0x80 => DUP1 => Operation::Dup(1), stack_io(1, 2), min_gas(3);
    0x81 => DUP2 => Operation::Dup(2), stack_io(2, 3), min_gas(3);
    0x82 => DUP3 => Operation::Dup(3), stack_io(3, 4), min_gas(3);
    0x83 => DUP4 => Operation::Dup(4), stack_io(4, 5), min_gas(3);
    0x84 => DUP5 => Operation::Dup(5), stack_io(5, 6), min_gas(3);
    0x85 => DUP6 => Operation::Dup(6), stack_io(6, 7), min_gas(3);
    0x86 => DUP7 => Operation::Dup(7), stack_io(7, 8), min_gas(3);
    0x87 => DUP8 => Operation::Dup(8), stack_io(8, 9), min_gas(3);
    0x88 => DUP9 => Operation::Dup(9), stack_io(9, 10), min_gas(3);
    0x89 => DUP10 => Operation::Dup(10), stack_io(10, 11), min_gas(3);
    0x8a => DUP11 => Operation::Dup(11), stack_io(11, 12), min_gas(3);
    0x8b => DUP12 => Operation::Dup(12), stack_io(12, 13), min_gas(3);
    0x8c => DUP13 => Operation::Dup(13), stack_io(13, 14), min_gas(3);
    0x8d => DUP14 => Operation::Dup(14), stack_io(14, 15), min_gas(3);
    0x8e => DUP15 => Operation::Dup(15), stack_io(15, 16), min_gas(3);
    0x8f => DUP16 => Operation::Dup(16), stack_io(16, 17), min_gas(3);

    0x90 => SWAP1 => Operation::Swap(1), stack_io(2, 2), min_gas(3);
    0x91 => SWAP2 => Operation::Swap(2), stack_io(3, 3), min_gas(3);
    0x92 => SWAP3 => Operation::Swap(3), stack_io(4, 4), min_gas(3);
    0x93 => SWAP4 => Operation::Swap(4), stack_io(5, 5), min_gas(3);
    0x94 => SWAP5 => Operation::Swap(5), stack_io(6, 6), min_gas(3);
    0x95 => SWAP6 => Operation::Swap(6), stack_io(7, 7), min_gas(3);
    0x96 => SWAP7 => Operation::Swap(7), stack_io(8, 8), min_gas(3);
    0x97 => SWAP8 => Operation::Swap(8), stack_io(9, 9), min_gas(3);
    0x98 => SWAP9 => Operation::Swap(9), stack_io(10, 10), min_gas(3);
    0x99 => SWAP10 => Operation::Swap(10), stack_io(11, 11), min_gas(3);
    0x9a => SWAP11 => Operation::Swap(11), stack_io(12, 12), min_gas(3);
    0x9b => SWAP12 => Operation::Swap(12), stack_io(13, 13), min_gas(3);
    0x9c => SWAP13 => Operation::Swap(13), stack_io(14, 14), min_gas(3);
    0x9d => SWAP14 => Operation::Swap(14), stack_io(15, 15), min_gas(3);
    0x9e => SWAP15 => Operation::Swap(15), stack_io(16, 16), min_gas(3);
    0x9f => SWAP16 => Operation::Swap(16), stack_io(17, 17), min_gas(3);
}
