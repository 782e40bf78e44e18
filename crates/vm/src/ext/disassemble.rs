use std::fmt::Write;

use evmi_common::utils::strings::encode_hex;
use tracing::debug;

use crate::core::opcodes::{opcode_name, OpCodeInfo};

/// Disassembles bytecode into readable assembly, one instruction per line.
///
/// Each line is the instruction's offset as six hex digits, its name, and for pushes the
/// immediate bytes in hex. Bytes that are not instructions render as `unknown`. A push whose
/// immediate runs past the end of the bytecode shows only the bytes present.
///
/// ```
/// use evmi_vm::ext::disassemble;
///
/// let asm = disassemble(&[0x60, 0x0a, 0x60, 0x00, 0x52, 0xfe]);
/// assert_eq!(asm, "000000 PUSH1 0a\n000002 PUSH1 00\n000004 MSTORE\n000005 unknown\n");
/// ```
pub fn disassemble(bytecode: &[u8]) -> String {
    let mut program_counter = 0;
    let mut asm = String::new();

    while let Some(&opcode) = bytecode.get(program_counter) {
        let immediate = OpCodeInfo::lookup(opcode).map_or(0, |info| info.immediate());

        let _ = write!(asm, "{program_counter:06x} {}", opcode_name(opcode));
        let start = (program_counter + 1).min(bytecode.len());
        let end = (start + immediate).min(bytecode.len());
        if start < end {
            let _ = write!(asm, " {}", encode_hex(&bytecode[start..end]));
        }
        asm.push('\n');

        program_counter += 1 + immediate;
    }

    debug!("disassembled {} bytes", bytecode.len());
    asm
}
