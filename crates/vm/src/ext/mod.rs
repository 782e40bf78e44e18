/// Bytecode disassembly into one line per instruction
pub mod disassemble;

pub use disassemble::disassemble;
