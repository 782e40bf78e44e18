/// Memory implementation for VM memory management
pub mod memory;

/// Opcode metadata table and the closed set of operations it maps to
pub mod opcodes;

/// Stack implementation for the VM
pub mod stack;

/// Per-step stack observers
pub mod trace;

/// Core virtual machine implementation
pub mod vm;

/// The 256-bit machine word
pub mod word;
