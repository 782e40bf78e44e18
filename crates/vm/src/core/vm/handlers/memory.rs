use crate::{
    core::word::{Word, WordExt, WORD_SIZE},
    error::Fault,
};

use super::super::execution::ExecutionState;

/// Memory offsets that don't fit in a `usize` can never be within the memory limit.
fn memory_offset(word: Word) -> Result<usize, Fault> {
    word.to_offset().ok_or(Fault::MemoryLimitExceeded)
}

/// MLOAD - Load word from memory
pub fn mload(state: &mut ExecutionState) -> Result<(), Fault> {
    let offset = memory_offset(state.stack.pop()?)?;
    state.expand_memory(offset, WORD_SIZE)?;
    let value = state.memory.read_word(offset)?;
    state.stack.push(value)
}

/// MSTORE - Save word to memory. Pops the offset, then the value.
pub fn mstore(state: &mut ExecutionState) -> Result<(), Fault> {
    state.stack.require(2)?;
    let offset = state.stack.pop()?;
    let value = state.stack.pop()?;

    let offset = memory_offset(offset)?;
    state.expand_memory(offset, WORD_SIZE)?;
    state.memory.store_word(offset, value)
}

/// MSTORE8 - Save the low byte of a word to memory
pub fn mstore8(state: &mut ExecutionState) -> Result<(), Fault> {
    state.stack.require(2)?;
    let offset = state.stack.pop()?;
    let value = state.stack.pop()?;

    let offset = memory_offset(offset)?;
    state.expand_memory(offset, 1)?;
    state.memory.store(offset, &value.to_be_word_bytes()[WORD_SIZE - 1..])
}

/// MSIZE - Get the size of active memory in bytes
pub fn msize(state: &mut ExecutionState) -> Result<(), Fault> {
    let size = Word::from(state.memory.size());
    state.stack.push(size)
}
