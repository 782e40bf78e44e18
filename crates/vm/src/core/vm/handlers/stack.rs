use crate::{
    core::word::{Word, WORD_SIZE},
    error::Fault,
};

use super::super::execution::ExecutionState;

/// POP - Remove item from stack
pub fn pop(state: &mut ExecutionState) -> Result<(), Fault> {
    state.stack.pop()?;
    Ok(())
}

/// PUSH0-PUSH32 - Push the `n` bytes following the opcode onto the stack
///
/// Immediate bytes missing past the end of the bytecode read as zero.
pub fn push_n(state: &mut ExecutionState, n: usize) -> Result<(), Fault> {
    let n = n.min(WORD_SIZE);
    let start = state.program_counter.saturating_add(1);
    let immediate = state.bytecode().get(start..).unwrap_or_default();
    let available = n.min(immediate.len());

    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - n..WORD_SIZE - n + available].copy_from_slice(&immediate[..available]);

    state.stack.push(Word::from_be_bytes(word))
}

/// DUP1-DUP16 - Duplicate Nth stack item
pub fn dup_n(state: &mut ExecutionState, n: usize) -> Result<(), Fault> {
    state.stack.dup(n)
}

/// SWAP1-SWAP16 - Exchange 1st and (N+1)th stack items
pub fn swap_n(state: &mut ExecutionState, n: usize) -> Result<(), Fault> {
    state.stack.swap(n)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::core::vm::Limits;

    fn new_state(code: &'static [u8]) -> ExecutionState {
        ExecutionState::new(Bytes::from_static(code), &Limits::default())
    }

    #[test]
    fn test_push_reads_immediates_big_endian() {
        let mut state = new_state(&[0x61, 0x01, 0x02]);
        push_n(&mut state, 2).expect("push");
        assert_eq!(state.stack.peek(0), Ok(Word::from(0x0102)));
    }

    #[test]
    fn test_push_pads_truncated_immediate_on_the_right() {
        let mut state = new_state(&[0x62, 0x01]);
        push_n(&mut state, 3).expect("push");
        assert_eq!(state.stack.peek(0), Ok(Word::from(0x010000)));
    }

    #[test]
    fn test_push0() {
        let mut state = new_state(&[0x5f]);
        push_n(&mut state, 0).expect("push");
        assert_eq!(state.stack.peek(0), Ok(Word::ZERO));
    }

    #[test]
    fn test_push32() {
        let mut code = vec![0x7f];
        code.extend([0xffu8; 32]);
        let mut state = ExecutionState::new(Bytes::from(code), &Limits::default());
        push_n(&mut state, 32).expect("push");
        assert_eq!(state.stack.peek(0), Ok(Word::MAX));
    }

    #[test]
    fn test_swap_underflow_leaves_stack_untouched() {
        let mut state = new_state(&[0x90]);
        state.stack.push(Word::from(1)).expect("push");
        assert_eq!(swap_n(&mut state, 1), Err(Fault::StackUnderflow));
        assert_eq!(state.stack.peek_n(2), vec![Word::from(1)]);
    }
}
