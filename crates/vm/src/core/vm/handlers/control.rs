use crate::{
    core::{
        opcodes::JUMPDEST,
        word::{Word, WordExt},
    },
    error::Fault,
};

use super::super::execution::ExecutionState;

/// Resolves a jump target. The target must be inside the bytecode and land on a JUMPDEST.
fn jump_target(state: &ExecutionState, target: Word) -> Result<usize, Fault> {
    let target = target.to_offset().ok_or(Fault::InvalidJump)?;
    match state.bytecode().get(target) {
        Some(&JUMPDEST) => Ok(target),
        _ => Err(Fault::InvalidJump),
    }
}

/// JUMP - Alter the program counter
///
/// The program counter is set to the JUMPDEST itself; the dispatch loop then advances past it.
pub fn jump(state: &mut ExecutionState) -> Result<(), Fault> {
    let target = state.stack.pop()?;
    state.program_counter = jump_target(state, target)?;
    Ok(())
}

/// JUMPI - Conditionally alter the program counter. Pops the target, then the condition.
pub fn jumpi(state: &mut ExecutionState) -> Result<(), Fault> {
    state.stack.require(2)?;
    let target = state.stack.pop()?;
    let condition = state.stack.pop()?;

    if !condition.is_zero() {
        state.program_counter = jump_target(state, target)?;
    }
    Ok(())
}

/// JUMPDEST - Mark a valid destination for jumps (no-op)
pub fn jumpdest() -> Result<(), Fault> {
    Ok(())
}

/// PC - Get the offset of this instruction
pub fn pc(state: &mut ExecutionState) -> Result<(), Fault> {
    let pc = Word::from(state.program_counter);
    state.stack.push(pc)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::core::vm::Limits;

    fn new_state(code: &'static [u8], items: &[u64]) -> ExecutionState {
        let mut state = ExecutionState::new(Bytes::from_static(code), &Limits::default());
        for item in items {
            state.stack.push(Word::from(*item)).expect("push");
        }
        state
    }

    #[test]
    fn test_jump_to_jumpdest() {
        let mut state = new_state(&[0x60, 0x03, 0x56, 0x5b], &[3]);
        jump(&mut state).expect("jump");
        assert_eq!(state.program_counter, 3);
    }

    #[test]
    fn test_jump_to_non_jumpdest() {
        let mut state = new_state(&[0x60, 0x01, 0x56], &[1]);
        assert_eq!(jump(&mut state), Err(Fault::InvalidJump));
    }

    #[test]
    fn test_jump_out_of_bounds() {
        let mut state = new_state(&[0x56], &[1]);
        assert_eq!(jump(&mut state), Err(Fault::InvalidJump));

        let mut state = new_state(&[0x56], &[]);
        state.stack.push(Word::MAX).expect("push");
        assert_eq!(jump(&mut state), Err(Fault::InvalidJump));
    }

    #[test]
    fn test_jump_into_push_immediate_that_looks_like_jumpdest() {
        // 0x5b at offset 1 is PUSH1's immediate, but only the byte value is checked
        let mut state = new_state(&[0x60, 0x5b, 0x56], &[1]);
        assert!(jump(&mut state).is_ok());
        assert_eq!(state.program_counter, 1);
    }

    #[test]
    fn test_jumpi() {
        let mut state = new_state(&[0x57, 0x5b], &[0, 1]);
        jumpi(&mut state).expect("jumpi");
        assert_eq!(state.program_counter, 0);
        assert!(state.stack.is_empty());

        let mut state = new_state(&[0x57, 0x5b], &[1, 1]);
        jumpi(&mut state).expect("jumpi");
        assert_eq!(state.program_counter, 1);

        let mut state = new_state(&[0x57, 0x5b], &[1, 0]);
        assert_eq!(jumpi(&mut state), Err(Fault::InvalidJump));
    }

    #[test]
    fn test_pc() {
        let mut state = new_state(&[0x5b, 0x58], &[]);
        state.program_counter = 1;
        pc(&mut state).expect("pc");
        assert_eq!(state.stack.peek(0), Ok(Word::from(1)));
    }
}
