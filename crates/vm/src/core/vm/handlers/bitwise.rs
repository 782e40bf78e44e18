use crate::{core::word::WordExt, error::Fault};

use super::super::execution::ExecutionState;

/// SHL - Shift left. Pops the shift, then the value.
pub fn shl(state: &mut ExecutionState) -> Result<(), Fault> {
    state.stack.require(2)?;
    let shift = state.stack.pop()?;
    let value = state.stack.pop()?;
    state.stack.push(value.wrapping_shl_word(shift))
}

/// SHR - Logical shift right. Pops the shift, then the value.
pub fn shr(state: &mut ExecutionState) -> Result<(), Fault> {
    state.stack.require(2)?;
    let shift = state.stack.pop()?;
    let value = state.stack.pop()?;
    state.stack.push(value.wrapping_shr_word(shift))
}
