use evmi_common::utils::strings::decode_hex;
use evmi_vm::{
    core::{opcodes, stack::STACK_LIMIT},
    Abort, ExecutionResult, Fault, Limits, Status, Word, VM,
};

fn run(code: &str) -> ExecutionResult {
    run_with(code, Limits::default())
}

fn run_with(code: &str, limits: Limits) -> ExecutionResult {
    VM::new(decode_hex(code).expect("failed to decode hex"), limits).execute()
}

fn abort(result: &ExecutionResult) -> Abort {
    *result.abort().expect("execution should abort")
}

#[test]
fn test_push1() {
    let result = run("60ff");
    assert_eq!(result.status, Status::Halted);
    assert_eq!(result.stack.size(), 1);
    assert_eq!(result.stack.peek(0), Ok(Word::from(255)));
}

#[test]
fn test_push2_is_big_endian() {
    let result = run("610102");
    assert!(result.is_success());
    assert_eq!(result.stack.peek(0), Ok(Word::from(258)));
    assert_eq!(result.program_counter, 3);
}

#[test]
fn test_push32() {
    let result = run(&format!("7f{}", "ff".repeat(32)));
    assert!(result.is_success());
    assert_eq!(result.stack.peek(0), Ok(Word::MAX));
}

#[test]
fn test_truncated_push_is_zero_padded() {
    let result = run("6201");
    assert!(result.is_success());
    assert_eq!(result.stack.peek(0), Ok(Word::from(0x010000)));
}

#[test]
fn test_stack_limit() {
    let full = run(&"5f".repeat(STACK_LIMIT));
    assert!(full.is_success());
    assert_eq!(full.stack.size(), STACK_LIMIT);

    let overflow = run(&"5f".repeat(STACK_LIMIT + 1));
    assert_eq!(
        abort(&overflow),
        Abort { fault: Fault::StackOverflow, opcode: opcodes::PUSH0, pc: STACK_LIMIT }
    );
    assert_eq!(overflow.stack.size(), STACK_LIMIT);
    assert_eq!(overflow.steps, STACK_LIMIT as u64);
}

#[test]
fn test_underflow_leaves_stack_untouched() {
    // one item on the stack, then an instruction that needs two
    for (code, opcode) in [
        ("600190", opcodes::SWAP1),
        ("60011b", opcodes::SHL),
        ("600152", opcodes::MSTORE),
        ("600157", opcodes::JUMPI),
    ] {
        let result = run(code);
        assert_eq!(abort(&result), Abort { fault: Fault::StackUnderflow, opcode, pc: 2 });
        assert_eq!(result.stack.peek_n(2), vec![Word::from(1)], "{code}");
    }

    let result = run("56");
    assert_eq!(
        abort(&result),
        Abort { fault: Fault::StackUnderflow, opcode: opcodes::JUMP, pc: 0 }
    );
}

#[test]
fn test_mstore_then_mload() {
    let result = run("600a600052600051");
    assert_eq!(result.status, Status::Halted);
    assert_eq!(result.stack.size(), 1);
    assert_eq!(result.stack.peek(0), Ok(Word::from(10)));
    assert_eq!(result.memory.size(), 32);
}

#[test]
fn test_mstore_at_unaligned_offset() {
    // PUSH2 0xbeef PUSH1 0x05 MSTORE PUSH1 0x05 MLOAD
    let result = run("61beef600552600551");
    assert!(result.is_success());
    assert_eq!(result.stack.peek(0), Ok(Word::from(0xbeef)));
    assert_eq!(result.memory.size(), 64);
}

#[test]
fn test_mload_untouched_memory_is_zero() {
    let result = run("61100051");
    assert!(result.is_success());
    assert_eq!(result.stack.peek(0), Ok(Word::ZERO));
    assert_eq!(result.memory.size(), 0x1020);
}

#[test]
fn test_shl() {
    assert_eq!(run("600160041b").stack.peek(0), Ok(Word::from(16)));
    assert_eq!(run("600560001b").stack.peek(0), Ok(Word::from(5)));
    assert_eq!(run("60016101001b").stack.peek(0), Ok(Word::ZERO));

    // bits shifted out of the top are lost
    let result = run(&format!("7f{}60ff1b", "ff".repeat(32)));
    assert_eq!(result.stack.peek(0), Ok(Word::from(1) << 255usize));
}

#[test]
fn test_jump() {
    // PUSH1 0x04 JUMP INVALID JUMPDEST PUSH1 0x2a
    let result = run("600456fe5b602a");
    assert!(result.is_success());
    assert_eq!(result.stack.peek_n(2), vec![Word::from(0x2a)]);
}

#[test]
fn test_jump_to_non_jumpdest() {
    let result = run("6003565f");
    assert_eq!(
        abort(&result),
        Abort { fault: Fault::InvalidJump, opcode: opcodes::JUMP, pc: 2 }
    );
    assert!(result.stack.is_empty());
    assert_eq!(result.program_counter, 2);
}

#[test]
fn test_jump_out_of_range() {
    let result = run("60ff56");
    assert_eq!(abort(&result).fault, Fault::InvalidJump);

    let result = run(&format!("7f{}56", "ff".repeat(32)));
    assert_eq!(abort(&result).fault, Fault::InvalidJump);
}

#[test]
fn test_unrecognized_opcode() {
    let result = run("00");
    assert_eq!(
        abort(&result),
        Abort { fault: Fault::UnrecognizedOpcode, opcode: 0x00, pc: 0 }
    );
    assert_eq!(result.steps, 0);

    let result = run("6001fe");
    assert_eq!(
        abort(&result),
        Abort { fault: Fault::UnrecognizedOpcode, opcode: 0xfe, pc: 2 }
    );
    assert_eq!(result.stack.size(), 1);
}

#[test]
fn test_check_reports_abort() {
    assert!(run("6001").check().is_ok());

    let error = run("00").check().expect_err("should abort");
    assert_eq!(
        error.to_string(),
        "execution aborted: unrecognized opcode at pc 0 (unknown 0x00)"
    );
}

#[test]
fn test_empty_bytecode() {
    let result = run("");
    assert!(result.is_success());
    assert!(result.stack.is_empty());
    assert_eq!(result.steps, 0);
}

#[test]
fn test_shift_loop() {
    let code = format!("7f{}5b60011c8060005280602157", "ff".repeat(32));
    let result = run(&code);
    assert!(result.is_success());
    assert_eq!(result.stack.peek_n(2), vec![Word::ZERO]);
    assert_eq!(result.steps, 1 + 9 + 255 * 8);
    assert_eq!(result.memory.size(), 32);
}

#[test]
fn test_dup_swap_pop() {
    // PUSH1 1 PUSH1 2 PUSH1 3 SWAP2 DUP1 POP
    let result = run("600160026003918050");
    assert!(result.is_success());
    assert_eq!(result.stack.peek_n(4), vec![Word::from(1), Word::from(2), Word::from(3)]);
}

#[test]
fn test_pc_and_msize() {
    // PC MSIZE PUSH1 1 PUSH1 0x20 MSTORE8 MSIZE
    let result = run("5859600160205359");
    assert!(result.is_success());
    assert_eq!(
        result.stack.peek_n(3),
        vec![Word::from(64), Word::ZERO, Word::ZERO]
    );
}

#[test]
fn test_step_limit() {
    let code = format!("7f{}5b60011c8060005280602157", "ff".repeat(32));
    let result = run_with(&code, Limits::default().with_step_limit(10));
    assert_eq!(abort(&result).fault, Fault::StepLimitExceeded);
    assert_eq!(result.steps, 10);

    assert!(run_with("6001", Limits::default().with_step_limit(1)).is_success());
    assert_eq!(
        abort(&run_with("6001", Limits::default().with_step_limit(0))).fault,
        Fault::StepLimitExceeded
    );
}

#[test]
fn test_gas_limit() {
    // PUSH1 PUSH1 MSTORE costs 3 + 3 + 3 + 3 for the first word of memory
    assert!(run_with("600a600052", Limits::default().with_gas_limit(12)).is_success());

    let result = run_with("600a600052", Limits::default().with_gas_limit(11));
    assert_eq!(
        abort(&result),
        Abort { fault: Fault::GasExceeded, opcode: opcodes::MSTORE, pc: 4 }
    );
    assert_eq!(result.memory.size(), 0);
}

#[test]
fn test_memory_limit() {
    let limits = Limits::default().with_memory_limit(1024);
    assert!(run_with("60016103e052", limits).is_success());

    let result = run_with("60016103e152", limits);
    assert_eq!(abort(&result).fault, Fault::MemoryLimitExceeded);
    assert_eq!(result.memory.size(), 0);
}

#[test]
fn test_load_resets_state() {
    let mut vm = VM::new(decode_hex("00").expect("failed to decode hex"), Limits::default());
    assert!(!vm.execute().is_success());

    vm.load(decode_hex("6007").expect("failed to decode hex"));
    assert_eq!(vm.status(), Status::Running);
    let result = vm.execute();
    assert!(result.is_success());
    assert_eq!(result.stack.peek_n(2), vec![Word::from(7)]);
    assert_eq!(result.steps, 1);
    assert_eq!(result.gas_used, 3);
}
