//! Benchmark for the dispatch loop: a 256-iteration shift loop that stores to memory each pass.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use evmi_common::utils::strings::decode_hex;
use evmi_vm::{Limits, VM};

/// PUSH32 0xff..ff, then until the value is zero: shift it right by one and MSTORE it at 0.
fn shift_loop() -> String {
    format!("7f{}5b60011c8060005280602157", "ff".repeat(32))
}

fn test_memory_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("evmi_vm");
    let bytecode = decode_hex(&shift_loop()).expect("invalid bytecode");

    group.sample_size(500);
    group.bench_function(BenchmarkId::from_parameter("memory_loop"), |b| {
        b.iter(|| {
            let mut vm = VM::new(bytecode.clone(), Limits::default());
            let result = vm.execute();
            assert!(result.is_success());
            result
        });
    });

    group.finish();
}

criterion_group!(benches, test_memory_loop);
criterion_main!(benches);
