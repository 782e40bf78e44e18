use clap::{Parser, Subcommand};
use evmi_config::{ConfigArgs, Configuration};
use evmi_vm::{Limits, DEFAULT_MEMORY_WINDOW};

use crate::log_args::LogArgs;

#[derive(Debug, Parser)]
#[clap(name = "evmi", version)]
pub(crate) struct Arguments {
    #[clap(subcommand)]
    pub(crate) sub: Subcommands,

    #[clap(flatten)]
    pub(crate) logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(about = "evmi is a small, deterministic EVM bytecode interpreter.")]
pub(crate) enum Subcommands {
    #[clap(name = "run", about = "Execute bytecode and print the final stack")]
    Run(RunArgs),

    #[clap(name = "disassemble", about = "Disassemble EVM bytecode to assembly")]
    Disassemble(DisassembleArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),
}

/// Arguments for `evmi run`.
#[derive(Debug, Clone, Parser)]
#[clap(override_usage = "evmi run <TARGET> [OPTIONS]")]
pub(crate) struct RunArgs {
    /// The target to execute, either a file containing hex bytecode or inline hex.
    #[clap(required = true)]
    pub(crate) target: String,

    /// Dump the stack after every instruction.
    #[clap(long, short)]
    pub(crate) trace: bool,

    /// Dump the first bytes of memory along with the stack. Implies --trace.
    #[clap(long, short)]
    pub(crate) memory: bool,

    /// Abort once this much gas has been used.
    #[clap(long = "gas-limit", value_name = "GAS")]
    pub(crate) gas_limit: Option<u64>,

    /// Abort after this many instructions.
    #[clap(long = "step-limit", value_name = "STEPS")]
    pub(crate) step_limit: Option<u64>,

    /// The maximum memory size in bytes.
    #[clap(long = "memory-limit", value_name = "BYTES")]
    pub(crate) memory_limit: Option<usize>,
}

impl RunArgs {
    /// The limits for this run: the configured limits, overridden by any flags given.
    pub(crate) fn limits(&self, configuration: &Configuration) -> Limits {
        let mut limits = configuration.limits();
        if let Some(gas_limit) = self.gas_limit {
            limits.gas_limit = Some(gas_limit);
        }
        if let Some(step_limit) = self.step_limit {
            limits.step_limit = Some(step_limit);
        }
        if let Some(memory_limit) = self.memory_limit {
            limits.memory_limit = memory_limit;
        }
        limits
    }

    /// Whether to dump the stack after every instruction.
    pub(crate) fn trace(&self, configuration: &Configuration) -> bool {
        self.trace || self.memory || configuration.trace
    }

    /// How many bytes of memory to dump after every instruction, if any.
    pub(crate) fn memory_window(&self) -> Option<usize> {
        self.memory.then_some(DEFAULT_MEMORY_WINDOW)
    }
}

/// Arguments for `evmi disassemble`.
#[derive(Debug, Clone, Parser)]
#[clap(override_usage = "evmi disassemble <TARGET> [OPTIONS]")]
pub(crate) struct DisassembleArgs {
    /// The target to disassemble, either a file containing hex bytecode or inline hex.
    #[clap(required = true)]
    pub(crate) target: String,

    /// The file to write the assembly to, or 'print' to print to the console.
    #[clap(long = "output", short = 'o', default_value = "print", hide_default_value = true)]
    pub(crate) output: String,
}
