//! The `evmi` command-line interface.

pub(crate) mod args;
pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use std::process::ExitCode;

use args::{Arguments, DisassembleArgs, RunArgs, Subcommands};
use clap::Parser;
use error::Error;
use evmi_common::{bytecode::load_bytecode, utils::io::file::write_file};
use evmi_config::{config, Configuration};
use evmi_vm::{ext::disassemble, StackDump, TracingObserver, VM};
use output::{exit_status, format_result};
use tracing::{info, warn};

fn main() -> Result<ExitCode, Error> {
    let args = Arguments::parse();

    // setup logging
    let _ = args.logs.init_tracing();

    match args.sub {
        Subcommands::Run(cmd) => return run(cmd),
        Subcommands::Disassemble(cmd) => disassemble_target(cmd)?,
        Subcommands::Config(cmd) => config(cmd)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn run(cmd: RunArgs) -> Result<ExitCode, Error> {
    let configuration = Configuration::load().unwrap_or_else(|e| {
        warn!("failed to load configuration, using defaults: {e}");
        Configuration::default()
    });

    let bytecode = load_bytecode(&cmd.target)
        .map_err(|e| Error::Generic(format!("no bytecode available: {e}")))?;
    info!("loaded {} bytes of bytecode", bytecode.len());

    let mut vm = VM::new(bytecode, cmd.limits(&configuration));
    if cmd.trace(&configuration) {
        let mut dump = StackDump::new(std::io::stdout());
        if let Some(window) = cmd.memory_window() {
            dump = dump.with_memory(window);
        }
        vm.set_observer(Some(Box::new(dump)));
    } else if TracingObserver::is_enabled() {
        vm.set_observer(Some(Box::new(TracingObserver)));
    }

    let result = vm.execute();
    print!("{}", format_result(&result));

    // an abort was already reported on the outcome line
    Ok(ExitCode::from(exit_status(&result)))
}

fn disassemble_target(cmd: DisassembleArgs) -> Result<(), Error> {
    let bytecode = load_bytecode(&cmd.target)
        .map_err(|e| Error::Generic(format!("no bytecode available: {e}")))?;
    let assembly = disassemble(&bytecode);

    if cmd.output == "print" {
        print!("{assembly}");
    } else {
        write_file(&cmd.output, &assembly)
            .map_err(|e| Error::Generic(format!("failed to write assembly: {e}")))?;
        info!("wrote assembly to '{}'", cmd.output);
    }

    Ok(())
}
