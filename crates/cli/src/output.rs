use colored::Colorize;
use evmi_vm::{ExecutionResult, Status};

/// Renders the final stack, top first, and the outcome of a run.
pub(crate) fn format_result(result: &ExecutionResult) -> String {
    let mut output = format!("stack ({} items, top first):\n", result.stack.size());
    for (depth, word) in result.stack.render().iter().enumerate() {
        output.push_str(&format!("  {depth:>4}: {word}\n"));
    }

    let outcome = match &result.status {
        Status::Aborted(abort) => format!("aborted: {abort}").red().bold(),
        Status::Halted => "halted".green().bold(),
        Status::Running => "running".yellow().bold(),
    };
    output.push_str(&format!(
        "{outcome} after {} steps, {} gas used\n",
        result.steps, result.gas_used
    ));

    output
}

/// The process exit status for a run: 0 when it halted, 1 when it aborted.
pub(crate) fn exit_status(result: &ExecutionResult) -> u8 {
    if result.is_success() {
        0
    } else {
        1
    }
}
