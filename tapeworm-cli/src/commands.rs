//! CLI command implementation.

use std::fs;
use std::io::{self, BufWriter};

use tapeworm_common::{LoadError, Program};
use tapeworm_vm::{Config, Machine, PointerPolicy};
use tracing::debug;

use crate::Cli;

/// Load the source file, then run it against stdin and stdout.
pub fn run(cli: &Cli) -> Result<(), i32> {
    let path = cli.source.display().to_string();

    let program = Program::load_file(&cli.source).map_err(|e| {
        report_load_error(cli, &path, &e);
        1
    })?;
    debug!(
        path = %path,
        instructions = program.instruction_count(),
        "loaded source"
    );

    let config = config_from(cli);
    let mut vm = Machine::new(&program, &config).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = vm.run(stdin.lock(), BufWriter::new(stdout.lock()));

    if let Some(count) = cli.dump_tape {
        dump_tape(&vm, count);
    }

    match result {
        Ok(halt) => {
            debug!(steps = halt.steps, "run complete");
            Ok(())
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(3)
        }
    }
}

/// Print a load failure. Bracket faults are listed in full.
fn report_load_error(cli: &Cli, path: &str, err: &LoadError) {
    if !matches!(err, LoadError::UnbalancedLoop { .. }) {
        eprintln!("error: {err}");
        return;
    }
    // Only the failure path rescans, to list every fault rather than the first.
    let mut faults = fs::read(&cli.source)
        .map(|source| Program::check_brackets(&source))
        .unwrap_or_default();
    if faults.is_empty() {
        faults.push(err.clone());
    }
    for e in &faults {
        eprintln!("error: {path}: {e}");
    }
}

fn config_from(cli: &Cli) -> Config {
    let mut config = Config::default()
        .with_tape_size(cli.tape_size)
        .with_cell_width(cli.cell_width)
        .with_eof_policy(cli.eof.into());
    if cli.strict_tape {
        config = config.with_pointer_policy(PointerPolicy::Fault);
    }
    if let Some(limit) = cli.max_steps {
        config = config.with_step_limit(limit);
    }
    config
}

/// Print the first `count` cells and the tape pointer to stderr.
fn dump_tape(vm: &Machine<'_>, count: usize) {
    let tape = vm.tape();
    let shown = count.min(tape.len());
    let cells: Vec<String> = tape.cells()[..shown].iter().map(u32::to_string).collect();
    eprintln!("tape[0..{shown}]: {}", cells.join(" "));
    eprintln!("pointer: {}", tape.pointer());
}
