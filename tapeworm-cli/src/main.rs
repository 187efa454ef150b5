//! tapeworm CLI — load a tape program and run it against stdin/stdout.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage error, unreadable source, unbalanced brackets, tape allocation failure
//! - 3: Runtime error (pointer fault, step limit, I/O failure). An extension
//!   to the 0/1 exit contract, listed in `--help` as well.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tapeworm_vm::{CellWidth, EofPolicy, DEFAULT_TAPE_SIZE};
use tracing_subscriber::EnvFilter;

const EXIT_CODES: &str = "\
Exit codes:
  0  program ran to the end
  1  usage error, unreadable source, unbalanced brackets, tape allocation failure
  3  runtime error: tape pointer fault, step limit, I/O failure
     (extension: a run that started and then failed)";

#[derive(Parser, Debug)]
#[command(
    name = "tapeworm",
    version,
    about = "Run programs written in the 8-instruction tape language",
    after_help = EXIT_CODES
)]
pub struct Cli {
    /// Path to the program source.
    pub source: PathBuf,

    /// Number of tape cells.
    #[arg(long, default_value_t = DEFAULT_TAPE_SIZE, value_parser = parse_tape_size)]
    pub tape_size: usize,

    /// Cell width in bits (8, 16 or 32).
    #[arg(long = "cell-bits", default_value = "8", value_parser = parse_cell_width)]
    pub cell_width: CellWidth,

    /// What `,` stores once input is exhausted.
    #[arg(long, value_enum, default_value_t = EofArg::Zero)]
    pub eof: EofArg,

    /// Fail when the tape pointer leaves the tape instead of wrapping.
    #[arg(long)]
    pub strict_tape: bool,

    /// Abort after executing this many instructions.
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// After the run, print the first N cells to stderr.
    #[arg(long, value_name = "N")]
    pub dump_tape: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EofArg {
    /// Store 0.
    Zero,
    /// Store the largest cell value (255 for 8-bit cells).
    Max,
    /// Leave the cell unchanged.
    Unchanged,
}

impl From<EofArg> for EofPolicy {
    fn from(arg: EofArg) -> Self {
        match arg {
            EofArg::Zero => EofPolicy::Zero,
            EofArg::Max => EofPolicy::Max,
            EofArg::Unchanged => EofPolicy::Unchanged,
        }
    }
}

fn parse_tape_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("invalid tape size '{s}': {e}"))?;
    if size == 0 {
        return Err("tape size must be at least 1".to_string());
    }
    Ok(size)
}

fn parse_cell_width(s: &str) -> Result<CellWidth, String> {
    s.parse::<u32>()
        .ok()
        .and_then(CellWidth::from_bits)
        .ok_or_else(|| format!("invalid cell width '{s}', expected 8, 16 or 32"))
}

/// Initialize logging to stderr.
///
/// `RUST_LOG` overrides the default filter of `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; everything else is a usage error.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    if let Err(code) = commands::run(&cli) {
        process::exit(code);
    }
}
