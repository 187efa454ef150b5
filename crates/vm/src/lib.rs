//! tapeworm virtual machine — executes loaded tape programs.
//!
//! The VM interprets the program source directly:
//! - A fixed-size tape of wrapping unsigned cells
//! - An instruction pointer into the program source
//! - A jump stack holding the `[` position of every loop being executed
//!
//! Loop entry with a zero cell jumps through the program's precomputed
//! match table; loop repetition returns to the top of the jump stack.
//! Neither rescans the source.
//!
//! # Usage
//!
//! ```
//! use tapeworm_common::Program;
//! use tapeworm_vm::{run, Config};
//!
//! let program = Program::load("++++++++[>++++++++<-]>+.").unwrap();
//! let mut output = Vec::new();
//!
//! run(&program, &Config::default(), &b""[..], &mut output).unwrap();
//! assert_eq!(output, b"A");
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod machine;
pub mod tape;

pub use config::{Config, EofPolicy, DEFAULT_TAPE_SIZE};
pub use error::RunError;
pub use machine::{Halt, Machine};
pub use tape::{CellWidth, PointerPolicy, Tape};

use std::io::{Read, Write};

use tapeworm_common::Program;

/// Execute a program on a fresh tape.
///
/// Reads input bytes from `input` and writes output bytes to `output`,
/// which is flushed before returning.
///
/// # Errors
///
/// Returns [`RunError`] if the configuration is unusable, the tape pointer
/// leaves the tape under [`PointerPolicy::Fault`], the step limit is hit,
/// or an I/O collaborator fails.
pub fn run<R: Read, W: Write>(
    program: &Program,
    config: &Config,
    input: R,
    output: W,
) -> Result<Halt, RunError> {
    let mut vm = Machine::new(program, config)?;
    vm.run(input, output)
}
