//! VM state: tape, instruction pointer, jump stack, step counter.

use std::io::{ErrorKind, Read, Write};

use tapeworm_common::{Program, Symbol};

use crate::config::{Config, EofPolicy};
use crate::error::RunError;
use crate::tape::Tape;

/// Summary of a run that reached the end of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt {
    /// Instructions executed, inert bytes excluded.
    pub steps: u64,
    /// Loops still open when the instruction pointer ran off the end.
    /// Always zero for programs built by [`Program::load`].
    pub open_loops: usize,
}

/// The tapeworm virtual machine.
///
/// Borrows its program read-only, so several machines can run
/// independent tapes against one loaded program.
pub struct Machine<'a> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    pub(crate) tape: Tape,
    /// Instruction pointer (byte offset into the program source).
    pub(crate) ip: usize,
    /// Positions of the `[` of every loop whose body is executing.
    pub(crate) jump_stack: Vec<usize>,
    pub(crate) steps: u64,
    pub(crate) eof_policy: EofPolicy,
    pub(crate) step_limit: Option<u64>,
}

impl<'a> Machine<'a> {
    /// Create a machine with a zeroed tape, positioned at instruction 0.
    pub fn new(program: &'a Program, config: &Config) -> Result<Self, RunError> {
        config.validate()?;
        Ok(Self {
            program,
            tape: Tape::new(config.tape_size, config.cell_width, config.pointer_policy)?,
            ip: 0,
            jump_stack: Vec::with_capacity(program.max_loop_depth()),
            steps: 0,
            eof_policy: config.eof_policy,
            step_limit: config.step_limit,
        })
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn instruction_pointer(&self) -> usize {
        self.ip
    }

    /// Number of loops whose body is currently executing.
    pub fn jump_depth(&self) -> usize {
        self.jump_stack.len()
    }

    /// Instructions executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// True once the instruction pointer has passed the last instruction.
    pub fn is_halted(&self) -> bool {
        self.program.instruction_at(self.ip) == Symbol::End
    }

    pub(crate) fn halt(&self) -> Halt {
        Halt {
            steps: self.steps,
            open_loops: self.jump_stack.len(),
        }
    }

    /// Charge one step against the configured limit.
    pub(crate) fn count_step(&mut self) -> Result<(), RunError> {
        if let Some(limit) = self.step_limit {
            if self.steps >= limit {
                return Err(RunError::StepLimitExceeded { limit });
            }
        }
        self.steps += 1;
        Ok(())
    }

    /// Read one byte into the current cell, applying the EOF policy.
    pub(crate) fn read_input<R: Read>(&mut self, input: &mut R) -> Result<(), RunError> {
        let mut buf = [0u8; 1];
        loop {
            match input.read(&mut buf) {
                Ok(0) => {
                    match self.eof_policy {
                        EofPolicy::Zero => self.tape.set(0),
                        EofPolicy::Max => self.tape.set(self.tape.width().max_value()),
                        EofPolicy::Unchanged => {}
                    }
                    return Ok(());
                }
                Ok(_) => {
                    self.tape.set(u32::from(buf[0]));
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(RunError::Input {
                        at: self.ip,
                        reason: e.to_string(),
                    })
                }
            }
        }
    }

    /// Write the low byte of the current cell.
    pub(crate) fn write_output<W: Write>(&self, output: &mut W) -> Result<(), RunError> {
        output
            .write_all(&[self.tape.get() as u8])
            .map_err(|e| RunError::Output {
                at: self.ip,
                reason: e.to_string(),
            })
    }

    pub(crate) fn flush_output<W: Write>(&self, output: &mut W) -> Result<(), RunError> {
        output.flush().map_err(|e| RunError::Output {
            at: self.ip,
            reason: e.to_string(),
        })
    }
}
