//! Fetch-dispatch-advance loop.

use std::io::{Read, Write};

use tapeworm_common::Symbol;
use tracing::{debug, trace};

use crate::error::RunError;
use crate::machine::{Halt, Machine};

impl<'a> Machine<'a> {
    /// Execute until the instruction pointer passes the end of the program.
    ///
    /// Output is flushed before returning, on success and on error.
    pub fn run<R: Read, W: Write>(&mut self, mut input: R, mut output: W) -> Result<Halt, RunError> {
        let result = self.run_to_end(&mut input, &mut output);
        let flushed = self.flush_output(&mut output);
        let halt = result?;
        flushed?;

        debug!(
            steps = halt.steps,
            open_loops = halt.open_loops,
            "program halted"
        );
        Ok(halt)
    }

    fn run_to_end<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Halt, RunError> {
        while self.step(input, output)? {}
        Ok(self.halt())
    }

    /// Execute one symbol. Returns `false` once the program has ended.
    pub fn step<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<bool, RunError> {
        let at = self.ip;
        let symbol = self.program.instruction_at(at);
        if symbol == Symbol::End {
            return Ok(false);
        }
        if symbol.is_instruction() {
            self.count_step()?;
        }

        match symbol {
            Symbol::MoveRight => self.tape.move_right(at)?,
            Symbol::MoveLeft => self.tape.move_left(at)?,
            Symbol::Increment => self.tape.increment(),
            Symbol::Decrement => self.tape.decrement(),
            Symbol::Output => self.write_output(output)?,
            Symbol::Input => {
                // A prompt written before a blocking read must be visible.
                self.flush_output(output)?;
                self.read_input(input)?;
            }
            Symbol::LoopEnter => {
                if self.tape.get() == 0 {
                    self.ip = self.program.match_of(at) + 1;
                    return Ok(true);
                }
                self.jump_stack.push(at);
            }
            Symbol::LoopExit => {
                if self.tape.get() != 0 {
                    let enter = *self
                        .jump_stack
                        .last()
                        .expect("loop exit reached with an empty jump stack");
                    debug_assert_eq!(enter, self.program.match_of(at));
                    trace!(from = at, to = enter + 1, "loop repeat");
                    self.ip = enter + 1;
                    return Ok(true);
                }
                self.jump_stack
                    .pop()
                    .expect("loop exit reached with an empty jump stack");
            }
            Symbol::Inert | Symbol::End => {}
        }

        self.ip += 1;
        Ok(true)
    }
}
