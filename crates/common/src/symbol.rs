//! Instruction symbols of the tape language.
//!
//! Eight bytes carry meaning: `>` `<` `+` `-` `.` `,` `[` `]`. Every other
//! byte in a source file is inert and only occupies a position.

/// One position of a loaded program, as seen by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `>`: move the tape pointer one cell to the right.
    MoveRight,
    /// `<`: move the tape pointer one cell to the left.
    MoveLeft,
    /// `+`: increment the current cell.
    Increment,
    /// `-`: decrement the current cell.
    Decrement,
    /// `.`: write the current cell to the output.
    Output,
    /// `,`: read one byte of input into the current cell.
    Input,
    /// `[`: enter the loop body if the current cell is nonzero.
    LoopEnter,
    /// `]`: repeat the loop body if the current cell is nonzero.
    LoopExit,
    /// Any other byte. Consumes a position, never dispatched.
    Inert,
    /// Sentinel returned for positions at or past the end of the program.
    End,
}

/// The eight dispatchable symbols, in source-alphabet order.
pub const ALL_INSTRUCTIONS: [Symbol; 8] = [
    Symbol::MoveRight,
    Symbol::MoveLeft,
    Symbol::Increment,
    Symbol::Decrement,
    Symbol::Output,
    Symbol::Input,
    Symbol::LoopEnter,
    Symbol::LoopExit,
];

impl Symbol {
    /// Classify a source byte. Total: unknown bytes are [`Symbol::Inert`].
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            b'>' => Symbol::MoveRight,
            b'<' => Symbol::MoveLeft,
            b'+' => Symbol::Increment,
            b'-' => Symbol::Decrement,
            b'.' => Symbol::Output,
            b',' => Symbol::Input,
            b'[' => Symbol::LoopEnter,
            b']' => Symbol::LoopExit,
            _ => Symbol::Inert,
        }
    }

    /// The source character for an instruction symbol.
    pub const fn to_byte(self) -> Option<u8> {
        match self {
            Symbol::MoveRight => Some(b'>'),
            Symbol::MoveLeft => Some(b'<'),
            Symbol::Increment => Some(b'+'),
            Symbol::Decrement => Some(b'-'),
            Symbol::Output => Some(b'.'),
            Symbol::Input => Some(b','),
            Symbol::LoopEnter => Some(b'['),
            Symbol::LoopExit => Some(b']'),
            Symbol::Inert | Symbol::End => None,
        }
    }

    /// True for the eight dispatchable symbols.
    pub const fn is_instruction(self) -> bool {
        !matches!(self, Symbol::Inert | Symbol::End)
    }

    /// True for `[` and `]`.
    pub const fn is_bracket(self) -> bool {
        matches!(self, Symbol::LoopEnter | Symbol::LoopExit)
    }
}
