//! The program store: loaded source bytes plus the bracket match table.
//!
//! Every source byte is preserved, including inert ones, so positions in
//! the match table are byte offsets into the original text. The table is
//! built once by a single scan with an auxiliary stack and never changes.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::LoadError;
use crate::symbol::Symbol;

/// Marker for positions that hold no bracket.
const NO_MATCH: usize = usize::MAX;

/// An immutable, loaded program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    source: Vec<u8>,
    /// `matches[i]` is the partner of the bracket at `i`, or [`NO_MATCH`].
    matches: Vec<usize>,
    instruction_count: usize,
    loop_count: usize,
    max_loop_depth: usize,
}

/// Result of one pass over the source.
struct Scan {
    matches: Vec<usize>,
    /// Offsets of `]` with nothing open, in position order.
    stray_exits: Vec<usize>,
    /// Offsets of `[` still open at end of input, outermost first.
    unclosed_enters: Vec<usize>,
    instruction_count: usize,
    loop_count: usize,
    max_loop_depth: usize,
}

fn scan(source: &[u8]) -> Scan {
    let mut matches = vec![NO_MATCH; source.len()];
    let mut open = Vec::new();
    let mut stray_exits = Vec::new();
    let mut instruction_count = 0;
    let mut loop_count = 0;
    let mut max_loop_depth = 0;

    for (i, &byte) in source.iter().enumerate() {
        let symbol = Symbol::from_byte(byte);
        if symbol.is_instruction() {
            instruction_count += 1;
        }
        match symbol {
            Symbol::LoopEnter => {
                open.push(i);
                max_loop_depth = max_loop_depth.max(open.len());
            }
            Symbol::LoopExit => match open.pop() {
                Some(enter) => {
                    matches[enter] = i;
                    matches[i] = enter;
                    loop_count += 1;
                }
                None => stray_exits.push(i),
            },
            _ => {}
        }
    }

    Scan {
        matches,
        stray_exits,
        unclosed_enters: open,
        instruction_count,
        loop_count,
        max_loop_depth,
    }
}

/// 1-based line and column of a byte offset.
fn location(source: &[u8], index: usize) -> (usize, usize) {
    let prefix = &source[..index.min(source.len())];
    let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
    let column = match prefix.iter().rposition(|&b| b == b'\n') {
        Some(newline) => index - newline,
        None => index + 1,
    };
    (line, column)
}

fn unbalanced(source: &[u8], at: usize, bracket: char) -> LoadError {
    let (line, column) = location(source, at);
    LoadError::UnbalancedLoop {
        at,
        line,
        column,
        bracket,
    }
}

impl Program {
    /// Load a program from raw source bytes.
    ///
    /// Fails with [`LoadError::UnbalancedLoop`] naming the first bracket
    /// fault in position order.
    pub fn load(source: impl Into<Vec<u8>>) -> Result<Self, LoadError> {
        let source = source.into();
        let scan = scan(&source);

        let first_fault = match (scan.stray_exits.first(), scan.unclosed_enters.first()) {
            (Some(&exit), Some(&enter)) if enter < exit => Some((enter, '[')),
            (Some(&exit), _) => Some((exit, ']')),
            (None, Some(&enter)) => Some((enter, '[')),
            (None, None) => None,
        };
        if let Some((at, bracket)) = first_fault {
            return Err(unbalanced(&source, at, bracket));
        }

        debug!(
            bytes = source.len(),
            instructions = scan.instruction_count,
            loops = scan.loop_count,
            max_loop_depth = scan.max_loop_depth,
            "program loaded"
        );

        Ok(Self {
            source,
            matches: scan.matches,
            instruction_count: scan.instruction_count,
            loop_count: scan.loop_count,
            max_loop_depth: scan.max_loop_depth,
        })
    }

    /// Read a source file and load it.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = fs::read(path).map_err(|e| LoadError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::load(source)
    }

    /// Report every bracket fault in the source, in position order.
    ///
    /// Returns an empty vector for balanced source. [`Program::load`]
    /// fails with the first element of this list.
    pub fn check_brackets(source: &[u8]) -> Vec<LoadError> {
        let scan = scan(source);
        let mut faults: Vec<(usize, char)> = scan
            .stray_exits
            .iter()
            .map(|&at| (at, ']'))
            .chain(scan.unclosed_enters.iter().map(|&at| (at, '[')))
            .collect();
        faults.sort_unstable_by_key(|&(at, _)| at);
        faults
            .into_iter()
            .map(|(at, bracket)| unbalanced(source, at, bracket))
            .collect()
    }

    /// The symbol at `index`, or [`Symbol::End`] at or past the end.
    #[inline]
    pub fn instruction_at(&self, index: usize) -> Symbol {
        match self.source.get(index) {
            Some(&byte) => Symbol::from_byte(byte),
            None => Symbol::End,
        }
    }

    /// Position of the bracket matching the one at `index`.
    ///
    /// Only meaningful for positions holding `[` or `]`.
    #[inline]
    pub fn match_of(&self, index: usize) -> usize {
        let partner = self.matches[index];
        debug_assert_ne!(partner, NO_MATCH, "match_of({index}) on a non-bracket");
        partner
    }

    /// Number of positions, inert bytes included.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Returns true if the source is empty.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// The loaded source bytes.
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Number of dispatchable symbols, inert bytes excluded.
    pub fn instruction_count(&self) -> usize {
        self.instruction_count
    }

    /// Number of matched `[`/`]` pairs.
    pub fn loop_count(&self) -> usize {
        self.loop_count
    }

    /// Deepest loop nesting in the source.
    pub fn max_loop_depth(&self) -> usize {
        self.max_loop_depth
    }

    /// 1-based (line, column) of a byte offset.
    pub fn location_of(&self, index: usize) -> (usize, usize) {
        location(&self.source, index)
    }
}

impl FromStr for Program {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::load(s)
    }
}
