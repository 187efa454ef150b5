//! Load errors for tapeworm source programs.
//!
//! Every load error is fatal: nothing executes once one is reported.

use thiserror::Error;

/// Errors that occur while loading a program into the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// A `[` with no matching `]`, or a `]` with no open `[`.
    ///
    /// `at` is the byte offset in the source; `line` and `column` are
    /// 1-based and count bytes.
    #[error("unbalanced '{bracket}' at position {at} (line {line}, column {column})")]
    UnbalancedLoop {
        at: usize,
        line: usize,
        column: usize,
        bracket: char,
    },

    /// The source could not be read.
    #[error("cannot read '{path}': {reason}")]
    Unreadable { path: String, reason: String },
}
