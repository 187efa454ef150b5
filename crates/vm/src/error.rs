//! Runtime errors for the tapeworm VM.
//!
//! Every runtime error is fatal. Output written before the error has
//! already reached the sink.

use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// The tape pointer left the tape under the faulting pointer policy.
    #[error("tape pointer moved off the tape (from cell {pointer}) at instruction {at}")]
    TapeOutOfBounds { at: usize, pointer: usize },

    /// More instructions were executed than the configured limit allows.
    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },

    /// The input collaborator failed.
    #[error("input error at instruction {at}: {reason}")]
    Input { at: usize, reason: String },

    /// The output collaborator failed.
    #[error("output error at instruction {at}: {reason}")]
    Output { at: usize, reason: String },

    /// The tape could not be allocated.
    #[error("cannot allocate a tape of {cells} cells")]
    Allocation { cells: usize },

    /// The machine configuration cannot be used.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}
