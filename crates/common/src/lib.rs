//! tapeworm common types: the program store.
//!
//! This crate provides the load-time half of the interpreter:
//!
//! - [`Symbol`] — the eight instruction symbols plus inert and end markers
//! - [`Program`] — immutable source bytes with a precomputed bracket match table
//! - [`LoadError`] — unbalanced brackets and unreadable sources
//!
//! # Usage
//!
//! ```
//! use tapeworm_common::{Program, Symbol};
//!
//! let program = Program::load("+[->+<]").unwrap();
//! assert_eq!(program.instruction_at(1), Symbol::LoopEnter);
//! assert_eq!(program.match_of(1), 6);
//! ```

pub mod error;
pub mod program;
pub mod symbol;

// Re-export commonly used types at the crate root.
pub use error::LoadError;
pub use program::Program;
pub use symbol::{Symbol, ALL_INSTRUCTIONS};
