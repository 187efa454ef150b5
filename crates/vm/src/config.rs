//! Machine configuration.

use crate::error::RunError;
use crate::tape::{CellWidth, PointerPolicy};

/// Canonical tape length.
pub const DEFAULT_TAPE_SIZE: usize = 30_000;

/// What an input instruction stores when the input is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofPolicy {
    /// Store zero.
    #[default]
    Zero,
    /// Store the all-ones value of the cell width (255 for 8-bit cells).
    Max,
    /// Leave the current cell as it is.
    Unchanged,
}

/// Settings for one machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tape_size: usize,
    pub cell_width: CellWidth,
    pub pointer_policy: PointerPolicy,
    pub eof_policy: EofPolicy,
    /// Maximum number of executed instructions; `None` runs unbounded.
    pub step_limit: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            cell_width: CellWidth::default(),
            pointer_policy: PointerPolicy::default(),
            eof_policy: EofPolicy::default(),
            step_limit: None,
        }
    }
}

impl Config {
    pub fn with_tape_size(mut self, tape_size: usize) -> Self {
        self.tape_size = tape_size;
        self
    }

    pub fn with_cell_width(mut self, cell_width: CellWidth) -> Self {
        self.cell_width = cell_width;
        self
    }

    pub fn with_pointer_policy(mut self, pointer_policy: PointerPolicy) -> Self {
        self.pointer_policy = pointer_policy;
        self
    }

    pub fn with_eof_policy(mut self, eof_policy: EofPolicy) -> Self {
        self.eof_policy = eof_policy;
        self
    }

    pub fn with_step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = Some(step_limit);
        self
    }

    /// Reject settings no machine can run with.
    pub fn validate(&self) -> Result<(), RunError> {
        if self.tape_size == 0 {
            return Err(RunError::InvalidConfig {
                reason: "tape size must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canonical_machine() {
        let config = Config::default();
        assert_eq!(config.tape_size, 30_000);
        assert_eq!(config.cell_width, CellWidth::Bits8);
        assert_eq!(config.pointer_policy, PointerPolicy::Wrap);
        assert_eq!(config.eof_policy, EofPolicy::Zero);
        assert_eq!(config.step_limit, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builders_set_fields() {
        let config = Config::default()
            .with_tape_size(8)
            .with_cell_width(CellWidth::Bits16)
            .with_pointer_policy(PointerPolicy::Fault)
            .with_eof_policy(EofPolicy::Unchanged)
            .with_step_limit(1_000);
        assert_eq!(config.tape_size, 8);
        assert_eq!(config.cell_width, CellWidth::Bits16);
        assert_eq!(config.pointer_policy, PointerPolicy::Fault);
        assert_eq!(config.eof_policy, EofPolicy::Unchanged);
        assert_eq!(config.step_limit, Some(1_000));
    }

    #[test]
    fn zero_tape_is_invalid() {
        let err = Config::default().with_tape_size(0).validate().unwrap_err();
        assert!(matches!(err, RunError::InvalidConfig { .. }));
    }
}
