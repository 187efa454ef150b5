//! The data tape: fixed-size array of masked unsigned cells.

use crate::error::RunError;

/// Width of one tape cell. Cell arithmetic wraps modulo 2^width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellWidth {
    #[default]
    Bits8,
    Bits16,
    Bits32,
}

impl CellWidth {
    /// Largest value a cell can hold.
    pub const fn max_value(self) -> u32 {
        match self {
            CellWidth::Bits8 => u8::MAX as u32,
            CellWidth::Bits16 => u16::MAX as u32,
            CellWidth::Bits32 => u32::MAX,
        }
    }

    /// Width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            CellWidth::Bits8 => 8,
            CellWidth::Bits16 => 16,
            CellWidth::Bits32 => 32,
        }
    }

    /// Look up a width by bit count.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(CellWidth::Bits8),
            16 => Some(CellWidth::Bits16),
            32 => Some(CellWidth::Bits32),
            _ => None,
        }
    }
}

/// What happens when the tape pointer moves past either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerPolicy {
    /// Wrap modulo the tape size.
    #[default]
    Wrap,
    /// Fail with [`RunError::TapeOutOfBounds`].
    Fault,
}

/// A tape of cells with a pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u32>,
    pointer: usize,
    width: CellWidth,
    policy: PointerPolicy,
}

impl Tape {
    /// A zeroed tape of `size` cells with the pointer at cell 0.
    ///
    /// `size` must be nonzero; [`crate::Config::validate`] checks this
    /// before a machine builds its tape. Fails with
    /// [`RunError::Allocation`] when the cells cannot be allocated.
    pub fn new(size: usize, width: CellWidth, policy: PointerPolicy) -> Result<Self, RunError> {
        debug_assert!(size > 0, "tape size must be nonzero");
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(size)
            .map_err(|_| RunError::Allocation { cells: size })?;
        cells.resize(size, 0);
        Ok(Self {
            cells,
            pointer: 0,
            width,
            policy,
        })
    }

    /// Move one cell right. `at` is the instruction index for errors.
    #[inline]
    pub fn move_right(&mut self, at: usize) -> Result<(), RunError> {
        if self.pointer + 1 < self.cells.len() {
            self.pointer += 1;
            return Ok(());
        }
        match self.policy {
            PointerPolicy::Wrap => {
                self.pointer = 0;
                Ok(())
            }
            PointerPolicy::Fault => Err(RunError::TapeOutOfBounds {
                at,
                pointer: self.pointer,
            }),
        }
    }

    /// Move one cell left. `at` is the instruction index for errors.
    #[inline]
    pub fn move_left(&mut self, at: usize) -> Result<(), RunError> {
        if self.pointer > 0 {
            self.pointer -= 1;
            return Ok(());
        }
        match self.policy {
            PointerPolicy::Wrap => {
                self.pointer = self.cells.len() - 1;
                Ok(())
            }
            PointerPolicy::Fault => Err(RunError::TapeOutOfBounds {
                at,
                pointer: self.pointer,
            }),
        }
    }

    #[inline]
    pub fn increment(&mut self) {
        let max = self.width.max_value();
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_add(1) & max;
    }

    #[inline]
    pub fn decrement(&mut self) {
        let max = self.width.max_value();
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_sub(1) & max;
    }

    /// Value of the current cell.
    #[inline]
    pub fn get(&self) -> u32 {
        self.cells[self.pointer]
    }

    /// Store into the current cell, truncated to the cell width.
    #[inline]
    pub fn set(&mut self, value: u32) {
        self.cells[self.pointer] = value & self.width.max_value();
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true for a tape built from a validated [`crate::Config`].
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn width(&self) -> CellWidth {
        self.width
    }
}
