// Tape storage: byte cells and the cursor that indexes them

use std::fmt;

/// The cursor tried to leave the tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapeBoundsError {
    /// Index the cursor would have moved to (-1 when moving left off cell 0)
    pub attempted: i64,
    pub len: usize,
}

impl fmt::Display for TapeBoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cursor moved to cell {} outside tape of {} cells",
            self.attempted, self.len
        )
    }
}

impl std::error::Error for TapeBoundsError {}

/// Fixed-length byte tape with a single cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    cursor: usize,
}

impl Tape {
    /// Allocate `len` zeroed cells (at least one) with the cursor on the first.
    pub fn new(len: usize) -> Self {
        Tape {
            cells: vec![0; len.max(1)],
            cursor: 0,
        }
    }

    /// Zero every cell and move the cursor back to the origin.
    pub fn reset(&mut self) {
        self.cells.fill(0);
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Value of the cell under the cursor
    pub fn get(&self) -> u8 {
        self.cells[self.cursor]
    }

    pub fn set(&mut self, value: u8) {
        self.cells[self.cursor] = value;
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_sub(1);
    }

    pub fn move_left(&mut self) -> Result<(), TapeBoundsError> {
        if self.cursor == 0 {
            return Err(TapeBoundsError {
                attempted: -1,
                len: self.len(),
            });
        }
        self.cursor -= 1;
        Ok(())
    }

    pub fn move_right(&mut self) -> Result<(), TapeBoundsError> {
        if self.cursor + 1 >= self.len() {
            return Err(TapeBoundsError {
                attempted: (self.cursor + 1) as i64,
                len: self.len(),
            });
        }
        self.cursor += 1;
        Ok(())
    }

    /// `(index, value)` for every non-zero cell, in index order.
    pub fn non_zero_cells(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.cells
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, value)| value != 0)
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new(super::DEFAULT_TAPE_LEN)
    }
}
