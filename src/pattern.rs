//! Seed patterns.
//!
//! Well-known patterns as plain data, ready to be pasted into a world
//! with [`World::put_pattern`](crate::World::put_pattern).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular stamp of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pattern {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Pattern {
    /// Parses a plaintext picture: one line per row, `.` or a space for a
    /// dead cell, any other character for a live one. Empty lines are
    /// skipped and short lines are padded with dead cells.
    pub fn from_plaintext(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
        let height = lines.len();
        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let mut cells = vec![false; height * width];
        for (row, line) in lines.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                cells[row * width + col] = !matches!(c, '.' | ' ');
            }
        }
        Self {
            height,
            width,
            cells,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The cell at `(row, col)`.
    pub(crate) fn cell(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.width + col]
    }

    /// Iterates over the `(row, col)` offsets of the live cells.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(move |(index, _)| (index / width, index % width))
    }

    /// A period-2 oscillator of three cells in a row.
    pub fn blinker() -> Self {
        Self::from_plaintext("OOO")
    }

    /// The smallest spaceship; travels one cell diagonally, toward the
    /// lower right, every 4 generations.
    pub fn glider() -> Self {
        Self::from_plaintext(
            ".O.\n\
             ..O\n\
             OOO",
        )
    }

    /// The lightweight spaceship.
    pub fn lwss() -> Self {
        Self::from_plaintext(
            "O..O.\n\
             ....O\n\
             O...O\n\
             .OOOO",
        )
    }

    /// A period-3 oscillator.
    pub fn pulsar() -> Self {
        Self::from_plaintext(
            "..OOO...OOO..\n\
             .............\n\
             O....O.O....O\n\
             O....O.O....O\n\
             O....O.O....O\n\
             ..OOO...OOO..\n\
             .............\n\
             ..OOO...OOO..\n\
             O....O.O....O\n\
             O....O.O....O\n\
             O....O.O....O\n\
             .............\n\
             ..OOO...OOO..",
        )
    }

    /// A methuselah that vanishes completely after 130 generations.
    pub fn die_hard() -> Self {
        Self::from_plaintext(
            "......O.\n\
             OO......\n\
             .O...OOO",
        )
    }
}
