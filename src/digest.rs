//! Content-addressed keys for grid blocks.

use crate::{
    cells::{CellMatrix, Coord},
    error::Error,
};
use std::fmt::{self, Debug, Display, Formatter};

/// A canonical digest of a block's contents.
///
/// The key is derived from the cell contents alone, in a fixed row-major
/// bit order, so two blocks with identical contents yield identical keys
/// wherever they sit in the grid. Key equality is trusted to imply
/// content equality; with a 256-bit digest the collision probability is
/// negligible.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key([u8; 32]);

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Debug for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self)
    }
}

/// Digests the contents of the square block at `origin` with side `size`.
///
/// The block is read row by row, packing cells into bits. The side length
/// is digested ahead of the contents so blocks of different sizes can
/// never yield the same key. The origin deliberately never enters the
/// digest.
///
/// Fails with [`Error::InvalidBlockSize`] for a zero-size block and with
/// [`Error::OutOfBounds`] when the block does not fit in the matrix.
pub(crate) fn key_of(cells: &CellMatrix, origin: Coord, size: usize) -> Result<Key, Error> {
    if size == 0 {
        return Err(Error::InvalidBlockSize(0));
    }
    let (x0, y0) = origin;
    if x0 + size > cells.size() || y0 + size > cells.size() {
        return Err(Error::OutOfBounds(origin));
    }

    let mut hasher = blake3::Hasher::new();
    hasher.update(&(size as u64).to_le_bytes());

    let mut byte = 0_u8;
    let mut bits = 0;
    for x in x0..x0 + size {
        for y in y0..y0 + size {
            byte = byte << 1 | cells[(x, y)] as u8;
            bits += 1;
            if bits == 8 {
                hasher.update(&[byte]);
                byte = 0;
                bits = 0;
            }
        }
    }
    if bits > 0 {
        hasher.update(&[byte << (8 - bits)]);
    }

    Ok(Key(*hasher.finalize().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_with(live: &[Coord]) -> CellMatrix {
        let mut matrix = CellMatrix::new(16);
        for &coord in live {
            matrix.set(coord, true);
        }
        matrix
    }

    #[test]
    fn deterministic() {
        let matrix = matrix_with(&[(1, 1), (2, 3), (3, 2)]);
        let first = key_of(&matrix, (0, 0), 4).unwrap();
        let second = key_of(&matrix, (0, 0), 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn position_independent() {
        // The same L-shape, once near the corner and once shifted by
        // (6, 4); the keys of the blocks containing it must agree.
        let a = matrix_with(&[(1, 1), (2, 1), (2, 2)]);
        let b = matrix_with(&[(7, 5), (8, 5), (8, 6)]);
        assert_eq!(
            key_of(&a, (0, 0), 4).unwrap(),
            key_of(&b, (6, 4), 4).unwrap()
        );
    }

    #[test]
    fn content_sensitive() {
        let a = matrix_with(&[(1, 1)]);
        let b = matrix_with(&[(1, 2)]);
        assert_ne!(
            key_of(&a, (0, 0), 4).unwrap(),
            key_of(&b, (0, 0), 4).unwrap()
        );
    }

    #[test]
    fn size_enters_key() {
        let matrix = matrix_with(&[]);
        assert_ne!(
            key_of(&matrix, (0, 0), 4).unwrap(),
            key_of(&matrix, (0, 0), 8).unwrap()
        );
    }

    #[test]
    fn degenerate_blocks_rejected() {
        let matrix = matrix_with(&[]);
        assert_eq!(
            key_of(&matrix, (0, 0), 0),
            Err(Error::InvalidBlockSize(0))
        );
        assert_eq!(
            key_of(&matrix, (14, 14), 4),
            Err(Error::OutOfBounds((14, 14)))
        );
    }
}
