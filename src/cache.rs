//! Memoized results of solved blocks.

use crate::{digest::Key, error::Error};
use std::collections::{hash_map::Entry, HashMap};

/// The computed interior of a solved block: the next-generation states of
/// the `(size − 2) × (size − 2)` cells strictly inside the block's border
/// ring, in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ResultBlock {
    side: usize,
    cells: Box<[bool]>,
}

impl ResultBlock {
    /// Builds an interior of the given side length, filling each cell
    /// from `f(row, col)`.
    pub(crate) fn from_fn(side: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(side * side);
        for row in 0..side {
            for col in 0..side {
                cells.push(f(row, col));
            }
        }
        Self {
            side,
            cells: cells.into_boxed_slice(),
        }
    }

    /// Side length of the interior.
    #[inline]
    pub(crate) fn side(&self) -> usize {
        self.side
    }

    /// The cell at `(row, col)` of the interior.
    #[inline]
    pub(crate) fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.side + col]
    }
}

/// Maps canonical keys to previously computed interior results.
///
/// An entry is written once, on the first encounter of a pattern, and is
/// never invalidated or evicted: results are pure functions of block
/// content, so the map only grows, bounded by the number of distinct
/// patterns ever observed. Writing a key twice is a logic error: it
/// would mean the key derivation or the reuse guarantee is broken.
#[derive(Debug, Default)]
pub struct PatternCache {
    entries: HashMap<Key, ResultBlock>,
    hits: u64,
    misses: u64,
}

impl PatternCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Looks up the result for `key`, counting the hit or miss.
    pub(crate) fn get(&mut self, key: &Key) -> Option<&ResultBlock> {
        match self.entries.get(key) {
            Some(result) => {
                self.hits += 1;
                Some(result)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores the result for `key`.
    ///
    /// Fails with [`Error::DuplicateKey`] if the key is already present.
    pub(crate) fn put(&mut self, key: Key, result: ResultBlock) -> Result<(), Error> {
        match self.entries.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(result);
                Ok(())
            }
            Entry::Occupied(_) => Err(Error::DuplicateKey(key)),
        }
    }

    /// Number of distinct patterns stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pattern has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that required solving.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cells::CellMatrix, digest::key_of};

    fn key_for(live: &[(usize, usize)]) -> Key {
        let mut matrix = CellMatrix::new(8);
        for &coord in live {
            matrix.set(coord, true);
        }
        key_of(&matrix, (0, 0), 4).unwrap()
    }

    #[test]
    fn put_then_get() {
        let mut cache = PatternCache::new();
        let key = key_for(&[(1, 1)]);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&key), None);

        let result = ResultBlock::from_fn(2, |row, col| row == col);
        cache.put(key, result.clone()).unwrap();
        assert_eq!(cache.get(&key), Some(&result));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn duplicate_put_is_an_error() {
        let mut cache = PatternCache::new();
        let key = key_for(&[(2, 2)]);
        let result = ResultBlock::from_fn(2, |_, _| false);
        cache.put(key, result.clone()).unwrap();
        assert_eq!(cache.put(key, result), Err(Error::DuplicateKey(key)));
        assert_eq!(cache.len(), 1);
    }
}
