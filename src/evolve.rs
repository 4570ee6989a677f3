//! The recursive, memoized evolution of grid blocks.

use crate::{
    cache::{PatternCache, ResultBlock},
    cells::{CellMatrix, Coord},
    digest,
    error::Error,
    rules,
};

/// The smallest block the solver decomposes down to. A 4×4 block fully
/// determines the next state of its 2×2 interior.
pub(crate) const BASE_SIZE: usize = 4;

/// Solves blocks of the current generation into the next-generation
/// buffer, memoizing every solved block in the pattern cache.
///
/// All reads go to the immutable current buffer and all writes go to the
/// separate next buffer, so the order in which sub-blocks are solved
/// cannot change the result.
pub(crate) struct Evolver<'a> {
    cells: &'a CellMatrix,
    next: &'a mut CellMatrix,
    cache: &'a mut PatternCache,
}

impl<'a> Evolver<'a> {
    pub(crate) fn new(
        cells: &'a CellMatrix,
        next: &'a mut CellMatrix,
        cache: &'a mut PatternCache,
    ) -> Self {
        Self { cells, next, cache }
    }

    /// Computes the next generation of the block at `origin` with side
    /// `size`, writing the block's interior into the next buffer.
    ///
    /// The interior result is cached under the block's canonical key
    /// before returning, from the base case and from the recursive case
    /// alike, so any later block with the same contents, at whatever
    /// position and in whatever generation, is answered by the cache.
    ///
    /// Fails with [`Error::InvalidBlockSize`] unless `size` is a power of
    /// two of at least 4.
    pub(crate) fn solve(&mut self, origin: Coord, size: usize) -> Result<(), Error> {
        if size < BASE_SIZE || !size.is_power_of_two() {
            return Err(Error::InvalidBlockSize(size));
        }

        let key = digest::key_of(self.cells, origin, size)?;
        if let Some(result) = self.cache.get(&key) {
            write_interior(self.next, origin, result);
            return Ok(());
        }

        if size == BASE_SIZE {
            let result = self.solve_base(origin);
            write_interior(self.next, origin, &result);
            return self.cache.put(key, result);
        }

        // 9 sub-blocks of side size/2, tiled with stride size/4 so that
        // adjacent sub-blocks overlap by half their width. Every interior
        // cell of this block is interior to at least one sub-block.
        let stride = size / 4;
        let half = size / 2;
        let (x0, y0) = origin;
        for i in 0..3 {
            for j in 0..3 {
                let sub_origin = (x0 + i * stride, y0 + j * stride);
                let sub_key = digest::key_of(self.cells, sub_origin, half)?;
                if let Some(result) = self.cache.get(&sub_key) {
                    write_interior(self.next, sub_origin, result);
                } else {
                    self.solve(sub_origin, half)?;
                }
            }
        }

        // The whole interior is now in the next buffer; remember it.
        let result = read_interior(self.next, origin, size);
        self.cache.put(key, result)
    }

    /// Base case: applies the transition rule to the 4 interior cells of
    /// the 4×4 block at `origin`, reading their 3×3 neighborhoods from
    /// the current buffer.
    fn solve_base(&self, origin: Coord) -> ResultBlock {
        let (x0, y0) = origin;
        ResultBlock::from_fn(BASE_SIZE - 2, |row, col| {
            let coord = (x0 + 1 + row, y0 + 1 + col);
            rules::next_state(self.cells[coord], rules::live_neighbors(self.cells, coord))
        })
    }
}

/// Copies a solved interior into the next buffer, at the interior
/// coordinates of the block at `origin`.
fn write_interior(next: &mut CellMatrix, origin: Coord, result: &ResultBlock) {
    let (x0, y0) = origin;
    for row in 0..result.side() {
        for col in 0..result.side() {
            next.set((x0 + 1 + row, y0 + 1 + col), result.get(row, col));
        }
    }
}

/// Reads the interior of the block at `origin` back out of the next
/// buffer, for caching.
fn read_interior(next: &CellMatrix, origin: Coord, size: usize) -> ResultBlock {
    let (x0, y0) = origin;
    ResultBlock::from_fn(size - 2, |row, col| next[(x0 + 1 + row, y0 + 1 + col)])
}
