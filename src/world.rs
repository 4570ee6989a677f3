//! The world.

use crate::{
    cache::PatternCache,
    cells::{CellMatrix, Coord},
    config::Config,
    error::Error,
    evolve::Evolver,
    pattern::Pattern,
    rules,
};
use log::debug;
use rand::{thread_rng, Rng};
use std::{
    fmt::{self, Display, Formatter, Write},
    mem,
    time::Instant,
};

/// The world: a fixed square grid of cells advanced one generation at a
/// time.
///
/// The grid's side length is a power of two. Its outermost ring of cells
/// is a permanently dead fringe: rule evaluation never writes it and
/// edits are rejected there, so neighbor lookups near the edge stay in
/// bounds and the border never spontaneously produces life.
///
/// The world also tracks which cells are stale for redraw purposes
/// (cells changed by [`advance_generation`](Self::advance_generation),
/// cells edited through [`set_cell`](Self::set_cell) and the bulk edit
/// helpers) and hands them out as a drained dirty set.
#[derive(Debug)]
pub struct World {
    /// The current generation.
    cells: CellMatrix,
    /// Scratch buffer receiving the next generation.
    next: CellMatrix,
    /// Cells whose on-screen state is stale.
    dirty: CellMatrix,
    /// Memoized results of solved blocks, kept for the world's lifetime.
    cache: PatternCache,
    /// Number of generations advanced so far.
    generation: u64,
}

impl World {
    /// Creates an empty world from the configuration.
    pub(crate) fn new(config: &Config) -> Self {
        let size = 1 << config.size_exp;
        Self {
            cells: CellMatrix::new(size),
            next: CellMatrix::new(size),
            dirty: CellMatrix::new(size),
            cache: PatternCache::new(),
            generation: 0,
        }
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.size()
    }

    /// Number of generations advanced so far.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.count_live()
    }

    /// Statistics of the pattern cache.
    #[inline]
    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Reads the cell at `coord`.
    pub fn cell_at(&self, coord: Coord) -> Result<bool, Error> {
        self.cells.get(coord).ok_or(Error::OutOfBounds(coord))
    }

    /// Writes the cell at `coord` and marks it for redraw.
    ///
    /// Only the interior of the grid is writable: editing the fringe, or
    /// a coordinate outside the grid, fails with [`Error::OutOfBounds`].
    pub fn set_cell(&mut self, coord: Coord, value: bool) -> Result<(), Error> {
        if !self.in_interior(coord) {
            return Err(Error::OutOfBounds(coord));
        }
        self.cells.set(coord, value);
        self.dirty.set(coord, true);
        Ok(())
    }

    /// Advances the grid by one generation.
    ///
    /// Runs the memoized recursive solver over the full grid, then
    /// returns the drained dirty set: every cell that changed in this
    /// generation, together with any cells edited since the last drain.
    ///
    /// On error the current generation is left unapplied; only the
    /// scratch buffer may have been written.
    pub fn advance_generation(&mut self) -> Result<Vec<Coord>, Error> {
        let start = Instant::now();
        let size = self.size();
        Evolver::new(&self.cells, &mut self.next, &mut self.cache).solve((0, 0), size)?;
        let changed = self.finish_generation();
        debug!(
            "generation {} solved in {:?}; {} cells changed; cache: {} entries, {} hits, {} misses",
            self.generation,
            start.elapsed(),
            changed.len(),
            self.cache.len(),
            self.cache.hits(),
            self.cache.misses(),
        );
        Ok(changed)
    }

    /// Advances the grid by one generation without the cache.
    ///
    /// The plain nested-loop evolution, applying the transition rule to
    /// every interior cell in turn. This is the reference the memoized
    /// path is checked against; the two must always agree on the next
    /// generation's contents.
    pub fn advance_unmemoized(&mut self) -> Vec<Coord> {
        let size = self.size();
        for x in 1..size - 1 {
            for y in 1..size - 1 {
                let next = rules::next_state(
                    self.cells[(x, y)],
                    rules::live_neighbors(&self.cells, (x, y)),
                );
                self.next.set((x, y), next);
            }
        }
        self.finish_generation()
    }

    /// Kills every cell, marking the previously live ones for redraw.
    pub fn clear(&mut self) {
        let size = self.size();
        for x in 1..size - 1 {
            for y in 1..size - 1 {
                if self.cells[(x, y)] {
                    self.cells.set((x, y), false);
                    self.dirty.set((x, y), true);
                }
            }
        }
    }

    /// Seeds the interior with random life, making each cell live with
    /// probability `density`.
    ///
    /// `density` must be within `0.0..=1.0`.
    pub fn randomize(&mut self, density: f64) {
        self.randomize_with(&mut thread_rng(), density)
    }

    /// Like [`randomize`](Self::randomize), with a caller-provided RNG.
    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R, density: f64) {
        let size = self.size();
        for x in 1..size - 1 {
            for y in 1..size - 1 {
                let value = rng.gen_bool(density);
                if self.cells[(x, y)] != value {
                    self.cells.set((x, y), value);
                    self.dirty.set((x, y), true);
                }
            }
        }
    }

    /// Pastes `pattern` with its upper-left cell at `origin`, overwriting
    /// the covered rectangle and marking it for redraw.
    ///
    /// The pattern must fit strictly inside the fringe; otherwise nothing
    /// is written and the call fails with [`Error::OutOfBounds`].
    pub fn put_pattern(&mut self, pattern: &Pattern, origin: Coord) -> Result<(), Error> {
        let (x0, y0) = origin;
        let size = self.size();
        if x0 == 0 || y0 == 0 || x0 + pattern.height() >= size || y0 + pattern.width() >= size {
            return Err(Error::OutOfBounds(origin));
        }
        for row in 0..pattern.height() {
            for col in 0..pattern.width() {
                self.set_cell((x0 + row, y0 + col), pattern.cell(row, col))?;
            }
        }
        Ok(())
    }

    /// Returns the cells marked for redraw and clears the marks.
    pub fn drain_dirty(&mut self) -> Vec<Coord> {
        let size = self.size();
        let mut drained = Vec::new();
        for x in 0..size {
            for y in 0..size {
                if self.dirty[(x, y)] {
                    self.dirty.set((x, y), false);
                    drained.push((x, y));
                }
            }
        }
        drained
    }

    /// Diffs the two generations into the dirty buffer, swaps the
    /// buffers, and drains the dirty set.
    fn finish_generation(&mut self) -> Vec<Coord> {
        let size = self.size();
        for x in 1..size - 1 {
            for y in 1..size - 1 {
                if self.cells[(x, y)] != self.next[(x, y)] {
                    self.dirty.set((x, y), true);
                }
            }
        }
        mem::swap(&mut self.cells, &mut self.next);
        self.generation += 1;
        self.drain_dirty()
    }

    #[inline]
    fn in_interior(&self, (x, y): Coord) -> bool {
        let size = self.size();
        (1..size - 1).contains(&x) && (1..size - 1).contains(&y)
    }
}

impl Display for World {
    /// Renders the grid as text, one line per row: dead cells are `.`,
    /// live cells are `O`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for x in 0..self.size() {
            for y in 0..self.size() {
                f.write_char(if self.cells[(x, y)] { 'O' } else { '.' })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_rows() {
        let mut world = Config::new(2).world().unwrap();
        world.set_cell((1, 2), true).unwrap();
        world.set_cell((2, 1), true).unwrap();
        assert_eq!(world.to_string(), "....\n..O.\n.O..\n....\n");
    }

    #[test]
    fn clear_marks_only_live_cells() {
        let mut world = Config::new(3).world().unwrap();
        world.set_cell((2, 2), true).unwrap();
        world.set_cell((3, 3), true).unwrap();
        world.drain_dirty();

        world.clear();
        assert_eq!(world.population(), 0);
        assert_eq!(world.drain_dirty(), vec![(2, 2), (3, 3)]);
    }

    #[test]
    fn randomize_is_reproducible() {
        use rand::{rngs::StdRng, SeedableRng};

        let mut a = Config::new(4).world().unwrap();
        let mut b = Config::new(4).world().unwrap();
        a.randomize_with(&mut StdRng::seed_from_u64(39), 0.5);
        b.randomize_with(&mut StdRng::seed_from_u64(39), 0.5);
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.cell_at((0, 0)).unwrap(), false);
    }
}
