//! World configuration.

use crate::{error::Error, world::World};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// World configuration.
///
/// The world will be generated from this configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Base-2 logarithm of the grid's side length.
    ///
    /// The grid is a square with side `2 ^ size_exp`. It must be at
    /// least 2, since a 4×4 grid is the smallest block the solver
    /// handles.
    pub size_exp: u32,
}

impl Default for Config {
    /// A 64×64 grid.
    fn default() -> Self {
        Config { size_exp: 6 }
    }
}

impl Config {
    /// Sets up a new configuration with the given size exponent.
    pub fn new(size_exp: u32) -> Self {
        Config { size_exp }
    }

    /// Sets the size exponent.
    pub fn set_size_exp(mut self, size_exp: u32) -> Self {
        self.size_exp = size_exp;
        self
    }

    /// Creates a new world from the configuration.
    ///
    /// Fails with [`Error::InvalidBlockSize`] if the grid would be
    /// smaller than the solver's 4×4 base case, or too large to address.
    pub fn world(&self) -> Result<World, Error> {
        if self.size_exp < 2 || self.size_exp >= usize::BITS {
            return Err(Error::InvalidBlockSize(
                1_usize.checked_shl(self.size_exp).unwrap_or(0),
            ));
        }
        Ok(World::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_size_exp() {
        assert_eq!(Config::new(0).world().err(), Some(Error::InvalidBlockSize(1)));
        assert_eq!(Config::new(1).world().err(), Some(Error::InvalidBlockSize(2)));
        assert_eq!(Config::new(2).world().unwrap().size(), 4);
        assert_eq!(Config::default().world().unwrap().size(), 64);
    }

    #[test]
    fn builder() {
        let config = Config::new(3).set_size_exp(4);
        assert_eq!(config.size_exp, 4);
        assert_eq!(config.world().unwrap().size(), 16);
    }
}
