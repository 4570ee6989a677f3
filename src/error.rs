//! All kinds of errors in this crate.

use crate::{cells::Coord, digest::Key};
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
///
/// All of them indicate misuse of the public surface or a bug in the
/// engine itself; none is expected during a correct simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Coordinates {0:?} are out of bounds.
    OutOfBounds(Coord),
    /// Invalid block size: {0}.
    InvalidBlockSize(usize),
    /// Duplicate cache entry for key {0}.
    DuplicateKey(Key),
}
