mod cache;
mod cells;
mod config;
mod digest;
mod error;
mod evolve;
mod pattern;
pub mod rules;
mod world;

pub use cache::PatternCache;
pub use cells::Coord;
pub use config::Config;
pub use digest::Key;
pub use error::Error;
pub use pattern::Pattern;
pub use world::World;
