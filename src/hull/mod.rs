mod graham;
mod interior;

use geo::Coord;

pub use graham::*;
pub use interior::*;

pub const EPSILON: f64 = 0.000000001;


/// Anything carrying a position in the task's planar frame.
pub trait Planar {
    fn flat(&self) -> Coord;
}

impl Planar for Coord {
    fn flat(&self) -> Coord {
        *self
    }
}
