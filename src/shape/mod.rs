mod cylinder;

use std::fmt::Debug;

use geo::Point;

pub use cylinder::*;


/// The region around a turnpoint the aircraft has to reach.
///
/// Implementations only describe the shape. Sampling, hull maintenance and
/// scoring live in [`crate::task`] and work with any zone that can answer
/// these three questions.
pub trait ObservationZone: Debug + Send + Sync {
    /// Nominal location of the turnpoint.
    fn location(&self) -> Point;

    fn is_in_sector(&self, location: Point) -> bool;

    /// Walks the zone boundary as `t` goes from `0.0` to `1.0`.
    fn boundary_parametric(&self, t: f64) -> Point;
}
