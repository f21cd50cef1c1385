use geo::{Bearing, Destination, Distance, Haversine, Point};

use crate::hull::EPSILON;

/// Mean earth radius used by `geo`'s haversine metric space, in metres.
pub const EARTH_RADIUS: f64 = 6_371_008.8;


/// Great-circle distance between two locations, in metres.
pub fn distance(a: Point, b: Point) -> f64 {
    Haversine::distance(a, b)
}

/// Initial great-circle bearing from `a` to `b`, in degrees within `[0, 360)`.
pub fn bearing(a: Point, b: Point) -> f64 {
    if distance(a, b) < EPSILON {
        return 0.0;
    }

    normalise_bearing(Haversine::bearing(a, b))
}

pub fn destination(origin: Point, bearing: f64, distance: f64) -> Point {
    Haversine::destination(origin, bearing, distance)
}

pub fn normalise_bearing(degrees: f64) -> f64 {
    let b = degrees.rem_euclid(360.0);
    // rem_euclid may round up to the modulus for tiny negative inputs
    if b >= 360.0 { 0.0 } else { b }
}

/// Distance along the great circle `a -> b` to the foot of the perpendicular
/// dropped from `reference`, clamped to the segment, in metres.
pub fn projected_distance(a: Point, b: Point, reference: Point) -> f64 {
    let d_ab = distance(a, b);
    if d_ab < EPSILON {
        return 0.0;
    }

    let d_ar = distance(a, reference);
    if d_ar < EPSILON {
        return 0.0;
    }

    let delta = d_ar / EARTH_RADIUS;
    let theta = (bearing(a, reference) - bearing(a, b)).to_radians();

    let cross_track = (delta.sin() * theta.sin()).asin();
    let cos_along = (delta.cos() / cross_track.cos()).clamp(-1.0, 1.0);
    let mut along_track = cos_along.acos() * EARTH_RADIUS;

    if theta.cos() < 0.0 {
        along_track = -along_track;
    }

    along_track.clamp(0.0, d_ab)
}
