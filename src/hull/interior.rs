use geo::Coord;
use geo::kernels::{Kernel, Orientation, RobustKernel};

use super::Planar;


fn on_segment(p: Coord, a: Coord, b: Coord) -> bool {
    RobustKernel::orient2d(a, b, p) == Orientation::Collinear
        && p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Even/odd containment of `point` in the closed polygon through `polygon`.
///
/// Points on an edge or a vertex count as inside. Anything with fewer than
/// three vertices contains nothing.
pub fn polygon_interior<T: Planar>(point: Coord, polygon: &[T]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut a = polygon[polygon.len() - 1].flat();

    for vertex in polygon {
        let b = vertex.flat();

        if on_segment(point, a, b) {
            return true;
        }

        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x {
                inside = !inside;
            }
        }

        a = b;
    }

    inside
}

/// Containment in a hull that may have collapsed to a segment or a point.
///
/// With three or more vertices this is [`polygon_interior`]. Two vertices
/// cover the closed segment between them, one covers only itself.
pub fn hull_contains<T: Planar>(point: Coord, hull: &[T]) -> bool {
    match hull {
        [] => false,
        [a] => on_segment(point, a.flat(), a.flat()),
        [a, b] => on_segment(point, a.flat(), b.flat()),
        _ => polygon_interior(point, hull),
    }
}
