use std::cmp::Ordering;

use geo::kernels::{Kernel, Orientation, RobustKernel};
use geo::{Coord, Vector2DOps};
use log::debug;

use super::Planar;


/// Graham scan over a borrowed point set.
///
/// The hull is returned counter-clockwise, starting at the pivot: the point
/// with the lowest `y`, then the lowest `x`, then the earliest position in the
/// input. Points collinear with the pivot are visited nearest first and, at
/// equal distance, in input order. Of coincident hull vertices only the
/// earliest survives. Points lying on a hull edge are discarded.
pub struct GrahamScan<'a, T> {
    points: &'a [T],
}

impl<'a, T: Planar + Clone> GrahamScan<'a, T> {
    pub fn new(points: &'a [T]) -> Self {
        Self {
            points,
        }
    }

    /// Returns the hull vertices and whether any input point was discarded.
    ///
    /// Fewer than three points, or points that are all collinear, are returned
    /// unchanged.
    pub fn prune_interior(&self) -> (Vec<T>, bool) {
        let Some(hull) = self.hull_indices() else {
            return (self.points.to_vec(), false);
        };

        let changed = hull.len() < self.points.len();
        if changed {
            debug!("Pruned {} interior points, {} remain on the hull", self.points.len() - hull.len(), hull.len());
        }

        let pruned = hull.into_iter()
            .map(|i| self.points[i].clone())
            .collect();

        (pruned, changed)
    }

    /// For points that all lie on one line, returns the two extreme points, or
    /// the single point when they all coincide. Ties keep the earliest input.
    ///
    /// Returns `None` when the points span an area.
    pub fn collinear_extent(&self) -> Option<Vec<T>> {
        let Some(first) = self.points.first() else {
            return Some(vec![]);
        };
        let a = first.flat();

        let Some(b) = self.points.iter().map(Planar::flat).find(|&p| p != a) else {
            return Some(vec![first.clone()]);
        };

        let coords: Vec<Coord> = self.points.iter().map(Planar::flat).collect();
        if coords.iter().any(|&p| RobustKernel::orient2d(a, b, p) != Orientation::Collinear) {
            return None;
        }

        let direction = b - a;
        let along = |i: usize| (coords[i] - a).dot_product(direction);

        let mut low = 0;
        let mut high = 0;
        for i in 1..coords.len() {
            if along(i) < along(low) {
                low = i;
            }
            if along(i) > along(high) {
                high = i;
            }
        }

        Some(vec![self.points[low].clone(), self.points[high].clone()])
    }

    fn hull_indices(&self) -> Option<Vec<usize>> {
        if self.points.len() < 3 {
            return None;
        }

        let coords: Vec<Coord> = self.points.iter().map(Planar::flat).collect();

        let pivot = (0..coords.len()).min_by(|&a, &b| {
            coords[a].y.total_cmp(&coords[b].y)
                .then(coords[a].x.total_cmp(&coords[b].x))
                .then(a.cmp(&b))
        })?;
        let p0 = coords[pivot];

        let mut order: Vec<usize> = (0..coords.len())
            .filter(|&i| i != pivot && coords[i] != p0)
            .collect();

        // Everything lies in the half-plane above the pivot, so orientation
        // alone is a total order on direction.
        order.sort_by(|&a, &b| {
            match RobustKernel::orient2d(p0, coords[a], coords[b]) {
                Orientation::CounterClockwise => Ordering::Less,
                Orientation::Clockwise => Ordering::Greater,
                Orientation::Collinear => {
                    let da = (coords[a] - p0).magnitude_squared();
                    let db = (coords[b] - p0).magnitude_squared();
                    da.total_cmp(&db).then(a.cmp(&b))
                },
            }
        });

        let mut stack = vec![pivot];

        for i in order {
            let p = coords[i];

            if stack.last().is_some_and(|&top| coords[top] == p) {
                continue;
            }

            while stack.len() >= 2 {
                let top = stack[stack.len() - 1];
                let below = stack[stack.len() - 2];

                if RobustKernel::orient2d(coords[below], coords[top], p) == Orientation::CounterClockwise {
                    break;
                }

                stack.pop();
            }

            stack.push(i);
        }

        if stack.len() < 3 {
            return None;
        }

        Some(stack)
    }
}
