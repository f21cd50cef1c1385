use std::sync::Arc;

use geo::kernels::{Kernel, Orientation, RobustKernel};
use geo::Point;

use crate::geodesy::destination;
use crate::hull::{hull_contains, Planar};
use crate::shape::Cylinder;
use crate::task::{AircraftState, OrderedTask, OrderedTaskPoint, SampledTaskPoint};

use super::*;

/// Wanders around `center` for a while, mostly inside a 450m radius.
fn thermal(center: Point, count: usize) -> Vec<AircraftState> {
    let mut seed: u64 = 0x9E3779B97F4A7C15;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed % 10_000) as f64 / 10_000.0
    };

    (0..count)
        .map(|i| {
            let bearing = (i as f64 * 23.0) % 360.0;
            let radius = 50.0 + 500.0 * next();
            AircraftState::new(destination(center, bearing, radius))
        })
        .collect()
}

fn assert_strictly_convex(tp: &SampledTaskPoint) {
    let hull: Vec<_> = tp.get_sample_points().iter().map(Planar::flat).collect();
    if hull.len() < 3 {
        // a collapsed hull keeps only distinct ends
        assert!(hull.len() < 2 || hull[0] != hull[1]);
        return;
    }

    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        let c = hull[(i + 2) % hull.len()];
        assert_eq!(RobustKernel::orient2d(a, b, c), Orientation::CounterClockwise);
    }
}

#[test]
fn sampled_points_stay_the_hull_of_every_fix() {
    init_test_logger();

    let center = Point::new(7.0, 51.0);
    let zone = Cylinder::new(center, 450.0).unwrap();
    let mut task = OrderedTask::new(vec![
        OrderedTaskPoint::new("Thermal", Arc::new(zone), true, 0.0),
        OrderedTaskPoint::new("Away", Arc::new(Cylinder::new(destination(center, 0.0, 10_000.0), 500.0).unwrap()), false, 0.0),
    ]).unwrap();

    let fixes = thermal(center, 400);
    let mut accepted = vec![];

    for state in &fixes {
        let before = task.points()[0].sampled().get_sample_points().to_vec();
        let changed = task.update_sample(state);
        let tp = task.points()[0].sampled();

        if changed {
            accepted.push(*state);
        } else {
            // the containment gate never touches the samples
            assert_eq!(tp.get_sample_points(), before.as_slice());
        }

        assert_strictly_convex(tp);

        // a fix already covered is rejected when offered again
        if tp.is_in_sector(state) {
            let again = task.update_sample(state);
            assert!(!again);
        }
    }

    assert!(accepted.len() >= 3);

    let tp = task.points()[0].sampled();
    let projection = tp.projection();
    for state in fixes.iter().filter(|s| tp.is_in_sector(s)) {
        let flat = projection.project(state.location);
        assert!(hull_contains(flat, tp.get_sample_points()), "{:?} escaped the samples", state.location);
    }
}

#[test]
fn geometry_refresh_keeps_samples() {
    let center = Point::new(-1.5, 45.0);
    let mut task = OrderedTask::new(vec![
        OrderedTaskPoint::new("A", Arc::new(Cylinder::new(center, 800.0).unwrap()), true, 0.0),
        OrderedTaskPoint::new("B", Arc::new(Cylinder::new(destination(center, 45.0, 30_000.0), 800.0).unwrap()), true, 0.0),
    ]).unwrap();

    for state in thermal(center, 50) {
        task.update_sample(&state);
    }

    let samples = task.points()[0].sampled().get_sample_points().to_vec();
    task.update_geometry();

    let after = task.points()[0].sampled().get_sample_points();
    assert_eq!(after.len(), samples.len());
    for (a, b) in after.iter().zip(&samples) {
        assert_eq!(a.location(), b.location());
    }
    assert_eq!(task.points()[0].sampled().get_boundary_points().len(), 20);
}
