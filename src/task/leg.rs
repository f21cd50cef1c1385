use anyhow::{ensure, Result};
use geo::Point;

use crate::geodesy::{bearing, distance, projected_distance};

use super::{ActiveState, OrderedTaskPoint};


/// The stretch between two consecutive turnpoints of an ordered task.
///
/// A leg stores only the positions of its endpoints in the task's point
/// list; every measurement is taken against that list. What a measurement
/// returns depends on the activation state of the destination:
///
/// | metric             | `BeforeActive` | `CurrentActive`        | `AfterActive` |
/// |--------------------|----------------|------------------------|---------------|
/// | distance scored    | whole leg      | progress along the leg | 0             |
/// | distance remaining | 0              | aircraft → destination | whole leg     |
/// | distance travelled | whole leg      | flown so far           | 0             |
/// | bearing remaining  | 0              | aircraft → destination | along the leg |
/// | bearing travelled  | along the leg  | origin → aircraft      | 0             |
///
/// # Panics
///
/// Measurements index the point list they are given and panic if it is not
/// the list the leg was built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskLeg {
    origin: usize,
    destination: usize,
}

impl TaskLeg {
    /// Links `points[origin]` and `points[destination]` as leg number `index`.
    pub fn new(index: usize, origin: usize, destination: usize, points: &mut [OrderedTaskPoint]) -> Result<Self> {
        ensure!(origin != destination, "A leg needs two distinct turnpoints, got {origin} twice");
        ensure!(
            origin < points.len() && destination < points.len(),
            "Leg {origin} -> {destination} is out of range ({} turnpoints)", points.len()
        );

        points[origin].set_leg_out(index);
        points[destination].set_leg_in(index);

        Ok(Self {
            origin,
            destination,
        })
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn destination(&self) -> usize {
        self.destination
    }

    fn ends<'a>(&self, points: &'a [OrderedTaskPoint]) -> (&'a OrderedTaskPoint, &'a OrderedTaskPoint) {
        (&points[self.origin], &points[self.destination])
    }

    pub fn distance_scored(&self, points: &[OrderedTaskPoint], reference: Point) -> f64 {
        let (origin, destination) = self.ends(points);
        let adjustment = origin.score_adjustment() + destination.score_adjustment();

        let d = match destination.active_state() {
            ActiveState::BeforeActive => distance(origin.reference_scored(), destination.reference_scored()),
            ActiveState::CurrentActive => projected_distance(origin.reference_scored(), destination.reference_scored(), reference),
            ActiveState::AfterActive => return 0.0,
        };

        (d - adjustment).max(0.0)
    }

    pub fn distance_remaining(&self, points: &[OrderedTaskPoint], reference: Point) -> f64 {
        let (origin, destination) = self.ends(points);

        match destination.active_state() {
            ActiveState::BeforeActive => 0.0,
            ActiveState::CurrentActive => distance(reference, destination.reference_remaining()),
            ActiveState::AfterActive => distance(origin.reference_remaining(), destination.reference_remaining()),
        }
    }

    pub fn distance_travelled(&self, points: &[OrderedTaskPoint], reference: Point) -> f64 {
        let (origin, destination) = self.ends(points);

        match destination.active_state() {
            ActiveState::BeforeActive => distance(origin.reference_travelled(), destination.reference_travelled()),
            ActiveState::CurrentActive if destination.has_entered() => {
                distance(origin.reference_travelled(), destination.reference_travelled())
                    + distance(destination.reference_travelled(), reference)
            },
            ActiveState::CurrentActive => distance(origin.reference_travelled(), reference),
            ActiveState::AfterActive => 0.0,
        }
    }

    /// Length of the leg between the nominal turnpoint locations, whatever
    /// the progress of the flight.
    pub fn distance_nominal(&self, points: &[OrderedTaskPoint]) -> f64 {
        let (origin, destination) = self.ends(points);
        distance(origin.reference_nominal(), destination.reference_nominal())
    }

    pub fn bearing_remaining(&self, points: &[OrderedTaskPoint], reference: Point) -> f64 {
        let (origin, destination) = self.ends(points);

        match destination.active_state() {
            ActiveState::BeforeActive => 0.0,
            ActiveState::CurrentActive => bearing(reference, destination.reference_remaining()),
            ActiveState::AfterActive => bearing(origin.reference_remaining(), destination.reference_remaining()),
        }
    }

    pub fn bearing_travelled(&self, points: &[OrderedTaskPoint], reference: Point) -> f64 {
        let (origin, destination) = self.ends(points);

        match destination.active_state() {
            ActiveState::BeforeActive => bearing(origin.reference_travelled(), destination.reference_travelled()),
            ActiveState::CurrentActive => bearing(origin.reference_travelled(), reference),
            ActiveState::AfterActive => 0.0,
        }
    }

    /// Rebuilds the geometry of both endpoints.
    pub fn update_geometry(&self, points: &mut [OrderedTaskPoint]) {
        points[self.origin].update_geometry();
        points[self.destination].update_geometry();
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::geodesy::destination;
    use crate::shape::Cylinder;
    use crate::task::AircraftState;

    use super::*;

    const TOLERANCE: f64 = 0.5;

    fn origin() -> Point {
        Point::new(7.0, 51.0)
    }

    /// Two turnpoints 20km apart, due east.
    fn make_points(adjustment: f64) -> (Vec<OrderedTaskPoint>, TaskLeg) {
        let a = Cylinder::new(origin(), 500.0).unwrap();
        let b = Cylinder::new(destination(origin(), 90.0, 20_000.0), 500.0).unwrap();

        let mut points = vec![
            OrderedTaskPoint::new("A", Arc::new(a), false, adjustment),
            OrderedTaskPoint::new("B", Arc::new(b), false, adjustment),
        ];
        let leg = TaskLeg::new(0, 0, 1, &mut points).unwrap();

        (points, leg)
    }

    fn set_destination_state(points: &mut [OrderedTaskPoint], state: ActiveState) {
        points[1].set_active_state(state);
    }

    #[test]
    fn construction_links_both_ends() {
        let (points, leg) = make_points(0.0);

        assert_eq!(leg.origin(), 0);
        assert_eq!(leg.destination(), 1);
        assert_eq!(points[0].leg_out(), Some(0));
        assert_eq!(points[0].leg_in(), None);
        assert_eq!(points[1].leg_in(), Some(0));
        assert_eq!(points[1].leg_out(), None);
    }

    #[test]
    fn construction_rejects_bad_ends() {
        let (mut points, _) = make_points(0.0);

        assert!(TaskLeg::new(1, 0, 0, &mut points).is_err());
        assert!(TaskLeg::new(1, 0, 2, &mut points).is_err());
    }

    #[test]
    fn destination_behind() {
        let (mut points, leg) = make_points(0.0);
        set_destination_state(&mut points, ActiveState::BeforeActive);
        let aircraft = destination(origin(), 90.0, 30_000.0);

        assert!((leg.distance_scored(&points, aircraft) - 20_000.0).abs() < TOLERANCE);
        assert_eq!(leg.distance_remaining(&points, aircraft), 0.0);
        assert!((leg.distance_travelled(&points, aircraft) - 20_000.0).abs() < TOLERANCE);
        assert_eq!(leg.bearing_remaining(&points, aircraft), 0.0);
        assert!((leg.bearing_travelled(&points, aircraft) - 90.0).abs() < 0.01);
    }

    #[test]
    fn destination_ahead() {
        let (mut points, leg) = make_points(0.0);
        set_destination_state(&mut points, ActiveState::AfterActive);
        let aircraft = destination(origin(), 0.0, 10_000.0);

        assert_eq!(leg.distance_scored(&points, aircraft), 0.0);
        assert!((leg.distance_remaining(&points, aircraft) - 20_000.0).abs() < TOLERANCE);
        assert_eq!(leg.distance_travelled(&points, aircraft), 0.0);
        assert!((leg.bearing_remaining(&points, aircraft) - 90.0).abs() < 0.01);
        assert_eq!(leg.bearing_travelled(&points, aircraft), 0.0);
    }

    #[test]
    fn destination_active() {
        let (mut points, leg) = make_points(0.0);
        set_destination_state(&mut points, ActiveState::CurrentActive);
        let aircraft = destination(origin(), 90.0, 8_000.0);

        assert!((leg.distance_scored(&points, aircraft) - 8_000.0).abs() < 1.0);
        assert!((leg.distance_remaining(&points, aircraft) - 12_000.0).abs() < 1.0);
        assert!((leg.distance_travelled(&points, aircraft) - 8_000.0).abs() < TOLERANCE);
        assert!((leg.bearing_remaining(&points, aircraft) - 90.0).abs() < 0.2);
        assert!((leg.bearing_travelled(&points, aircraft) - 90.0).abs() < 0.01);
    }

    #[test]
    fn destination_active_and_entered() {
        let (mut points, leg) = make_points(0.0);
        set_destination_state(&mut points, ActiveState::CurrentActive);

        let entry = destination(points[1].location(), 270.0, 400.0);
        points[1].update_sample(&AircraftState::new(entry));
        assert!(points[1].has_entered());

        let aircraft = destination(points[1].location(), 0.0, 3_000.0);
        let expected = distance(points[0].reference_travelled(), entry) + distance(entry, aircraft);

        assert!((leg.distance_travelled(&points, aircraft) - expected).abs() < 1e-6);
    }

    #[test]
    fn adjustments_never_go_negative() {
        let (mut points, leg) = make_points(15_000.0);
        let aircraft = destination(origin(), 90.0, 5_000.0);

        set_destination_state(&mut points, ActiveState::BeforeActive);
        assert_eq!(leg.distance_scored(&points, aircraft), 0.0);

        set_destination_state(&mut points, ActiveState::CurrentActive);
        assert_eq!(leg.distance_scored(&points, aircraft), 0.0);

        let (mut points, leg) = make_points(1_000.0);
        set_destination_state(&mut points, ActiveState::BeforeActive);
        assert!((leg.distance_scored(&points, aircraft) - 18_000.0).abs() < TOLERANCE);
    }

    #[test]
    fn nominal_ignores_state() {
        let (mut points, leg) = make_points(0.0);

        for state in [ActiveState::BeforeActive, ActiveState::CurrentActive, ActiveState::AfterActive] {
            set_destination_state(&mut points, state);
            assert!((leg.distance_nominal(&points) - 20_000.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn geometry_fans_out_to_both_ends() {
        let (mut points, leg) = make_points(0.0);
        for tp in &mut points {
            tp.sampled_mut().clear_boundary_points();
        }

        leg.update_geometry(&mut points);

        assert_eq!(points[0].sampled().get_boundary_points().len(), 1);
        assert_eq!(points[1].sampled().get_boundary_points().len(), 1);
    }
}
