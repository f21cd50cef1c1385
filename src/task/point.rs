use std::sync::Arc;

use geo::Point;
use log::debug;

use crate::geodesy::{bearing, distance};
use crate::projection::TaskProjection;
use crate::shape::ObservationZone;

use super::{ActiveState, AircraftState, GeoVector, SampledTaskPoint};


/// A turnpoint in its place within an ordered task.
///
/// Supplies the activation state and the reference locations that
/// [`super::TaskLeg`] measures between:
///
/// - nominal: the zone's own location;
/// - scored: the `search_max` marker of the samples;
/// - remaining: the `search_min` marker;
/// - travelled: the first fix recorded inside the zone, or nominal until then.
#[derive(Clone, Debug)]
pub struct OrderedTaskPoint {
    name: String,
    sampled: SampledTaskPoint,
    active_state: ActiveState,
    entered: Option<Point>,
    score_adjustment: f64,
    leg_in: Option<usize>,
    leg_out: Option<usize>,
}

impl OrderedTaskPoint {
    pub fn new(name: impl Into<String>, zone: Arc<dyn ObservationZone>, boundary_scored: bool, score_adjustment: f64) -> Self {
        Self {
            name: name.into(),
            sampled: SampledTaskPoint::new(zone, TaskProjection::default(), boundary_scored),
            active_state: ActiveState::AfterActive,
            entered: None,
            score_adjustment,
            leg_in: None,
            leg_out: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Point {
        self.sampled.location()
    }

    pub fn sampled(&self) -> &SampledTaskPoint {
        &self.sampled
    }

    pub fn sampled_mut(&mut self) -> &mut SampledTaskPoint {
        &mut self.sampled
    }

    pub fn active_state(&self) -> ActiveState {
        self.active_state
    }

    pub(super) fn set_active_state(&mut self, state: ActiveState) {
        self.active_state = state;
    }

    pub fn has_entered(&self) -> bool {
        self.entered.is_some()
    }

    /// Metres taken off the scored distance of both legs touching this point.
    pub fn score_adjustment(&self) -> f64 {
        self.score_adjustment
    }

    pub fn leg_in(&self) -> Option<usize> {
        self.leg_in
    }

    pub fn leg_out(&self) -> Option<usize> {
        self.leg_out
    }

    pub(super) fn set_leg_in(&mut self, leg: usize) {
        self.leg_in = Some(leg);
    }

    pub(super) fn set_leg_out(&mut self, leg: usize) {
        self.leg_out = Some(leg);
    }

    pub fn reference_nominal(&self) -> Point {
        self.location()
    }

    pub fn reference_scored(&self) -> Point {
        self.sampled.search_max().location()
    }

    pub fn reference_remaining(&self) -> Point {
        self.sampled.search_min().location()
    }

    pub fn reference_travelled(&self) -> Point {
        self.entered.unwrap_or_else(|| self.location())
    }

    pub fn update_sample(&mut self, state: &AircraftState) -> bool {
        if self.entered.is_none() && self.sampled.is_in_sector(state) {
            debug!("Entered {} at {:?}", self.name, state.location.x_y());
            self.entered = Some(state.location);
        }

        self.sampled.update_sample(state)
    }

    /// Forgets how this point was flown, except for `last` if it lies in the
    /// zone.
    pub fn clear_sample_all_but_last(&mut self, last: &AircraftState) {
        self.sampled.clear_sample_all_but_last(last);

        self.entered = match self.sampled.get_sample_points() {
            [] => None,
            _ => Some(last.location),
        };
    }

    pub fn clear_samples(&mut self) {
        self.sampled.clear_sample_points();
        self.entered = None;
    }

    pub fn update_projection(&mut self, projection: &TaskProjection) {
        self.sampled.update_projection(projection);
    }

    /// Rebuilds the boundary from the zone shape.
    pub fn update_geometry(&mut self) {
        self.sampled.clear_boundary_points();
        self.sampled.default_boundary_points();
        self.sampled.prune_boundary_points();
    }

    pub fn vector_remaining(&self, reference: Point) -> GeoVector {
        let target = self.reference_remaining();
        GeoVector::new(distance(reference, target), bearing(reference, target))
    }
}


#[cfg(test)]
mod tests {
    use crate::geodesy::destination;
    use crate::shape::Cylinder;

    use super::*;

    fn make_tp() -> OrderedTaskPoint {
        let zone = Cylinder::new(Point::new(7.0, 51.0), 500.0).unwrap();
        OrderedTaskPoint::new("TP1", Arc::new(zone), true, 0.0)
    }

    #[test]
    fn references_before_entry() {
        let tp = make_tp();

        assert!(!tp.has_entered());
        assert_eq!(tp.reference_nominal(), tp.location());
        assert_eq!(tp.reference_scored(), tp.location());
        assert_eq!(tp.reference_remaining(), tp.location());
        assert_eq!(tp.reference_travelled(), tp.location());
    }

    #[test]
    fn entry_sets_travelled_reference() {
        let mut tp = make_tp();

        let outside = AircraftState::new(destination(tp.location(), 90.0, 800.0));
        assert!(!tp.update_sample(&outside));
        assert!(!tp.has_entered());

        let first = AircraftState::new(destination(tp.location(), 90.0, 400.0));
        let second = AircraftState::new(destination(tp.location(), 180.0, 300.0));
        assert!(tp.update_sample(&first));
        assert!(tp.update_sample(&second));

        assert!(tp.has_entered());
        assert_eq!(tp.reference_travelled(), first.location);
    }

    #[test]
    fn retraction_keeps_entry_only_when_inside() {
        let mut tp = make_tp();
        tp.update_sample(&AircraftState::new(destination(tp.location(), 90.0, 400.0)));

        let last = AircraftState::new(destination(tp.location(), 0.0, 100.0));
        tp.clear_sample_all_but_last(&last);
        assert!(tp.has_entered());
        assert_eq!(tp.reference_travelled(), last.location);

        tp.clear_sample_all_but_last(&AircraftState::new(destination(tp.location(), 0.0, 900.0)));
        assert!(!tp.has_entered());
    }

    #[test]
    fn geometry_update_rebuilds_boundary() {
        let mut tp = make_tp();
        tp.sampled_mut().clear_boundary_points();
        assert!(tp.sampled().get_boundary_points().is_empty());

        tp.update_geometry();
        assert_eq!(tp.sampled().get_boundary_points().len(), 20);
    }

    #[test]
    fn remaining_vector() {
        let tp = make_tp();
        let aircraft = destination(tp.location(), 270.0, 5_000.0);

        let v = tp.vector_remaining(aircraft);
        assert!((v.distance - 5_000.0).abs() < 0.5);
        assert!((v.bearing - 90.0).abs() < 0.1);
    }
}
