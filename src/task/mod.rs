mod leg;
mod point;
mod sampled;
mod state;

use anyhow::{ensure, Result};
use geo::Point;
use log::{debug, info};

use crate::geodesy::distance;
use crate::projection::TaskProjection;

pub use leg::*;
pub use point::*;
pub use sampled::*;
pub use state::*;


/// Read access to whichever turnpoint the aircraft is currently heading for.
pub trait TaskInterface {
    fn active_task_point(&self) -> Option<&OrderedTaskPoint>;

    /// Distance and bearing from the aircraft to the active turnpoint.
    fn active_vector(&self, state: &AircraftState) -> GeoVector {
        match self.active_task_point() {
            Some(tp) => tp.vector_remaining(state.location),
            None => GeoVector::default(),
        }
    }
}


/// Owns the turnpoints and the legs between them.
///
/// Legs refer to turnpoints by position, turnpoints refer back to their
/// incoming and outgoing legs the same way. Exactly one turnpoint is
/// `CurrentActive` at any time.
#[derive(Clone, Debug)]
pub struct OrderedTask {
    points: Vec<OrderedTaskPoint>,
    legs: Vec<TaskLeg>,
    active: usize,
    projection: TaskProjection,
    auto_advance: bool,
    last_state: Option<AircraftState>,
}

impl OrderedTask {
    pub fn new(mut points: Vec<OrderedTaskPoint>) -> Result<Self> {
        ensure!(points.len() >= 2, "A task needs at least two turnpoints, got {}", points.len());

        let mut legs = Vec::with_capacity(points.len() - 1);
        for i in 0..points.len() - 1 {
            legs.push(TaskLeg::new(i, i, i + 1, &mut points)?);
        }

        let mut task = Self {
            points,
            legs,
            active: 0,
            projection: TaskProjection::default(),
            auto_advance: false,
            last_state: None,
        };

        task.update_geometry();
        task.activate(0);

        Ok(task)
    }

    /// Moves on to the next turnpoint as soon as the active one is entered.
    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    pub fn points(&self) -> &[OrderedTaskPoint] {
        &self.points
    }

    pub fn legs(&self) -> &[TaskLeg] {
        &self.legs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn projection(&self) -> &TaskProjection {
        &self.projection
    }

    pub fn last_state(&self) -> Option<&AircraftState> {
        self.last_state.as_ref()
    }

    pub fn set_active(&mut self, index: usize) -> Result<()> {
        ensure!(index < self.points.len(), "Turnpoint {index} is out of range ({} turnpoints)", self.points.len());
        self.activate(index);
        Ok(())
    }

    fn activate(&mut self, index: usize) {
        if index < self.active {
            if let Some(last) = self.last_state {
                for tp in &mut self.points[index + 1..] {
                    tp.clear_sample_all_but_last(&last);
                }
            }
        }

        for (i, tp) in self.points.iter_mut().enumerate() {
            tp.set_active_state(match i.cmp(&index) {
                std::cmp::Ordering::Less => ActiveState::BeforeActive,
                std::cmp::Ordering::Equal => ActiveState::CurrentActive,
                std::cmp::Ordering::Greater => ActiveState::AfterActive,
            });
        }

        self.active = index;
        debug!("Turnpoint {index} ({}) is active", self.points[index].name());
    }

    /// Feeds a fix to every turnpoint up to the active one. Returns whether
    /// any sample set changed.
    pub fn update_sample(&mut self, state: &AircraftState) -> bool {
        let active = self.active;

        let mut changed = false;
        for tp in &mut self.points[..=active] {
            changed |= tp.update_sample(state);
        }

        self.last_state = Some(*state);

        if self.auto_advance && active + 1 < self.points.len() && self.points[active].has_entered() {
            info!("Turnpoint {active} ({}) achieved at t={}", self.points[active].name(), state.time);
            self.activate(active + 1);
        }

        changed
    }

    /// Re-centres the projection on the turnpoints and rebuilds every
    /// turnpoint's geometry.
    pub fn update_geometry(&mut self) {
        if let Some(projection) = TaskProjection::from_locations(self.points.iter().map(OrderedTaskPoint::location)) {
            self.projection = projection;
        }

        for tp in &mut self.points {
            tp.update_projection(&self.projection);
        }

        for leg in &self.legs {
            leg.update_geometry(&mut self.points);
        }
    }

    /// Refreshes the scored and remaining markers of every turnpoint.
    ///
    /// Greedy: each turnpoint's scored marker is the search point farthest
    /// from the previous turnpoint's scored reference (the first turnpoint
    /// looks at the second one's location instead). From the active turnpoint
    /// on, the remaining marker is the boundary point nearest to the next
    /// turnpoint.
    pub fn scan_extrema(&mut self, cheat: bool) {
        let n = self.points.len();

        for i in 0..n {
            let anchor = match i {
                0 => self.points[1].location(),
                _ => self.points[i - 1].reference_scored(),
            };

            let farthest = self.points[i].sampled()
                .get_search_points(cheat)
                .iter()
                .max_by(|a, b| distance(anchor, a.location()).total_cmp(&distance(anchor, b.location())))
                .cloned();

            if let Some(sp) = farthest {
                self.points[i].sampled_mut().set_search_max(sp);
            }

            if i < self.active || i + 1 == n {
                continue;
            }

            let next = self.points[i + 1].location();
            let nearest = self.points[i].sampled()
                .get_boundary_points()
                .iter()
                .min_by(|a, b| distance(next, a.location()).total_cmp(&distance(next, b.location())))
                .cloned();

            if let Some(sp) = nearest {
                self.points[i].sampled_mut().set_search_min(sp);
            }
        }
    }

    /// Forgets the flight: samples and entries are dropped and the first
    /// turnpoint becomes active again.
    pub fn reset(&mut self) {
        for tp in &mut self.points {
            tp.clear_samples();
        }

        self.last_state = None;
        self.active = 0;
        self.activate(0);
    }

    pub fn distance_scored(&self, reference: Point) -> f64 {
        self.legs.iter().map(|leg| leg.distance_scored(&self.points, reference)).sum()
    }

    pub fn distance_remaining(&self, reference: Point) -> f64 {
        self.legs.iter().map(|leg| leg.distance_remaining(&self.points, reference)).sum()
    }

    pub fn distance_travelled(&self, reference: Point) -> f64 {
        self.legs.iter().map(|leg| leg.distance_travelled(&self.points, reference)).sum()
    }

    pub fn distance_nominal(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_nominal(&self.points)).sum()
    }
}

impl TaskInterface for OrderedTask {
    fn active_task_point(&self) -> Option<&OrderedTaskPoint> {
        self.points.get(self.active)
    }
}
