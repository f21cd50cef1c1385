use std::borrow::Cow;
use std::fmt::{self, Write};
use std::sync::Arc;

use geo::{Coord, Point};
use log::debug;

use crate::hull::{hull_contains, GrahamScan, Planar};
use crate::projection::TaskProjection;
use crate::shape::ObservationZone;

use super::AircraftState;

/// Parametric step used to sample boundary-scored zones.
const BOUNDARY_STEP: f64 = 0.05;


/// A location together with its position in the task's planar frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchPoint {
    location: Point,
    flat: Coord,
    from_fix: bool,
}

impl SearchPoint {
    pub fn new(location: Point, projection: &TaskProjection) -> Self {
        Self {
            location,
            flat: projection.project(location),
            from_fix: false,
        }
    }

    /// A point recorded from an aircraft fix rather than from the zone shape.
    pub fn from_fix(location: Point, projection: &TaskProjection) -> Self {
        Self {
            from_fix: true,
            ..Self::new(location, projection)
        }
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn is_from_fix(&self) -> bool {
        self.from_fix
    }

    pub fn project(&mut self, projection: &TaskProjection) {
        self.flat = projection.project(self.location);
    }
}

impl Planar for SearchPoint {
    fn flat(&self) -> Coord {
        self.flat
    }
}


/// Per-turnpoint sample store.
///
/// `boundary_points` approximate the zone outline, `sampled_points` are the
/// convex hull of every fix recorded inside the zone. Once any fix has been
/// recorded, the samples replace the boundary as the turnpoint's search
/// points.
#[derive(Clone, Debug)]
pub struct SampledTaskPoint {
    zone: Arc<dyn ObservationZone>,
    projection: TaskProjection,
    boundary_scored: bool,
    boundary_points: Vec<SearchPoint>,
    sampled_points: Vec<SearchPoint>,
    search_max: SearchPoint,
    search_min: SearchPoint,
}

impl SampledTaskPoint {
    pub fn new(zone: Arc<dyn ObservationZone>, projection: TaskProjection, boundary_scored: bool) -> Self {
        let nominal = SearchPoint::new(zone.location(), &projection);

        let mut tp = Self {
            zone,
            projection,
            boundary_scored,
            boundary_points: vec![],
            sampled_points: vec![],
            search_max: nominal.clone(),
            search_min: nominal,
        };

        tp.default_boundary_points();
        tp
    }

    pub fn location(&self) -> Point {
        self.zone.location()
    }

    pub fn is_in_sector(&self, state: &AircraftState) -> bool {
        self.zone.is_in_sector(state.location)
    }

    pub fn projection(&self) -> &TaskProjection {
        &self.projection
    }

    /// Records `state` if it lies in the zone and outside the current sample
    /// hull. Returns whether the sample set changed.
    pub fn update_sample(&mut self, state: &AircraftState) -> bool {
        if !self.is_in_sector(state) {
            return false;
        }

        let flat = self.projection.project(state.location);
        if hull_contains(flat, &self.sampled_points) {
            return false;
        }

        self.sampled_points.push(SearchPoint::from_fix(state.location, &self.projection));
        self.prune_sample_points();

        debug!("Sample hull grew to {} points", self.sampled_points.len());

        true
    }

    /// Reduces the samples to their hull. Samples that all lie on one line
    /// collapse to its two ends, or to one point if they coincide.
    pub fn prune_sample_points(&mut self) -> bool {
        let scan = GrahamScan::new(&self.sampled_points);
        let before = self.sampled_points.len();

        if let Some(extent) = scan.collinear_extent() {
            self.sampled_points = extent;
            return self.sampled_points.len() < before;
        }

        let (pruned, changed) = scan.prune_interior();
        self.sampled_points = pruned;
        changed
    }

    pub fn prune_boundary_points(&mut self) -> bool {
        let (pruned, changed) = GrahamScan::new(&self.boundary_points).prune_interior();
        self.boundary_points = pruned;
        changed
    }

    pub fn get_boundary_points(&self) -> &[SearchPoint] {
        &self.boundary_points
    }

    pub fn get_sample_points(&self) -> &[SearchPoint] {
        &self.sampled_points
    }

    /// Points to search when optimising this turnpoint: the samples if any
    /// were recorded, the boundary otherwise.
    ///
    /// With `cheat`, a turnpoint without samples yields its nominal location
    /// instead, as if it had been reached dead centre. Scores computed from
    /// such a point are optimistic and only provisional.
    pub fn get_search_points(&self, cheat: bool) -> Cow<'_, [SearchPoint]> {
        if !self.sampled_points.is_empty() {
            return Cow::Borrowed(&self.sampled_points);
        }

        if cheat {
            return Cow::Owned(vec![SearchPoint::new(self.location(), &self.projection)]);
        }

        Cow::Borrowed(&self.boundary_points)
    }

    /// Re-projects every stored point onto `projection`.
    pub fn update_projection(&mut self, projection: &TaskProjection) {
        self.projection = *projection;

        for sp in self.sampled_points.iter_mut().chain(self.boundary_points.iter_mut()) {
            sp.project(projection);
        }

        self.search_max.project(projection);
        self.search_min.project(projection);
    }

    pub fn default_boundary_points(&mut self) {
        if !self.boundary_scored {
            self.boundary_points.push(SearchPoint::new(self.location(), &self.projection));
            return;
        }

        let steps = (1.0 / BOUNDARY_STEP).round() as usize;
        for i in 0..steps {
            let location = self.zone.boundary_parametric(i as f64 * BOUNDARY_STEP);
            self.boundary_points.push(SearchPoint::new(location, &self.projection));
        }
    }

    /// Drops all samples but keeps `last` if it still lies in the zone.
    pub fn clear_sample_all_but_last(&mut self, last: &AircraftState) {
        if self.sampled_points.is_empty() {
            return;
        }

        self.sampled_points.clear();
        self.update_sample(last);
    }

    pub fn clear_boundary_points(&mut self) {
        self.boundary_points.clear();

        let nominal = SearchPoint::new(self.location(), &self.projection);
        self.search_max = nominal.clone();
        self.search_min = nominal;
    }

    pub fn clear_sample_points(&mut self) {
        self.sampled_points.clear();
    }

    pub fn search_max(&self) -> &SearchPoint {
        &self.search_max
    }

    pub fn search_min(&self) -> &SearchPoint {
        &self.search_min
    }

    pub fn set_search_max(&mut self, sp: SearchPoint) {
        self.search_max = sp;
    }

    pub fn set_search_min(&mut self, sp: SearchPoint) {
        self.search_min = sp;
    }

    pub fn write_boundary(&self, f: &mut impl Write) -> fmt::Result {
        writeln!(f, "#   Boundary points")?;
        write_points(f, &self.boundary_points)
    }

    pub fn write_samples(&self, f: &mut impl Write) -> fmt::Result {
        writeln!(f, "#   Search points")?;
        write_points(f, &self.get_search_points(false))
    }
}

fn write_points(f: &mut impl Write, points: &[SearchPoint]) -> fmt::Result {
    for sp in points {
        let (lon, lat) = sp.location().x_y();
        writeln!(f, "     {lon} {lat}")?;
    }
    writeln!(f)
}
