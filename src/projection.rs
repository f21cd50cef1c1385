use geo::{BoundingRect, Coord, MultiPoint, Point};

use crate::geodesy::EARTH_RADIUS;

const METRES_PER_DEGREE: f64 = EARTH_RADIUS * std::f64::consts::PI / 180.0;


/// Flattens geographic locations into a local planar frame, in metres,
/// centred on the task.
///
/// Longitude maps to `x` (east), latitude to `y` (north). The east-west scale
/// is fixed at the centre latitude, which is accurate enough for the few
/// hundred kilometres a task spans.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaskProjection {
    center: Point,
    scale_x: f64,
    scale_y: f64,
}

impl TaskProjection {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            scale_x: METRES_PER_DEGREE * center.y().to_radians().cos(),
            scale_y: METRES_PER_DEGREE,
        }
    }

    /// Centres a projection on the bounding box of `locations`.
    pub fn from_locations(locations: impl IntoIterator<Item = Point>) -> Option<Self> {
        let points: MultiPoint = locations.into_iter().collect();
        let rect = points.bounding_rect()?;

        Some(Self::new(rect.center().into()))
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn project(&self, location: Point) -> Coord {
        Coord {
            x: (location.x() - self.center.x()) * self.scale_x,
            y: (location.y() - self.center.y()) * self.scale_y,
        }
    }
}

impl Default for TaskProjection {
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0))
    }
}
