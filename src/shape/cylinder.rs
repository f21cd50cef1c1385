use anyhow::{ensure, Result};
use geo::Point;

use crate::geodesy::{destination, distance};

use super::ObservationZone;


#[derive(Clone, Debug)]
pub struct Cylinder {
    center: Point,
    radius: f64,
}

impl Cylinder {
    pub fn new(center: Point, radius: f64) -> Result<Self> {
        ensure!(radius > 0.0, "Cylinder radius should be positive, got {radius}");
        Ok(Self {
            center,
            radius,
        })
    }
}

impl ObservationZone for Cylinder {
    fn location(&self) -> Point {
        self.center
    }

    fn is_in_sector(&self, location: Point) -> bool {
        distance(self.center, location) <= self.radius
    }

    fn boundary_parametric(&self, t: f64) -> Point {
        destination(self.center, 360.0 * t, self.radius)
    }
}
