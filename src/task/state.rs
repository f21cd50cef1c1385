use anyhow::{bail, Error, Result};
use geo::Point;


/// Where a turnpoint lies relative to the currently active one.
///
/// `BeforeActive` turnpoints have already been achieved, `AfterActive` ones
/// are still ahead of the aircraft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveState {
    BeforeActive,
    CurrentActive,
    AfterActive,
}

impl TryFrom<u8> for ActiveState {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::BeforeActive),
            1 => Ok(Self::CurrentActive),
            2 => Ok(Self::AfterActive),
            v => bail!("Unknown activation state {v}"),
        }
    }
}


#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AircraftState {
    pub location: Point,
    /// Seconds since the start of the recording.
    pub time: f64,
    /// Metres above mean sea level.
    pub altitude: f64,
}

impl AircraftState {
    pub fn new(location: Point) -> Self {
        Self {
            location,
            time: 0.0,
            altitude: 0.0,
        }
    }
}


/// Distance in metres and bearing in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoVector {
    pub distance: f64,
    pub bearing: f64,
}

impl GeoVector {
    pub fn new(distance: f64, bearing: f64) -> Self {
        Self {
            distance,
            bearing,
        }
    }
}
