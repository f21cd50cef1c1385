use std::path::PathBuf;

use geo::Point;
use serde::Deserialize;

use crate::task::AircraftState;

#[derive(Debug, Deserialize, PartialEq)]
pub enum ZoneKind {
    Cylinder { radius: f64 },
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Location {
    pub lon: f64,
    pub lat: f64,
}

impl From<Location> for Point {
    fn from(location: Location) -> Self {
        Point::new(location.lon, location.lat)
    }
}

#[derive(Debug, Deserialize)]
pub struct TurnpointConfig {
    pub name: String,
    pub location: Location,
    pub zone: ZoneKind,
    /// Whether the whole zone boundary counts for scoring.
    #[serde(default)]
    pub boundary_scored: bool,
    #[serde(default)]
    pub score_adjustment: f64,
}

#[derive(Debug, Deserialize)]
pub struct FixConfig {
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub altitude: f64,
}

impl From<&FixConfig> for AircraftState {
    fn from(fix: &FixConfig) -> Self {
        AircraftState {
            location: Point::new(fix.lon, fix.lat),
            time: fix.time,
            altitude: fix.altitude,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReplayOptions {
    /// Score turnpoints that were never reached at their nominal location.
    pub cheat: bool,
    pub auto_advance: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            cheat: false,
            auto_advance: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReplayConfig {
    pub name: String,
    pub outdir: PathBuf,
    #[serde(default)]
    pub replay: ReplayOptions,
    pub task: Vec<TurnpointConfig>,
    pub fixes: Vec<FixConfig>,
}
