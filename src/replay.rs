use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::config::{ReplayConfig, ReplayOptions, TurnpointConfig, ZoneKind};
use crate::shape::{Cylinder, ObservationZone};
use crate::task::{AircraftState, GeoVector, OrderedTask, OrderedTaskPoint, TaskInterface};


/// Task state right after one fix was processed.
#[derive(Clone, Debug)]
pub struct ReplayStep {
    pub time: f64,
    pub active: usize,
    pub changed: bool,
    pub scored: f64,
    pub remaining: f64,
    pub travelled: f64,
    pub vector: GeoVector,
}

#[derive(Debug)]
pub struct ReplayData {
    pub task: OrderedTask,
    pub track: Vec<AircraftState>,
    pub steps: Vec<ReplayStep>,
}

impl ReplayData {
    pub fn new(options: &ReplayOptions, mut task: OrderedTask, track: Vec<AircraftState>) -> Self {
        let mut steps = Vec::with_capacity(track.len());

        task.scan_extrema(options.cheat);

        for (i, state) in track.iter().enumerate() {
            let active = task.active_index();
            let changed = task.update_sample(state);

            if changed || task.active_index() != active {
                task.scan_extrema(options.cheat);
            }

            if task.active_index() != active {
                info!("Fix {i:04} - heading for {}", task.points()[task.active_index()].name());
            }

            let step = ReplayStep {
                time: state.time,
                active: task.active_index(),
                changed,
                scored: task.distance_scored(state.location),
                remaining: task.distance_remaining(state.location),
                travelled: task.distance_travelled(state.location),
                vector: task.active_vector(state),
            };

            debug!("Fix {i:04} - {step:?}");
            steps.push(step);
        }

        Self {
            task,
            track,
            steps,
        }
    }

    pub fn from_config(config: &ReplayConfig) -> Result<Self> {
        let task = make_task(&config.task)?.with_auto_advance(config.replay.auto_advance);

        if config.fixes.is_empty() {
            warn!("Task {} has no fixes to replay", config.name);
        }

        let track = config.fixes.iter().map(AircraftState::from).collect();

        Ok(Self::new(&config.replay, task, track))
    }

    pub fn last_step(&self) -> Option<&ReplayStep> {
        self.steps.last()
    }
}

fn make_zone(tp: &TurnpointConfig) -> Result<Arc<dyn ObservationZone>> {
    match tp.zone {
        ZoneKind::Cylinder { radius } => {
            let zone = Cylinder::new(tp.location.into(), radius)
                .with_context(|| format!("Turnpoint {}", tp.name))?;
            Ok(Arc::new(zone))
        },
    }
}

pub fn make_task(turnpoints: &[TurnpointConfig]) -> Result<OrderedTask> {
    let mut points = Vec::with_capacity(turnpoints.len());

    for tp in turnpoints {
        let zone = make_zone(tp)?;
        points.push(OrderedTaskPoint::new(&tp.name, zone, tp.boundary_scored, tp.score_adjustment));
    }

    let task = OrderedTask::new(points)?;

    info!("Task with {} turnpoints, nominal distance {:.0} m", task.points().len(), task.distance_nominal());

    Ok(task)
}
