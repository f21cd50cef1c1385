use std::fmt::{self, Write};

use anyhow::Result;

use crate::replay::ReplayData;
use crate::task::{OrderedTask, TaskLeg};


fn write_leg(f: &mut impl Write, task: &OrderedTask, i: usize, leg: &TaskLeg, reference: geo::Point) -> fmt::Result {
    let points = task.points();
    let origin = &points[leg.origin()];
    let destination = &points[leg.destination()];

    writeln!(
        f,
        "{i:>3}  {:<12} {:<12} {:>14} {:>10.0} {:>10.0} {:>10.0} {:>10.0} {:>8.1} {:>8.1}",
        origin.name(),
        destination.name(),
        format!("{:?}", destination.active_state()),
        leg.distance_nominal(points),
        leg.distance_scored(points, reference),
        leg.distance_remaining(points, reference),
        leg.distance_travelled(points, reference),
        leg.bearing_remaining(points, reference),
        leg.bearing_travelled(points, reference),
    )
}

fn write_report(f: &mut impl Write, data: &ReplayData) -> fmt::Result {
    let task = &data.task;

    writeln!(f, "# Task")?;
    writeln!(f, "#   {} turnpoints, nominal {:.0} m", task.points().len(), task.distance_nominal())?;
    writeln!(f, "#   {} fixes replayed", data.track.len())?;
    writeln!(f, "#   {} fixes grew a sample hull", data.steps.iter().filter(|step| step.changed).count())?;
    writeln!(f)?;

    let Some(last) = data.track.last() else {
        return Ok(());
    };

    if let Some(step) = data.last_step() {
        writeln!(f, "# Last fix at t={}", step.time)?;
        writeln!(f, "#   scored {:.0} m, remaining {:.0} m, travelled {:.0} m", step.scored, step.remaining, step.travelled)?;
        writeln!(f, "#   active turnpoint {}: {:.0} m at {:.1} deg", step.active, step.vector.distance, step.vector.bearing)?;
        writeln!(f)?;
    }

    writeln!(f, "# Legs")?;
    writeln!(
        f,
        "{:>3}  {:<12} {:<12} {:>14} {:>10} {:>10} {:>10} {:>10} {:>8} {:>8}",
        "#", "from", "to", "state", "nominal", "scored", "remaining", "travelled", "brg rem", "brg trv",
    )?;
    for (i, leg) in task.legs().iter().enumerate() {
        write_leg(f, task, i, leg, last.location)?;
    }
    writeln!(f)?;

    for tp in task.points() {
        writeln!(f, "# Turnpoint {} ({:?}, entered: {})", tp.name(), tp.active_state(), tp.has_entered())?;
        tp.sampled().write_boundary(f)?;
        tp.sampled().write_samples(f)?;
    }

    Ok(())
}

/// Renders the leg table and the point dumps as plain text.
pub fn make_report(data: &ReplayData) -> Result<String> {
    let mut report = String::new();
    write_report(&mut report, data)?;
    Ok(report)
}
