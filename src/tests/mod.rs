mod properties;

use std::path::Path;

use anyhow::{ensure, Result};
use geo::Point;

use crate::{config::ReplayConfig, io::{report::make_report, svg_output::make_svg}, replay::ReplayData};

pub const OUTDIR: &'_ str = "tmp/test-output/";

fn ensure_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    ensure!(dir.is_dir(), "{dir:?} should be a directory");
    Ok(())
}

pub fn init_test_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .format_timestamp(None)
        .format_target(false)
        .is_test(true)
        .try_init();
}

/// Replays `yaml` and leaves the report and the overview in `OUTDIR`.
pub fn run(name: &str, yaml: &str) -> Result<ReplayData> {
    init_test_logger();
    ensure_dir(&OUTDIR)?;

    let config: ReplayConfig = serde_norway::from_str(yaml)?;
    let data = ReplayData::from_config(&config)?;

    let report = Path::new(OUTDIR).join(format!("replay-{name}")).with_extension("txt");
    std::fs::write(report, make_report(&data)?)?;

    let overview = Path::new(OUTDIR).join(format!("replay-{name}")).with_extension("svg");
    svg::save(overview, &make_svg(&data))?;

    Ok(data)
}

pub fn make_fixes(locations: impl IntoIterator<Item = Point>) -> String {
    let mut yaml = String::from("fixes:\n");

    for (i, p) in locations.into_iter().enumerate() {
        yaml.push_str(&format!("  - {{ lon: {}, lat: {}, time: {}, altitude: 1000 }}\n", p.x(), p.y(), i * 4));
    }

    yaml
}
