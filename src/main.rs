pub mod config;
pub mod geodesy;
pub mod hull;
pub mod io;
pub mod projection;
pub mod replay;
pub mod shape;
pub mod task;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use config::ReplayConfig;
use log::{error, info};
use replay::ReplayData;

use crate::{io::report::make_report, io::svg_output::make_svg};


#[derive(Parser)]
pub struct Args {
    /// Path to the replay config.
    pub config: PathBuf,
}


fn main() {
    if let Err(_) = std::env::var("RUST_LOG") {
        unsafe { std::env::set_var("RUST_LOG", "info") };
    }

    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        error!("{err:#}");
        std::process::exit(1);
    }
}


fn run(args: Args) -> Result<()> {
    let file = std::fs::File::open(&args.config)
        .with_context(|| format!("Could not open {:?}", args.config))?;
    let config: ReplayConfig = serde_norway::from_reader(file)?;

    if !config.outdir.exists() {
        std::fs::create_dir_all(&config.outdir)?;
    }
    ensure!(config.outdir.is_dir(), "{:?} should be a directory", config.outdir);

    let name = &config.name;

    let data = ReplayData::from_config(&config)?;

    if let Some(step) = data.last_step() {
        info!("Replayed {} fixes - scored {:.0} m, remaining {:.0} m", data.track.len(), step.scored, step.remaining);
    }

    let output_path = config.outdir.join(format!("{name}.txt"));
    std::fs::write(output_path, make_report(&data)?)?;

    info!("Produced the report");

    let document = make_svg(&data);
    let output_path = config.outdir.join(format!("{name}.svg"));
    svg::save(output_path, &document)?;

    info!("Produced the overview SVG");

    Ok(())
}
