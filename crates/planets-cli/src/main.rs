//! Headless runner for planets scenarios
//!
//! Loads a YAML scenario, feeds it to a [`Simulation`] as commands, runs the
//! requested number of frames and prints what happened.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;

use planets::command::{Command, SpawnRequest};
use planets::config::WorldConfig;
use planets::simulation::Simulation;
use planets::snapshot::FrameSnapshot;

#[derive(Parser, Debug)]
#[command(version, about = "Run a planets scenario without a browser")]
struct Args {
    /// Scenario file (YAML)
    scenario: PathBuf,

    /// Override the number of frames to run
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Only print the final table
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Scenario {
    #[serde(default)]
    world: WorldConfig,
    #[serde(default)]
    presets: Vec<String>,
    #[serde(default)]
    bodies: Vec<SpawnRequest>,
    /// Seconds per tick, applied after the world block
    time_step: Option<f64>,
    #[serde(default = "default_ticks")]
    ticks: u64,
}

fn default_ticks() -> u64 {
    365
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let scenario: Scenario = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", path.display()))?;

    scenario
        .world
        .validate()
        .with_context(|| format!("invalid world block in {}", path.display()))?;
    if scenario.presets.is_empty() && scenario.bodies.is_empty() {
        bail!("scenario {} has no presets and no bodies", path.display());
    }
    Ok(scenario)
}

fn print_table(snapshot: &FrameSnapshot) {
    println!(
        "{:<20} {:>12} {:>10} {:>10} {:>7} {:>8}",
        "name", "mass (kg)", "x", "y", "radius", "color"
    );
    for body in &snapshot.bodies {
        let marker = if snapshot.anchor == Some(body.id) { "*" } else { "" };
        println!(
            "{:<20} {:>12.3e} {:>10.2} {:>10.2} {:>7.2} {:>8}",
            format!("{}{}", body.name, marker),
            body.mass,
            body.position[0],
            body.position[1],
            body.radius,
            body.color
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let scenario = load_scenario(&args.scenario)?;
    let ticks = args.ticks.unwrap_or(scenario.ticks);

    let mut sim = Simulation::new(scenario.world);
    for preset in scenario.presets {
        sim.submit(Command::SpawnPreset(preset));
    }
    for body in scenario.bodies {
        sim.submit(Command::Spawn(body));
    }
    if let Some(seconds) = scenario.time_step {
        sim.submit(Command::SetTimeStep(seconds));
    }

    let mut mergers = 0;
    for _ in 0..ticks {
        mergers += sim.frame().mergers.len();
        let log = sim.drain_diagnostics();
        if !args.quiet {
            let days = sim.world().elapsed() / 86_400.0;
            for entry in log {
                println!("[{days:>9.2} d] {entry}");
            }
        }
    }

    let snapshot = sim.snapshot();
    println!();
    println!(
        "{} ticks, {:.2} days simulated, {} mergers, {} bodies",
        ticks,
        snapshot.elapsed / 86_400.0,
        mergers,
        snapshot.bodies.len()
    );
    print_table(&snapshot);

    Ok(())
}
