/*
 * Headless Firefly Runner
 *
 * Runs the firefly simulation without a window at a fixed frame interval,
 * logging the flash deviation as the swarm synchronizes. Every run is
 * seeded, either from the command line or with a freshly drawn seed that
 * is logged and written to the optional JSON report, so any run can be
 * reproduced.
 */

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use fireflies::{SimulationParams, SyncSample, SyncTracker, World};

#[derive(Parser)]
#[command(name = "fireflies-headless")]
#[command(about = "Run the firefly simulation without a window", version)]
struct Cli {
    /// JSON parameter file; command line values override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of bugs
    #[arg(short, long)]
    population: Option<usize>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Milliseconds of simulated time per tick
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,

    /// Surface width
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Surface height
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Record and log the metric every N ticks
    #[arg(long, default_value_t = 60)]
    sample_every: u64,

    /// Write the sampled metric to this JSON file
    #[arg(short, long)]
    report: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    params: &'a SimulationParams,
    seed: u64,
    ticks: u64,
    frame_ms: f64,
    samples: Vec<SyncSample>,
}

// Fix the seed up front so the run can be repeated from its report
fn pin_seed(params: &mut SimulationParams) -> u64 {
    let seed = params.seed.unwrap_or_else(rand::random);
    params.seed = Some(seed);
    seed
}

fn main() -> Result<()> {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => SimulationParams::load_from_disk(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => SimulationParams::default(),
    };
    if let Some(population) = cli.population {
        params.population = population;
    }
    if cli.seed.is_some() {
        params.seed = cli.seed;
    }
    let seed = pin_seed(&mut params);

    let mut world = World::new(params, cli.width, cli.height).context("creating world")?;
    let sample_every = cli.sample_every.max(1);
    let capacity = usize::try_from(cli.ticks / sample_every)
        .unwrap_or(usize::MAX)
        .saturating_add(1);
    let mut tracker = SyncTracker::new(capacity);

    let first = tracker.record(&world);
    log::info!(
        "{} bugs, seed {}, starting deviation {:.2}",
        world.len(),
        seed,
        first.deviation
    );

    for _ in 0..cli.ticks {
        world.tick(cli.frame_ms);

        if world.ticks() % sample_every == 0 {
            let sample = tracker.record(&world);
            log::info!(
                "tick {:>6}  t={:>8.0} ms  deviation {:>7.2}  flashing {:>4}",
                sample.tick,
                sample.elapsed_ms,
                sample.deviation,
                sample.flashing
            );
        }
    }

    if let Some(improvement) = tracker.improvement() {
        log::info!("deviation dropped by {:.2} over the run", improvement);
    }

    if let Some(path) = &cli.report {
        let report = Report {
            params: world.params(),
            seed,
            ticks: world.ticks(),
            frame_ms: cli.frame_ms,
            samples: tracker.samples().copied().collect(),
        };
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))?;
        log::info!("report written to {}", path.display());
    }

    Ok(())
}
