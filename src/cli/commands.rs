//! CLI command handlers.
//!
//! The driver plays the role of a render loop: it calls
//! [`Colony::step`] once per tick with the configured budget and reports
//! progress once per cycle.

use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tracing::{info, warn};

use crate::colony::{BestTour, Colony, CycleSummary};
use crate::config::{AcoConfig, DriverConfig};
use crate::engine::rng::SimRng;
use crate::error::{AcoError, AcoResult};
use crate::instance::TspInstance;

use super::args::RunOptions;
use super::output::{
    print_header, print_help, print_json, print_outcome, print_progress, print_verify,
    print_version,
};
use super::{Args, Command};

/// Area of generated instances.
pub const RANDOM_WIDTH: f64 = 800.0;
/// Area of generated instances.
pub const RANDOM_HEIGHT: f64 = 600.0;

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriveStop {
    /// The configured number of cycles ran.
    Finished,
    /// An ant could not select a next city.
    Stalled,
    /// The numerical guard halted the colony.
    Halted,
}

/// Result of one solved instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    /// Instance identifier.
    pub instance_id: String,
    /// Number of cities.
    pub cities: usize,
    /// Colony seed.
    pub seed: u64,
    /// Completed cycles.
    pub cycles: u64,
    /// Budget units consumed.
    pub total_steps: u64,
    /// Best tour found.
    pub best: Option<BestTour>,
    /// Times the best tour was replaced.
    pub improvements: u64,
    /// Gap to the known optimum, in percent.
    pub optimality_gap: Option<f64>,
    /// Why the driver stopped.
    pub stop: DriveStop,
    /// Hash of the final colony snapshot.
    pub state_hash: u64,
}

/// Result of a reproducibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifySummary {
    /// Runs performed.
    pub runs: usize,
    /// All runs ended with the same hash.
    pub identical: bool,
    /// Hash of the first run.
    pub reference_hash: u64,
    /// Hash of every run.
    pub run_hashes: Vec<u64>,
}

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            instance_path,
            options,
        } => run_instance(&instance_path, &options),
        Command::Random { cities, options } => run_random(cities, &options),
        Command::Verify {
            instance_path,
            config_path,
            runs,
        } => verify_reproducibility(&instance_path, config_path.as_deref(), runs),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Load the configuration file, or defaults when no path is given.
///
/// # Errors
///
/// Returns error if the file cannot be read or fails validation.
pub fn load_config(path: Option<&Path>) -> AcoResult<AcoConfig> {
    path.map_or_else(|| Ok(AcoConfig::default()), AcoConfig::load)
}

/// Apply command-line overrides and re-validate.
///
/// # Errors
///
/// Returns `Validation` if an override is out of range.
pub fn apply_overrides(mut config: AcoConfig, options: &RunOptions) -> AcoResult<AcoConfig> {
    if let Some(seed) = options.seed {
        config.reproducibility.seed = seed;
    }
    if let Some(cycles) = options.cycles {
        config.driver.max_cycles = cycles;
    }
    if let Some(budget) = options.budget {
        config.driver.steps_per_tick = budget;
    }
    config.check()?;
    Ok(config)
}

/// Solve an instance file.
#[must_use]
pub fn run_instance(path: &Path, options: &RunOptions) -> ExitCode {
    let result = TspInstance::load(path).and_then(|instance| {
        let config = apply_overrides(load_config(options.config_path.as_deref())?, options)?;
        solve(&instance, &config, !options.json)
    });
    finish(result, options.json)
}

/// Solve a random instance of `cities` cities.
///
/// The layout is drawn from a stream derived from the colony seed, so one
/// seed reproduces both.
#[must_use]
pub fn run_random(cities: usize, options: &RunOptions) -> ExitCode {
    let result = load_config(options.config_path.as_deref())
        .and_then(|config| apply_overrides(config, options))
        .and_then(|config| {
            let layout_seed = SimRng::new(config.seed()).derive_seed(1);
            let mut rng = SimRng::new(layout_seed);
            let instance = TspInstance::random(cities, RANDOM_WIDTH, RANDOM_HEIGHT, &mut rng);
            solve(&instance, &config, !options.json)
        });
    finish(result, options.json)
}

fn finish(result: AcoResult<RunOutcome>, json: bool) -> ExitCode {
    match result {
        Ok(outcome) => {
            if json {
                print_json(&outcome);
            } else {
                print_outcome(&outcome);
            }
            if outcome.stop == DriveStop::Halted {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => error_exit(&e),
    }
}

/// Report `err` and map it to an exit code: 2 for rejected input, 1 otherwise.
#[must_use]
pub fn error_exit(err: &AcoError) -> ExitCode {
    eprintln!("Error: {err}");
    if err.is_precondition() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

/// Run a colony over `instance` for the configured number of cycles.
///
/// # Errors
///
/// Returns error if the colony cannot be created.
pub fn solve(
    instance: &TspInstance,
    config: &AcoConfig,
    show_progress: bool,
) -> AcoResult<RunOutcome> {
    let mut colony = Colony::new(instance.cities.clone(), config)?;
    if show_progress {
        print_header(instance, &colony, config);
    }
    info!(
        instance = %instance.meta.id,
        cities = instance.city_count(),
        ants = colony.ant_count(),
        seed = config.seed(),
        "solving"
    );

    let stop = drive(&mut colony, &config.driver, |c, summary| {
        if show_progress {
            print_progress(c, summary);
        }
    });

    let best = colony.best().cloned();
    Ok(RunOutcome {
        instance_id: instance.meta.id.clone(),
        cities: instance.city_count(),
        seed: colony.seed(),
        cycles: colony.cycle(),
        total_steps: colony.total_steps(),
        optimality_gap: best.as_ref().and_then(|b| instance.optimality_gap(b.length)),
        best,
        improvements: colony.improvements(),
        stop,
        state_hash: colony.snapshot().compute_hash(),
    })
}

/// Tick the colony until `driver.max_cycles` cycles have finished.
///
/// `on_cycle` runs after every finished cycle with that cycle's summary. A stalled ant cannot recover
/// within its cycle, so a stall stops the driver.
pub fn drive<F>(colony: &mut Colony, driver: &DriverConfig, mut on_cycle: F) -> DriveStop
where
    F: FnMut(&Colony, &CycleSummary),
{
    while colony.cycle() < driver.max_cycles {
        let report = colony.step(driver.steps_per_tick);
        if let Some(summary) = &report.cycle {
            on_cycle(colony, summary);
        }
        if report.halted {
            return DriveStop::Halted;
        }
        if report.stalled {
            warn!(cycle = colony.cycle(), ant = colony.cursor(), "driver stopped on stall");
            return DriveStop::Stalled;
        }
    }
    DriveStop::Finished
}

/// Run `instance_path` `runs` times with one seed and compare final hashes.
#[must_use]
pub fn verify_reproducibility(
    instance_path: &Path,
    config_path: Option<&Path>,
    runs: usize,
) -> ExitCode {
    println!("Verifying reproducibility: {}", instance_path.display());
    println!("Runs: {runs}\n");

    let result = TspInstance::load(instance_path).and_then(|instance| {
        let config = load_config(config_path)?;
        verify(&instance, &config, runs)
    });

    match result {
        Ok(summary) => {
            print_verify(&summary);
            if summary.identical {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => error_exit(&e),
    }
}

/// Solve `instance` `runs` times and compare the final snapshot hashes.
///
/// # Errors
///
/// Returns error if a colony cannot be created.
pub fn verify(
    instance: &TspInstance,
    config: &AcoConfig,
    runs: usize,
) -> AcoResult<VerifySummary> {
    let run_hashes = (0..runs.max(1))
        .map(|_| solve(instance, config, false).map(|outcome| outcome.state_hash))
        .collect::<AcoResult<Vec<u64>>>()?;
    let reference_hash = run_hashes[0];
    Ok(VerifySummary {
        runs: run_hashes.len(),
        identical: run_hashes.iter().all(|h| *h == reference_hash),
        reference_hash,
        run_hashes,
    })
}
