//! CLI output formatting.

use crate::colony::{Colony, CycleSummary};
use crate::config::AcoConfig;
use crate::instance::TspInstance;

use super::commands::{DriveStop, RunOutcome, VerifySummary};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Version string, with the git hash when the build captured one.
#[must_use]
pub fn version_string() -> String {
    let version = option_env!("ANTPATH_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("antpath {version} ({hash})"),
        _ => format!("antpath {version}"),
    }
}

/// Print version information.
pub fn print_version() {
    println!("{}", version_string());
}

/// Print help message.
pub fn print_help() {
    println!(
        r"antpath - Ant Colony Optimization for the Euclidean TSP

USAGE:
    antpath <COMMAND> [OPTIONS]

COMMANDS:
    run <instance.yaml>         Solve an instance file
        --config <FILE>         Colony configuration YAML
        --seed <N>              Override the seed
        --cycles <N>            Override the number of cycles
        --budget <N>            Override the step budget per tick
        --json                  Print the result as JSON
        -v, --verbose           Debug logging

    random <N>                  Solve N random cities (clamped to 1..=100)
                                Accepts the same options as 'run'

    verify <instance.yaml>      Verify reproducibility across multiple runs
        --config <FILE>         Colony configuration YAML
        --runs <N>              Number of runs (default: 3)

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    antpath run experiments/square.yaml
    antpath run experiments/square.yaml --config experiments/colony.yaml --seed 7
    antpath random 30 --cycles 50 --json
    antpath verify experiments/square.yaml --runs 5

Logging is controlled by RUST_LOG (e.g. RUST_LOG=antpath=debug).
"
    );
}

/// Print the run banner.
pub fn print_header(instance: &TspInstance, colony: &Colony, config: &AcoConfig) {
    let params = colony.params();
    println!("{RULE}");
    println!("Instance: {} ({} cities)", instance.meta.id, instance.city_count());
    if !instance.meta.description.is_empty() {
        println!("  {}", instance.meta.description);
    }
    println!("Seed: {}  Ants: {}", config.seed(), colony.ant_count());
    println!(
        "α={}  β={}  ρ={}  Q={}  budget={}/tick  cycles={}",
        params.alpha,
        params.beta,
        params.rho,
        params.q,
        config.driver.steps_per_tick,
        config.driver.max_cycles
    );
    println!("{RULE}\n");
}

/// Print the status line after a cycle.
pub fn print_progress(colony: &Colony, summary: &CycleSummary) {
    match summary.shortest() {
        Some(tour) => println!(
            "cycle {:>5}  {}  (cycle best {:.2})",
            summary.cycle,
            colony.progress(),
            tour.length
        ),
        None => println!("cycle {:>5}  {}", summary.cycle, colony.progress()),
    }
}

/// Print the final result.
pub fn print_outcome(outcome: &RunOutcome) {
    println!("\n{RULE}");
    match &outcome.best {
        Some(best) => {
            println!("Best length: {:.4}", best.length);
            println!("Best tour:   {:?}", best.path);
        }
        None => println!("No tour completed"),
    }
    if let Some(gap) = outcome.optimality_gap {
        println!("Gap:         {gap:.2}%");
    }
    println!("Cycles:      {}", outcome.cycles);
    println!("Improvements: {}", outcome.improvements);
    println!("Steps:       {}", outcome.total_steps);
    println!("State hash:  {:016x}", outcome.state_hash);
    match outcome.stop {
        DriveStop::Finished => {}
        DriveStop::Stalled => println!("! Stopped early: an ant stalled"),
        DriveStop::Halted => println!("✗ Halted: pheromone update failed the numerical guard"),
    }
    println!("{RULE}");
}

/// Print the final result as pretty JSON.
pub fn print_json(outcome: &RunOutcome) {
    match serde_json::to_string_pretty(outcome) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error: failed to serialize result: {e}"),
    }
}

/// Print a reproducibility summary.
pub fn print_verify(summary: &VerifySummary) {
    let (sym, status) = if summary.identical {
        ("✓", "PASSED")
    } else {
        ("✗", "FAILED")
    };

    println!("{RULE}");
    println!("Reproducibility Check");
    println!("{RULE}\n");
    println!("  Runs:      {}", summary.runs);
    println!("  Identical: {}", summary.identical);
    println!("\n  Reference Hash: {:016x}", summary.reference_hash);
    if summary.run_hashes.len() > 1 {
        println!("\n  Run Hashes:");
        for (i, hash) in summary.run_hashes.iter().enumerate() {
            let mark = if *hash == summary.reference_hash { "✓" } else { "✗" };
            println!("    {mark} Run {}: {hash:016x}", i + 1);
        }
    }
    println!("\n{RULE}");
    println!("{sym} Reproducibility: {status}");
    println!("{RULE}");
}
