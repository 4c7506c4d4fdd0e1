//! Colony session: bounded stepping over a population of ants.
//!
//! A [`Colony`] owns everything one optimization run needs. Callers drive it
//! with [`Colony::step`], which performs at most `budget` units of work:
//!
//! - one successful city selection costs one unit
//! - closing a full tour costs one unit
//! - starting an idle ant is free and fused with its first selection
//!
//! Once every ant has closed its tour the pheromone matrix is evaporated and
//! reinforced, the population is reset and the invocation ends regardless of
//! remaining budget.

pub mod ant;
pub mod best;
pub mod distance;
pub mod pheromone;

pub use ant::{Ant, CompletedTour, Selection, Tour};
pub use best::{BestTour, BestTourTracker};
pub use distance::{City, DistanceMatrix};
pub use pheromone::PheromoneMatrix;

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::{debug, error, info, warn};

use crate::config::{AcoConfig, ColonyParams};
use crate::engine::jidoka::JidokaGuard;
use crate::engine::rng::SimRng;
use crate::error::{AcoError, AcoResult};

/// What one [`Colony::step`] invocation did.
#[derive(Debug, Default)]
pub struct StepReport {
    /// Budget units consumed.
    pub steps: usize,
    /// Tours closed during this invocation.
    pub tours_completed: usize,
    /// The best tour changed.
    pub improved: bool,
    /// An ant could not select a next city; the invocation ended early.
    pub stalled: bool,
    /// Selections made by the uniform fallback.
    pub fallbacks: usize,
    /// Present when this invocation finished a cycle.
    pub cycle: Option<CycleSummary>,
    /// Numerical guard failure raised by the cycle update.
    pub guard_violation: Option<AcoError>,
    /// The colony is halted and will not step again until reset.
    pub halted: bool,
}

impl StepReport {
    /// Whether this invocation finished a cycle.
    #[must_use]
    pub const fn finished_cycle(&self) -> bool {
        self.cycle.is_some()
    }
}

/// Outcome of a pheromone update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSummary {
    /// Cycle counter after the update (1 for the first cycle).
    pub cycle: u64,
    /// Tours deposited, in ant order.
    pub tours: Vec<CompletedTour>,
    /// Best length after the cycle.
    pub best_length: f64,
}

impl CycleSummary {
    /// Shortest tour deposited this cycle.
    #[must_use]
    pub fn shortest(&self) -> Option<&CompletedTour> {
        self.tours.iter().min_by(|a, b| a.length.total_cmp(&b.length))
    }
}

/// Status line of a running colony.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Number of cities.
    pub cities: usize,
    /// 1-based index of the ant being advanced.
    pub ant: usize,
    /// Colony size.
    pub ants: usize,
    /// Best length so far.
    pub best_length: f64,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cities: {} | Ant: {}/{} | Best: ", self.cities, self.ant, self.ants)?;
        if self.best_length.is_finite() {
            write!(f, "{:.2}", self.best_length)
        } else {
            write!(f, "Infinity")
        }
    }
}

/// Serializable colony state for replay comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonySnapshot {
    /// Completed cycles.
    pub cycle: u64,
    /// Ant being advanced.
    pub cursor: usize,
    /// Budget units consumed since construction or reset.
    pub total_steps: u64,
    /// Best tour, if any.
    pub best: Option<BestTour>,
    /// Partial path of every ant.
    pub ant_paths: Vec<Vec<usize>>,
    /// Pheromone matrix.
    pub pheromone: PheromoneMatrix,
}

impl ColonySnapshot {
    /// Compute hash for quick comparison.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.cycle.hash(&mut hasher);
        self.cursor.hash(&mut hasher);
        self.total_steps.hash(&mut hasher);
        if let Some(best) = &self.best {
            best.path.hash(&mut hasher);
            best.length.to_bits().hash(&mut hasher);
        }
        self.ant_paths.hash(&mut hasher);
        let n = self.pheromone.n();
        for i in 0..n {
            for tau in self.pheromone.row(i) {
                tau.to_bits().hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

/// One ACO session over a fixed city set.
///
/// # Example
///
/// ```rust
/// use antpath::prelude::*;
///
/// let cities = vec![City::new(0.0, 0.0), City::new(3.0, 4.0)];
/// let mut colony = Colony::new(cities, &AcoConfig::default()).unwrap();
///
/// assert_eq!(colony.ant_count(), 40);
/// let report = colony.step(0);
/// assert_eq!(report.steps, 0);
/// assert_eq!(colony.cursor(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Colony {
    cities: Vec<City>,
    distances: DistanceMatrix,
    pheromone: PheromoneMatrix,
    ants: Vec<Ant>,
    cursor: usize,
    cycle: u64,
    best: BestTourTracker,
    rng: SimRng,
    seed: u64,
    params: ColonyParams,
    guard: JidokaGuard,
    halted: bool,
    total_steps: u64,
}

impl Colony {
    /// Create a colony over `cities`.
    ///
    /// # Errors
    ///
    /// - `Validation` / `Config`: invalid parameters
    /// - `TooFewCities`: fewer than 2 cities
    /// - `NonFiniteCoordinate`: NaN or infinite coordinate
    pub fn new(cities: Vec<City>, config: &AcoConfig) -> AcoResult<Self> {
        config.check()?;
        let n = cities.len();
        if n < 2 {
            return Err(AcoError::TooFewCities { n });
        }
        let guard = JidokaGuard::new(config.jidoka.clone());
        guard.check_cities(&cities)?;

        let params = config.colony.clone();
        let ant_count = params.ant_count_for(n);
        let seed = config.seed();
        let colony = Self {
            distances: DistanceMatrix::new(&cities),
            pheromone: PheromoneMatrix::new(n)?,
            ants: vec![Ant::Idle; ant_count],
            cursor: 0,
            cycle: 0,
            best: BestTourTracker::new(),
            rng: SimRng::new(seed),
            seed,
            params,
            guard,
            halted: false,
            total_steps: 0,
            cities,
        };
        debug!(cities = n, ants = ant_count, seed, "colony created");
        Ok(colony)
    }

    /// Advance the colony by at most `budget` units of work.
    ///
    /// Ends early when an ant stalls or when a cycle finishes. The cycle
    /// finishes in the same call that closes the last ant's tour.
    pub fn step(&mut self, budget: usize) -> StepReport {
        let mut report = StepReport {
            halted: self.halted,
            ..StepReport::default()
        };
        if self.halted {
            return report;
        }

        let n = self.distances.n();
        while report.steps < budget {
            if self.cursor >= self.ants.len() {
                let summary = self.finish_cycle(&mut report);
                report.cycle = Some(summary);
                break;
            }

            let mut tour = match std::mem::take(&mut self.ants[self.cursor]) {
                Ant::Idle => Tour::start(self.rng.gen_index(n), n),
                Ant::Touring(tour) => tour,
                done @ Ant::Complete(_) => {
                    self.ants[self.cursor] = done;
                    self.cursor += 1;
                    continue;
                }
            };

            if tour.is_full() {
                let done = tour.close(&self.distances);
                if self.best.consider(&done.path, done.length) {
                    report.improved = true;
                    info!(
                        cycle = self.cycle,
                        ant = self.cursor,
                        length = done.length,
                        "new best tour"
                    );
                }
                self.ants[self.cursor] = Ant::Complete(done);
                self.cursor += 1;
                report.steps += 1;
                report.tours_completed += 1;
                if self.cursor >= self.ants.len() {
                    let summary = self.finish_cycle(&mut report);
                    report.cycle = Some(summary);
                    break;
                }
                continue;
            }

            let selection = ant::advance(
                &mut tour,
                &self.pheromone,
                &self.distances,
                &self.params,
                &mut self.rng,
            );
            let visited = tour.len();
            self.ants[self.cursor] = Ant::Touring(tour);
            match selection {
                Selection::Chosen(_) => report.steps += 1,
                Selection::Fallback(city) => {
                    warn!(cycle = self.cycle, ant = self.cursor, city, "uniform fallback");
                    report.steps += 1;
                    report.fallbacks += 1;
                }
                Selection::Stalled => {
                    warn!(
                        cycle = self.cycle,
                        ant = self.cursor,
                        visited,
                        "ant stalled: no selectable city"
                    );
                    report.stalled = true;
                    break;
                }
            }
        }

        self.total_steps += report.steps as u64;
        report
    }

    /// Evaporate, deposit every closed tour, reset the population.
    fn finish_cycle(&mut self, report: &mut StepReport) -> CycleSummary {
        let tours: Vec<CompletedTour> = self
            .ants
            .iter_mut()
            .filter_map(|ant| match std::mem::take(ant) {
                Ant::Complete(done) => Some(done),
                _ => None,
            })
            .collect();

        self.pheromone.evaporate(self.params.rho);
        for tour in &tours {
            self.pheromone.deposit(&tour.path, tour.length, self.params.q);
        }
        self.cursor = 0;
        self.cycle += 1;

        if let Err(violation) = self.guard.check_pheromone(&self.pheromone) {
            error!(cycle = self.cycle, %violation, "pheromone update rejected, colony halted");
            self.halted = true;
            report.halted = true;
            report.guard_violation = Some(violation);
        }

        debug!(
            cycle = self.cycle,
            tours = tours.len(),
            best = self.best.length(),
            "cycle complete"
        );
        CycleSummary {
            cycle: self.cycle,
            tours,
            best_length: self.best.length(),
        }
    }

    /// Step until `cycles` more cycles have finished.
    ///
    /// Stops early on a stall or halt. Returns the number of cycles finished.
    pub fn run_cycles(&mut self, cycles: u64, budget: usize) -> u64 {
        let mut finished = 0;
        if budget == 0 {
            return finished;
        }
        while finished < cycles {
            let report = self.step(budget);
            if report.finished_cycle() {
                finished += 1;
            }
            if report.stalled || report.halted {
                break;
            }
        }
        finished
    }

    /// Return to the freshly created state with the same seed.
    pub fn reset(&mut self) {
        self.reset_with_seed(self.seed);
    }

    /// Return to the freshly created state with a new seed.
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.pheromone.reset();
        self.ants.iter_mut().for_each(|ant| *ant = Ant::Idle);
        self.cursor = 0;
        self.cycle = 0;
        self.best.clear();
        self.rng = SimRng::new(seed);
        self.seed = seed;
        self.halted = false;
        self.total_steps = 0;
        debug!(seed, "colony reset");
    }

    /// Per-ant state.
    #[must_use]
    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    /// Best tour found so far.
    #[must_use]
    pub const fn best(&self) -> Option<&BestTour> {
        self.best.best()
    }

    /// Best tour length, `f64::INFINITY` before the first tour closes.
    #[must_use]
    pub fn best_length(&self) -> f64 {
        self.best.length()
    }

    /// Index of the ant being advanced.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Colony size.
    #[must_use]
    pub fn ant_count(&self) -> usize {
        self.ants.len()
    }

    /// Completed cycles.
    #[must_use]
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    #[must_use]
    pub const fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    #[must_use]
    pub const fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Parameters fixed at construction.
    #[must_use]
    pub const fn params(&self) -> &ColonyParams {
        &self.params
    }

    /// Seed of the current run.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Budget units consumed since construction or reset.
    #[must_use]
    pub const fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Halted by the numerical guard.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Status line values.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            cities: self.cities.len(),
            ant: (self.cursor + 1).min(self.ants.len()),
            ants: self.ants.len(),
            best_length: self.best.length(),
        }
    }

    /// How many times the best tour has been replaced.
    #[must_use]
    pub const fn improvements(&self) -> u64 {
        self.best.improvements()
    }

    /// Whether a viewer should draw every ant rather than only the best tour.
    ///
    /// True during the first cycle.
    #[must_use]
    pub const fn show_all_paths(&self) -> bool {
        self.cycle == 0
    }

    /// Capture the replay-relevant state.
    #[must_use]
    pub fn snapshot(&self) -> ColonySnapshot {
        ColonySnapshot {
            cycle: self.cycle,
            cursor: self.cursor,
            total_steps: self.total_steps,
            best: self.best.best().cloned(),
            ant_paths: self.ants.iter().map(|ant| ant.path().to_vec()).collect(),
            pheromone: self.pheromone.clone(),
        }
    }
}
