//! Per-ant tour construction.
//!
//! # Governing Equations
//!
//! ```text
//! Desirability:  s(i,j) = τᵢⱼ^α · (1 / (dᵢⱼ + ε))^β     for unvisited j
//!                s(i,j) = 0                             for visited j
//! Selection:     P(j) = s(i,j) / Σₖ s(i,k)              (roulette wheel)
//! ```
//!
//! `ε` keeps the heuristic finite for coincident cities.

use serde::{Deserialize, Serialize};

use super::distance::DistanceMatrix;
use super::pheromone::PheromoneMatrix;
use crate::config::{ColonyParams, StallPolicy};
use crate::engine::rng::SimRng;

/// Additive guard on the distance in the heuristic term.
pub const DISTANCE_EPSILON: f64 = 1e-9;

/// An in-progress tour.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    path: Vec<usize>,
    visited: Vec<bool>,
    /// Open path length (no closing edge yet).
    length: f64,
}

impl Tour {
    /// Start a tour of an `n`-city instance at `start`.
    #[must_use]
    pub fn start(start: usize, n: usize) -> Self {
        let mut visited = vec![false; n];
        visited[start] = true;
        let mut path = Vec::with_capacity(n);
        path.push(start);
        Self {
            path,
            visited,
            length: 0.0,
        }
    }

    /// Cities visited so far, in order.
    #[must_use]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Number of cities visited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Never true: a tour always holds its start city.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Accumulated open path length.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Whether `city` has been visited.
    #[must_use]
    pub fn has_visited(&self, city: usize) -> bool {
        self.visited[city]
    }

    /// Every city has been visited.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.path.len() == self.visited.len()
    }

    fn current(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    /// Append `city` and add the edge from the current city.
    fn visit(&mut self, city: usize, distances: &DistanceMatrix) {
        self.length += distances.get(self.current(), city);
        self.visited[city] = true;
        self.path.push(city);
    }

    /// Add the closing edge back to the start city.
    #[must_use]
    pub fn close(self, distances: &DistanceMatrix) -> CompletedTour {
        let closing = distances.get(self.current(), self.path[0]);
        CompletedTour {
            length: self.length + closing,
            path: self.path,
        }
    }
}

/// A closed tour with its final length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedTour {
    /// Every city exactly once; the return to `path[0]` is implicit.
    pub path: Vec<usize>,
    /// Length including the closing edge.
    pub length: f64,
}

/// Ant state within a cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Ant {
    /// Not yet started this cycle.
    #[default]
    Idle,
    /// Building a tour.
    Touring(Tour),
    /// Tour closed, waiting for the cycle update.
    Complete(CompletedTour),
}

impl Ant {
    /// Cities visited so far (empty when idle).
    #[must_use]
    pub fn path(&self) -> &[usize] {
        match self {
            Self::Idle => &[],
            Self::Touring(tour) => tour.path(),
            Self::Complete(done) => &done.path,
        }
    }

    /// Whether the ant has not started this cycle.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether the ant's tour is closed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

/// Outcome of one construction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Next city chosen by the roulette wheel.
    Chosen(usize),
    /// Scores summed to zero; chosen uniformly among unvisited cities.
    Fallback(usize),
    /// Scores summed to zero and the policy is to yield.
    Stalled,
}

/// Desirability of a single edge.
#[must_use]
pub fn desirability(tau: f64, distance: f64, alpha: f64, beta: f64) -> f64 {
    tau.powf(alpha) * (1.0 / (distance + DISTANCE_EPSILON)).powf(beta)
}

/// Scores of every city from the tour's current position; visited cities
/// score 0.
#[must_use]
pub fn scores(
    tour: &Tour,
    pheromone: &PheromoneMatrix,
    distances: &DistanceMatrix,
    params: &ColonyParams,
) -> Vec<f64> {
    let i = tour.current();
    let row = pheromone.row(i);
    (0..distances.n())
        .map(|j| {
            if tour.has_visited(j) {
                0.0
            } else {
                desirability(row[j], distances.get(i, j), params.alpha, params.beta)
            }
        })
        .collect()
}

/// Roulette-wheel pick with `unit` drawn from `[0, 1)`.
///
/// Scans in city-index order, subtracting each positive score from
/// `unit · Σ`, and picks the first city where the remainder reaches `≤ 0`.
/// If rounding leaves a positive remainder after the scan, the last city
/// with a positive score is picked. Returns `None` when the sum is zero or
/// not finite.
#[must_use]
pub fn roulette(scores: &[f64], unit: f64) -> Option<usize> {
    let sum: f64 = scores.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return None;
    }

    let mut r = unit * sum;
    let mut last_positive = None;
    for (j, &s) in scores.iter().enumerate() {
        if s <= 0.0 {
            continue;
        }
        last_positive = Some(j);
        r -= s;
        if r <= 0.0 {
            return Some(j);
        }
    }
    last_positive
}

/// Choose the next city for `tour` and append it.
///
/// The tour must not be full.
pub fn advance(
    tour: &mut Tour,
    pheromone: &PheromoneMatrix,
    distances: &DistanceMatrix,
    params: &ColonyParams,
    rng: &mut SimRng,
) -> Selection {
    let scores = scores(tour, pheromone, distances, params);
    let selection = match roulette(&scores, rng.gen_f64()) {
        Some(next) => Selection::Chosen(next),
        None => match params.stall_policy {
            StallPolicy::Yield => Selection::Stalled,
            StallPolicy::UniformFallback => {
                let unvisited: Vec<usize> = (0..distances.n())
                    .filter(|&j| !tour.has_visited(j))
                    .collect();
                if unvisited.is_empty() {
                    Selection::Stalled
                } else {
                    Selection::Fallback(unvisited[rng.gen_index(unvisited.len())])
                }
            }
        },
    };

    if let Selection::Chosen(next) | Selection::Fallback(next) = selection {
        tour.visit(next, distances);
    }
    selection
}
