//! Symmetric pheromone matrix.
//!
//! ```text
//! Initialization:  τᵢⱼ = 1/n²
//! Evaporation:     τᵢⱼ ← (1 − ρ)·τᵢⱼ
//! Deposit:         τᵢⱼ ← τᵢⱼ + Q/L   for every edge (i, j) of a tour of length L
//! ```
//!
//! There is no pheromone floor: repeated evaporation drives unused edges
//! toward zero without ever clamping them.

use serde::{Deserialize, Serialize};

use crate::error::{AcoError, AcoResult};

/// Symmetric n×n desirability weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PheromoneMatrix {
    n: usize,
    /// Row-major n×n.
    tau: Vec<f64>,
}

impl PheromoneMatrix {
    /// Uniform matrix with every entry `1/n²`.
    ///
    /// # Errors
    ///
    /// Returns `TooFewCities` when `n == 0`.
    pub fn new(n: usize) -> AcoResult<Self> {
        if n == 0 {
            return Err(AcoError::TooFewCities { n });
        }
        let tau0 = 1.0 / (n * n) as f64;
        Ok(Self {
            n,
            tau: vec![tau0; n * n],
        })
    }

    /// Restore every entry to `1/n²`.
    pub fn reset(&mut self) {
        let tau0 = 1.0 / (self.n * self.n) as f64;
        self.tau.fill(tau0);
    }

    /// Number of cities.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Pheromone on edge `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.tau[i * self.n + j]
    }

    /// Row `i`, one entry per destination city.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.tau[i * self.n..(i + 1) * self.n]
    }

    /// Multiply every entry by `1 − rho`.
    pub fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        for tau in &mut self.tau {
            *tau *= keep;
        }
    }

    /// Add `q / length` to both directions of every edge of the closed tour.
    ///
    /// A tour whose length is not positive (all cities coincident) carries no
    /// distance signal and deposits nothing.
    pub fn deposit(&mut self, path: &[usize], length: f64, q: f64) {
        if path.len() < 2 || length <= 0.0 || length.is_nan() {
            return;
        }
        let delta = q / length;
        for k in 0..path.len() {
            let i = path[k];
            let j = path[(k + 1) % path.len()];
            self.tau[i * self.n + j] += delta;
            self.tau[j * self.n + i] += delta;
        }
    }

    /// Every `τ[i][j]` equals `τ[j][i]` exactly.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| ((i + 1)..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Every entry is finite and non-negative.
    #[must_use]
    pub fn all_finite(&self) -> bool {
        self.tau.iter().all(|t| t.is_finite() && *t >= 0.0)
    }

    /// Sum of all entries.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.tau.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_uniform() {
        let m = PheromoneMatrix::new(4).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert!((m.get(i, j) - 1.0 / 16.0).abs() < f64::EPSILON);
            }
        }
        assert!(m.is_symmetric());
        assert!(m.all_finite());
    }

    #[test]
    fn test_zero_cities_rejected() {
        assert!(matches!(
            PheromoneMatrix::new(0),
            Err(AcoError::TooFewCities { n: 0 })
        ));
        assert!(PheromoneMatrix::new(1).is_ok());
    }

    #[test]
    fn test_evaporate_scales_every_entry() {
        let mut m = PheromoneMatrix::new(3).unwrap();
        m.evaporate(0.3);
        let expected = 0.7 / 9.0;
        for i in 0..3 {
            for j in 0..3 {
                assert!((m.get(i, j) - expected).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_evaporate_full_rho_clears() {
        let mut m = PheromoneMatrix::new(3).unwrap();
        m.evaporate(1.0);
        assert!(m.total().abs() < f64::EPSILON);
        assert!(m.all_finite());
    }

    #[test]
    fn test_deposit_includes_closing_edge() {
        let mut m = PheromoneMatrix::new(4).unwrap();
        m.evaporate(1.0);
        m.deposit(&[0, 1, 2, 3], 40.0, 100.0);

        for (i, j) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            assert!((m.get(i, j) - 2.5).abs() < 1e-12, "edge ({i},{j})");
            assert!((m.get(j, i) - 2.5).abs() < 1e-12, "edge ({j},{i})");
        }
        assert!(m.get(0, 2).abs() < f64::EPSILON);
        assert!(m.get(1, 3).abs() < f64::EPSILON);
        assert!(m.is_symmetric());
    }

    #[test]
    fn test_two_city_deposit_hits_edge_twice() {
        let mut m = PheromoneMatrix::new(2).unwrap();
        m.evaporate(1.0);
        // Path 0 → 1 → 0 traverses edge {0,1} in both directions
        m.deposit(&[0, 1], 20.0, 100.0);
        assert!((m.get(0, 1) - 10.0).abs() < 1e-12);
        assert!((m.get(1, 0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_deposit_accumulates_per_tour() {
        let mut m = PheromoneMatrix::new(3).unwrap();
        let before = m.get(0, 1);
        m.deposit(&[0, 1, 2], 10.0, 100.0);
        m.deposit(&[0, 1, 2], 20.0, 100.0);
        assert!((m.get(0, 1) - (before + 10.0 + 5.0)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_length_deposit_ignored() {
        let mut m = PheromoneMatrix::new(3).unwrap();
        let before = m.clone();
        m.deposit(&[0, 1, 2], 0.0, 100.0);
        m.deposit(&[0, 1, 2], f64::NAN, 100.0);
        assert_eq!(m, before);
    }

    #[test]
    fn test_reset_restores_uniform() {
        let mut m = PheromoneMatrix::new(4).unwrap();
        m.evaporate(0.5);
        m.deposit(&[0, 1, 2, 3], 40.0, 100.0);
        m.reset();
        assert_eq!(m, PheromoneMatrix::new(4).unwrap());
    }

    #[test]
    fn test_row_view() {
        let mut m = PheromoneMatrix::new(3).unwrap();
        m.deposit(&[0, 1, 2], 3.0, 3.0);
        let row = m.row(1);
        assert_eq!(row.len(), 3);
        assert!((row[0] - m.get(1, 0)).abs() < f64::EPSILON);
        assert!((row[2] - m.get(1, 2)).abs() < f64::EPSILON);
    }
}
