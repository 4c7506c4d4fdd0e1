//! Euclidean distance over a fixed city set.

use serde::{Deserialize, Serialize};

/// A 2D point representing a city.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    /// Create a new city at coordinates (x, y).
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another city.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Precomputed symmetric distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    /// Row-major n×n.
    distances: Vec<f64>,
}

impl DistanceMatrix {
    /// Precompute all pairwise distances.
    #[must_use]
    pub fn new(cities: &[City]) -> Self {
        let n = cities.len();
        let mut distances = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }
        Self { n, distances }
    }

    /// Number of cities.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Distance between cities `i` and `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.n + j]
    }

    /// Length of the closed tour through `path`, including last → first.
    #[must_use]
    pub fn tour_length(&self, path: &[usize]) -> f64 {
        if path.len() < 2 {
            return 0.0;
        }
        let open: f64 = path.windows(2).map(|w| self.get(w[0], w[1])).sum();
        open + self.get(path[path.len() - 1], path[0])
    }
}
