//! Jidoka (自働化) - Autonomous anomaly detection.
//!
//! Checks the numeric state of a colony and stops the line on anomalies
//! instead of letting them propagate into later cycles.
//!
//! # Anomaly Types
//!
//! 1. **Non-finite values**: NaN or Inf in city coordinates or pheromone
//! 2. **Constraint violations**: negative or asymmetric pheromone entries
//!
//! City coordinates are inspected once, before the colony starts. The
//! pheromone matrix is inspected after every cycle update.

use serde::{Deserialize, Serialize};

use crate::colony::{City, PheromoneMatrix};
use crate::error::{AcoError, AcoResult};

/// Jidoka guard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JidokaConfig {
    /// NaN/Inf detection enabled.
    pub check_finite: bool,
    /// Check `τ[i][j] == τ[j][i]` after each update.
    pub check_symmetry: bool,
    /// Allowed absolute asymmetry.
    pub symmetry_tolerance: f64,
}

impl Default for JidokaConfig {
    fn default() -> Self {
        Self {
            check_finite: true,
            check_symmetry: true,
            symmetry_tolerance: 1e-12,
        }
    }
}

/// Jidoka guard for autonomous anomaly detection.
///
/// # Example
///
/// ```rust
/// use antpath::colony::PheromoneMatrix;
/// use antpath::engine::jidoka::{JidokaConfig, JidokaGuard};
///
/// let guard = JidokaGuard::new(JidokaConfig::default());
/// let matrix = PheromoneMatrix::new(4).unwrap();
/// assert!(guard.check_pheromone(&matrix).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct JidokaGuard {
    config: JidokaConfig,
}

impl JidokaGuard {
    /// Create a new Jidoka guard with given configuration.
    #[must_use]
    pub const fn new(config: JidokaConfig) -> Self {
        Self { config }
    }

    /// Reject non-finite city coordinates.
    ///
    /// Always active: a NaN coordinate would poison every distance.
    ///
    /// # Errors
    ///
    /// Returns `AcoError::NonFiniteCoordinate` for the first offending city.
    pub fn check_cities(&self, cities: &[City]) -> AcoResult<()> {
        for (index, city) in cities.iter().enumerate() {
            if !city.is_finite() {
                return Err(AcoError::NonFiniteCoordinate {
                    index,
                    x: city.x,
                    y: city.y,
                });
            }
        }
        Ok(())
    }

    /// Inspect the pheromone matrix after an update.
    ///
    /// # Errors
    ///
    /// - `NonFiniteValue`: NaN or Inf found
    /// - `ConstraintViolation`: negative entry, or asymmetry above tolerance
    pub fn check_pheromone(&self, matrix: &PheromoneMatrix) -> AcoResult<()> {
        let n = matrix.n();
        for i in 0..n {
            for j in 0..n {
                let tau = matrix.get(i, j);
                if self.config.check_finite && !tau.is_finite() {
                    return Err(AcoError::NonFiniteValue {
                        location: format!("pheromone[{i}][{j}]"),
                    });
                }
                if tau < 0.0 {
                    return Err(AcoError::ConstraintViolation {
                        name: format!("pheromone[{i}][{j}] >= 0"),
                        violation: tau,
                        tolerance: 0.0,
                    });
                }
                if self.config.check_symmetry && j > i {
                    let asymmetry = (tau - matrix.get(j, i)).abs();
                    if asymmetry > self.config.symmetry_tolerance {
                        return Err(AcoError::ConstraintViolation {
                            name: format!("pheromone[{i}][{j}] == pheromone[{j}][{i}]"),
                            violation: asymmetry,
                            tolerance: self.config.symmetry_tolerance,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
