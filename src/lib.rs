//! # antpath
//!
//! Ant Colony Optimization for the Euclidean Traveling Salesman Problem.
//!
//! A population of ants builds tours city by city, biased by a shared
//! pheromone matrix that is evaporated and reinforced once per cycle:
//! - Pheromone: symmetric `τ`, initialized to `1/n²`
//! - Selection: roulette wheel over `τ^α · (1/(d+ε))^β`
//! - Update: `τ ← (1−ρ)·τ + Σ Q/L`
//!
//! Stepping is bounded and resumable, so a render loop, a test or a batch
//! driver decides how much work is done per call.
//!
//! ## Example
//!
//! ```rust
//! use antpath::prelude::*;
//!
//! let cities = vec![
//!     City::new(0.0, 0.0),
//!     City::new(0.0, 10.0),
//!     City::new(10.0, 10.0),
//!     City::new(10.0, 0.0),
//! ];
//! let config = AcoConfig::builder().seed(7).build();
//! let mut colony = Colony::new(cities, &config).unwrap();
//!
//! while colony.cycle() < 10 {
//!     colony.step(5);
//! }
//! assert!(colony.best_length().is_finite());
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Index loops mirror the matrix notation
)]

pub mod cli;
pub mod colony;
pub mod config;
pub mod engine;
pub mod error;
pub mod instance;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::colony::{
        Ant, BestTour, BestTourTracker, City, Colony, ColonySnapshot, CompletedTour,
        CycleSummary, DistanceMatrix, PheromoneMatrix, Progress, StepReport, Tour,
    };
    pub use crate::config::{AcoConfig, AcoConfigBuilder, ColonyParams, StallPolicy};
    pub use crate::engine::rng::SimRng;
    pub use crate::error::{AcoError, AcoResult};
    pub use crate::instance::TspInstance;
}

/// Re-export for public API
pub use error::{AcoError, AcoResult};
