//! Engine support shared by every colony.
//!
//! - Deterministic RNG (PCG with derived seeds)
//! - Jidoka guards for stop-on-error

pub mod jidoka;
pub mod rng;

pub use jidoka::{JidokaConfig, JidokaGuard};
pub use rng::SimRng;
