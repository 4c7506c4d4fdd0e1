//! Shortest complete tour seen across all ants and cycles.

use serde::{Deserialize, Serialize};

/// A best-so-far tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestTour {
    /// City order; the return to `path[0]` is implicit.
    pub path: Vec<usize>,
    /// Closed tour length.
    pub length: f64,
}

/// Compare-and-replace record of the best tour.
///
/// The stored length never increases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestTourTracker {
    best: Option<BestTour>,
    improvements: u64,
}

impl BestTourTracker {
    /// Empty tracker (infinite length).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            best: None,
            improvements: 0,
        }
    }

    /// Replace the best tour iff `length` is strictly shorter.
    ///
    /// NaN lengths are ignored. Returns whether the best changed.
    pub fn consider(&mut self, path: &[usize], length: f64) -> bool {
        if length.is_nan() || length >= self.length() {
            return false;
        }
        self.best = Some(BestTour {
            path: path.to_vec(),
            length,
        });
        self.improvements += 1;
        true
    }

    /// Current best, if any.
    #[must_use]
    pub const fn best(&self) -> Option<&BestTour> {
        self.best.as_ref()
    }

    /// Best length, `f64::INFINITY` before the first tour.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |b| b.length)
    }

    /// Best path, empty before the first tour.
    #[must_use]
    pub fn path(&self) -> &[usize] {
        match &self.best {
            Some(best) => &best.path,
            None => &[],
        }
    }

    /// How many times the best has been replaced.
    #[must_use]
    pub const fn improvements(&self) -> u64 {
        self.improvements
    }

    /// Forget the best tour.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_length_monotone_non_increasing(
            lengths in proptest::collection::vec(0.0f64..1000.0, 1..100),
        ) {
            let mut t = BestTourTracker::new();
            let mut previous = t.length();
            for len in lengths {
                t.consider(&[0, 1, 2], len);
                prop_assert!(t.length() <= previous);
                previous = t.length();
            }
        }

        #[test]
        fn prop_idempotent(len in 0.0f64..1000.0, repeats in 1usize..10) {
            let mut t = BestTourTracker::new();
            t.consider(&[0, 1, 2], len);
            let snapshot = t.clone();
            for _ in 0..repeats {
                t.consider(&[2, 1, 0], len);
            }
            prop_assert_eq!(t, snapshot);
        }
    }
}
