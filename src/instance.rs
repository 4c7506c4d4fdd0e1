//! TSP instance YAML.
//!
//! Instances are plain city lists so experiments can be edited and re-run
//! without touching code.
//!
//! # Example YAML
//!
//! ```yaml
//! meta:
//!   id: "SQUARE-4"
//!   description: "Unit-10 square"
//!   optimal_known: 40.0
//!
//! cities:
//!   - { x: 0.0, y: 0.0 }
//!   - { x: 0.0, y: 10.0 }
//!   - { x: 10.0, y: 10.0 }
//!   - { x: 10.0, y: 0.0 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::colony::{City, DistanceMatrix};
use crate::engine::rng::SimRng;
use crate::error::AcoResult;

/// Largest instance the random generator produces.
pub const MAX_RANDOM_CITIES: usize = 100;

/// Distance kept between generated cities and the area border.
pub const RANDOM_MARGIN: f64 = 10.0;

/// Metadata about the instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceMeta {
    /// Unique instance identifier.
    pub id: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Known optimal tour length, for gap reporting.
    #[serde(default)]
    pub optimal_known: Option<f64>,
}

impl Default for InstanceMeta {
    fn default() -> Self {
        Self {
            id: "TSP-UNNAMED".to_string(),
            description: String::new(),
            optimal_known: None,
        }
    }
}

/// A Euclidean TSP instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TspInstance {
    /// Instance metadata.
    #[serde(default)]
    pub meta: InstanceMeta,
    /// City coordinates.
    pub cities: Vec<City>,
}

impl TspInstance {
    /// Parse an instance from YAML.
    ///
    /// The city count is not checked here; the colony rejects fewer than 2.
    ///
    /// # Errors
    ///
    /// Returns `YamlParse` if the YAML is invalid.
    pub fn from_yaml(yaml: &str) -> AcoResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load an instance from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `YamlParse` if it is invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> AcoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns `YamlParse` if serialization fails.
    pub fn to_yaml(&self) -> AcoResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Random cities in a `width × height` area.
    ///
    /// `n` is clamped to `1..=100`. Coordinates are clamped to stay
    /// [`RANDOM_MARGIN`] away from the border.
    #[must_use]
    pub fn random(n: usize, width: f64, height: f64, rng: &mut SimRng) -> Self {
        let n = n.clamp(1, MAX_RANDOM_CITIES);
        let cities = (0..n)
            .map(|_| {
                let x = rng.gen_range_f64(0.0, width);
                let y = rng.gen_range_f64(0.0, height);
                City::new(
                    x.max(RANDOM_MARGIN).min(width - RANDOM_MARGIN),
                    y.max(RANDOM_MARGIN).min(height - RANDOM_MARGIN),
                )
            })
            .collect();
        Self {
            meta: InstanceMeta {
                id: format!("RANDOM-{n}"),
                description: format!("{n} random cities in {width}x{height}"),
                optimal_known: None,
            },
            cities,
        }
    }

    /// Number of cities.
    #[must_use]
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Closed length of `tour`.
    #[must_use]
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        DistanceMatrix::new(&self.cities).tour_length(tour)
    }

    /// Relative gap of `length` to the known optimum, in percent.
    #[must_use]
    pub fn optimality_gap(&self, length: f64) -> Option<f64> {
        self.meta
            .optimal_known
            .filter(|opt| *opt > 0.0)
            .map(|opt| (length - opt) / opt * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AcoError;

    const SQUARE_YAML: &str = r#"
meta:
  id: "SQUARE-4"
  description: "Unit-10 square"
  optimal_known: 40.0
cities:
  - { x: 0.0, y: 0.0 }
  - { x: 0.0, y: 10.0 }
  - { x: 10.0, y: 10.0 }
  - { x: 10.0, y: 0.0 }
"#;

    #[test]
    fn test_from_yaml() {
        let instance = TspInstance::from_yaml(SQUARE_YAML).unwrap();
        assert_eq!(instance.meta.id, "SQUARE-4");
        assert_eq!(instance.city_count(), 4);
        assert_eq!(instance.cities[2], City::new(10.0, 10.0));
        assert_eq!(instance.meta.optimal_known, Some(40.0));
    }

    #[test]
    fn test_meta_optional() {
        let instance = TspInstance::from_yaml("cities:\n  - { x: 1.0, y: 2.0 }\n").unwrap();
        assert_eq!(instance.meta, InstanceMeta::default());
        assert_eq!(instance.city_count(), 1);
    }

    #[test]
    fn test_missing_cities_rejected() {
        let result = TspInstance::from_yaml("meta:\n  id: X\n");
        assert!(matches!(result, Err(AcoError::YamlParse(_))));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        assert!(TspInstance::from_yaml("this is not valid yaml: [[[").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = TspInstance::load("/nonexistent/instance.yaml");
        assert!(matches!(result, Err(AcoError::Io(_))));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let original = TspInstance::from_yaml(SQUARE_YAML).unwrap();
        let restored = TspInstance::from_yaml(&original.to_yaml().unwrap()).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_tour_length_and_gap() {
        let instance = TspInstance::from_yaml(SQUARE_YAML).unwrap();
        let len = instance.tour_length(&[0, 1, 2, 3]);
        assert!((len - 40.0).abs() < 1e-12);
        assert!(instance.optimality_gap(len).is_some_and(|g| g.abs() < 1e-9));
        assert!(instance.optimality_gap(44.0).is_some_and(|g| (g - 10.0).abs() < 1e-9));

        let unknown = TspInstance::random(5, 100.0, 100.0, &mut SimRng::new(1));
        assert!(unknown.optimality_gap(10.0).is_none());
    }

    #[test]
    fn test_random_clamps_count() {
        let mut rng = SimRng::new(42);
        assert_eq!(TspInstance::random(0, 800.0, 600.0, &mut rng).city_count(), 1);
        assert_eq!(TspInstance::random(500, 800.0, 600.0, &mut rng).city_count(), 100);
        assert_eq!(TspInstance::random(30, 800.0, 600.0, &mut rng).city_count(), 30);
    }

    #[test]
    fn test_random_respects_margin() {
        let mut rng = SimRng::new(7);
        let instance = TspInstance::random(100, 200.0, 150.0, &mut rng);
        for city in &instance.cities {
            assert!((10.0..=190.0).contains(&city.x));
            assert!((10.0..=140.0).contains(&city.y));
        }
    }

    #[test]
    fn test_random_deterministic() {
        let a = TspInstance::random(20, 800.0, 600.0, &mut SimRng::new(3));
        let b = TspInstance::random(20, 800.0, 600.0, &mut SimRng::new(3));
        assert_eq!(a, b);
    }
}
