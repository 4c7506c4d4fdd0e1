//! Colony configuration loaded from YAML.
//!
//! Bad parameters are rejected before a colony exists: `validator` checks
//! ranges, and a semantic pass rejects non-finite reals and a zero deposit
//! constant. Unknown keys are a parse error.
//!
//! The colony parameters (α, β, ρ, Q) are fixed for the lifetime of a
//! colony: they are copied in at construction and there is no setter.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::engine::jidoka::JidokaConfig;
use crate::error::{AcoError, AcoResult};

/// Top-level configuration: colony parameters, seed, driver pacing and
/// numerical guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AcoConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Ant System parameters.
    #[validate(nested)]
    #[serde(default)]
    pub colony: ColonyParams,

    /// Reproducibility settings.
    #[validate(nested)]
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Pacing of the stepping driver.
    #[validate(nested)]
    #[serde(default)]
    pub driver: DriverConfig,

    /// Jidoka (stop-on-error) configuration.
    #[serde(default)]
    pub jidoka: JidokaConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl AcoConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> AcoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> AcoResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> AcoConfigBuilder {
        AcoConfigBuilder::default()
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for schema violations and `Config` for
    /// semantic ones.
    pub fn check(&self) -> AcoResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> AcoResult<()> {
        let params = &self.colony;
        for (name, value) in [
            ("alpha", params.alpha),
            ("beta", params.beta),
            ("rho", params.rho),
            ("q", params.q),
        ] {
            if !value.is_finite() {
                return Err(AcoError::config(format!("{name} must be finite, got {value}")));
            }
        }

        if params.q <= 0.0 {
            return Err(AcoError::config("q must be positive"));
        }

        Ok(())
    }

    /// Master seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.reproducibility.seed
    }
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            colony: ColonyParams::default(),
            reproducibility: ReproducibilityConfig::default(),
            driver: DriverConfig::default(),
            jidoka: JidokaConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct AcoConfigBuilder {
    seed: Option<u64>,
    alpha: Option<f64>,
    beta: Option<f64>,
    rho: Option<f64>,
    q: Option<f64>,
    ant_count: Option<usize>,
    stall_policy: Option<StallPolicy>,
    steps_per_tick: Option<usize>,
    max_cycles: Option<u64>,
    jidoka: Option<JidokaConfig>,
}

impl AcoConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set pheromone importance (α).
    #[must_use]
    pub const fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Set distance importance (β).
    #[must_use]
    pub const fn beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    /// Set evaporation rate (ρ).
    #[must_use]
    pub const fn rho(mut self, rho: f64) -> Self {
        self.rho = Some(rho);
        self
    }

    /// Set deposit constant (Q).
    #[must_use]
    pub const fn q(mut self, q: f64) -> Self {
        self.q = Some(q);
        self
    }

    /// Use exactly `ant_count` ants regardless of the city count.
    #[must_use]
    pub const fn ant_count(mut self, ant_count: usize) -> Self {
        self.ant_count = Some(ant_count);
        self
    }

    /// Set the stall policy.
    #[must_use]
    pub const fn stall_policy(mut self, policy: StallPolicy) -> Self {
        self.stall_policy = Some(policy);
        self
    }

    /// Set the step budget per driver tick.
    #[must_use]
    pub const fn steps_per_tick(mut self, steps: usize) -> Self {
        self.steps_per_tick = Some(steps);
        self
    }

    /// Set the number of cycles a driver runs.
    #[must_use]
    pub const fn max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = Some(cycles);
        self
    }

    /// Set Jidoka configuration.
    #[must_use]
    pub fn jidoka(mut self, config: JidokaConfig) -> Self {
        self.jidoka = Some(config);
        self
    }

    /// Build the configuration.
    ///
    /// The result is validated when a colony is created from it.
    #[must_use]
    pub fn build(self) -> AcoConfig {
        let mut config = AcoConfig::default();

        if let Some(seed) = self.seed {
            config.reproducibility.seed = seed;
        }
        if let Some(alpha) = self.alpha {
            config.colony.alpha = alpha;
        }
        if let Some(beta) = self.beta {
            config.colony.beta = beta;
        }
        if let Some(rho) = self.rho {
            config.colony.rho = rho;
        }
        if let Some(q) = self.q {
            config.colony.q = q;
        }
        if self.ant_count.is_some() {
            config.colony.ant_count = self.ant_count;
        }
        if let Some(policy) = self.stall_policy {
            config.colony.stall_policy = policy;
        }
        if let Some(steps) = self.steps_per_tick {
            config.driver.steps_per_tick = steps;
        }
        if let Some(cycles) = self.max_cycles {
            config.driver.max_cycles = cycles;
        }
        if let Some(jidoka) = self.jidoka {
            config.jidoka = jidoka;
        }

        config
    }
}

/// Ant System parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ColonyParams {
    /// Pheromone influence (α).
    #[validate(range(min = 0.0))]
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Distance influence (β).
    #[validate(range(min = 0.0))]
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Evaporation rate (ρ).
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_rho")]
    pub rho: f64,
    /// Deposit constant (Q).
    #[validate(range(min = 0.0))]
    #[serde(default = "default_q")]
    pub q: f64,
    /// Lower bound on the colony size.
    #[validate(range(min = 1))]
    #[serde(default = "default_min_ants")]
    pub min_ants: usize,
    /// Ants per city.
    #[validate(range(min = 1))]
    #[serde(default = "default_ants_per_city")]
    pub ants_per_city: usize,
    /// Explicit colony size, overriding the two fields above.
    #[validate(range(min = 1))]
    #[serde(default)]
    pub ant_count: Option<usize>,
    /// What an ant does when no next city can be scored.
    #[serde(default)]
    pub stall_policy: StallPolicy,
}

const fn default_alpha() -> f64 {
    1.0
}

const fn default_beta() -> f64 {
    5.0
}

const fn default_rho() -> f64 {
    0.3
}

const fn default_q() -> f64 {
    100.0
}

const fn default_min_ants() -> usize {
    20
}

const fn default_ants_per_city() -> usize {
    20
}

impl Default for ColonyParams {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            beta: default_beta(),
            rho: default_rho(),
            q: default_q(),
            min_ants: default_min_ants(),
            ants_per_city: default_ants_per_city(),
            ant_count: None,
            stall_policy: StallPolicy::default(),
        }
    }
}

impl ColonyParams {
    /// Colony size for `n` cities: `max(min_ants, ants_per_city · n)`.
    #[must_use]
    pub fn ant_count_for(&self, n: usize) -> usize {
        self.ant_count
            .unwrap_or_else(|| self.min_ants.max(self.ants_per_city.saturating_mul(n)))
    }
}

/// Policy for a construction step whose scores sum to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StallPolicy {
    /// Leave the ant where it is and end the current `step` call.
    /// The caller may retry; a permanently degenerate ant never completes.
    #[default]
    Yield,
    /// Pick uniformly among unvisited cities.
    UniformFallback,
}

/// Reproducibility settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ReproducibilityConfig {
    /// Master seed for all RNG.
    pub seed: u64,
}

impl Default for ReproducibilityConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Driver pacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DriverConfig {
    /// Step budget per tick.
    #[validate(range(min = 1))]
    #[serde(default = "default_steps_per_tick")]
    pub steps_per_tick: usize,
    /// Cycles to run before stopping.
    #[validate(range(min = 1))]
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

const fn default_steps_per_tick() -> usize {
    2
}

const fn default_max_cycles() -> u64 {
    100
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            steps_per_tick: default_steps_per_tick(),
            max_cycles: default_max_cycles(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_ant_system() {
        let config = AcoConfig::default();
        assert!((config.colony.alpha - 1.0).abs() < f64::EPSILON);
        assert!((config.colony.beta - 5.0).abs() < f64::EPSILON);
        assert!((config.colony.rho - 0.3).abs() < f64::EPSILON);
        assert!((config.colony.q - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.colony.stall_policy, StallPolicy::Yield);
        assert_eq!(config.driver.steps_per_tick, 2);
        assert_eq!(config.seed(), 42);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_ant_count_formula() {
        let params = ColonyParams::default();
        assert_eq!(params.ant_count_for(0), 20);
        assert_eq!(params.ant_count_for(1), 20);
        assert_eq!(params.ant_count_for(2), 40);
        assert_eq!(params.ant_count_for(30), 600);
    }

    #[test]
    fn test_ant_count_override() {
        let config = AcoConfig::builder().ant_count(7).build();
        assert_eq!(config.colony.ant_count_for(50), 7);
    }

    #[test]
    fn test_builder() {
        let config = AcoConfig::builder()
            .seed(7)
            .alpha(2.0)
            .beta(3.0)
            .rho(0.5)
            .q(10.0)
            .stall_policy(StallPolicy::UniformFallback)
            .steps_per_tick(5)
            .max_cycles(12)
            .build();

        assert_eq!(config.seed(), 7);
        assert!((config.colony.alpha - 2.0).abs() < f64::EPSILON);
        assert!((config.colony.beta - 3.0).abs() < f64::EPSILON);
        assert!((config.colony.rho - 0.5).abs() < f64::EPSILON);
        assert!((config.colony.q - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.colony.stall_policy, StallPolicy::UniformFallback);
        assert_eq!(config.driver.steps_per_tick, 5);
        assert_eq!(config.driver.max_cycles, 12);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = r"
schema_version: '1.0'
colony:
  alpha: 1.5
  beta: 4.0
  rho: 0.2
  q: 50.0
  ants_per_city: 10
  stall_policy: uniform-fallback
reproducibility:
  seed: 123
driver:
  steps_per_tick: 3
  max_cycles: 40
";
        let config = AcoConfig::from_yaml(yaml).unwrap();
        assert!((config.colony.alpha - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.colony.ants_per_city, 10);
        assert_eq!(config.colony.min_ants, 20);
        assert_eq!(config.colony.stall_policy, StallPolicy::UniformFallback);
        assert_eq!(config.seed(), 123);
        assert_eq!(config.driver.max_cycles, 40);
    }

    #[test]
    fn test_from_yaml_empty_uses_defaults() {
        let config = AcoConfig::from_yaml("{}").unwrap();
        assert_eq!(config, AcoConfig::default());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result = AcoConfig::from_yaml("colony:\n  gamma: 1.0\n");
        assert!(matches!(result, Err(AcoError::YamlParse(_))));
    }

    #[test]
    fn test_rejects_rho_out_of_range() {
        let result = AcoConfig::from_yaml("colony:\n  rho: 1.5\n");
        assert!(matches!(result, Err(AcoError::Validation(_))));
    }

    #[test]
    fn test_rejects_negative_beta() {
        let config = AcoConfig::builder().beta(-1.0).build();
        assert!(matches!(config.check(), Err(AcoError::Validation(_))));
    }

    #[test]
    fn test_rejects_zero_q() {
        let config = AcoConfig::builder().q(0.0).build();
        assert!(matches!(config.check(), Err(AcoError::Config { .. })));
    }

    #[test]
    fn test_rejects_non_finite_alpha() {
        let config = AcoConfig::builder().alpha(f64::INFINITY).build();
        assert!(config.check().is_err());
    }

    #[test]
    fn test_rejects_zero_budget() {
        let config = AcoConfig::builder().steps_per_tick(0).build();
        assert!(matches!(config.check(), Err(AcoError::Validation(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = AcoConfig::load("/nonexistent/antpath.yaml");
        assert!(matches!(result, Err(AcoError::Io(_))));
    }

    #[test]
    fn test_yaml_roundtrip_preserves_policy() {
        let config = AcoConfig::builder()
            .stall_policy(StallPolicy::UniformFallback)
            .build();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("uniform-fallback"));
        let parsed = AcoConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
