use super::sampler::SamplerConfig;
use crate::core::models::features::FeatureName;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Unknown decision policy '{0}'. Expected one of: balanced, speed_to_clinic, low_risk")]
    UnknownPolicy(String),

    #[error("Invalid constraint {name} = {value}: {reason}")]
    InvalidConstraint {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Invalid sampling distribution for '{feature}': {reason}")]
    InvalidDistribution {
        feature: FeatureName,
        reason: String,
    },
}

/// Thresholds a scored candidate must satisfy to be considered for ranking.
///
/// Each bound is independently optional; an absent bound does not constrain anything.
/// Bounds are validated when the constraints are built.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Constraints {
    max_irritation: Option<f64>,
    min_stability: Option<f64>,
    max_fail_probability: Option<f64>,
}

impl Constraints {
    pub fn builder() -> ConstraintsBuilder {
        ConstraintsBuilder::default()
    }

    pub fn max_irritation(&self) -> Option<f64> {
        self.max_irritation
    }

    pub fn min_stability(&self) -> Option<f64> {
        self.min_stability
    }

    pub fn max_fail_probability(&self) -> Option<f64> {
        self.max_fail_probability
    }

    pub fn is_unconstrained(&self) -> bool {
        self.max_irritation.is_none()
            && self.min_stability.is_none()
            && self.max_fail_probability.is_none()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConstraintsBuilder {
    max_irritation: Option<f64>,
    min_stability: Option<f64>,
    max_fail_probability: Option<f64>,
}

impl ConstraintsBuilder {
    pub fn max_irritation(mut self, value: f64) -> Self {
        self.max_irritation = Some(value);
        self
    }
    pub fn min_stability(mut self, days: f64) -> Self {
        self.min_stability = Some(days);
        self
    }
    pub fn max_fail_probability(mut self, value: f64) -> Self {
        self.max_fail_probability = Some(value);
        self
    }

    pub fn build(self) -> Result<Constraints, ConfigError> {
        if let Some(value) = self.max_irritation {
            check_probability("max_irritation", value)?;
        }
        if let Some(value) = self.min_stability {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidConstraint {
                    name: "min_stability",
                    value,
                    reason: "must be a non-negative number of days",
                });
            }
        }
        if let Some(value) = self.max_fail_probability {
            check_probability("max_fail_probability", value)?;
        }
        Ok(Constraints {
            max_irritation: self.max_irritation,
            min_stability: self.min_stability,
            max_fail_probability: self.max_fail_probability,
        })
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidConstraint {
            name,
            value,
            reason: "must lie in [0, 1]",
        })
    }
}

/// Parameters of one proposal generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalConfig {
    pub pool_size: usize,
    pub seed: u64,
    pub top_n: usize,
    pub constraints: Option<Constraints>,
    pub sampler: SamplerConfig,
}

#[derive(Default)]
pub struct ProposalConfigBuilder {
    pool_size: Option<usize>,
    seed: Option<u64>,
    top_n: Option<usize>,
    constraints: Option<Constraints>,
    sampler: Option<SamplerConfig>,
}

impl ProposalConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool_size(mut self, size: usize) -> Self {
        self.pool_size = Some(size);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }
    pub fn constraints(mut self, constraints: Option<Constraints>) -> Self {
        self.constraints = constraints;
        self
    }
    pub fn sampler(mut self, sampler: SamplerConfig) -> Self {
        self.sampler = Some(sampler);
        self
    }

    pub fn build(self) -> Result<ProposalConfig, ConfigError> {
        let sampler = self.sampler.unwrap_or_default();
        sampler.validate()?;
        Ok(ProposalConfig {
            pool_size: self
                .pool_size
                .ok_or(ConfigError::MissingParameter("pool_size"))?,
            seed: self.seed.ok_or(ConfigError::MissingParameter("seed"))?,
            top_n: self.top_n.ok_or(ConfigError::MissingParameter("top_n"))?,
            constraints: self.constraints,
            sampler,
        })
    }
}
