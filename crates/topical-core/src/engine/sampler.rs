use super::config::ConfigError;
use crate::core::models::features::{CandidatePool, FeatureName, FeatureVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use tracing::{debug, instrument};

pub const DEFAULT_POOL_SIZE: usize = 600;

/// Distribution a single feature is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureDistribution {
    /// Uniform over `[low, high)`.
    Uniform { low: f64, high: f64 },
    /// `exp(N(mu, sigma^2))`.
    LogNormal { mu: f64, sigma: f64 },
}

impl FeatureDistribution {
    fn validate(&self, feature: FeatureName) -> Result<(), ConfigError> {
        let reason = match *self {
            FeatureDistribution::Uniform { low, high } => {
                if !low.is_finite() || !high.is_finite() {
                    Some(format!("uniform bounds must be finite, got [{}, {})", low, high))
                } else if low >= high {
                    Some(format!("uniform requires low < high, got [{}, {})", low, high))
                } else if !(high - low).is_finite() {
                    Some(format!("uniform range width overflows, got [{}, {})", low, high))
                } else {
                    None
                }
            }
            FeatureDistribution::LogNormal { mu, sigma } => {
                if !mu.is_finite() {
                    Some(format!("log-normal mu must be finite, got {}", mu))
                } else if !sigma.is_finite() || sigma <= 0.0 {
                    Some(format!("log-normal sigma must be positive, got {}", sigma))
                } else {
                    None
                }
            }
        };
        match reason {
            Some(reason) => Err(ConfigError::InvalidDistribution { feature, reason }),
            None => Ok(()),
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            FeatureDistribution::Uniform { low, high } => rng.gen_range(low..high),
            FeatureDistribution::LogNormal { mu, sigma } => {
                (mu + sigma * standard_normal(rng)).exp()
            }
        }
    }
}

/// Box-Muller draw from the standard normal distribution.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // u1 in (0, 1] keeps the logarithm finite.
    let u1 = 1.0 - rng.r#gen::<f64>();
    let u2 = rng.r#gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Per-feature sampling distributions, indexed in [`FeatureName::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    distributions: [FeatureDistribution; 8],
}

impl SamplerConfig {
    pub fn distribution(&self, feature: FeatureName) -> FeatureDistribution {
        self.distributions[feature.index()]
    }

    pub fn with_distribution(
        mut self,
        feature: FeatureName,
        distribution: FeatureDistribution,
    ) -> Self {
        self.distributions[feature.index()] = distribution;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for feature in FeatureName::ALL {
            self.distribution(feature).validate(feature)?;
        }
        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        use FeatureDistribution::{LogNormal, Uniform};

        Self {
            distributions: [
                Uniform {
                    low: 0.1,
                    high: 5.0,
                },
                Uniform {
                    low: 0.0,
                    high: 1.0,
                },
                Uniform {
                    low: 0.0,
                    high: 8.0,
                },
                Uniform {
                    low: 0.0,
                    high: 3.0,
                },
                Uniform {
                    low: 4.0,
                    high: 8.0,
                },
                LogNormal {
                    mu: 2.7,
                    sigma: 0.45,
                },
                Uniform {
                    low: 18.0,
                    high: 45.0,
                },
                Uniform {
                    low: 2.0,
                    high: 45.0,
                },
            ],
        }
    }
}

/// Draws candidate pools from a validated [`SamplerConfig`].
#[derive(Debug, Clone)]
pub struct CandidateSampler {
    config: SamplerConfig,
}

impl CandidateSampler {
    pub fn new(config: SamplerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Draws `pool_size` independent feature vectors from a generator seeded with `seed`.
    ///
    /// The same seed and pool size always produce a bit-identical pool. Each call owns its
    /// generator, so concurrent callers never share random state.
    #[instrument(level = "debug", skip(self))]
    pub fn generate(&self, pool_size: usize, seed: u64) -> CandidatePool {
        let mut rng = StdRng::seed_from_u64(seed);
        let candidates: Vec<FeatureVector> = (0..pool_size)
            .map(|_| {
                let mut values = [0.0; 8];
                for feature in FeatureName::ALL {
                    values[feature.index()] = self.config.distribution(feature).sample(&mut rng);
                }
                FeatureVector::from_array(values)
            })
            .collect();
        debug!(count = candidates.len(), "Candidate pool generated.");
        CandidatePool::new(candidates)
    }
}

impl Default for CandidateSampler {
    fn default() -> Self {
        Self {
            config: SamplerConfig::default(),
        }
    }
}
