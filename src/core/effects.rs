//! Effect size distributions of trait-affecting mutations.
//!
//! An `EffectDistribution` is the serializable description found in the settings, while an
//! `EffectSampler` is the validated, ready-to-sample form. Building the sampler is the only place
//! where invalid parameters are detected, such that sampling itself cannot fail.

use rand::Rng;
use rand_distr::{Distribution, Gamma, Normal};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimulationError};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum EffectDistribution {
    Gamma(GammaParameters),
    Gaussian(GaussianParameters),
    Fixed(f64),
}

/// Gamma distributed magnitudes parameterized by mean and shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GammaParameters {
    pub mean: f64,
    pub shape: f64,

    /// Randomize the sign of each drawn magnitude with equal probability.
    #[serde(default = "default_symmetric")]
    pub symmetric: bool,
}

fn default_symmetric() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GaussianParameters {
    pub mean: f64,
    pub sd: f64,
}

impl Default for EffectDistribution {
    fn default() -> Self {
        EffectDistribution::Gamma(GammaParameters {
            mean: 0.1,
            shape: 0.3,
            symmetric: true,
        })
    }
}

impl EffectDistribution {
    /// Override the mean and, for gamma distributions, the shape.
    pub fn with_overrides(mut self, mean: Option<f64>, shape: Option<f64>) -> Self {
        match &mut self {
            EffectDistribution::Gamma(params) => {
                if let Some(mean) = mean {
                    params.mean = mean;
                }
                if let Some(shape) = shape {
                    params.shape = shape;
                }
            }
            EffectDistribution::Gaussian(params) => {
                if let Some(mean) = mean {
                    params.mean = mean;
                }
            }
            EffectDistribution::Fixed(value) => {
                if let Some(mean) = mean {
                    *value = mean;
                }
            }
        }
        self
    }
}

#[derive(Clone, Debug)]
pub struct EffectSampler {
    sampler: Sampler,
}

#[derive(Clone, Debug)]
enum Sampler {
    Gamma { gamma: Gamma<f64>, symmetric: bool },
    Gaussian(Normal<f64>),
    Fixed(f64),
}

impl EffectSampler {
    pub fn from_distribution(distribution: &EffectDistribution) -> Result<Self> {
        let sampler = match distribution {
            EffectDistribution::Gamma(params) => {
                if !(params.shape > 0. && params.shape.is_finite()) {
                    return Err(SimulationError::ConfigurationError(format!(
                        "Gamma shape must be positive and finite, got {}",
                        params.shape
                    )));
                }
                if !(params.mean > 0. && params.mean.is_finite()) {
                    return Err(SimulationError::ConfigurationError(format!(
                        "Gamma mean must be positive and finite, got {}",
                        params.mean
                    )));
                }
                let gamma = Gamma::new(params.shape, params.mean / params.shape).map_err(|e| {
                    SimulationError::ConfigurationError(format!("Invalid gamma parameters: {e}"))
                })?;
                Sampler::Gamma {
                    gamma,
                    symmetric: params.symmetric,
                }
            }
            EffectDistribution::Gaussian(params) => {
                if !(params.sd >= 0. && params.sd.is_finite() && params.mean.is_finite()) {
                    return Err(SimulationError::ConfigurationError(format!(
                        "Gaussian requires finite mean and non-negative sd, got mean={} sd={}",
                        params.mean, params.sd
                    )));
                }
                let normal = Normal::new(params.mean, params.sd).map_err(|e| {
                    SimulationError::ConfigurationError(format!("Invalid gaussian parameters: {e}"))
                })?;
                Sampler::Gaussian(normal)
            }
            EffectDistribution::Fixed(value) => {
                if !value.is_finite() {
                    return Err(SimulationError::ConfigurationError(format!(
                        "Fixed effect must be finite, got {value}"
                    )));
                }
                Sampler::Fixed(*value)
            }
        };
        Ok(Self { sampler })
    }
}

impl Distribution<f64> for EffectSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.sampler {
            Sampler::Gamma { gamma, symmetric } => {
                let magnitude = gamma.sample(rng);
                if *symmetric && rng.random_bool(0.5) {
                    -magnitude
                } else {
                    magnitude
                }
            }
            Sampler::Gaussian(normal) => normal.sample(rng),
            Sampler::Fixed(value) => *value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn gamma(mean: f64, shape: f64, symmetric: bool) -> EffectDistribution {
        EffectDistribution::Gamma(GammaParameters {
            mean,
            shape,
            symmetric,
        })
    }

    #[test]
    fn reject_non_positive_shape() {
        assert!(EffectSampler::from_distribution(&gamma(0.1, 0., true)).is_err());
        assert!(EffectSampler::from_distribution(&gamma(0.1, -1., true)).is_err());
        assert!(EffectSampler::from_distribution(&gamma(0.1, f64::NAN, true)).is_err());
    }

    #[test]
    fn reject_negative_sd() {
        let distribution = EffectDistribution::Gaussian(GaussianParameters { mean: 0., sd: -1. });
        assert!(EffectSampler::from_distribution(&distribution).is_err());
    }

    #[test]
    fn symmetric_signs_balance() {
        let sampler = EffectSampler::from_distribution(&gamma(0.1, 0.3, true)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let positive = (0..n).filter(|_| sampler.sample(&mut rng) > 0.).count();
        let fraction = positive as f64 / n as f64;
        assert!((fraction - 0.5).abs() < 0.02, "fraction={fraction}");
    }

    #[test]
    fn asymmetric_gamma_is_positive() {
        let sampler = EffectSampler::from_distribution(&gamma(0.1, 0.3, false)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..1000).all(|_| sampler.sample(&mut rng) >= 0.));
    }

    #[test]
    fn gamma_mean_magnitude() {
        let sampler = EffectSampler::from_distribution(&gamma(0.5, 2., true)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let n = 50_000;
        let mean = (0..n).map(|_| sampler.sample(&mut rng).abs()).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.02, "mean={mean}");
    }

    #[test]
    fn fixed_effect() {
        let sampler = EffectSampler::from_distribution(&EffectDistribution::Fixed(0.25)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sampler.sample(&mut rng), 0.25);
    }

    #[test]
    fn overrides() {
        let distribution = gamma(0.1, 0.3, true).with_overrides(Some(1.), None);
        assert_eq!(distribution, gamma(1., 0.3, true));
        let distribution = gamma(0.1, 0.3, true).with_overrides(None, Some(2.));
        assert_eq!(distribution, gamma(0.1, 2., true));
    }
}
