//! Fitness-weighted parent sampling
//!
//! Wright-Fisher resampling draws parents with replacement and with probability proportional to
//! their fitness weight. Uniform weights short-cut to a uniform index sampler, any other weights
//! are turned into an alias table for constant time draws.

use rand::Rng;
use rand::distr::Uniform;
use rand_distr::Distribution;
use rand_distr::weighted::WeightedAliasIndex;

use crate::errors::{Result, SimulationError};

#[derive(Clone, Debug)]
pub enum ParentSampler {
    Uniform(Uniform<usize>),
    Weighted(WeightedAliasIndex<f64>),
}

impl ParentSampler {
    pub fn uniform(size: usize) -> Result<Self> {
        let uniform = Uniform::new(0, size).map_err(|e| {
            SimulationError::ConfigurationError(format!(
                "Unable to sample parents from population of size {size}: {e}"
            ))
        })?;
        Ok(ParentSampler::Uniform(uniform))
    }

    /// Construct a sampler from non-negative fitness weights.
    ///
    /// Zero weights are legal, but at least one weight has to be positive.
    pub fn from_weights(weights: &[f64]) -> Result<Self> {
        if let Some(weight) = weights.iter().find(|w| !(w.is_finite() && **w >= 0.)) {
            return Err(SimulationError::ConfigurationError(format!(
                "Fitness weights must be finite and non-negative, got {weight}"
            )));
        }
        if weights.iter().all(|&w| w == 0.) {
            return Err(SimulationError::ConfigurationError(
                "All fitness weights are zero".to_string(),
            ));
        }
        if weights.windows(2).all(|w| w[0] == w[1]) {
            return Self::uniform(weights.len());
        }
        let alias = WeightedAliasIndex::new(weights.to_vec()).map_err(|e| {
            SimulationError::ConfigurationError(format!("Invalid fitness weights: {e}"))
        })?;
        Ok(ParentSampler::Weighted(alias))
    }
}

impl Distribution<usize> for ParentSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self {
            ParentSampler::Uniform(uniform) => uniform.sample(rng),
            ParentSampler::Weighted(alias) => alias.sample(rng),
        }
    }
}
