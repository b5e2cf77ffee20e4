//! Phenotype dependent fitness
//!
//! Fitness weights are uniform during the burn-in. At the onset tick the mean and standard
//! deviation of the realized phenotypes are frozen as the optimum of a Gaussian fitness
//! landscape, which stays fixed for the remainder of the run.

use std::f64::consts::PI;
use std::sync::OnceLock;

use crate::config::SelectionParameters;
use crate::core::phase::Phase;
use crate::errors::{Result, SimulationError};
use crate::stats::mean_sd;

/// Frozen phenotype distribution at selection onset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Optimum {
    pub sd: f64,
    pub optimum: f64,
}

impl Optimum {
    pub fn from_phenotypes(phenotypes: &[f64]) -> Result<Self> {
        let (optimum, sd) = mean_sd(phenotypes);
        if !(sd.is_finite() && sd > 0.) || !optimum.is_finite() {
            return Err(SimulationError::ConfigurationError(format!(
                "Phenotype distribution at selection onset is degenerate (mean={optimum}, sd={sd}); \
                 increase the burn-in or the mutation rate"
            )));
        }
        Ok(Self { sd, optimum })
    }
}

/// Density of a normal distribution with mean 0 and standard deviation `sd` at `x`.
#[inline]
pub fn normal_density(x: f64, sd: f64) -> f64 {
    let z = x / sd;
    (-0.5 * z * z).exp() / (sd * (2. * PI).sqrt())
}

/// Gaussian stabilizing selection `baseline + factor * density(optimum - phenotype)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StabilizingSelection {
    factor: f64,
    baseline: f64,
}

impl StabilizingSelection {
    pub fn new(parameters: &SelectionParameters) -> Self {
        Self {
            factor: parameters.factor,
            baseline: parameters.baseline,
        }
    }

    #[inline]
    pub fn weight(&self, phenotype: f64, optimum: &Optimum) -> f64 {
        self.baseline + self.factor * normal_density(optimum.optimum - phenotype, optimum.sd)
    }
}

#[derive(Debug)]
pub struct FitnessLandscape {
    selection: StabilizingSelection,
    optimum: OnceLock<Optimum>,
}

impl FitnessLandscape {
    pub fn new(selection: StabilizingSelection) -> Self {
        Self {
            selection,
            optimum: OnceLock::new(),
        }
    }

    pub fn optimum(&self) -> Option<&Optimum> {
        self.optimum.get()
    }

    /// Freeze the optimum from the phenotypes realized at the onset tick.
    pub fn freeze(&self, phenotypes: &[f64]) -> Result<&Optimum> {
        let optimum = Optimum::from_phenotypes(phenotypes)?;
        self.optimum.set(optimum).map_err(|_| {
            SimulationError::ImplementationError("Optimum was already frozen".to_string())
        })?;
        log::info!(
            "Froze phenotype optimum at {} with standard deviation {}",
            optimum.optimum,
            optimum.sd
        );
        self.optimum().ok_or_else(|| {
            SimulationError::ImplementationError("Optimum missing after freeze".to_string())
        })
    }

    /// Fitness weights of all individuals in the given phase.
    pub fn weights(&self, phase: Phase, phenotypes: &[f64]) -> Result<Vec<f64>> {
        if !phase.is_selective() {
            return Ok(vec![1.; phenotypes.len()]);
        }
        let optimum = self.optimum().ok_or_else(|| {
            SimulationError::ImplementationError(format!(
                "Fitness requested in phase `{phase}` before the optimum was frozen"
            ))
        })?;
        Ok(phenotypes
            .iter()
            .map(|&phenotype| self.selection.weight(phenotype, optimum))
            .collect())
    }
}
