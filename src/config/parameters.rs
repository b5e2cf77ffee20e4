use serde::{Deserialize, Serialize};

use crate::args::Args;
use crate::core::effects::{EffectDistribution, EffectSampler};
use crate::errors::{Result, SimulationError};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Parameters {
    /// Number of diploid individuals, constant over the whole run.
    pub population_size: usize,

    /// Length of the genomic element in base pairs.
    pub genome_size: usize,

    /// Per base and per gamete probability of a new mutation.
    pub mutation_rate: f64,

    /// Per base and per gamete probability of a crossover breakpoint.
    pub recombination_rate: f64,

    /// Distribution of effect sizes of trait-affecting mutations.
    pub effect_distribution: EffectDistribution,

    /// Fraction of new mutations that affect the trait; the remainder are neutral.
    #[serde(default = "default_causal_fraction")]
    pub causal_fraction: f64,

    /// Strength of stabilizing selection after the burn-in.
    pub selection: SelectionParameters,

    /// Tick at which the optimum is frozen and selection sets in.
    pub burn_in: usize,

    /// Last tick of the simulation.
    pub generations: usize,

    /// Seed of the random number generator. Resolved at startup if missing.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SelectionParameters {
    /// Multiplier of the Gaussian density term.
    pub factor: f64,

    /// Constant added to every fitness weight.
    #[serde(default = "default_baseline")]
    pub baseline: f64,
}

fn default_causal_fraction() -> f64 {
    1.
}

fn default_baseline() -> f64 {
    1.
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            population_size: 10_000,
            genome_size: 100_000,
            mutation_rate: 1e-7,
            recombination_rate: 1e-8,
            effect_distribution: EffectDistribution::default(),
            causal_fraction: default_causal_fraction(),
            selection: SelectionParameters {
                factor: 1.,
                baseline: default_baseline(),
            },
            burn_in: 100_000,
            generations: 120_000,
            seed: None,
        }
    }
}

impl Parameters {
    /// Apply values given on the command line.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(factor) = args.factor {
            self.selection.factor = factor;
        }
        if let Some(baseline) = args.baseline {
            self.selection.baseline = baseline;
        }
        if let Some(genome_size) = args.genome_size {
            self.genome_size = genome_size;
        }
        if let Some(causal_fraction) = args.causal_fraction {
            self.causal_fraction = causal_fraction;
        }
        if let Some(population_size) = args.population_size {
            self.population_size = population_size;
        }
        if let Some(burn_in) = args.burn_in {
            self.burn_in = burn_in;
        }
        if let Some(generations) = args.generations {
            self.generations = generations;
        }
        if let Some(mutation_rate) = args.mutation_rate {
            self.mutation_rate = mutation_rate;
        }
        if let Some(recombination_rate) = args.recombination_rate {
            self.recombination_rate = recombination_rate;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        self.effect_distribution = self
            .effect_distribution
            .clone()
            .with_overrides(args.effect_mean, args.effect_shape);
    }

    /// Check all parameters for consistency.
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| Err(SimulationError::ConfigurationError(message));

        if self.population_size == 0 {
            return fail("Population size must be positive".to_string());
        }
        if self.genome_size == 0 {
            return fail("Genome size must be positive".to_string());
        }
        if !is_probability(self.mutation_rate) {
            return fail(format!(
                "Mutation rate must lie in [0, 1], got {}",
                self.mutation_rate
            ));
        }
        if !is_probability(self.recombination_rate) {
            return fail(format!(
                "Recombination rate must lie in [0, 1], got {}",
                self.recombination_rate
            ));
        }
        if !is_probability(self.causal_fraction) {
            return fail(format!(
                "Causal fraction must lie in [0, 1], got {}",
                self.causal_fraction
            ));
        }
        if !(self.selection.factor.is_finite() && self.selection.factor >= 0.) {
            return fail(format!(
                "Selection factor must be finite and non-negative, got {}",
                self.selection.factor
            ));
        }
        if !(self.selection.baseline.is_finite() && self.selection.baseline >= 0.) {
            return fail(format!(
                "Fitness baseline must be finite and non-negative, got {}",
                self.selection.baseline
            ));
        }
        if self.selection.factor == 0. && self.selection.baseline == 0. {
            return fail("Selection factor and baseline cannot both be zero".to_string());
        }
        if self.burn_in == 0 {
            return fail("Burn-in must end at a positive tick".to_string());
        }
        if self.generations == 0 {
            return fail("Number of generations must be positive".to_string());
        }
        if self.generations < self.burn_in {
            log::warn!(
                "Simulation ends at tick {} before selection sets in at tick {}",
                self.generations,
                self.burn_in
            );
        }
        EffectSampler::from_distribution(&self.effect_distribution)?;
        Ok(())
    }
}

fn is_probability(value: f64) -> bool {
    (0. ..=1.).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::GammaParameters;

    #[test]
    fn default_is_valid() {
        assert!(Parameters::default().validate().is_ok());
    }

    #[test]
    fn read_write() {
        let parameters = Parameters {
            seed: Some(12),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&parameters).unwrap();
        let read: Parameters = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(read, parameters);
    }

    #[test]
    fn optional_fields_default() {
        let yaml = r#"
population_size: 100
genome_size: 1000
mutation_rate: 1.0e-5
recombination_rate: 1.0e-6
effect_distribution: !Gamma
  mean: 0.1
  shape: 0.3
selection:
  factor: 2.0
burn_in: 50
generations: 100
"#;
        let parameters: Parameters = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parameters.causal_fraction, 1.);
        assert_eq!(parameters.selection.baseline, 1.);
        assert_eq!(parameters.seed, None);
        assert_eq!(
            parameters.effect_distribution,
            EffectDistribution::Gamma(GammaParameters {
                mean: 0.1,
                shape: 0.3,
                symmetric: true
            })
        );
    }

    #[test]
    fn reject_invalid() {
        let invalid = [
            Parameters {
                population_size: 0,
                ..Default::default()
            },
            Parameters {
                genome_size: 0,
                ..Default::default()
            },
            Parameters {
                mutation_rate: 1.5,
                ..Default::default()
            },
            Parameters {
                causal_fraction: -0.1,
                ..Default::default()
            },
            Parameters {
                selection: SelectionParameters {
                    factor: 1.,
                    baseline: -0.5,
                },
                ..Default::default()
            },
            Parameters {
                selection: SelectionParameters {
                    factor: 0.,
                    baseline: 0.,
                },
                ..Default::default()
            },
            Parameters {
                effect_distribution: EffectDistribution::Gamma(GammaParameters {
                    mean: 0.1,
                    shape: 0.,
                    symmetric: true,
                }),
                ..Default::default()
            },
        ];
        for parameters in invalid {
            assert!(parameters.validate().is_err(), "{parameters:?}");
        }
    }

    #[test]
    fn args_take_precedence() {
        let args = Args {
            factor: Some(5.),
            genome_size: Some(42),
            effect_mean: Some(0.2),
            effect_shape: Some(1.5),
            seed: Some(9),
            ..Default::default()
        };
        let mut parameters = Parameters::default();
        parameters.apply_args(&args);
        assert_eq!(parameters.selection.factor, 5.);
        assert_eq!(parameters.genome_size, 42);
        assert_eq!(parameters.seed, Some(9));
        assert_eq!(
            parameters.effect_distribution,
            EffectDistribution::Gamma(GammaParameters {
                mean: 0.2,
                shape: 1.5,
                symmetric: true
            })
        );
    }
}
