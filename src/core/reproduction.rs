//! Reproduction and recombination
//!
//! Each offspring is produced from two independently drawn parents. Each parent contributes one
//! gamete, which is a recombinant of its two genomes with new mutations added on top. The number
//! of breakpoints and new mutations per gamete are Poisson distributed with mean `rate * length`,
//! so the cost of gamete formation does not depend on the length of the genomic element.

use rand::Rng;
use rand::distr::Uniform;
use rand::seq::index;
use rand_distr::{Distribution, Poisson};
use smallvec::SmallVec;

use crate::config::Parameters;
use crate::core::effects::EffectSampler;
use crate::core::genome::Genome;
use crate::core::individual::Individual;
use crate::core::mutation::{MutationKind, MutationRegistry};
use crate::core::population::Population;
use crate::core::selection::ParentSampler;
use crate::errors::{Result, SimulationError};

pub type Breakpoints = SmallVec<[usize; 8]>;

#[derive(Clone, Debug)]
pub struct Reproduction {
    genome_size: usize,
    mutation_sampler: Option<Poisson<f64>>,
    recombination_sampler: Option<Poisson<f64>>,
    breakpoint_sampler: Option<Uniform<usize>>,
    effect_sampler: EffectSampler,
    causal_fraction: f64,
}

impl Reproduction {
    pub fn new(parameters: &Parameters) -> Result<Self> {
        let genome_size = parameters.genome_size;
        let mutation_sampler = poisson_or_none(parameters.mutation_rate * genome_size as f64)?;

        // breakpoints fall between bases, so there are `genome_size - 1` candidate positions
        let (recombination_sampler, breakpoint_sampler) = if genome_size >= 2 {
            let sampler =
                poisson_or_none(parameters.recombination_rate * (genome_size - 1) as f64)?;
            let positions = Uniform::new(1, genome_size).map_err(|e| {
                SimulationError::ConfigurationError(format!("Invalid genome size: {e}"))
            })?;
            (sampler, Some(positions))
        } else {
            (None, None)
        };

        let effect_sampler = EffectSampler::from_distribution(&parameters.effect_distribution)?;

        Ok(Self {
            genome_size,
            mutation_sampler,
            recombination_sampler,
            breakpoint_sampler,
            effect_sampler,
            causal_fraction: parameters.causal_fraction,
        })
    }

    /// Produce the next population from the current one.
    ///
    /// Parents are drawn with replacement according to `sampler`, two per offspring. All new
    /// mutations are registered in `registry` with `tick` as their origin.
    pub fn advance_generation<R: Rng + ?Sized>(
        &self,
        population: &Population,
        sampler: &ParentSampler,
        registry: &mut MutationRegistry,
        tick: usize,
        rng: &mut R,
    ) -> Population {
        (0..population.len())
            .map(|_| {
                let mother = &population[sampler.sample(rng)];
                let father = &population[sampler.sample(rng)];
                let first = self.make_gamete(mother, registry, tick, rng);
                let second = self.make_gamete(father, registry, tick, rng);
                Individual::new(first, second)
            })
            .collect()
    }

    /// Form one gamete of `parent` including new mutations.
    pub fn make_gamete<R: Rng + ?Sized>(
        &self,
        parent: &Individual,
        registry: &mut MutationRegistry,
        tick: usize,
        rng: &mut R,
    ) -> Genome {
        let breakpoints = self.sample_breakpoints(rng);
        let (first, second) = if rng.random_bool(0.5) {
            (parent.genome(0), parent.genome(1))
        } else {
            (parent.genome(1), parent.genome(0))
        };
        let mut gamete = Genome::recombine(first, second, &breakpoints);
        self.mutate(&mut gamete, registry, tick, rng);
        gamete
    }

    /// Sorted, distinct crossover positions in `[1, genome_size)`.
    pub fn sample_breakpoints<R: Rng + ?Sized>(&self, rng: &mut R) -> Breakpoints {
        let (Some(count_sampler), Some(position_sampler)) =
            (&self.recombination_sampler, &self.breakpoint_sampler)
        else {
            return Breakpoints::new();
        };

        let n_breakpoints = count_sampler.sample(rng) as usize;
        let mut breakpoints: Breakpoints = (0..n_breakpoints)
            .map(|_| position_sampler.sample(rng))
            .collect();
        breakpoints.sort_unstable();
        breakpoints.dedup();
        breakpoints
    }

    /// Add new mutations at distinct positions of `genome`.
    fn mutate<R: Rng + ?Sized>(
        &self,
        genome: &mut Genome,
        registry: &mut MutationRegistry,
        tick: usize,
        rng: &mut R,
    ) {
        let Some(count_sampler) = &self.mutation_sampler else {
            return;
        };

        let n_mutations = (count_sampler.sample(rng) as usize).min(self.genome_size);
        if n_mutations == 0 {
            return;
        }

        let mut positions = index::sample(rng, self.genome_size, n_mutations).into_vec();
        positions.sort_unstable();

        for position in positions {
            let id = if self.causal_fraction >= 1. || rng.random_bool(self.causal_fraction) {
                let effect = self.effect_sampler.sample(rng);
                registry.create(position, effect, MutationKind::Trait, tick)
            } else {
                registry.create(position, 0., MutationKind::Neutral, tick)
            };
            genome.insert(position, id);
        }
    }
}

fn poisson_or_none(lambda: f64) -> Result<Option<Poisson<f64>>> {
    if lambda <= 0. {
        return Ok(None);
    }
    Poisson::new(lambda)
        .map(Some)
        .map_err(|e| SimulationError::ConfigurationError(format!("Invalid Poisson rate: {e}")))
}
