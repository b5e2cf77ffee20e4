use itertools::Itertools;
use std::collections::HashMap;

use crate::core::Population;
use crate::core::mutation::{MutationId, MutationKind, MutationRegistry};

/// Sample mean and standard deviation with `n - 1` denominator.
///
/// The standard deviation of fewer than two values is zero.
pub fn mean_sd(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    if n == 0 {
        return (0., 0.);
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    if n < 2 {
        return (mean, 0.);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    (mean, variance.sqrt())
}

/// Population level statistics of one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub segregating: usize,
    pub heterozygosity: f64,
    pub phenotype_mean: f64,
    pub phenotype_sd: f64,
}

/// Trait extension to count mutation copies in a population
pub trait PopulationFrequencies {
    fn prevalence(&self) -> HashMap<MutationId, usize>;
}

impl PopulationFrequencies for Population {
    /// Number of genome copies carrying each present mutation.
    fn prevalence(&self) -> HashMap<MutationId, usize> {
        self.genomes().flat_map(|genome| genome.ids()).counts()
    }
}

/// Trait extension to summarize the genetic and phenotypic state of a population
pub trait PopulationSummary {
    fn segregating(&self, registry: &MutationRegistry, prevalence: &HashMap<MutationId, usize>)
    -> usize;

    fn heterozygosity(&self, prevalence: &HashMap<MutationId, usize>, genome_size: usize) -> f64;

    fn summary(&self, registry: &MutationRegistry, phenotypes: &[f64], genome_size: usize)
    -> Summary;
}

impl PopulationSummary for Population {
    /// Number of trait-affecting mutations that are neither lost nor fixed.
    fn segregating(
        &self,
        registry: &MutationRegistry,
        prevalence: &HashMap<MutationId, usize>,
    ) -> usize {
        let copies = self.genome_count();
        prevalence
            .iter()
            .filter(|&(&id, &count)| {
                count < copies && registry.get(id).kind() == MutationKind::Trait
            })
            .count()
    }

    /// Expected heterozygosity per base, `sum 2p(1 - p) / genome_size` over present mutations.
    fn heterozygosity(&self, prevalence: &HashMap<MutationId, usize>, genome_size: usize) -> f64 {
        let copies = self.genome_count() as f64;
        // summed in id order for reproducible rounding
        let total: f64 = prevalence
            .iter()
            .sorted_unstable_by_key(|&(&id, _)| id)
            .map(|(_, &count)| {
                let p = count as f64 / copies;
                2. * p * (1. - p)
            })
            .sum();
        total / genome_size as f64
    }

    fn summary(
        &self,
        registry: &MutationRegistry,
        phenotypes: &[f64],
        genome_size: usize,
    ) -> Summary {
        let prevalence = self.prevalence();
        let (phenotype_mean, phenotype_sd) = mean_sd(phenotypes);
        Summary {
            segregating: self.segregating(registry, &prevalence),
            heterozygosity: self.heterozygosity(&prevalence, genome_size),
            phenotype_mean,
            phenotype_sd,
        }
    }
}
