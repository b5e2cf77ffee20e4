//! Population module
//!
//! The `Population` is the fixed-size collection of diploid individuals of the current tick. It
//! is replaced as a whole every tick; only the mutations referenced by its genomes outlive it
//! through the `MutationRegistry`.

use std::ops::Index;

use crate::core::genome::Genome;
use crate::core::individual::Individual;
use crate::core::mutation::MutationRegistry;

#[macro_export]
macro_rules! population {
    () => {
        $crate::core::Population::from_individuals(Vec::new())
    };
    ($individual:expr; $size:expr) => {
        $crate::core::Population::from_individuals(vec![$individual; $size])
    };
    ($( $individual:expr ),+ $(,)?) => {
        $crate::core::Population::from_individuals(vec![$( $individual ),+])
    };
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Index<usize> for Population {
    type Output = Individual;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<I: IntoIterator<Item = Individual>>(iter: I) -> Self {
        Self {
            individuals: iter.into_iter().collect(),
        }
    }
}

impl Population {
    /// Construct a founder population of `size` individuals without mutations.
    pub fn founders(size: usize) -> Self {
        population![Individual::default(); size]
    }

    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    /// Number of genome copies, i.e. twice the number of individuals.
    pub fn genome_count(&self) -> usize {
        2 * self.individuals.len()
    }

    /// Iterate over all genomes in individual order, first then second copy.
    pub fn genomes(&self) -> impl Iterator<Item = &Genome> + '_ {
        self.individuals
            .iter()
            .flat_map(|individual| individual.genomes().iter())
    }

    pub fn phenotypes(&self, registry: &MutationRegistry) -> Vec<f64> {
        self.individuals
            .iter()
            .map(|individual| individual.phenotype(registry))
            .collect()
    }
}
