use crate::core::genome::Genome;
use crate::core::mutation::MutationRegistry;

/// A diploid individual carrying two genomes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Individual {
    genomes: [Genome; 2],
}

impl Individual {
    pub fn new(first: Genome, second: Genome) -> Self {
        Self {
            genomes: [first, second],
        }
    }

    pub fn genomes(&self) -> &[Genome; 2] {
        &self.genomes
    }

    pub fn genome(&self, index: usize) -> &Genome {
        &self.genomes[index]
    }

    /// Additive phenotype over both genome copies.
    pub fn phenotype(&self, registry: &MutationRegistry) -> f64 {
        self.genomes[0].effect_sum(registry) + self.genomes[1].effect_sum(registry)
    }
}
