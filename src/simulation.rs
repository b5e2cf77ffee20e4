//! Simulation state and the per-tick update.
//!
//! Each tick the population is replaced by offspring of the previous population, drawn with
//! the fitness weights of the previous tick. Phenotypes and the phase of the new tick then
//! determine the weights used for the next reproduction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Parameters;
use crate::core::{
    FitnessLandscape, MutationRegistry, Optimum, ParentSampler, Phase, PhaseController,
    Population, Reproduction, StabilizingSelection,
};
use crate::errors::Result;
use crate::stats::{PopulationSummary, Summary};

pub struct Simulation<R: Rng = StdRng> {
    tick: usize,
    parameters: Parameters,
    registry: MutationRegistry,
    population: Population,
    phenotypes: Vec<f64>,
    sampler: ParentSampler,
    phases: PhaseController,
    landscape: FitnessLandscape,
    reproduction: Reproduction,
    rng: R,
}

impl Simulation<StdRng> {
    pub fn from_seed(parameters: Parameters, seed: u64) -> Result<Self> {
        Self::new(parameters, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Set up a founder population without mutations at tick 0.
    pub fn new(parameters: Parameters, rng: R) -> Result<Self> {
        parameters.validate()?;
        let population = Population::founders(parameters.population_size);
        let phenotypes = vec![0.; population.len()];
        let sampler = ParentSampler::uniform(population.len())?;
        let reproduction = Reproduction::new(&parameters)?;
        let landscape =
            FitnessLandscape::new(StabilizingSelection::new(&parameters.selection));
        let phases = PhaseController::new(parameters.burn_in);

        Ok(Self {
            tick: 0,
            parameters,
            registry: MutationRegistry::new(),
            population,
            phenotypes,
            sampler,
            phases,
            landscape,
            reproduction,
            rng,
        })
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn registry(&self) -> &MutationRegistry {
        &self.registry
    }

    /// Phenotypes of the current population in individual order.
    pub fn phenotypes(&self) -> &[f64] {
        &self.phenotypes
    }

    pub fn phase(&self) -> Phase {
        self.phases.phase_at(self.tick)
    }

    pub fn optimum(&self) -> Option<&Optimum> {
        self.landscape.optimum()
    }

    pub fn is_finished(&self) -> bool {
        self.tick >= self.parameters.generations
    }

    pub fn summary(&self) -> Summary {
        self.population.summary(
            &self.registry,
            &self.phenotypes,
            self.parameters.genome_size,
        )
    }

    /// Advance by one tick and return the phase of the new tick.
    pub fn next_generation(&mut self) -> Result<Phase> {
        self.tick += 1;

        self.population = self.reproduction.advance_generation(
            &self.population,
            &self.sampler,
            &mut self.registry,
            self.tick,
            &mut self.rng,
        );
        self.phenotypes = self.population.phenotypes(&self.registry);

        let phase = self.phases.phase_at(self.tick);
        if phase == Phase::SelectionOnset {
            self.landscape.freeze(&self.phenotypes)?;
        }

        let weights = self.landscape.weights(phase, &self.phenotypes)?;
        self.sampler = ParentSampler::from_weights(&weights)?;

        log::trace!(
            "tick={} phase={} mutations={}",
            self.tick,
            phase,
            self.registry.len()
        );
        Ok(phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::EffectDistribution;

    fn parameters() -> Parameters {
        Parameters {
            population_size: 30,
            genome_size: 1000,
            mutation_rate: 1e-3,
            recombination_rate: 1e-3,
            effect_distribution: EffectDistribution::Fixed(0.2),
            burn_in: 20,
            generations: 40,
            seed: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn phases_follow_ticks() {
        let mut simulation = Simulation::from_seed(parameters(), 1).unwrap();
        assert_eq!(simulation.tick(), 0);
        assert_eq!(simulation.phenotypes(), &[0.; 30]);

        while !simulation.is_finished() {
            let phase = simulation.next_generation().unwrap();
            let expected = match simulation.tick() {
                t if t < 20 => Phase::BurnIn,
                20 => Phase::SelectionOnset,
                _ => Phase::Selection,
            };
            assert_eq!(phase, expected);
            assert_eq!(simulation.population().len(), 30);
            assert_eq!(simulation.optimum().is_some(), simulation.tick() >= 20);
        }
        assert_eq!(simulation.tick(), 40);
    }

    #[test]
    fn phenotypes_match_carried_effects() {
        let mut simulation = Simulation::from_seed(parameters(), 2).unwrap();
        for _ in 0..10 {
            simulation.next_generation().unwrap();
        }
        for (individual, &phenotype) in simulation
            .population()
            .iter()
            .zip(simulation.phenotypes())
        {
            let carried = individual
                .genomes()
                .iter()
                .map(|genome| genome.len())
                .sum::<usize>();
            assert!((phenotype - 0.2 * carried as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn registry_only_grows() {
        let mut simulation = Simulation::from_seed(parameters(), 3).unwrap();
        let mut previous = 0;
        for _ in 0..30 {
            simulation.next_generation().unwrap();
            assert!(simulation.registry().len() >= previous);
            previous = simulation.registry().len();
        }
    }

    #[test]
    fn degenerate_onset_aborts() {
        let degenerate = Parameters {
            mutation_rate: 0.,
            ..parameters()
        };
        let mut simulation = Simulation::from_seed(degenerate, 4).unwrap();
        for _ in 1..20 {
            simulation.next_generation().unwrap();
        }
        assert!(simulation.next_generation().is_err());
    }

    #[test]
    fn same_seed_same_state() {
        let mut first = Simulation::from_seed(parameters(), 5).unwrap();
        let mut second = Simulation::from_seed(parameters(), 5).unwrap();
        for _ in 0..25 {
            first.next_generation().unwrap();
            second.next_generation().unwrap();
        }
        assert_eq!(first.population(), second.population());
        assert_eq!(first.phenotypes(), second.phenotypes());
        assert_eq!(first.optimum(), second.optimum());
    }
}
