//! Mutation registry
//!
//! The registry is an append-only arena of every mutation created during a run. Genomes refer
//! to mutations by `MutationId`, which is the index of the mutation in the arena. Mutations are
//! never removed, even when lost or fixed, so the registry grows monotonically with the run.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::core::Population;
use crate::stats::PopulationFrequencies;

/// Dominance coefficient of every mutation.
pub const DOMINANCE: f64 = 0.5;

/// Identifier of the only subpopulation.
pub const SUBPOPULATION: &str = "p1";

#[derive(
    Clone, Copy, Debug, Display, From, Into, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
pub struct MutationId(usize);

impl MutationId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    /// Mutation without effect on the trait.
    Neutral,
    /// Mutation that contributes its effect to the phenotype.
    Trait,
}

impl MutationKind {
    pub fn label(&self) -> &'static str {
        match self {
            MutationKind::Neutral => "m1",
            MutationKind::Trait => "m2",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mutation {
    id: MutationId,
    position: usize,
    effect: f64,
    dominance: f64,
    origin_tick: usize,
    kind: MutationKind,
}

impl Mutation {
    pub fn id(&self) -> MutationId {
        self.id
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn effect(&self) -> f64 {
        self.effect
    }

    pub fn dominance(&self) -> f64 {
        self.dominance
    }

    pub fn origin_tick(&self) -> usize {
        self.origin_tick
    }

    pub fn origin_subpopulation(&self) -> &'static str {
        SUBPOPULATION
    }

    pub fn kind(&self) -> MutationKind {
        self.kind
    }
}

#[derive(Clone, Debug, Default)]
pub struct MutationRegistry {
    mutations: Vec<Mutation>,
}

impl MutationRegistry {
    pub fn new() -> Self {
        Self {
            mutations: Vec::new(),
        }
    }

    /// Register a new mutation and return its identifier.
    pub fn create(
        &mut self,
        position: usize,
        effect: f64,
        kind: MutationKind,
        origin_tick: usize,
    ) -> MutationId {
        let id = MutationId(self.mutations.len());
        self.mutations.push(Mutation {
            id,
            position,
            effect,
            dominance: DOMINANCE,
            origin_tick,
            kind,
        });
        id
    }

    #[inline]
    pub fn get(&self, id: MutationId) -> &Mutation {
        &self.mutations[id.index()]
    }

    #[inline]
    pub fn effect(&self, id: MutationId) -> f64 {
        self.mutations[id.index()].effect
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mutation> {
        self.mutations.iter()
    }

    pub fn count_by_kind(&self, kind: MutationKind) -> usize {
        self.mutations.iter().filter(|m| m.kind == kind).count()
    }

    /// Number of genome copies carrying each mutation that is present in the population.
    ///
    /// Mutations that are absent from the population do not appear in the map.
    pub fn prevalence(&self, population: &Population) -> HashMap<MutationId, usize> {
        population.prevalence()
    }

    /// Fraction of genome copies in the population carrying the mutation.
    pub fn frequency_of(&self, id: MutationId, population: &Population) -> f64 {
        let carriers = population
            .genomes()
            .filter(|genome| genome.contains(id, self.get(id).position))
            .count();
        carriers as f64 / population.genome_count() as f64
    }
}
