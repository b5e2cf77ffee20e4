//! This module contains the core datatypes of the library.

#[macro_use]
pub mod population;
pub mod effects;
pub mod fitness;
pub mod genome;
pub mod individual;
pub mod mutation;
pub mod phase;
pub mod reproduction;
pub mod selection;

pub use effects::{EffectDistribution, EffectSampler};
pub use fitness::{FitnessLandscape, Optimum, StabilizingSelection};
pub use genome::Genome;
pub use individual::Individual;
pub use mutation::{Mutation, MutationId, MutationKind, MutationRegistry};
pub use phase::{Phase, PhaseController};
pub use population::Population;
pub use reproduction::Reproduction;
pub use selection::ParentSampler;
