//! Statistics and metric trait implementations

pub mod population;

pub use population::PopulationFrequencies;
pub use population::PopulationSummary;
pub use population::{Summary, mean_sd};
