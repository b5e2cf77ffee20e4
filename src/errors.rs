//! All errors that can occur in the stabsel library.
//!
//! Every error is fatal for a run. There are no transient conditions, so callers propagate
//! errors up to the runner which aborts the simulation.

use std::fmt;

pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Debug)]
pub enum SimulationError {
    /// Invalid parameters or a degenerate state detected at runtime (e.g. zero phenotypic
    /// variance at selection onset).
    ConfigurationError(String),
    /// Output paths cannot be created or appended to.
    IoError(std::io::Error),
    CsvError(csv::Error),
    ImplementationError(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::ConfigurationError(message) => {
                write!(f, "ConfigurationError: {}", message)
            }
            SimulationError::IoError(error) => write!(f, "IoError: {}", error),
            SimulationError::CsvError(error) => write!(f, "CsvError: {}", error),
            SimulationError::ImplementationError(message) => {
                write!(f, "ImplementationError: {}", message)
            }
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<std::io::Error> for SimulationError {
    fn from(error: std::io::Error) -> Self {
        SimulationError::IoError(error)
    }
}

impl From<csv::Error> for SimulationError {
    fn from(error: csv::Error) -> Self {
        SimulationError::CsvError(error)
    }
}
