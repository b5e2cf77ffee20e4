//! Configuration data structures for simulation setups.

mod parameters;
mod schedule;
mod settings;

pub use parameters::{Parameters, SelectionParameters};
pub use schedule::{CatalogScope, LoggingRegime, LoggingSchedule, OutputPlan, Schedule};
pub use settings::{Settings, SettingsError};
