//! Output schedule
//!
//! The schedule decides at which ticks the summary, the mutation catalog and the presence matrix
//! are written. Ticks are given as integer expressions relative to the selection onset, e.g.
//! `onset - 1000`, and resolved once the onset and the last tick of the run are known.

use evalexpr::{HashMapContext, context_map};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::{Result, SimulationError};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Schedule {
    /// Logging regimes, each active from its start until the start of the next one.
    pub logging: Vec<LoggingRegime>,

    /// Ticks at which catalog and presence snapshots are written.
    pub snapshots: Vec<String>,

    /// Mutations listed in each catalog snapshot.
    #[serde(default)]
    pub catalog: CatalogScope,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LoggingRegime {
    pub start: String,
    pub interval: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogScope {
    /// Every mutation ever created, including lost ones.
    #[default]
    All,
    /// Only mutations carried by at least one genome.
    Present,
}

impl LoggingRegime {
    pub fn new(start: &str, interval: usize) -> Self {
        Self {
            start: start.to_string(),
            interval,
        }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            logging: vec![
                LoggingRegime::new("1", 1000),
                LoggingRegime::new("onset - 10000", 100),
                LoggingRegime::new("onset - 1000", 10),
                LoggingRegime::new("onset", 1),
                LoggingRegime::new("onset + 1000", 100),
            ],
            snapshots: [
                "onset - 1000",
                "onset - 100",
                "onset - 10",
                "onset",
                "onset + 10",
                "onset + 100",
                "onset + 1000",
                "onset + 2000",
                "onset + 5000",
                "onset + 10000",
                "onset + 20000",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            catalog: CatalogScope::All,
        }
    }
}

impl Schedule {
    /// Evaluate all tick expressions for a run with the given onset and last tick.
    pub fn resolve(&self, onset: usize, end: usize) -> Result<OutputPlan> {
        if self.logging.is_empty() {
            return Err(SimulationError::ConfigurationError(
                "At least one logging regime is required".to_string(),
            ));
        }

        let mut logging = LoggingSchedule::default();
        for regime in &self.logging {
            if regime.interval == 0 {
                return Err(SimulationError::ConfigurationError(format!(
                    "Logging interval starting at `{}` must be positive",
                    regime.start
                )));
            }
            let start = evaluate_tick(&regime.start, onset, end)?;
            logging.push(start, regime.interval);
        }

        let snapshots = self
            .snapshots
            .iter()
            .map(|expression| evaluate_tick(expression, onset, end))
            .collect::<Result<Vec<i64>>>()?
            .into_iter()
            .filter(|&tick| tick >= 1 && tick <= end as i64)
            .map(|tick| tick as usize)
            .collect();

        Ok(OutputPlan {
            logging,
            snapshots,
            catalog: self.catalog,
        })
    }
}

/// Schedule with all expressions evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputPlan {
    pub logging: LoggingSchedule,
    pub snapshots: BTreeSet<usize>,
    pub catalog: CatalogScope,
}

impl OutputPlan {
    pub fn is_snapshot(&self, tick: usize) -> bool {
        self.snapshots.contains(&tick)
    }
}

/// Piecewise constant logging interval keyed by the tick at which it takes effect.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoggingSchedule {
    starts: Vec<i64>,
    intervals: Vec<usize>,
}

impl LoggingSchedule {
    /// Append a regime. A regime that does not start after the last one replaces every regime
    /// starting at or after its own start.
    fn push(&mut self, start: i64, interval: usize) {
        let keep = self.starts.partition_point(|&s| s < start);
        self.starts.truncate(keep);
        self.intervals.truncate(keep);
        self.starts.push(start);
        self.intervals.push(interval);
    }

    /// Interval in effect at `tick`, or `None` before the first regime starts.
    pub fn interval_at(&self, tick: usize) -> Option<usize> {
        let index = self.starts.partition_point(|&s| s <= tick as i64);
        index.checked_sub(1).map(|i| self.intervals[i])
    }

    pub fn should_log(&self, tick: usize) -> bool {
        self.interval_at(tick)
            .is_some_and(|interval| tick % interval == 0)
    }

    /// Iterate over `(start, interval)` pairs in order.
    pub fn regimes(&self) -> impl Iterator<Item = (i64, usize)> + '_ {
        self.starts.iter().copied().zip(self.intervals.iter().copied())
    }
}

fn evaluate_tick(expression: &str, onset: usize, end: usize) -> Result<i64> {
    if let Ok(tick) = expression.trim().parse::<i64>() {
        return Ok(tick);
    }
    let context: HashMapContext = context_map! {
        "onset" => int onset as i64,
        "end" => int end as i64,
    }
    .map_err(|e| SimulationError::ImplementationError(format!("{e}")))?;
    evalexpr::eval_int_with_context(expression, &context).map_err(|e| {
        SimulationError::ConfigurationError(format!("Invalid tick expression `{expression}`: {e}"))
    })
}
