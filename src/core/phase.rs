//! Simulation phases
//!
//! A run passes through three phases that depend on the tick alone. Before the onset tick the
//! population evolves neutrally, at the onset tick the phenotype distribution is frozen into the
//! fitness landscape, and afterwards every tick is under stabilizing selection.

use derive_more::Display;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    #[display("burn-in")]
    BurnIn,
    #[display("selection onset")]
    SelectionOnset,
    #[display("selection")]
    Selection,
}

impl Phase {
    /// Whether fitness weights depend on the phenotype.
    pub fn is_selective(&self) -> bool {
        !matches!(self, Phase::BurnIn)
    }
}

/// Maps ticks to phases through a table of transitions.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseController {
    transitions: [(usize, Phase); 3],
}

impl PhaseController {
    pub fn new(onset: usize) -> Self {
        Self {
            transitions: [
                (0, Phase::BurnIn),
                (onset, Phase::SelectionOnset),
                (onset.saturating_add(1), Phase::Selection),
            ],
        }
    }

    pub fn phase_at(&self, tick: usize) -> Phase {
        let index = self.transitions.partition_point(|&(start, _)| start <= tick);
        // the first transition starts at 0, so index is at least 1
        self.transitions[index.saturating_sub(1)].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_around_onset() {
        let controller = PhaseController::new(100_000);
        assert_eq!(controller.phase_at(0), Phase::BurnIn);
        assert_eq!(controller.phase_at(1), Phase::BurnIn);
        assert_eq!(controller.phase_at(99_999), Phase::BurnIn);
        assert_eq!(controller.phase_at(100_000), Phase::SelectionOnset);
        assert_eq!(controller.phase_at(100_001), Phase::Selection);
        assert_eq!(controller.phase_at(usize::MAX), Phase::Selection);
    }

    #[test]
    fn onset_at_first_tick() {
        let controller = PhaseController::new(1);
        assert_eq!(controller.phase_at(0), Phase::BurnIn);
        assert_eq!(controller.phase_at(1), Phase::SelectionOnset);
        assert_eq!(controller.phase_at(2), Phase::Selection);
    }

    #[test]
    fn selective_phases() {
        assert!(!Phase::BurnIn.is_selective());
        assert!(Phase::SelectionOnset.is_selective());
        assert!(Phase::Selection.is_selective());
        assert_eq!(Phase::SelectionOnset.to_string(), "selection onset");
    }
}
