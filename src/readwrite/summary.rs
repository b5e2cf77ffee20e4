use serde::Serialize;

use super::OutputEntry;
use crate::stats::Summary;

/// One row of the population summary log.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub tick: usize,
    pub segregating: usize,
    pub heterozygosity: f64,
    pub phenotype_mean: f64,
    pub phenotype_sd: f64,
}

impl OutputEntry for SummaryEntry {
    const HEADER: &'static [&'static str] = &[
        "tick",
        "segregating",
        "heterozygosity",
        "phenotype_mean",
        "phenotype_sd",
    ];
    const SUFFIX: &'static str = "summary";
}

impl SummaryEntry {
    pub fn new(tick: usize, summary: Summary) -> Self {
        Self {
            tick,
            segregating: summary.segregating,
            heterozygosity: summary.heterozygosity,
            phenotype_mean: summary.phenotype_mean,
            phenotype_sd: summary.phenotype_sd,
        }
    }
}
