//! Genome representation
//!
//! A `Genome` is one haploid copy of the genomic element. It does not store a sequence, only the
//! mutations it carries as `(position, MutationId)` sites kept sorted by position and id. The
//! sorted order allows gametes to be assembled from two homologs by slicing at breakpoints.

use crate::core::mutation::{MutationId, MutationRegistry};

pub type Site = (usize, MutationId);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Genome {
    sites: Vec<Site>,
}

impl Genome {
    /// Construct a genome without mutations.
    pub fn new() -> Self {
        Self { sites: Vec::new() }
    }

    /// Construct a genome from unordered sites.
    pub fn from_sites(mut sites: Vec<Site>) -> Self {
        sites.sort_unstable();
        Self { sites }
    }

    /// Assemble a recombinant genome from two homologs.
    ///
    /// Copying starts on `first`; at each breakpoint the source switches to the other homolog.
    /// Sites with a position strictly below a breakpoint come from the homolog active before the
    /// breakpoint. Breakpoints have to be sorted in ascending order.
    pub fn recombine(first: &Genome, second: &Genome, breakpoints: &[usize]) -> Genome {
        if breakpoints.is_empty() {
            return first.clone();
        }

        let mut sites = Vec::with_capacity(first.len().max(second.len()));
        let mut current = first;
        let mut other = second;
        let mut start = 0;

        for &breakpoint in breakpoints {
            let lower = current.sites.partition_point(|&(pos, _)| pos < start);
            let upper = current.sites.partition_point(|&(pos, _)| pos < breakpoint);
            sites.extend_from_slice(&current.sites[lower..upper]);
            std::mem::swap(&mut current, &mut other);
            start = breakpoint;
        }
        let lower = current.sites.partition_point(|&(pos, _)| pos < start);
        sites.extend_from_slice(&current.sites[lower..]);

        Self { sites }
    }

    /// Insert a mutation while keeping the site order.
    pub fn insert(&mut self, position: usize, id: MutationId) {
        let site = (position, id);
        let at = self.sites.partition_point(|s| *s < site);
        self.sites.insert(at, site);
    }

    pub fn contains(&self, id: MutationId, position: usize) -> bool {
        self.sites.binary_search(&(position, id)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn ids(&self) -> impl Iterator<Item = MutationId> + '_ {
        self.sites.iter().map(|&(_, id)| id)
    }

    /// Sum of effect sizes of all carried mutations.
    pub fn effect_sum(&self, registry: &MutationRegistry) -> f64 {
        self.ids().map(|id| registry.effect(id)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mutation::MutationKind;

    fn registry_with_positions(positions: &[usize]) -> (MutationRegistry, Vec<MutationId>) {
        let mut registry = MutationRegistry::new();
        let ids = positions
            .iter()
            .map(|&pos| registry.create(pos, pos as f64, MutationKind::Trait, 1))
            .collect();
        (registry, ids)
    }

    #[test]
    fn from_sites_sorts() {
        let (_, ids) = registry_with_positions(&[5, 1, 3]);
        let genome = Genome::from_sites(vec![(5, ids[0]), (1, ids[1]), (3, ids[2])]);
        let positions: Vec<usize> = genome.sites().iter().map(|s| s.0).collect();
        assert_eq!(positions, vec![1, 3, 5]);
    }

    #[test]
    fn recombine_without_breakpoints() {
        let (_, ids) = registry_with_positions(&[1, 2]);
        let first = Genome::from_sites(vec![(1, ids[0])]);
        let second = Genome::from_sites(vec![(2, ids[1])]);
        assert_eq!(Genome::recombine(&first, &second, &[]), first);
    }

    #[test]
    fn recombine_alternates_at_breakpoints() {
        let (_, ids) = registry_with_positions(&[0, 10, 20, 30, 5, 15, 25, 35]);
        let first = Genome::from_sites(vec![
            (0, ids[0]),
            (10, ids[1]),
            (20, ids[2]),
            (30, ids[3]),
        ]);
        let second = Genome::from_sites(vec![
            (5, ids[4]),
            (15, ids[5]),
            (25, ids[6]),
            (35, ids[7]),
        ]);

        // [0, 12) from first, [12, 22) from second, [22, ..) from first
        let recombinant = Genome::recombine(&first, &second, &[12, 22]);
        let positions: Vec<usize> = recombinant.sites().iter().map(|s| s.0).collect();
        assert_eq!(positions, vec![0, 10, 15, 30]);
    }

    #[test]
    fn breakpoint_position_goes_to_next_segment() {
        let (_, ids) = registry_with_positions(&[10, 10]);
        let first = Genome::from_sites(vec![(10, ids[0])]);
        let second = Genome::from_sites(vec![(10, ids[1])]);
        let recombinant = Genome::recombine(&first, &second, &[10]);
        assert_eq!(recombinant.sites(), &[(10, ids[1])]);
    }

    #[test]
    fn insert_keeps_order() {
        let (_, ids) = registry_with_positions(&[1, 9, 4]);
        let mut genome = Genome::from_sites(vec![(1, ids[0]), (9, ids[1])]);
        genome.insert(4, ids[2]);
        let positions: Vec<usize> = genome.sites().iter().map(|s| s.0).collect();
        assert_eq!(positions, vec![1, 4, 9]);
        assert!(genome.contains(ids[2], 4));
        assert!(!genome.contains(ids[2], 5));
    }

    #[test]
    fn effect_sum() {
        let (registry, ids) = registry_with_positions(&[1, 2, 3]);
        let genome = Genome::from_sites(vec![(1, ids[0]), (3, ids[2])]);
        assert_eq!(genome.effect_sum(&registry), 4.);
        assert_eq!(Genome::new().effect_sum(&registry), 0.);
    }
}
