use serde::Serialize;
use std::collections::HashMap;

use super::OutputEntry;
use crate::config::CatalogScope;
use crate::core::mutation::{MutationId, MutationRegistry};

/// One mutation of a catalog snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub tick: usize,
    pub id: MutationId,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub position: usize,
    pub effect: f64,
    pub dominance: f64,
    pub subpopulation: &'static str,
    pub origin_tick: usize,
    pub prevalence: usize,
}

impl OutputEntry for CatalogEntry {
    const HEADER: &'static [&'static str] = &[
        "tick",
        "id",
        "type",
        "position",
        "effect",
        "dominance",
        "subpopulation",
        "origin_tick",
        "prevalence",
    ];
    const SUFFIX: &'static str = "mutations";
}

/// Catalog rows in id order, produced one at a time while the snapshot is written.
pub fn catalog_entries<'a>(
    tick: usize,
    registry: &'a MutationRegistry,
    prevalence: &'a HashMap<MutationId, usize>,
    scope: CatalogScope,
) -> impl Iterator<Item = CatalogEntry> + 'a {
    registry
        .iter()
        .filter_map(move |mutation| {
            let count = prevalence.get(&mutation.id()).copied().unwrap_or(0);
            if scope == CatalogScope::Present && count == 0 {
                return None;
            }
            Some(CatalogEntry {
                tick,
                id: mutation.id(),
                kind: mutation.kind().label(),
                position: mutation.position(),
                effect: mutation.effect(),
                dominance: mutation.dominance(),
                subpopulation: mutation.origin_subpopulation(),
                origin_tick: mutation.origin_tick(),
                prevalence: count,
            })
        })
}
