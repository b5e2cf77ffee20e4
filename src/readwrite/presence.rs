use serde::Serialize;
use std::collections::HashMap;

use super::OutputEntry;
use crate::core::Population;
use crate::core::mutation::MutationId;

/// Carrier pattern of one mutation over all genome copies of the population.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PresenceEntry {
    pub id: MutationId,
    pub tick: usize,
    pub presence: String,
}

impl OutputEntry for PresenceEntry {
    const HEADER: &'static [&'static str] = &["id", "tick", "presence"];
    const SUFFIX: &'static str = "presence";
}

/// Presence rows for all mutations with positive prevalence, in id order.
///
/// Each row has one `0`/`1` per genome copy: individual 0 genome 0, individual 0 genome 1,
/// individual 1 genome 0 and so on. Only the carrier columns of each mutation are collected up
/// front, the rows themselves are built as they are consumed.
pub fn presence_entries<'a>(
    tick: usize,
    population: &'a Population,
    prevalence: &'a HashMap<MutationId, usize>,
) -> impl Iterator<Item = PresenceEntry> + 'a {
    let mut ids: Vec<MutationId> = prevalence
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(&id, _)| id)
        .collect();
    ids.sort_unstable();

    let rows: HashMap<MutationId, usize> = ids
        .iter()
        .enumerate()
        .map(|(row, &id)| (id, row))
        .collect();

    let mut carriers: Vec<Vec<usize>> = ids
        .iter()
        .map(|id| Vec::with_capacity(prevalence[id]))
        .collect();
    for (column, genome) in population.genomes().enumerate() {
        for id in genome.ids() {
            if let Some(&row) = rows.get(&id) {
                carriers[row].push(column);
            }
        }
    }

    let copies = population.genome_count();
    ids.into_iter()
        .zip(carriers)
        .map(move |(id, columns)| PresenceEntry {
            id,
            tick,
            presence: presence_row(&columns, copies),
        })
}

/// `copies` characters with a `1` at every column of `columns`, which has to be ascending.
fn presence_row(columns: &[usize], copies: usize) -> String {
    let mut columns = columns.iter().peekable();
    (0..copies)
        .map(|column| match columns.next_if(|&&carrier| carrier == column) {
            Some(_) => '1',
            None => '0',
        })
        .collect()
}
