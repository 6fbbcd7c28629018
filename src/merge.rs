//! Priority-ordered reconciliation of normalized records.

use crate::schema::{CanonicalField, CanonicalRecord, EntityKey, SourceId};
use log::{debug, warn};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// All normalized records one collector produced for one run.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub source: SourceId,
    pub records: Vec<CanonicalRecord>,
}

impl SourceBatch {
    pub fn new(source: SourceId, records: Vec<CanonicalRecord>) -> Self {
        Self { source, records }
    }
}

/// Merges per-source observations into one record per `(company_code, year)`.
///
/// Sources are visited in `priority` order. The first record seen for a key
/// is taken whole; later records only fill fields the accumulated record
/// still has null. A populated field is never overwritten, whatever the
/// source: priority decides who writes first, not who wins later. Records
/// without a usable year are discarded. Provenance tags are stripped from
/// the output; order of the returned records is not significant.
pub fn merge(priority: &[SourceId], batches: &[SourceBatch]) -> Vec<CanonicalRecord> {
    let mut accumulated: BTreeMap<EntityKey, CanonicalRecord> = BTreeMap::new();
    let mut discarded = 0usize;

    for source in priority {
        for batch in batches.iter().filter(|b| b.source == *source) {
            for record in &batch.records {
                let Some(key) = record.entity_key() else {
                    warn!("{source}: record without a usable year discarded");
                    discarded += 1;
                    continue;
                };
                match accumulated.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(record.clone());
                    }
                    Entry::Occupied(mut slot) => fill_gaps(slot.get_mut(), record),
                }
            }
        }
    }

    debug!(
        "merge complete: {} keys accumulated, {} records discarded",
        accumulated.len(),
        discarded
    );

    accumulated
        .into_values()
        .map(|mut record| {
            record.clear_source();
            record
        })
        .collect()
}

fn fill_gaps(existing: &mut CanonicalRecord, incoming: &CanonicalRecord) {
    for field in CanonicalField::ALL {
        if existing.is_null(field) {
            if let Some(value) = incoming.get(field) {
                existing.set(field, value.clone());
            }
        }
    }
}
