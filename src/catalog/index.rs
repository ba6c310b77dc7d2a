use std::collections::BTreeSet;

use crate::core::types::Species;

use super::store::ReferenceStore;

/// Finds conditions that share at least one symptom with a case
pub struct CandidateFinder<'a> {
    store: &'a ReferenceStore,
}

impl<'a> CandidateFinder<'a> {
    pub fn new(store: &'a ReferenceStore) -> Self {
        Self { store }
    }

    /// Positions (in table order) of conditions sharing a symptom with `observed`
    ///
    /// Conditions with an empty overlap never appear.
    pub fn find_candidates<'s, I>(&self, species: Species, observed: I) -> Vec<usize>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let Some(index) = self.store.symptom_index.get(&species) else {
            return Vec::new();
        };

        let mut positions = BTreeSet::new();
        for symptom in observed {
            if let Some(hits) = index.get(symptom) {
                positions.extend(hits.iter().copied());
            }
        }

        positions.into_iter().collect()
    }
}
