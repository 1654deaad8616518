// 📊 Query Engine - aggregate statistics over a region's entities
//
// Every query is a group-then-reduce pipeline: build a multimap keyed by
// province, municipality or altitude-range label, then count/sum/max each
// group. Results are recomputed on every call and use ordered maps so
// reports come out in a stable order.

use crate::altitude::AltitudeClassifier;
use crate::entities::{EntityStore, MountainHut, Municipality};
use std::collections::BTreeMap;

pub type CountByKey = BTreeMap<String, usize>;
pub type NestedCount = BTreeMap<String, BTreeMap<String, usize>>;
pub type BedsByKey = BTreeMap<String, u64>;
pub type MaxBedsByKey = BTreeMap<String, Option<u32>>;
pub type NamesByCount = BTreeMap<usize, Vec<String>>;

/// Group items into a multimap; only keys that occur are materialized
pub fn group_by<I, K, F>(items: I, mut key: F) -> BTreeMap<K, Vec<I::Item>>
where
    I: IntoIterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    let mut groups: BTreeMap<K, Vec<I::Item>> = BTreeMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

/// Read-only view combining the entity store with the altitude classifier
#[derive(Clone, Copy)]
pub struct QueryEngine<'a> {
    store: &'a EntityStore,
    classifier: &'a AltitudeClassifier,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a EntityStore, classifier: &'a AltitudeClassifier) -> Self {
        QueryEngine { store, classifier }
    }

    /// Range label for a hut, using the municipality altitude when the hut has none
    pub fn altitude_range_of(&self, hut: &MountainHut, municipality: &Municipality) -> String {
        self.classifier
            .classify(Some(hut.effective_altitude(municipality)))
            .to_string()
    }

    /// Number of municipalities per province
    pub fn municipalities_count_by_province(&self) -> CountByKey {
        group_by(self.store.municipalities(), |m| m.province().to_string())
            .into_iter()
            .map(|(province, group)| (province, group.len()))
            .collect()
    }

    /// Number of huts per municipality, nested under the municipality's province
    pub fn huts_count_by_municipality_by_province(&self) -> NestedCount {
        group_by(self.store.huts_with_municipality(), |(_, m)| {
            m.province().to_string()
        })
        .into_iter()
        .map(|(province, huts)| {
            let per_municipality = group_by(huts, |(_, m)| m.name().to_string())
                .into_iter()
                .map(|(name, group)| (name, group.len()))
                .collect();
            (province, per_municipality)
        })
        .collect()
    }

    /// Number of huts per altitude range label
    pub fn huts_count_by_altitude_range(&self) -> CountByKey {
        group_by(self.store.huts_with_municipality(), |(h, m)| {
            self.altitude_range_of(h, m)
        })
        .into_iter()
        .map(|(label, group)| (label, group.len()))
        .collect()
    }

    /// Total beds per province
    pub fn total_beds_by_province(&self) -> BedsByKey {
        group_by(self.store.huts_with_municipality(), |(_, m)| {
            m.province().to_string()
        })
        .into_iter()
        .map(|(province, group)| {
            let total = group.iter().map(|(h, _)| u64::from(h.beds_number())).sum();
            (province, total)
        })
        .collect()
    }

    /// Largest bed count per altitude range label
    pub fn max_beds_by_altitude_range(&self) -> MaxBedsByKey {
        group_by(self.store.huts_with_municipality(), |(h, m)| {
            self.altitude_range_of(h, m)
        })
        .into_iter()
        .map(|(label, group)| {
            let max = group.iter().map(|(h, _)| h.beds_number()).max();
            (label, max)
        })
        .collect()
    }

    /// Municipality names grouped by how many huts they host.
    /// Municipalities without huts never appear.
    pub fn municipality_names_by_hut_count(&self) -> NamesByCount {
        let per_municipality: BTreeMap<&str, usize> =
            group_by(self.store.huts_with_municipality(), |&(_, m)| m.name())
                .into_iter()
                .map(|(name, group)| (name, group.len()))
                .collect();

        let mut by_count: NamesByCount = BTreeMap::new();
        for (name, count) in per_municipality {
            by_count.entry(count).or_default().push(name.to_string());
        }
        for names in by_count.values_mut() {
            names.sort();
        }
        by_count
    }
}

// ============================================================================
// TESTS
// ============================================================================
