// 🏔️ Region - facade over the entity store, the altitude classifier and the queries
//
// Lifecycle: construct (empty or from a data source) → configure ranges →
// query. A region is populated by a single writer before anyone queries it;
// to share it between threads, finish loading and then wrap it in an `Arc`.

use crate::altitude::{parse_ranges, AltitudeClassifier, AltitudeRange};
use crate::entities::{EntityStore, HutId, MountainHut, Municipality, MunicipalityId};
use crate::error::HutsResult;
use crate::parser::{self, HutRecord, LoadReport};
use crate::queries::{BedsByKey, CountByKey, MaxBedsByKey, NamesByCount, NestedCount, QueryEngine};
use anyhow::Result;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Default)]
pub struct Region {
    name: String,
    store: EntityStore,
    classifier: AltitudeClassifier,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Region {
            name: name.into(),
            store: EntityStore::new(),
            classifier: AltitudeClassifier::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Build a region from a semicolon-delimited data file
    pub fn from_file(name: impl Into<String>, path: &Path) -> Result<(Self, LoadReport)> {
        let (records, report) = parser::read_file(path)?;
        Ok(Self::from_records(name, records, report))
    }

    /// Build a region from any reader producing the data format
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<(Self, LoadReport)> {
        let (records, report) = parser::read_records(reader)?;
        Ok(Self::from_records(name, records, report))
    }

    fn from_records(name: impl Into<String>, records: Vec<HutRecord>, report: LoadReport) -> (Self, LoadReport) {
        let mut region = Region::new(name);
        for record in &records {
            region.insert_record(record);
        }

        tracing::info!(
            region = %region.name,
            municipalities = region.store.municipality_count(),
            huts = region.store.hut_count(),
            skipped = report.skipped_count(),
            "region loaded"
        );

        (region, report)
    }

    /// Apply one parsed row: get-or-create its municipality, then its hut
    pub fn insert_record(&mut self, record: &HutRecord) -> HutId {
        let municipality = self.get_or_create_municipality(
            &record.municipality,
            &record.province,
            record.municipality_altitude,
        );
        self.get_or_create_mountain_hut(
            &record.hut_name,
            record.hut_altitude,
            &record.category,
            record.beds_number,
            municipality,
        )
    }

    // ========================================================================
    // ALTITUDE RANGES
    // ========================================================================

    /// Replace the configured altitude ranges
    pub fn configure_altitude_ranges<I>(&mut self, ranges: I)
    where
        I: IntoIterator<Item = AltitudeRange>,
    {
        self.classifier.configure(ranges);
    }

    /// Parse `"<min>-<max>"` strings and configure them; nothing changes on error
    pub fn set_altitude_ranges<S: AsRef<str>>(&mut self, ranges: &[S]) -> HutsResult<()> {
        let parsed = parse_ranges(ranges)?;
        self.classifier.configure(parsed);
        Ok(())
    }

    /// Range label for an altitude (default label when absent or unmatched)
    pub fn altitude_range(&self, altitude: Option<i32>) -> &str {
        self.classifier.classify(altitude)
    }

    pub fn altitude_ranges(&self) -> &[AltitudeRange] {
        self.classifier.ranges()
    }

    // ========================================================================
    // ENTITIES
    // ========================================================================

    pub fn get_or_create_municipality(&mut self, name: &str, province: &str, altitude: i32) -> MunicipalityId {
        self.store.get_or_create_municipality(name, province, altitude)
    }

    pub fn get_or_create_mountain_hut(
        &mut self,
        name: &str,
        altitude: Option<i32>,
        category: &str,
        beds_number: u32,
        municipality: MunicipalityId,
    ) -> HutId {
        self.store
            .get_or_create_mountain_hut(name, altitude, category, beds_number, municipality)
    }

    pub fn municipality(&self, id: MunicipalityId) -> Option<&Municipality> {
        self.store.municipality(id)
    }

    pub fn mountain_hut(&self, id: HutId) -> Option<&MountainHut> {
        self.store.mountain_hut(id)
    }

    pub fn municipality_of(&self, hut: &MountainHut) -> Option<&Municipality> {
        self.store.municipality_of(hut)
    }

    pub fn municipalities(&self) -> &[Municipality] {
        self.store.municipalities()
    }

    pub fn mountain_huts(&self) -> &[MountainHut] {
        self.store.mountain_huts()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn queries(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.store, &self.classifier)
    }

    pub fn municipalities_count_by_province(&self) -> CountByKey {
        self.queries().municipalities_count_by_province()
    }

    pub fn huts_count_by_municipality_by_province(&self) -> NestedCount {
        self.queries().huts_count_by_municipality_by_province()
    }

    pub fn huts_count_by_altitude_range(&self) -> CountByKey {
        self.queries().huts_count_by_altitude_range()
    }

    pub fn total_beds_by_province(&self) -> BedsByKey {
        self.queries().total_beds_by_province()
    }

    pub fn max_beds_by_altitude_range(&self) -> MaxBedsByKey {
        self.queries().max_beds_by_altitude_range()
    }

    pub fn municipality_names_by_hut_count(&self) -> NamesByCount {
        self.queries().municipality_names_by_hut_count()
    }
}

// ============================================================================
// TESTS
// ============================================================================
