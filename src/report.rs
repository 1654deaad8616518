// 📋 Region Report - snapshot of every aggregate query, ready to serialize

use crate::altitude::AltitudeRange;
use crate::queries::{BedsByKey, CountByKey, MaxBedsByKey, NamesByCount, NestedCount};
use crate::region::Region;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionReport {
    pub region: String,
    pub generated_at: DateTime<Utc>,
    pub altitude_ranges: Vec<String>,

    pub municipality_total: usize,
    pub hut_total: usize,
    pub bed_total: u64,

    pub municipalities_by_province: CountByKey,
    pub huts_by_municipality_by_province: NestedCount,
    pub huts_by_altitude_range: CountByKey,
    pub beds_by_province: BedsByKey,
    pub max_beds_by_altitude_range: MaxBedsByKey,
    pub municipalities_by_hut_count: NamesByCount,
}

impl RegionReport {
    /// Run all six queries against the region's current state
    pub fn build(region: &Region) -> Self {
        let queries = region.queries();
        let beds_by_province = queries.total_beds_by_province();

        RegionReport {
            region: region.name().to_string(),
            generated_at: Utc::now(),
            altitude_ranges: region
                .altitude_ranges()
                .iter()
                .map(AltitudeRange::to_string)
                .collect(),
            municipality_total: region.municipalities().len(),
            hut_total: region.mountain_huts().len(),
            bed_total: beds_by_province.values().sum(),
            municipalities_by_province: queries.municipalities_count_by_province(),
            huts_by_municipality_by_province: queries.huts_count_by_municipality_by_province(),
            huts_by_altitude_range: queries.huts_count_by_altitude_range(),
            beds_by_province,
            max_beds_by_altitude_range: queries.max_beds_by_altitude_range(),
            municipalities_by_hut_count: queries.municipality_names_by_hut_count(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} municipalities, {} huts, {} beds across {} provinces",
            self.region,
            self.municipality_total,
            self.hut_total,
            self.bed_total,
            self.municipalities_by_province.len()
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
