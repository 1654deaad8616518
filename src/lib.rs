// Mountain Huts - Core Library
// Exposes all modules for use in the CLI, the API server and tests

pub mod altitude;
pub mod config;
pub mod entities;
pub mod error;
pub mod logging;
pub mod parser;
pub mod queries;
pub mod region;
pub mod report;

// Re-export commonly used types
pub use altitude::{parse_ranges, AltitudeClassifier, AltitudeRange, DEFAULT_RANGE_LABEL};
pub use config::RegionConfig;
pub use entities::{EntityStore, HutId, MountainHut, Municipality, MunicipalityId};
pub use error::{HutsError, HutsResult};
pub use parser::{read_file, read_records, HutRecord, LoadReport, SkippedRow};
pub use queries::{
    group_by, BedsByKey, CountByKey, MaxBedsByKey, NamesByCount, NestedCount, QueryEngine,
};
pub use region::Region;
pub use report::RegionReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
