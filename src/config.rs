// ⚙️ Region configuration - JSON file with defaults

use crate::altitude::{parse_ranges, AltitudeRange};
use crate::error::{HutsError, HutsResult};
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_REGION_NAME: &str = "Piemonte";
pub const DEFAULT_DATA_FILE: &str = "data/mountain_huts.csv";

fn default_ranges() -> Vec<String> {
    ["0-1000", "1001-1500", "1501-2000", "2001-INF"]
        .iter()
        .map(|r| r.to_string())
        .collect()
}

/// Example:
/// ```json
/// { "name": "Piemonte", "data_file": "data/mountain_huts.csv",
///   "altitude_ranges": ["0-1000", "1001-2000", "2001-INF"] }
/// ```
/// Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub name: String,
    pub data_file: PathBuf,
    pub altitude_ranges: Vec<String>,
}

impl Default for RegionConfig {
    fn default() -> Self {
        RegionConfig {
            name: DEFAULT_REGION_NAME.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            altitude_ranges: default_ranges(),
        }
    }
}

impl RegionConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: RegionConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Check that the name is usable and every range string parses
    pub fn validate(&self) -> HutsResult<()> {
        if self.name.trim().is_empty() {
            return Err(HutsError::Config("region name is empty".to_string()));
        }
        self.parsed_ranges().map(|_| ())
    }

    pub fn parsed_ranges(&self) -> HutsResult<Vec<AltitudeRange>> {
        parse_ranges(self.altitude_ranges.as_slice())
    }
}
