// ⛰️ Altitude Ranges - Labeled brackets for bucketing huts by altitude
// Ranges are data: configured once, scanned in order, first match wins

use crate::error::{HutsError, HutsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label returned when an altitude is absent or falls outside every range
pub const DEFAULT_RANGE_LABEL: &str = "0-INF";

// ============================================================================
// RANGE DEFINITION
// ============================================================================

/// Closed altitude interval `[min, max]`; `max == None` means unbounded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltitudeRange {
    pub min: i32,
    pub max: Option<i32>,

    /// Original textual form, used as the grouping key in query results
    pub label: String,
}

impl AltitudeRange {
    pub fn new(min: i32, max: Option<i32>, label: impl Into<String>) -> Self {
        AltitudeRange {
            min,
            max,
            label: label.into(),
        }
    }

    /// Check if the altitude lies inside this range (bounds inclusive)
    pub fn contains(&self, altitude: i32) -> bool {
        altitude >= self.min && self.max.map_or(true, |max| altitude <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }
}

impl fmt::Display for AltitudeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Parses `"<min>-<max>"`, where `<max>` may be `INF` or `INFINITY`
/// (case-insensitive). A leading minus sign on `<min>` is allowed.
impl FromStr for AltitudeRange {
    type Err = HutsError;

    fn from_str(s: &str) -> HutsResult<Self> {
        let text = s.trim();

        // Skip the first char so a negative lower bound is not taken as the separator
        let sep = text
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '-')
            .map(|(i, _)| i)
            .ok_or_else(|| HutsError::invalid_range(s, "expected <min>-<max>"))?;

        let (min_str, max_str) = (text[..sep].trim(), text[sep + 1..].trim());

        let min: i32 = min_str
            .parse()
            .map_err(|_| HutsError::invalid_range(s, format!("bad lower bound '{}'", min_str)))?;

        let max = if max_str.eq_ignore_ascii_case("INF") || max_str.eq_ignore_ascii_case("INFINITY")
        {
            None
        } else {
            let max: i32 = max_str.parse().map_err(|_| {
                HutsError::invalid_range(s, format!("bad upper bound '{}'", max_str))
            })?;
            if max < min {
                return Err(HutsError::invalid_range(s, "upper bound below lower bound"));
            }
            Some(max)
        };

        Ok(AltitudeRange::new(min, max, text))
    }
}

/// Parse a list of range strings, failing on the first malformed entry
pub fn parse_ranges<S: AsRef<str>>(ranges: &[S]) -> HutsResult<Vec<AltitudeRange>> {
    ranges.iter().map(|r| r.as_ref().parse()).collect()
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Maps altitudes to range labels by linear scan over the configured ranges
#[derive(Debug, Clone, Default)]
pub struct AltitudeClassifier {
    ranges: Vec<AltitudeRange>,
}

impl AltitudeClassifier {
    pub fn new() -> Self {
        AltitudeClassifier { ranges: Vec::new() }
    }

    /// Replace any previously configured ranges, keeping the given order
    pub fn configure<I>(&mut self, ranges: I)
    where
        I: IntoIterator<Item = AltitudeRange>,
    {
        self.ranges = ranges.into_iter().collect();
        tracing::debug!(count = self.ranges.len(), "altitude ranges configured");
    }

    /// Label of the first range containing `altitude`, or the default label
    pub fn classify(&self, altitude: Option<i32>) -> &str {
        let Some(altitude) = altitude else {
            return DEFAULT_RANGE_LABEL;
        };

        self.ranges
            .iter()
            .find(|range| range.contains(altitude))
            .map(|range| range.label.as_str())
            .unwrap_or(DEFAULT_RANGE_LABEL)
    }

    pub fn ranges(&self) -> &[AltitudeRange] {
        &self.ranges
    }

    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(ranges: &[&str]) -> AltitudeClassifier {
        let mut c = AltitudeClassifier::new();
        c.configure(parse_ranges(ranges).unwrap());
        c
    }

    #[test]
    fn test_parse_bounded_range() {
        let range: AltitudeRange = "1000-1999".parse().unwrap();
        assert_eq!(range.min, 1000);
        assert_eq!(range.max, Some(1999));
        assert_eq!(range.label, "1000-1999");
        assert!(!range.is_unbounded());
    }

    #[test]
    fn test_parse_unbounded_range() {
        for text in ["2000-INF", "2000-inf", "2000-Infinity", "2000-INFINITY"] {
            let range: AltitudeRange = text.parse().unwrap();
            assert_eq!(range.min, 2000);
            assert!(range.is_unbounded());
            assert_eq!(range.label, text);
        }
    }

    #[test]
    fn test_parse_negative_lower_bound() {
        let range: AltitudeRange = "-50-100".parse().unwrap();
        assert_eq!(range.min, -50);
        assert_eq!(range.max, Some(100));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("1000".parse::<AltitudeRange>().is_err());
        assert!("abc-100".parse::<AltitudeRange>().is_err());
        assert!("100-abc".parse::<AltitudeRange>().is_err());
        assert!("2000-1000".parse::<AltitudeRange>().is_err());

        let err = "1000".parse::<AltitudeRange>().unwrap_err();
        assert!(matches!(err, HutsError::InvalidRange { .. }));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = AltitudeRange::new(1000, Some(1999), "1000-1999");
        assert!(range.contains(1000));
        assert!(range.contains(1999));
        assert!(!range.contains(999));
        assert!(!range.contains(2000));

        let open = AltitudeRange::new(2000, None, "2000-INF");
        assert!(open.contains(i32::MAX));
    }

    #[test]
    fn test_classify_matches_range() {
        let c = classifier(&["0-999", "1000-1999", "2000-INF"]);
        assert_eq!(c.classify(Some(1500)), "1000-1999");
        assert_eq!(c.classify(Some(0)), "0-999");
        assert_eq!(c.classify(Some(2500)), "2000-INF");
    }

    #[test]
    fn test_classify_absent_is_default() {
        let c = classifier(&["0-999", "1000-1999", "2000-INF"]);
        assert_eq!(c.classify(None), DEFAULT_RANGE_LABEL);

        let empty = AltitudeClassifier::new();
        assert_eq!(empty.classify(None), DEFAULT_RANGE_LABEL);
    }

    #[test]
    fn test_classify_unmatched_is_default() {
        let c = classifier(&["0-999", "1500-1999"]);
        assert_eq!(c.classify(Some(1200)), DEFAULT_RANGE_LABEL);
        assert_eq!(c.classify(Some(-10)), DEFAULT_RANGE_LABEL);
    }

    #[test]
    fn test_classify_first_match_wins() {
        let c = classifier(&["0-1500", "1000-2000"]);
        assert_eq!(c.classify(Some(1200)), "0-1500");
        assert_eq!(c.classify(Some(1800)), "1000-2000");
    }

    #[test]
    fn test_configure_replaces_ranges() {
        let mut c = classifier(&["0-999"]);
        assert_eq!(c.classify(Some(500)), "0-999");

        c.configure(parse_ranges(&["0-2000"]).unwrap());
        assert_eq!(c.range_count(), 1);
        assert_eq!(c.classify(Some(500)), "0-2000");
    }

    #[test]
    fn test_classified_label_contains_altitude() {
        let c = classifier(&["0-999", "1000-1999", "2500-INF"]);
        for altitude in (-500..4000).step_by(37) {
            let label = c.classify(Some(altitude));
            match c.ranges().iter().find(|r| r.label == label) {
                Some(range) => assert!(range.contains(altitude)),
                None => {
                    assert_eq!(label, DEFAULT_RANGE_LABEL);
                    assert!(c.ranges().iter().all(|r| !r.contains(altitude)));
                }
            }
        }
    }
}
