//! Serializable snapshots of aggregation results.
//!
//! # Feature Flag
//!
//! This module requires the `serde` feature:
//!
//! ```toml
//! [dependencies]
//! cachelayout = { version = "0.1", features = ["serde"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use cachelayout::count::country_count;
//! use cachelayout::snapshot::CountSnapshot;
//!
//! let snapshot = CountSnapshot::from_counts(&country_count(&users));
//! let json = serde_json::to_string(&snapshot).unwrap();
//! ```

use serde::{Deserialize, Serialize};

use crate::count::CountMap;
use crate::image::LayoutKind;

/// Active users of one country.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountEntry {
    /// The country label.
    pub country: String,
    /// Number of active users.
    pub count: u64,
}

impl CountEntry {
    /// Creates a new entry.
    pub fn new(country: impl Into<String>, count: u64) -> Self {
        Self {
            country: country.into(),
            count,
        }
    }
}

/// A point-in-time capture of a [`CountMap`], entries sorted by country.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountSnapshot {
    /// Optional timestamp in milliseconds since Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp_ms: Option<u64>,
    /// Layout of the records that were counted, if known.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub layout: Option<LayoutKind>,
    /// Total number of active users.
    pub total: u64,
    /// Per-country counts.
    pub entries: Vec<CountEntry>,
}

impl CountSnapshot {
    /// Captures `counts`.
    pub fn from_counts(counts: &CountMap) -> Self {
        Self {
            timestamp_ms: None,
            layout: None,
            total: counts.total(),
            entries: counts
                .sorted()
                .into_iter()
                .map(|(country, count)| CountEntry::new(country, count))
                .collect(),
        }
    }

    /// Records the layout of the counted users.
    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Attaches a timestamp.
    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = Some(timestamp_ms);
        self
    }

    /// Finds the entry for `country`.
    pub fn get(&self, country: &str) -> Option<&CountEntry> {
        self.entries.iter().find(|e| e.country == country)
    }

    /// Rebuilds the [`CountMap`] this snapshot was taken from.
    pub fn to_counts(&self) -> CountMap {
        self.entries
            .iter()
            .map(|e| (e.country.as_str(), e.count))
            .collect()
    }
}

impl From<&CountMap> for CountSnapshot {
    fn from(counts: &CountMap) -> Self {
        Self::from_counts(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> CountMap {
        [("DK", 1u64), ("AD", 2), ("CA", 1)].into_iter().collect()
    }

    #[test]
    fn test_from_counts_is_sorted() {
        let snapshot = CountSnapshot::from_counts(&counts());
        let countries: Vec<&str> = snapshot.entries.iter().map(|e| e.country.as_str()).collect();
        assert_eq!(countries, vec!["AD", "CA", "DK"]);
        assert_eq!(snapshot.total, 4);
        assert!(snapshot.timestamp_ms.is_none());
        assert!(snapshot.layout.is_none());
    }

    #[test]
    fn test_get() {
        let snapshot = CountSnapshot::from(&counts());
        assert_eq!(snapshot.get("AD").unwrap().count, 2);
        assert!(snapshot.get("BB").is_none());
    }

    #[test]
    fn test_to_counts() {
        assert_eq!(CountSnapshot::from_counts(&counts()).to_counts(), counts());
    }

    #[test]
    fn test_empty() {
        let snapshot = CountSnapshot::from_counts(&CountMap::new());
        assert_eq!(snapshot.total, 0);
        assert!(snapshot.entries.is_empty());
    }

    #[test]
    fn test_serialize() {
        let snapshot = CountSnapshot::from_counts(&counts())
            .with_layout(LayoutKind::Inline)
            .with_timestamp(1234567890);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains(r#""layout":"inline""#));
        assert!(json.contains(r#""timestamp_ms":1234567890"#));
        assert!(json.contains(r#"{"country":"AD","count":2}"#));
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        let json = serde_json::to_string(&CountSnapshot::from_counts(&CountMap::new())).unwrap();
        assert_eq!(json, r#"{"total":0,"entries":[]}"#);
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{"layout":"indirect","total":3,"entries":[{"country":"AD","count":3}]}"#;
        let snapshot: CountSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.layout, Some(LayoutKind::Indirect));
        assert_eq!(snapshot.timestamp_ms, None);
        assert_eq!(snapshot.to_counts().get("AD"), 3);
    }
}
