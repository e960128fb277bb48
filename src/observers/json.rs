//! JSON observer for serializing aggregation results.
//!
//! # Feature Flag
//!
//! This module requires the `json` feature:
//!
//! ```toml
//! [dependencies]
//! cachelayout = { version = "0.1", features = ["json"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use cachelayout::count::country_count;
//! use cachelayout::observers::json::JsonObserver;
//!
//! let counts = country_count(&users);
//! let json = JsonObserver::new().to_json(&counts).unwrap();
//! println!("{}", json);
//! // [{"country":"AD","count":2000},{"country":"BB","count":2000},...]
//! ```

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::count::CountMap;
use crate::image::LayoutKind;
use crate::layout::LayoutReport;
use crate::observers::Result;
use crate::snapshot::{CountEntry, CountSnapshot};

/// Configuration for the JSON observer.
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Whether to pretty-print the JSON output.
    pub pretty: bool,
    /// Whether to include a timestamp in the output.
    pub include_timestamp: bool,
    /// Whether to wrap counts in a [`CountSnapshot`] object.
    pub wrap_in_snapshot: bool,
    /// Layout recorded in the snapshot, when wrapping.
    pub layout: Option<LayoutKind>,
}

/// An observer that serializes aggregation results to JSON.
///
/// Without wrapping, counts are emitted as an array of
/// `{"country": .., "count": ..}` objects sorted by country. With
/// [`wrap_in_snapshot`](JsonObserver::wrap_in_snapshot) the array is nested
/// in a [`CountSnapshot`] together with the total.
#[derive(Debug, Clone, Default)]
pub struct JsonObserver {
    config: JsonConfig,
}

impl JsonObserver {
    /// Creates a new JSON observer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new JSON observer with the specified configuration.
    pub fn with_config(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Enables or disables pretty-printing.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.config.pretty = enabled;
        self
    }

    /// Enables or disables timestamp inclusion.
    ///
    /// Only has effect when `wrap_in_snapshot` is also enabled.
    pub fn include_timestamp(mut self, enabled: bool) -> Self {
        self.config.include_timestamp = enabled;
        self
    }

    /// Enables or disables wrapping the output in a [`CountSnapshot`].
    pub fn wrap_in_snapshot(mut self, enabled: bool) -> Self {
        self.config.wrap_in_snapshot = enabled;
        self
    }

    /// Records the layout of the counted users in wrapped output.
    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.config.layout = Some(layout);
        self
    }

    /// Builds the snapshot that [`to_json`](Self::to_json) serializes when wrapping.
    pub fn snapshot(&self, counts: &CountMap) -> CountSnapshot {
        let mut snapshot = CountSnapshot::from_counts(counts);
        if let Some(layout) = self.config.layout {
            snapshot = snapshot.with_layout(layout);
        }
        if self.config.include_timestamp {
            snapshot = snapshot.with_timestamp(current_timestamp_ms());
        }
        snapshot
    }

    /// Serializes `counts` to a JSON string.
    pub fn to_json(&self, counts: &CountMap) -> Result<String> {
        if self.config.wrap_in_snapshot {
            self.serialize(&self.snapshot(counts))
        } else {
            let entries: Vec<CountEntry> = CountSnapshot::from_counts(counts).entries;
            self.serialize(&entries)
        }
    }

    /// Serializes a layout comparison to a JSON string.
    pub fn layout_to_json(&self, report: &LayoutReport) -> Result<String> {
        self.serialize(report)
    }

    /// Writes `counts` as JSON to `writer`, followed by a newline.
    pub fn write_to<W: Write>(&self, counts: &CountMap, mut writer: W) -> Result<()> {
        let json = self.to_json(counts)?;
        writeln!(writer, "{}", json)?;
        Ok(())
    }

    fn serialize<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

/// Returns the current time in milliseconds since Unix epoch.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
