use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of every key the editor writes to the local store.
pub const STORAGE_KEY_PREFIX: &str = "garden-plot-";

/// The record handed to a [`crate::logic::store::PlotStore`] when a plot is saved.
/// `width`/`height` are in pixels and `grid_size` is the cell size in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotRecord {
    pub name: String,
    /// PNG export as a `data:image/png;base64,...` URL.
    pub image: String,
    pub width: u32,
    pub height: u32,
    pub grid_size: u32,
    /// ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
}

/// `garden-plot-<epoch-millis>`
pub fn storage_key(at: DateTime<Utc>) -> String {
    format!("{STORAGE_KEY_PREFIX}{}", at.timestamp_millis())
}

/// Millisecond ISO-8601 timestamp, e.g. `2024-05-01T12:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
