//! Serde data structures for feed descriptor documents.
//!
//! Records are deliberately permissive: every schema-required key maps
//! to an `Option` and unknown keys are ignored, so malformed entries
//! survive deserialization and are reported record-by-record by
//! [`validation`](super::validation) instead of failing the whole
//! document.

use serde::Deserialize;

/// One entry of the `dataset.json` array: a downloadable GTFS dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticFeed {
    #[serde(rename = "type", default)]
    pub feed_type: Option<String>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(rename = "feedId", default)]
    pub feed_id: Option<String>,

    #[serde(default)]
    pub reference: Option<String>,
}

/// Root of `realtime.json`. The `updaters` key is required; its
/// absence is a fatal input error, not a structural one.
#[derive(Debug, Deserialize)]
pub struct RealtimeDocument {
    #[serde(default)]
    pub updaters: Option<Vec<Updater>>,
}

/// One realtime updater descriptor under the `updaters` key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Updater {
    #[serde(rename = "type", default)]
    pub updater_type: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(rename = "feedId", default)]
    pub feed_id: Option<String>,
}
