//! Structural validation of feed descriptor records.
//!
//! Pure functions, no I/O: given a record, return `Ok(())` or the
//! ordered list of human-readable violations. Error ordering is part
//! of the contract (required fields first, then the type check, then
//! URL fields) — log output and tests rely on it.

use url::Url;

use super::model::{StaticFeed, Updater};

/// The only accepted `type` tag for static feed records.
pub const STATIC_FEED_TYPE: &str = "gtfs";

/// Accepted realtime updater kinds. Both hyphen- and
/// underscore-delimited spellings are aliases of the same kind.
pub const VALID_UPDATER_TYPES: &[&str] = &[
    "gtfs-http",
    "gtfs_http",
    "stop-time-updater",
    "stop_time_updater",
    "vehicle-positions",
    "vehicle_positions",
    "trip-updates",
    "trip_updates",
    "vehicle-parking-updater",
    "vehicle_parking_updater",
    "bike-rental-updater",
    "bike_rental_updater",
    "bike-park-updater",
    "bike_park_updater",
    "real-time-alerts",
    "real_time_alerts",
    "alerts",
    "alert",
];

/// An absolute URL needs both a scheme and a network location.
#[must_use]
pub fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).map(|u| u.has_host()).unwrap_or(false)
}

pub fn validate_static_feed(feed: &StaticFeed) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let required = [
        ("type", &feed.feed_type),
        ("source", &feed.source),
        ("feedId", &feed.feed_id),
        ("reference", &feed.reference),
    ];
    for (field, value) in required {
        if value.is_none() {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    if let Some(feed_type) = &feed.feed_type {
        if feed_type != STATIC_FEED_TYPE {
            errors.push(format!(
                "Invalid type: {feed_type} (expected '{STATIC_FEED_TYPE}')"
            ));
        }
    }

    if let Some(source) = &feed.source {
        if !is_absolute_url(source) {
            errors.push(format!("Invalid source URL: {source}"));
        }
    }

    if let Some(reference) = &feed.reference {
        if !is_absolute_url(reference) {
            errors.push(format!("Invalid reference URL: {reference}"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_updater(updater: &Updater) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let required = [
        ("type", &updater.updater_type),
        ("url", &updater.url),
        ("feedId", &updater.feed_id),
    ];
    for (field, value) in required {
        if value.is_none() {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    if let Some(updater_type) = &updater.updater_type {
        if !VALID_UPDATER_TYPES.contains(&updater_type.as_str()) {
            errors.push(format!(
                "Invalid type: {updater_type} (expected valid OTP updater type)"
            ));
        }
    }

    if let Some(url) = &updater.url {
        if !is_absolute_url(url) {
            errors.push(format!("Invalid URL: {url}"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
