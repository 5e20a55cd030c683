//! Integration tests for document loading, placeholder substitution,
//! and structural validation of loaded records.

use std::path::PathBuf;

use feedcheck::dataset::{loader, validation};
use feedcheck::error::FeedCheckError;

fn write_temp(name: &str, content: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("feedcheck-{}-{name}", std::process::id()));
    std::fs::write(&path, content).unwrap_or_else(|e| panic!("failed to write {name}: {e}"));
    path
}

#[tokio::test]
async fn static_dataset_loads_and_validates() {
    let path = write_temp(
        "dataset.json",
        r#"[
            {
                "type": "gtfs",
                "source": "https://example.com/gtfs.zip",
                "feedId": "hsl",
                "reference": "https://example.com/info",
                "name": "Helsinki Region"
            },
            {
                "type": "gtfs",
                "source": "https://example.com/other.zip",
                "feedId": "tampere",
                "reference": "https://example.com/other"
            }
        ]"#,
    );

    let feeds = loader::load_static_feeds(&path).await.unwrap();
    assert_eq!(feeds.len(), 2);
    for feed in &feeds {
        validation::validate_static_feed(feed).unwrap();
    }
    assert_eq!(feeds[0].feed_id.as_deref(), Some("hsl"));
}

#[tokio::test]
async fn record_with_missing_fields_still_loads_but_fails_validation() {
    let path = write_temp(
        "partial.json",
        r#"[{"type": "gtfs", "source": "https://example.com/f.zip"}]"#,
    );

    let feeds = loader::load_static_feeds(&path).await.unwrap();
    assert_eq!(feeds.len(), 1);

    let errors = validation::validate_static_feed(&feeds[0]).unwrap_err();
    assert_eq!(
        errors,
        vec![
            "Missing required field: feedId",
            "Missing required field: reference",
        ]
    );
}

#[tokio::test]
async fn realtime_document_substitutes_secrets_before_parsing() {
    std::env::set_var("FEEDCHECK_IT_API_KEY", "abc123");
    let path = write_temp(
        "realtime.json",
        r#"{
            "updaters": [
                {
                    "type": "vehicle-positions",
                    "url": "https://example.com/vp?key={{{FEEDCHECK_IT_API_KEY}}}",
                    "feedId": "hsl"
                }
            ]
        }"#,
    );

    let updaters = loader::load_realtime_updaters(&path).await.unwrap();
    assert_eq!(updaters.len(), 1);
    assert_eq!(
        updaters[0].url.as_deref(),
        Some("https://example.com/vp?key=abc123")
    );
    validation::validate_updater(&updaters[0]).unwrap();
}

#[tokio::test]
async fn unset_secret_becomes_empty_string() {
    std::env::remove_var("FEEDCHECK_IT_MISSING_KEY");
    let path = write_temp(
        "realtime-unset.json",
        r#"{"updaters": [{"type": "alerts", "url": "https://x.example/a?k={{{FEEDCHECK_IT_MISSING_KEY}}}", "feedId": "a"}]}"#,
    );

    let updaters = loader::load_realtime_updaters(&path).await.unwrap();
    assert_eq!(
        updaters[0].url.as_deref(),
        Some("https://x.example/a?k=")
    );
}

#[tokio::test]
async fn missing_file_is_a_fatal_input_error() {
    let result = loader::load_static_feeds(std::path::Path::new("/nonexistent/dataset.json")).await;
    assert!(matches!(
        result,
        Err(FeedCheckError::DatasetNotFound { .. })
    ));
}

#[tokio::test]
async fn malformed_json_is_a_fatal_input_error() {
    let path = write_temp("broken.json", r#"[{"type": "gtfs", }"#);
    let result = loader::load_static_feeds(&path).await;
    assert!(matches!(result, Err(FeedCheckError::DatasetParse { .. })));
}

#[tokio::test]
async fn realtime_document_without_updaters_key_is_rejected() {
    let path = write_temp("no-updaters.json", r#"{"router": {"name": "x"}}"#);
    let result = loader::load_realtime_updaters(&path).await;
    assert!(matches!(
        result,
        Err(FeedCheckError::MissingUpdaters { .. })
    ));
}

#[tokio::test]
async fn updaters_survive_mixed_validity() {
    let path = write_temp(
        "mixed.json",
        r#"{
            "updaters": [
                {"type": "trip_updates", "url": "https://example.com/tu", "feedId": "a"},
                {"type": "siri-et", "url": "https://example.com/siri", "feedId": "b"},
                {"type": "alerts", "url": "not-a-url", "feedId": "c"}
            ]
        }"#,
    );

    let updaters = loader::load_realtime_updaters(&path).await.unwrap();
    assert_eq!(updaters.len(), 3);

    assert!(validation::validate_updater(&updaters[0]).is_ok());
    assert_eq!(
        validation::validate_updater(&updaters[1]).unwrap_err(),
        vec!["Invalid type: siri-et (expected valid OTP updater type)"]
    );
    assert_eq!(
        validation::validate_updater(&updaters[2]).unwrap_err(),
        vec!["Invalid URL: not-a-url"]
    );
}
