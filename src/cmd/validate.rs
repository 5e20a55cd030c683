//! `feedcheck validate` — structure-only check of a descriptor file.
//!
//! Loads the document and runs every record through the structural
//! validator without touching the network. Reports in human-readable
//! text or machine-readable JSON. Useful as a fast pre-merge gate.

use std::path::{Path, PathBuf};

use crate::cli::{DatasetKind, ValidateArgs, ValidateFormat};
use crate::dataset::{loader, validation};
use crate::error::FeedCheckError;

struct RecordReport {
    id: String,
    errors: Vec<String>,
}

pub async fn execute(args: &ValidateArgs) -> Result<(), FeedCheckError> {
    let path = args
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(args.kind.default_file()));

    let records = match args.kind {
        DatasetKind::Gtfs => {
            let feeds = loader::load_static_feeds(&path).await?;
            feeds
                .iter()
                .enumerate()
                .map(|(i, feed)| RecordReport {
                    id: feed
                        .feed_id
                        .clone()
                        .unwrap_or_else(|| format!("feed-{}", i + 1)),
                    errors: validation::validate_static_feed(feed)
                        .err()
                        .unwrap_or_default(),
                })
                .collect::<Vec<_>>()
        }
        DatasetKind::Realtime => {
            let updaters = loader::load_realtime_updaters(&path).await?;
            updaters
                .iter()
                .enumerate()
                .map(|(i, updater)| RecordReport {
                    id: updater
                        .feed_id
                        .clone()
                        .unwrap_or_else(|| format!("updater-{}", i + 1)),
                    errors: validation::validate_updater(updater)
                        .err()
                        .unwrap_or_default(),
                })
                .collect()
        }
    };

    render(&path, &records, &args.format)
}

fn render(
    path: &Path,
    records: &[RecordReport],
    format: &ValidateFormat,
) -> Result<(), FeedCheckError> {
    let invalid: Vec<&RecordReport> = records.iter().filter(|r| !r.errors.is_empty()).collect();

    match format {
        ValidateFormat::Text => {
            if invalid.is_empty() {
                println!(
                    "\u{2713} {}: {} record(s), all structurally valid",
                    path.display(),
                    records.len()
                );
            } else {
                eprintln!(
                    "\u{2717} {} has {} invalid record(s)\n",
                    path.display(),
                    invalid.len()
                );
                for record in &invalid {
                    eprintln!("  {}:", record.id);
                    for error in &record.errors {
                        eprintln!("    - {error}");
                    }
                }
            }
        }
        ValidateFormat::Json => {
            let errors: Vec<serde_json::Value> = invalid
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "feedId": r.id,
                        "errors": r.errors,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::json!({
                    "valid": invalid.is_empty(),
                    "records": records.len(),
                    "errors": errors,
                })
            );
        }
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(FeedCheckError::ChecksFailed {
            failed: 0,
            structure_errors: invalid.len(),
        })
    }
}
