//! `feedcheck gtfs` — check static GTFS feed sources.
//!
//! Strictly sequential: feeds are checked in input order with a fixed
//! delay between records so the remote hosts are not burst. Each
//! record is validated structurally first; only valid records are
//! probed.

use std::time::Duration;

use console::style;

use crate::cli::GtfsArgs;
use crate::dataset::{loader, validation};
use crate::error::FeedCheckError;
use crate::logging;
use crate::probe::{self, ProbeLimits, ProbePolicy};
use crate::report::{self, CheckResult, ReportKind, RunStats};

pub async fn execute(args: GtfsArgs) -> Result<(), FeedCheckError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    report::print_banner("GTFS Feed Checker");

    println!(
        "{}",
        style(format!("Loading {}...", args.file.display())).blue()
    );
    let feeds = loader::load_static_feeds(&args.file).await?;
    let total = feeds.len();
    println!("Found {total} feed(s) to check\n");

    let client = probe::build_http_client();
    let limits = ProbeLimits {
        timeout: Duration::from_secs(args.timeout),
        retries: args.retries,
    };

    let mut stats = RunStats::new(total);

    println!("{}\n", style("Checking feeds...").bold());

    for (i, feed) in feeds.iter().enumerate() {
        let index = i + 1;
        let kind = feed.feed_type.clone().unwrap_or_else(|| "unknown".into());
        let feed_id = feed
            .feed_id
            .clone()
            .unwrap_or_else(|| format!("feed-{index}"));
        let url = feed.source.clone().unwrap_or_else(|| "N/A".into());

        report::print_check_header(ReportKind::StaticFeeds, index, total, &feed_id, &url);

        let result = match validation::validate_static_feed(feed) {
            Err(errors) => CheckResult::structural_failure(index, kind, feed_id, url, errors),
            Ok(()) => {
                let probe = probe::check_url(&client, &url, ProbePolicy::Static, limits).await;
                CheckResult::probed(index, kind, feed_id, url, probe)
            }
        };

        report::print_check_outcome(&result);
        stats.absorb(&result);

        // Small delay to avoid overwhelming servers
        if index < total {
            tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;
        }
    }

    report::print_summary(&stats, ReportKind::StaticFeeds);
    stats.exit_result()
}
