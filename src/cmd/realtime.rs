//! `feedcheck realtime` — check realtime updater endpoints.
//!
//! Updaters are checked through a bounded worker pool. Completion
//! order is not deterministic, so results are collected first, sorted
//! by input index, and only then printed — the final report always
//! matches input order.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use console::style;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::cli::RealtimeArgs;
use crate::dataset::model::Updater;
use crate::dataset::{loader, validation};
use crate::error::FeedCheckError;
use crate::logging;
use crate::probe::{self, HttpClient, ProbeLimits, ProbePolicy};
use crate::report::{self, CheckResult, ReportKind, RunStats};

pub async fn execute(args: RealtimeArgs) -> Result<(), FeedCheckError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    report::print_banner("Realtime Feed Checker");

    println!(
        "{}",
        style(format!("Loading {}...", args.file.display())).blue()
    );
    let updaters = loader::load_realtime_updaters(&args.file).await?;
    let total = updaters.len();
    println!("Found {total} realtime updater(s) to check\n");

    let client = probe::build_http_client();
    let limits = ProbeLimits {
        timeout: Duration::from_secs(args.timeout),
        retries: args.retries,
    };
    let workers = args.workers.max(1);

    println!(
        "{}\n",
        style(format!(
            "Checking realtime updaters concurrently (max {workers} workers)..."
        ))
        .bold()
    );

    let started = Instant::now();
    let semaphore = Arc::new(Semaphore::new(workers));
    let mut tasks = JoinSet::new();

    for (i, updater) in updaters.into_iter().enumerate() {
        let index = i + 1;
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            // The semaphore is never closed; a failed acquire only
            // loses throttling, not correctness.
            let _permit = semaphore.acquire_owned().await.ok();
            check_updater(&client, updater, index, limits).await
        });
    }

    let mut results = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(e) => {
                tracing::error!(error = %e, "updater check task panicked");
                continue;
            }
        }
        let completed = results.len();
        if completed % 10 == 0 || completed == total {
            print!("Progress: {completed}/{total} updaters checked\r");
            let _ = std::io::stdout().flush();
        }
    }

    println!("\nCompleted in {:.2} seconds\n", started.elapsed().as_secs_f64());

    results.sort_by_key(|r| r.index);

    println!("{}\n", style("Results:").bold());

    let mut stats = RunStats::new(total);
    for result in &results {
        report::print_check(result, total, ReportKind::RealtimeUpdaters);
        stats.absorb(result);
    }

    report::print_summary(&stats, ReportKind::RealtimeUpdaters);
    stats.exit_result()
}

/// Structure validation followed by the network probe for one updater.
async fn check_updater(
    client: &HttpClient,
    updater: Updater,
    index: usize,
    limits: ProbeLimits,
) -> CheckResult {
    let kind = updater
        .updater_type
        .clone()
        .unwrap_or_else(|| "unknown".into());
    let feed_id = updater.feed_id.clone().unwrap_or_else(|| "unknown".into());
    let url = updater.url.clone().unwrap_or_else(|| "N/A".into());

    match validation::validate_updater(&updater) {
        Err(errors) => CheckResult::structural_failure(index, kind, feed_id, url, errors),
        Ok(()) => {
            let probe = probe::check_url(client, &url, ProbePolicy::Realtime, limits).await;
            CheckResult::probed(index, kind, feed_id, url, probe)
        }
    }
}
