//! Check results, aggregate statistics, and console report rendering.
//!
//! Both pipelines produce one [`CheckResult`] per record and fold them
//! into a [`RunStats`]; rendering differs only in wording, captured by
//! [`ReportKind`]. Results are immutable once constructed.

use console::style;

use crate::error::FeedCheckError;
use crate::probe::ProbeResult;

const RULE_WIDTH: usize = 70;

/// Outcome of checking a single record. A structurally invalid record
/// is never probed, so [`CheckResult::structural_failure`] pins
/// `success` to false and `status_code` to 0.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// 1-based position in the input document.
    pub index: usize,
    /// Declared `type`, or "unknown".
    pub kind: String,
    pub feed_id: String,
    pub url: String,
    pub structure_valid: bool,
    pub structure_errors: Vec<String>,
    pub success: bool,
    pub message: String,
    pub status_code: u16,
}

impl CheckResult {
    #[must_use]
    pub fn structural_failure(
        index: usize,
        kind: String,
        feed_id: String,
        url: String,
        errors: Vec<String>,
    ) -> Self {
        Self {
            index,
            kind,
            feed_id,
            url,
            structure_valid: false,
            structure_errors: errors,
            success: false,
            message: String::new(),
            status_code: 0,
        }
    }

    #[must_use]
    pub fn probed(
        index: usize,
        kind: String,
        feed_id: String,
        url: String,
        probe: ProbeResult,
    ) -> Self {
        Self {
            index,
            kind,
            feed_id,
            url,
            structure_valid: true,
            structure_errors: Vec::new(),
            success: probe.success,
            message: probe.message,
            status_code: probe.status_code,
        }
    }
}

/// Which pipeline a report describes; selects labels and wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    StaticFeeds,
    RealtimeUpdaters,
}

impl ReportKind {
    const fn url_label(self) -> &'static str {
        match self {
            Self::StaticFeeds => "Source",
            Self::RealtimeUpdaters => "URL",
        }
    }

    const fn total_label(self) -> &'static str {
        match self {
            Self::StaticFeeds => "Total feeds:",
            Self::RealtimeUpdaters => "Total updaters:",
        }
    }

    const fn failed_heading(self) -> &'static str {
        match self {
            Self::StaticFeeds => "Failed Feeds:",
            Self::RealtimeUpdaters => "Failed Updaters:",
        }
    }

    const fn all_clear(self) -> &'static str {
        match self {
            Self::StaticFeeds => "All feeds are accessible!",
            Self::RealtimeUpdaters => "All realtime updaters are accessible!",
        }
    }

    /// Static records are headed by their feed id; realtime records by
    /// updater type and feed id.
    fn heading(self, kind: &str, feed_id: &str) -> String {
        match self {
            Self::StaticFeeds => feed_id.to_string(),
            Self::RealtimeUpdaters => format!("{kind} - {feed_id}"),
        }
    }
}

/// One entry of the itemized failure list, in encounter order.
#[derive(Debug, Clone)]
pub struct FailedCheck {
    pub kind: String,
    pub feed_id: String,
    pub url: String,
    pub error: String,
}

/// Aggregate counters for a pipeline run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub structure_errors: usize,
    pub failures: Vec<FailedCheck>,
}

impl RunStats {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn absorb(&mut self, result: &CheckResult) {
        if !result.structure_valid {
            self.structure_errors += 1;
            self.failures.push(FailedCheck {
                kind: result.kind.clone(),
                feed_id: result.feed_id.clone(),
                url: result.url.clone(),
                error: result.structure_errors.join("; "),
            });
        } else if result.success {
            self.successful += 1;
        } else {
            self.failed += 1;
            self.failures.push(FailedCheck {
                kind: result.kind.clone(),
                feed_id: result.feed_id.clone(),
                url: result.url.clone(),
                error: result.message.clone(),
            });
        }
    }

    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.successful as f64 / self.total as f64 * 100.0
        }
    }

    pub fn exit_result(&self) -> Result<(), FeedCheckError> {
        if self.failed > 0 || self.structure_errors > 0 {
            Err(FeedCheckError::ChecksFailed {
                failed: self.failed,
                structure_errors: self.structure_errors,
            })
        } else {
            Ok(())
        }
    }
}

pub fn print_banner(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{}", style(&rule).bold());
    println!("{}", style(title).bold());
    println!("{}\n", style(&rule).bold());
}

pub fn print_check_header(kind: ReportKind, index: usize, total: usize, heading: &str, url: &str) {
    println!("[{index}/{total}] {}", style(heading).bold());
    println!("  {}: {url}", kind.url_label());
}

pub fn print_check_outcome(result: &CheckResult) {
    if !result.structure_valid {
        println!("  {}", style("\u{2717} Structure Error:").red());
        for error in &result.structure_errors {
            println!("    - {error}");
        }
    } else if result.success {
        println!("  {}", style(format!("\u{2713} {}", result.message)).green());
    } else {
        println!("  {}", style(format!("\u{2717} {}", result.message)).red());
    }
    println!();
}

pub fn print_check(result: &CheckResult, total: usize, kind: ReportKind) {
    let heading = kind.heading(&result.kind, &result.feed_id);
    print_check_header(kind, result.index, total, &heading, &result.url);
    print_check_outcome(result);
}

pub fn print_summary(stats: &RunStats, kind: ReportKind) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{}", style(&rule).bold());
    println!("{}", style("Summary").bold());
    println!("{}\n", style(&rule).bold());

    println!("{:<22}{}", kind.total_label(), stats.total);
    println!(
        "{}",
        style(format!("{:<22}{}", "Successful:", stats.successful)).green()
    );
    println!(
        "{}",
        style(format!("{:<22}{}", "Failed:", stats.failed)).red()
    );
    println!(
        "{}",
        style(format!(
            "{:<22}{}",
            "Structure errors:", stats.structure_errors
        ))
        .yellow()
    );

    println!("\n{:<22}{:.1}%", "Success rate:", stats.success_rate());

    if !stats.failures.is_empty() {
        println!("\n{}", style(kind.failed_heading()).red().bold());
        for failure in &stats.failures {
            let bullet = kind.heading(&failure.kind, &failure.feed_id);
            println!("  \u{2022} {bullet}");
            println!("    URL: {}", failure.url);
            println!("    Error: {}", failure.error);
            println!();
        }
    }

    println!("{}\n", style(&rule).bold());

    if stats.failed > 0 || stats.structure_errors > 0 {
        println!(
            "{}",
            style("Check failed! Please review the errors above.").red()
        );
    } else {
        println!("{}", style(kind.all_clear()).green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probed(index: usize, success: bool) -> CheckResult {
        CheckResult::probed(
            index,
            "gtfs".into(),
            format!("feed-{index}"),
            "http://example.com/feed.zip".into(),
            ProbeResult {
                success,
                message: if success { "OK" } else { "HTTP 500: Internal Server Error" }.into(),
                status_code: if success { 200 } else { 500 },
            },
        )
    }

    #[test]
    fn structural_failure_never_counts_as_reachable() {
        let result = CheckResult::structural_failure(
            1,
            "unknown".into(),
            "broken".into(),
            "N/A".into(),
            vec!["Missing required field: type".into()],
        );
        assert!(!result.structure_valid);
        assert!(!result.success);
        assert_eq!(result.status_code, 0);
    }

    #[test]
    fn absorb_routes_each_outcome_to_one_counter() {
        let mut stats = RunStats::new(3);
        stats.absorb(&probed(1, true));
        stats.absorb(&probed(2, false));
        stats.absorb(&CheckResult::structural_failure(
            3,
            "unknown".into(),
            "broken".into(),
            "N/A".into(),
            vec!["Missing required field: url".into()],
        ));

        assert_eq!(stats.successful, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.structure_errors, 1);
        assert_eq!(stats.failures.len(), 2);
        assert_eq!(stats.failures[0].error, "HTTP 500: Internal Server Error");
        assert_eq!(stats.failures[1].error, "Missing required field: url");
    }

    #[test]
    fn structural_errors_join_with_semicolon() {
        let mut stats = RunStats::new(1);
        stats.absorb(&CheckResult::structural_failure(
            1,
            "unknown".into(),
            "broken".into(),
            "N/A".into(),
            vec![
                "Missing required field: type".into(),
                "Invalid URL: nope".into(),
            ],
        ));
        assert_eq!(
            stats.failures[0].error,
            "Missing required field: type; Invalid URL: nope"
        );
    }

    #[test]
    fn success_rate_handles_empty_input() {
        assert_eq!(RunStats::new(0).success_rate(), 0.0);

        let mut stats = RunStats::new(4);
        for i in 0..4 {
            stats.absorb(&probed(i + 1, i < 3));
        }
        assert_eq!(stats.success_rate(), 75.0);
    }

    #[test]
    fn exit_result_fails_on_structure_errors_alone() {
        let mut stats = RunStats::new(1);
        stats.absorb(&CheckResult::structural_failure(
            1,
            "unknown".into(),
            "broken".into(),
            "N/A".into(),
            vec!["Missing required field: feedId".into()],
        ));
        assert!(stats.exit_result().is_err());

        let mut clean = RunStats::new(1);
        clean.absorb(&probed(1, true));
        assert!(clean.exit_result().is_ok());
    }
}
