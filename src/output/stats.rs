//! Batch statistics
//!
//! Counters gathered while a batch runs, printed once at the end.

use crate::crawler::{CrawlReport, Stage};
use crate::extract::Strategy;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

/// Summary of a batch run
#[derive(Debug, Clone)]
pub struct BatchStatistics {
    /// When the batch started
    pub started_at: DateTime<Utc>,

    /// Wall-clock time of the batch
    pub elapsed: Duration,

    /// Domains processed
    pub domains: usize,

    /// Domains with an email
    pub emails_found: usize,

    /// Domains whose crawl panicked and was recorded as not found
    pub crashed: usize,

    /// Fetches issued across all domains
    pub pages_attempted: usize,

    /// Fetches that failed across all domains
    pub failed_fetches: usize,

    /// Emails found per extraction strategy
    pub by_strategy: HashMap<Strategy, usize>,

    /// Emails found per crawl stage
    pub by_stage: HashMap<Stage, usize>,
}

impl BatchStatistics {
    /// Creates empty statistics starting now
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            domains: 0,
            emails_found: 0,
            crashed: 0,
            pages_attempted: 0,
            failed_fetches: 0,
            by_strategy: HashMap::new(),
            by_stage: HashMap::new(),
        }
    }

    /// Adds one finished crawl
    pub fn record(&mut self, report: &CrawlReport) {
        self.domains += 1;
        self.pages_attempted += report.pages_attempted;
        self.failed_fetches += report.failed_fetches;

        if let Some(found) = &report.found {
            self.emails_found += 1;
            *self.by_strategy.entry(found.strategy).or_insert(0) += 1;
            *self.by_stage.entry(found.stage).or_insert(0) += 1;
        }
    }

    /// Adds one crawl that panicked
    pub fn record_crash(&mut self) {
        self.domains += 1;
        self.crashed += 1;
    }

    /// Domains without an email
    pub fn not_found(&self) -> usize {
        self.domains - self.emails_found
    }

    /// Share of domains with an email, as a percentage
    pub fn hit_rate(&self) -> f64 {
        if self.domains == 0 {
            return 0.0;
        }
        (self.emails_found as f64 / self.domains as f64) * 100.0
    }
}

impl Default for BatchStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &BatchStatistics) {
    println!("=== Mailscout Summary ===\n");

    println!("Overview:");
    println!(
        "  Started: {}",
        stats.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Duration: {:.1}s", stats.elapsed.as_secs_f64());
    println!("  Domains processed: {}", stats.domains);
    println!("  Emails found: {}", stats.emails_found);
    println!("  Not found: {}", stats.not_found());
    if stats.crashed > 0 {
        println!("  Crawls aborted: {}", stats.crashed);
    }
    println!();

    println!("Pages:");
    println!("  Fetched: {}", stats.pages_attempted);
    println!("  Failed: {}", stats.failed_fetches);
    println!();

    if stats.emails_found > 0 {
        println!("Found via:");
        for strategy in Strategy::ORDER {
            let count = stats.by_strategy.get(&strategy).copied().unwrap_or(0);
            println!("  {}: {}", strategy, count);
        }
        println!();

        println!("Found on:");
        for stage in [Stage::Home, Stage::Priority, Stage::Ordinary] {
            let count = stats.by_stage.get(&stage).copied().unwrap_or(0);
            println!("  {}: {}", stage, count);
        }
        println!();
    }

    println!(
        "Hit Rate: {:.1}% ({} / {} domains)",
        stats.hit_rate(),
        stats.emails_found,
        stats.domains
    );
}
