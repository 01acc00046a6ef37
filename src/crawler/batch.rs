//! Batch processing of a domain list
//!
//! Domains are crawled one at a time in input order. A crawl that panics is
//! recorded as not found and the batch moves on; only a failure to write the
//! output stops it.

use crate::config::Config;
use crate::crawler::{CrawlReport, CrawlResult, DomainCrawler, DomainTask};
use crate::output::{BatchStatistics, ResultSink};
use crate::render::PageRenderer;
use crate::ScoutError;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

/// Runs a domain crawler over a list of tasks, writing each result to a sink
pub struct BatchRunner<'r, S: ResultSink> {
    crawler: DomainCrawler<'r>,
    sink: S,
}

impl<'r, S: ResultSink> BatchRunner<'r, S> {
    pub fn new(crawler: DomainCrawler<'r>, sink: S) -> Self {
        Self { crawler, sink }
    }

    /// Crawls every task in order
    ///
    /// Each result is recorded (and flushed) before the next domain starts.
    /// Returns an error only if the sink fails.
    pub async fn run(&mut self, tasks: &[DomainTask]) -> Result<BatchStatistics, ScoutError> {
        let started = Instant::now();
        let mut stats = BatchStatistics::new();

        for (index, task) in tasks.iter().enumerate() {
            tracing::info!(
                "Processing domain {}/{}: {}",
                index + 1,
                tasks.len(),
                task.start_url
            );

            let result = match self.crawl_isolated(task).await {
                Ok(report) => {
                    stats.record(&report);
                    report.result
                }
                Err(panic) => {
                    tracing::error!(
                        "Crawl of {} aborted: {}",
                        task.start_url,
                        panic_message(panic.as_ref())
                    );
                    stats.record_crash();
                    CrawlResult::not_found(task)
                }
            };

            self.sink.record(&result)?;
        }

        self.sink.finish()?;
        stats.elapsed = started.elapsed();

        tracing::info!(
            "Batch complete: {} of {} domains have an email",
            stats.emails_found,
            stats.domains
        );
        Ok(stats)
    }

    /// Runs one crawl, catching any panic it raises
    async fn crawl_isolated(
        &self,
        task: &DomainTask,
    ) -> Result<CrawlReport, Box<dyn Any + Send>> {
        AssertUnwindSafe(self.crawler.crawl(task))
            .catch_unwind()
            .await
    }

    /// Consumes the runner, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Crawls a batch with the given renderer and closes the renderer afterwards
///
/// The renderer is closed whether the batch succeeds or not. A failure to
/// close is logged and does not change the outcome.
pub async fn run_batch<S: ResultSink>(
    renderer: &dyn PageRenderer,
    config: &Config,
    tasks: &[DomainTask],
    sink: &mut S,
) -> Result<BatchStatistics, ScoutError> {
    let crawler = DomainCrawler::new(renderer, config);
    let mut runner = BatchRunner::new(crawler, sink);
    let outcome = runner.run(tasks).await;

    if let Err(e) = renderer.close().await {
        tracing::warn!("Failed to close renderer: {}", e);
    }

    outcome
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
