//! Result sink trait
//!
//! A sink receives one result per domain, in input order, and must make each
//! row durable before the next domain is crawled.

use crate::crawler::CrawlResult;
use crate::OutputError;

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for result sinks
pub trait ResultSink {
    /// Records the result of one domain
    ///
    /// The row must be flushed before this returns, so an interrupted batch
    /// keeps every result recorded so far.
    fn record(&mut self, result: &CrawlResult) -> OutputResult<()>;

    /// Finalizes the output after the last result
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn record(&mut self, result: &CrawlResult) -> OutputResult<()> {
        (**self).record(result)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}

/// Collects results in memory
impl ResultSink for Vec<CrawlResult> {
    fn record(&mut self, result: &CrawlResult) -> OutputResult<()> {
        self.push(result.clone());
        Ok(())
    }
}
