//! Output module for recording crawl results
//!
//! This module handles:
//! - Writing one CSV row per domain as soon as its crawl ends
//! - Resolving the output path
//! - Summarizing a batch run

mod csv_sink;
pub mod stats;
mod traits;

pub use csv_sink::{resolve_output_path, CsvSink, HEADER};
pub use stats::{print_statistics, BatchStatistics};
pub use traits::{OutputResult, ResultSink};
