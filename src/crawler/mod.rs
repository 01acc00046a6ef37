//! Crawler module for finding contact emails
//!
//! This module contains the core crawling logic, including:
//! - Per-domain crawls over the home page and its same-site links
//! - Priority and ordinary page queues with per-crawl deduplication
//! - HTML parsing for emails and links
//! - Batch processing of a domain list with per-domain isolation

mod batch;
mod domain;
mod frontier;
mod parser;
mod visited;

pub use batch::{run_batch, BatchRunner};
pub use domain::DomainCrawler;
pub use frontier::{Frontier, Scheduled};
pub use parser::{parse_page, ParsedPage};
pub use visited::VisitedSet;

use crate::extract::Strategy;
use std::fmt;
use url::Url;

/// One domain to crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTask {
    /// The website as it appeared in the input
    pub start_url: String,
}

impl DomainTask {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
        }
    }
}

/// The outcome recorded for one domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    /// The start URL exactly as given in the task
    pub domain: String,

    /// The email found, or `None` when nothing was found
    pub email: Option<String>,
}

impl CrawlResult {
    /// A result with no email for the given task
    pub fn not_found(task: &DomainTask) -> Self {
        Self {
            domain: task.start_url.clone(),
            email: None,
        }
    }
}

/// Which part of the crawl a page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Home,
    Priority,
    Ordinary,
}

impl Stage {
    /// Position of the stage in the crawl, starting at 1
    pub fn step(&self) -> u8 {
        match self {
            Stage::Home => 1,
            Stage::Priority => 2,
            Stage::Ordinary => 3,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Home => "Home page",
            Stage::Priority => "Contact page",
            Stage::Ordinary => "Page",
        };
        f.write_str(name)
    }
}

/// Where and how an email was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundEmail {
    pub address: String,
    pub strategy: Strategy,
    pub page: Url,
    pub stage: Stage,
}

/// A crawl result with the bookkeeping gathered along the way
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub result: CrawlResult,

    /// Number of fetches issued, successful or not
    pub pages_attempted: usize,

    /// Number of fetches that failed
    pub failed_fetches: usize,

    /// Set when an email was found
    pub found: Option<FoundEmail>,
}

impl CrawlReport {
    /// An empty report for the given task
    pub fn new(task: &DomainTask) -> Self {
        Self {
            result: CrawlResult::not_found(task),
            pages_attempted: 0,
            failed_fetches: 0,
            found: None,
        }
    }

    pub(crate) fn record_found(&mut self, found: FoundEmail) {
        tracing::info!(
            "Found {} for {} ({} on {})",
            found.address,
            self.result.domain,
            found.strategy,
            found.page
        );
        self.result.email = Some(found.address.clone());
        self.found = Some(found);
    }
}
