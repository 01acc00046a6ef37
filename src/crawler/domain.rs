//! Per-domain crawl
//!
//! The crawl visits at most three groups of pages, strictly in this order:
//! 1. The home page, with a long timeout and a network-idle wait
//! 2. Up to `max-priority-pages` contact-like pages linked from the home page
//! 3. Up to `max-ordinary-pages` other same-site pages linked from the home page
//!
//! It stops at the first page yielding an email. Links found on follow-on
//! pages are never followed, and no URL is fetched twice.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::frontier::{Frontier, Scheduled};
use crate::crawler::parser::parse_page;
use crate::crawler::visited::VisitedSet;
use crate::crawler::{CrawlReport, DomainTask, FoundEmail, Stage};
use crate::render::{PageRenderer, RenderedPage, WaitPolicy};
use crate::url::{parse_start_url, LinkClassifier};
use std::time::Duration;
use url::Url;

/// Crawls one domain at a time for a contact email
///
/// The crawler borrows the batch's renderer and issues one fetch at a time.
/// It never fails: fetch errors are logged and the affected page is skipped.
pub struct DomainCrawler<'r> {
    renderer: &'r dyn PageRenderer,
    classifier: LinkClassifier,
    limits: CrawlerConfig,
}

impl<'r> DomainCrawler<'r> {
    /// Creates a crawler using the configured budget and heuristics
    pub fn new(renderer: &'r dyn PageRenderer, config: &Config) -> Self {
        Self::with_parts(
            renderer,
            LinkClassifier::new(&config.heuristics),
            config.crawler.clone(),
        )
    }

    pub fn with_parts(
        renderer: &'r dyn PageRenderer,
        classifier: LinkClassifier,
        limits: CrawlerConfig,
    ) -> Self {
        Self {
            renderer,
            classifier,
            limits,
        }
    }

    /// Crawls a domain with a fresh visited set
    pub async fn crawl(&self, task: &DomainTask) -> CrawlReport {
        let mut visited = VisitedSet::new();
        self.crawl_with(task, &mut visited).await
    }

    /// Crawls a domain, recording every scheduled URL in `visited`
    pub async fn crawl_with(&self, task: &DomainTask, visited: &mut VisitedSet) -> CrawlReport {
        let mut report = CrawlReport::new(task);

        let Some(start_url) = parse_start_url(&task.start_url) else {
            tracing::warn!("Skipping unparseable website '{}'", task.start_url);
            return report;
        };
        visited.insert(&start_url);

        let mut frontier = Frontier::new();

        tracing::info!("[1] Home page: {}", start_url);
        let home_timeout = Duration::from_millis(self.limits.home_timeout_ms);
        if let Some(page) = self
            .visit(&start_url, home_timeout, WaitPolicy::NetworkIdle, &mut report)
            .await
        {
            let parsed = parse_page(&page.html, true);
            if let Some(email) = parsed.email {
                report.record_found(FoundEmail {
                    address: email.address,
                    strategy: email.strategy,
                    page: start_url,
                    stage: Stage::Home,
                });
                return report;
            }

            // Redirect targets count as visited and become the base for links
            visited.insert(&page.final_url);
            self.schedule_links(&parsed.links, &page.final_url, &mut frontier, visited);
        }

        let (priority, ordinary) = frontier.into_queues(
            self.limits.max_priority_pages,
            self.limits.max_ordinary_pages,
        );

        for (stage, queue) in [(Stage::Priority, priority), (Stage::Ordinary, ordinary)] {
            if let Some(found) = self.visit_queue(stage, &queue, &mut report).await {
                report.record_found(found);
                return report;
            }
        }

        tracing::info!("No email found for {}", task.start_url);
        report
    }

    /// Classifies the home page links and schedules the ones worth visiting
    fn schedule_links(
        &self,
        links: &[String],
        base_url: &Url,
        frontier: &mut Frontier,
        visited: &mut VisitedSet,
    ) {
        for href in links {
            let Some(candidate) = self.classifier.classify(href, base_url) else {
                tracing::debug!("Dropped link {}", href);
                continue;
            };

            let url = candidate.absolute_url.clone();
            match frontier.schedule(candidate, visited) {
                Scheduled::Priority => tracing::debug!("Queued contact page {}", url),
                Scheduled::Ordinary => tracing::trace!("Queued page {}", url),
                Scheduled::OutOfScope => tracing::trace!("Out of scope: {}", url),
                Scheduled::AlreadyVisited => tracing::trace!("Already queued: {}", url),
            }
        }

        tracing::debug!(
            "Scheduled {} contact pages and {} other pages from {}",
            frontier.priority().len(),
            frontier.ordinary().len(),
            base_url
        );
    }

    /// Visits follow-on pages in order until one yields an email
    async fn visit_queue(
        &self,
        stage: Stage,
        queue: &[Url],
        report: &mut CrawlReport,
    ) -> Option<FoundEmail> {
        let timeout = Duration::from_millis(self.limits.page_timeout_ms);

        for url in queue {
            tracing::info!("[{}] {}: {}", stage.step(), stage, url);

            let Some(page) = self.visit(url, timeout, WaitPolicy::Load, report).await else {
                continue;
            };

            if let Some(email) = parse_page(&page.html, false).email {
                return Some(FoundEmail {
                    address: email.address,
                    strategy: email.strategy,
                    page: url.clone(),
                    stage,
                });
            }
        }

        None
    }

    /// Fetches one page, logging and swallowing any failure
    async fn visit(
        &self,
        url: &Url,
        timeout: Duration,
        wait: WaitPolicy,
        report: &mut CrawlReport,
    ) -> Option<RenderedPage> {
        report.pages_attempted += 1;

        match self.renderer.fetch(url, timeout, wait).await {
            Ok(page) => Some(page),
            Err(e) => {
                report.failed_fetches += 1;
                tracing::warn!("Failed to load {}: {}", url, e);
                None
            }
        }
    }
}
