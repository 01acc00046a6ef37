//! Follow-on page queues for one domain crawl
//!
//! Links found on the home page are split into a priority queue (contact-like
//! pages) and an ordinary queue. Both keep document order. Caps are applied
//! when the queues are drained, not when links are scheduled.

use crate::crawler::visited::VisitedSet;
use crate::url::CandidateLink;
use url::Url;

/// Outcome of offering a link to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduled {
    Priority,
    Ordinary,
    OutOfScope,
    AlreadyVisited,
}

/// The two follow-on queues of a domain crawl
#[derive(Debug, Default)]
pub struct Frontier {
    priority: Vec<Url>,
    ordinary: Vec<Url>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a classified link to the frontier
    ///
    /// Out-of-scope links are rejected before the visited set is consulted, so
    /// they never occupy it. Accepted links are marked visited immediately.
    pub fn schedule(&mut self, link: CandidateLink, visited: &mut VisitedSet) -> Scheduled {
        if !link.is_in_scope {
            return Scheduled::OutOfScope;
        }

        if !visited.insert(&link.absolute_url) {
            return Scheduled::AlreadyVisited;
        }

        if link.is_priority {
            self.priority.push(link.absolute_url);
            Scheduled::Priority
        } else {
            self.ordinary.push(link.absolute_url);
            Scheduled::Ordinary
        }
    }

    pub fn priority(&self) -> &[Url] {
        &self.priority
    }

    pub fn ordinary(&self) -> &[Url] {
        &self.ordinary
    }

    /// Splits the frontier into capped priority and ordinary queues
    pub fn into_queues(self, max_priority: usize, max_ordinary: usize) -> (Vec<Url>, Vec<Url>) {
        let mut priority = self.priority;
        let mut ordinary = self.ordinary;
        priority.truncate(max_priority);
        ordinary.truncate(max_ordinary);
        (priority, ordinary)
    }
}
