use std::collections::HashSet;
use url::Url;

/// URLs already scheduled or fetched during one domain crawl
///
/// A set belongs to exactly one crawl invocation and is dropped when the crawl
/// ends, so URLs from one domain can never suppress another's. URLs are added
/// when they are scheduled, not when they are fetched.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the URL as visited, returning false if it already was
    pub fn insert(&mut self, url: &Url) -> bool {
        self.urls.insert(url.as_str().to_string())
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(url.as_str())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
