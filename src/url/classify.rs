use crate::config::HeuristicsConfig;
use crate::url::domain::network_location;
use url::Url;

/// A hyperlink found on a fetched page, resolved and classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// The link resolved against the page URL, without fragment
    pub absolute_url: Url,

    /// Whether the link stays on the crawled site's network location
    pub is_in_scope: bool,

    /// Whether the link looks like a contact page
    pub is_priority: bool,
}

/// Decides which links found on a page are worth visiting
///
/// The classifier is a pure function of the link, the page URL, and the
/// configured heuristics (contact markers and ignored resource extensions).
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    contact_markers: Vec<String>,
    ignored_extensions: Vec<String>,
}

impl Default for LinkClassifier {
    fn default() -> Self {
        Self::new(&HeuristicsConfig::default())
    }
}

impl LinkClassifier {
    /// Creates a classifier from the configured heuristics
    pub fn new(heuristics: &HeuristicsConfig) -> Self {
        Self {
            contact_markers: heuristics
                .contact_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
            ignored_extensions: heuristics
                .ignored_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    /// Classifies a raw `href` value found on the page at `base_url`
    ///
    /// # Rules
    ///
    /// - Links that do not resolve, or whose path ends with an ignored resource
    ///   extension, are dropped (`None`).
    /// - Relative links resolve against `base_url` and are in scope by
    ///   construction; absolute links are in scope only when their network
    ///   location equals the base's. Hostless schemes such as `mailto:` are
    ///   never in scope.
    /// - A link is priority when its lowercase absolute form contains one of
    ///   the contact markers.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailscout::url::LinkClassifier;
    /// use url::Url;
    ///
    /// let classifier = LinkClassifier::default();
    /// let base = Url::parse("http://a.com").unwrap();
    ///
    /// let link = classifier.classify("/contact-us", &base).unwrap();
    /// assert!(link.is_in_scope && link.is_priority);
    ///
    /// let link = classifier.classify("http://other.com/page", &base).unwrap();
    /// assert!(!link.is_in_scope);
    ///
    /// assert!(classifier.classify("http://a.com/brochure.pdf", &base).is_none());
    /// ```
    pub fn classify(&self, link: &str, base_url: &Url) -> Option<CandidateLink> {
        let link = link.trim();
        if link.is_empty() {
            return None;
        }

        let mut absolute_url = base_url.join(link).ok()?;
        absolute_url.set_fragment(None);

        if self.is_ignored_resource(&absolute_url) {
            return None;
        }

        let is_in_scope = absolute_url.host_str().is_some()
            && network_location(&absolute_url) == network_location(base_url);

        let lowered = absolute_url.as_str().to_lowercase();
        let is_priority = self
            .contact_markers
            .iter()
            .any(|marker| lowered.contains(marker.as_str()));

        Some(CandidateLink {
            absolute_url,
            is_in_scope,
            is_priority,
        })
    }

    /// Returns true if the URL path ends with one of the ignored extensions
    fn is_ignored_resource(&self, url: &Url) -> bool {
        let path = url.path().to_lowercase();
        self.ignored_extensions
            .iter()
            .any(|extension| path.ends_with(extension.as_str()))
    }
}
