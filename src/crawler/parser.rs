//! HTML parser for fetched pages
//!
//! This module parses a page once and returns everything the crawler needs
//! from it as owned data:
//! - The best email candidate on the page
//! - The raw `href` values of its hyperlinks, when link collection is requested

use crate::extract::{extract_email_from_document, ExtractedEmail};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid link selector"));

/// Information extracted from a fetched page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The email found on the page, if any
    pub email: Option<ExtractedEmail>,

    /// Raw `href` values in document order; empty when an email was found or
    /// links were not requested
    pub links: Vec<String>,
}

/// Parses a page, extracting the email and optionally its links
///
/// Links are only collected when `collect_links` is set and no email was
/// found, since a page with an email ends the crawl.
///
/// # Example
///
/// ```
/// use mailscout::crawler::parse_page;
///
/// let html = r#"<html><body><a href="/kontakt">Kontakt</a></body></html>"#;
/// let parsed = parse_page(html, true);
/// assert!(parsed.email.is_none());
/// assert_eq!(parsed.links, vec!["/kontakt".to_string()]);
/// ```
pub fn parse_page(html: &str, collect_links: bool) -> ParsedPage {
    let document = Html::parse_document(html);
    let email = extract_email_from_document(&document);

    let links = if collect_links && email.is_none() {
        extract_hrefs(&document)
    } else {
        Vec::new()
    };

    ParsedPage { email, links }
}

/// Extracts non-empty `href` values of all anchors, in document order
fn extract_hrefs(document: &Html) -> Vec<String> {
    document
        .select(&LINK_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !href.starts_with('#'))
        .map(str::to_string)
        .collect()
}
