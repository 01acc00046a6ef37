//! Email extraction from rendered pages
//!
//! This module finds the single best email address on a page by applying a
//! fixed sequence of strategies, in descending order of confidence:
//! 1. An address printed in the visible page text
//! 2. The target of a `mailto:` link
//! 3. An address embedded in a script, style, or structured-data block
//!
//! Each strategy scans the whole page before the next one is tried, and the
//! first match wins. Candidates are never merged or ranked.

mod patterns;
mod strategies;
mod structured;

pub use patterns::{find_email, is_email};
pub use strategies::visible_text;

use scraper::Html;
use std::fmt;

/// An extraction strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Address printed in the rendered page text
    VisibleText,
    /// Target of a `mailto:` hyperlink
    MailtoLink,
    /// Address inside a script, style or structured-data block
    EmbeddedScript,
}

impl Strategy {
    /// All strategies in evaluation order
    pub const ORDER: [Strategy; 3] = [
        Strategy::VisibleText,
        Strategy::MailtoLink,
        Strategy::EmbeddedScript,
    ];

    /// Applies this strategy to a parsed page
    pub fn apply(&self, document: &Html) -> Option<String> {
        match self {
            Strategy::VisibleText => strategies::visible_text_email(document),
            Strategy::MailtoLink => strategies::mailto_email(document),
            Strategy::EmbeddedScript => strategies::script_email(document),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::VisibleText => "visible text",
            Strategy::MailtoLink => "mailto link",
            Strategy::EmbeddedScript => "embedded script",
        };
        f.write_str(name)
    }
}

/// An email address found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEmail {
    pub address: String,
    pub strategy: Strategy,
}

/// Extracts the best email candidate from raw HTML
///
/// # Example
///
/// ```
/// use mailscout::extract::{extract_email, Strategy};
///
/// let html = r#"<p>Write to office@acme.com</p><a href="mailto:sales@acme.com">Sales</a>"#;
/// let found = extract_email(html).unwrap();
/// assert_eq!(found.address, "office@acme.com");
/// assert_eq!(found.strategy, Strategy::VisibleText);
/// ```
pub fn extract_email(html: &str) -> Option<ExtractedEmail> {
    let document = Html::parse_document(html);
    extract_email_from_document(&document)
}

/// Extracts the best email candidate from an already parsed page
pub fn extract_email_from_document(document: &Html) -> Option<ExtractedEmail> {
    Strategy::ORDER.iter().find_map(|strategy| {
        strategy.apply(document).map(|address| ExtractedEmail {
            address,
            strategy: *strategy,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_beats_mailto() {
        let html = r#"<html><body>
            <p>shown at x@y.com</p>
            <a href="mailto:other@y.com">Mail us</a>
            </body></html>"#;
        let found = extract_email(html).unwrap();
        assert_eq!(found.address, "x@y.com");
        assert_eq!(found.strategy, Strategy::VisibleText);
    }

    #[test]
    fn test_visible_text_later_in_document_still_beats_mailto() {
        let html = r#"<html><body>
            <a href="mailto:early@y.com">Mail us</a>
            <footer>late@y.com</footer>
            </body></html>"#;
        assert_eq!(extract_email(html).unwrap().address, "late@y.com");
    }

    #[test]
    fn test_mailto_beats_script() {
        let html = r#"<html><head><script>var e = "js@acme.com";</script></head>
            <body><a href="mailto:info@acme.com">Mail</a></body></html>"#;
        let found = extract_email(html).unwrap();
        assert_eq!(found.address, "info@acme.com");
        assert_eq!(found.strategy, Strategy::MailtoLink);
    }

    #[test]
    fn test_script_as_last_resort() {
        let html = r#"<html><head><script>window.contact = "js@acme.com";</script></head>
            <body><p>Welcome</p></body></html>"#;
        let found = extract_email(html).unwrap();
        assert_eq!(found.address, "js@acme.com");
        assert_eq!(found.strategy, Strategy::EmbeddedScript);
    }

    #[test]
    fn test_obfuscated_link_text_uses_mailto() {
        let html = r#"<html><body><a href="mailto:info@acme.com">info [at] acme [dot] com</a></body></html>"#;
        let found = extract_email(html).unwrap();
        assert_eq!(found.strategy, Strategy::MailtoLink);
    }

    #[test]
    fn test_nothing_found() {
        let html = r#"<html><body><p>Call us: 555-0100</p><a href="/about">About</a></body></html>"#;
        assert_eq!(extract_email(html), None);
    }

    #[test]
    fn test_empty_page() {
        assert_eq!(extract_email(""), None);
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::VisibleText.to_string(), "visible text");
        assert_eq!(Strategy::MailtoLink.to_string(), "mailto link");
        assert_eq!(Strategy::EmbeddedScript.to_string(), "embedded script");
    }
}
