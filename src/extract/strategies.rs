//! Individual extraction strategies
//!
//! Each function scans a whole parsed page and returns the first address it
//! finds in document order.

use crate::extract::patterns::{find_email, is_email};
use crate::extract::structured::structured_data_email;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Elements whose text content is never rendered as page text
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script, style").expect("valid script selector"));

/// Collects the page's text, skipping script-like elements
///
/// Text nodes are joined with a space, so words from neighbouring elements
/// never run into an address.
pub fn visible_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.root_element().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |element| HIDDEN_ELEMENTS.contains(&element.name()))
        });

        if !hidden {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(fragment);
        }
    }

    text
}

/// Strategy 1: an address printed in the page text
pub fn visible_text_email(document: &Html) -> Option<String> {
    find_email(&visible_text(document)).map(str::to_string)
}

/// Strategy 2: the first valid `mailto:` link target
pub fn mailto_email(document: &Html) -> Option<String> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .find_map(mailto_address)
}

/// Strips the `mailto:` scheme and query string, keeping valid addresses only
fn mailto_address(href: &str) -> Option<String> {
    let href = href.trim();
    let scheme = href.get(..7)?;
    if !scheme.eq_ignore_ascii_case("mailto:") {
        return None;
    }

    let address = href[7..].split('?').next()?.trim();
    if is_email(address) {
        Some(address.to_string())
    } else {
        tracing::debug!("Ignoring mailto link with invalid address: {}", href);
        None
    }
}

/// Strategy 3: addresses embedded in script or style blocks
///
/// The raw text of every block is scanned first; structured-data blocks then
/// get a dedicated pass that decodes their JSON.
pub fn script_email(document: &Html) -> Option<String> {
    document
        .select(&SCRIPT_SELECTOR)
        .find_map(|element| {
            let raw: String = element.text().collect();
            find_email(&raw).map(str::to_string)
        })
        .or_else(|| structured_data_email(document))
}
