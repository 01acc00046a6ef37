//! Structured-data (JSON-LD) scanning
//!
//! Organisation metadata blocks are a common home for contact addresses that
//! the raw script scan misses, typically because the `@` is JSON-escaped.

use crate::extract::patterns::{find_email, is_email};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;

static STRUCTURED_DATA_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid structured data selector")
});

/// Returns the first address found in the page's JSON-LD blocks
///
/// Values under an `email` key win over addresses found in any other string.
/// Blocks that are not valid JSON are scanned as raw text.
pub fn structured_data_email(document: &Html) -> Option<String> {
    document
        .select(&STRUCTURED_DATA_SELECTOR)
        .find_map(|element| {
            let raw: String = element.text().collect();
            match serde_json::from_str::<Value>(&raw) {
                Ok(value) => email_field(&value).or_else(|| any_string_email(&value)),
                Err(e) => {
                    tracing::debug!("Structured data block is not valid JSON: {}", e);
                    find_email(&raw).map(str::to_string)
                }
            }
        })
}

/// Looks for an `email` property anywhere in the value
fn email_field(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case("email"))
            .find_map(|(_, field)| email_value(field))
            .or_else(|| map.values().find_map(email_field)),
        Value::Array(items) => items.iter().find_map(email_field),
        _ => None,
    }
}

/// Interprets the value of an `email` property
fn email_value(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) => {
            let raw = raw.trim();
            let address = match raw.get(..7) {
                Some(scheme) if scheme.eq_ignore_ascii_case("mailto:") => &raw[7..],
                _ => raw,
            };
            is_email(address).then(|| address.to_string())
        }
        Value::Array(items) => items.iter().find_map(email_value),
        _ => None,
    }
}

/// Scans every string in the value for an address
fn any_string_email(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => find_email(text).map(str::to_string),
        Value::Array(items) => items.iter().find_map(any_string_email),
        Value::Object(map) => map.values().find_map(any_string_email),
        _ => None,
    }
}
