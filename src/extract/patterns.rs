//! Email address pattern
//!
//! The pattern is deliberately permissive: no RFC 5322 compliance and no DNS
//! or MX validation. It accepts a local part of letters, digits and `._%+-`,
//! dot-separated domain labels, and a top-level label of two or more letters.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email pattern")
});

static EMAIL_EXACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

/// Returns the first email-like token in `text`
pub fn find_email(text: &str) -> Option<&str> {
    EMAIL_PATTERN.find(text).map(|m| m.as_str())
}

/// Returns true if the whole of `candidate` is an email address
pub fn is_email(candidate: &str) -> bool {
    EMAIL_EXACT.is_match(candidate)
}
