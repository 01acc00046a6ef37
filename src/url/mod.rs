//! URL handling module for Mailscout
//!
//! This module provides link classification (scope, priority and ignored
//! resources), network-location comparison, and start URL parsing.

mod classify;
mod domain;

pub use classify::{CandidateLink, LinkClassifier};
pub use domain::{network_location, parse_start_url};
