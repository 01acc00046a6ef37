//! Configuration module for Mailscout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional; `Config::default()` reproduces the standard
//! crawl budget (30s home page, 10s follow-on pages, 10 + 10 pages per domain).
//!
//! # Example
//!
//! ```no_run
//! use mailscout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mailscout.toml")).unwrap();
//! println!("Contact markers: {:?}", config.heuristics.contact_markers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, HeuristicsConfig, InputConfig, OutputConfig, RendererConfig,
    RendererKind,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
