use crate::config::types::{
    Config, CrawlerConfig, HeuristicsConfig, InputConfig, OutputConfig, RendererConfig,
    RendererKind,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_renderer_config(&config.renderer)?;
    validate_heuristics(&config.heuristics)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the per-domain crawl budget
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.home_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "home_timeout_ms must be greater than 0".to_string(),
        ));
    }

    if config.page_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "page_timeout_ms must be greater than 0".to_string(),
        ));
    }

    // Zero page caps are allowed: the crawl then stops after the home page.
    Ok(())
}

/// Validates renderer configuration
fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.kind == RendererKind::Browser {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid renderer endpoint '{}': {}", config.endpoint, e))
        })?;

        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Renderer endpoint '{}' must use http or https",
                config.endpoint
            )));
        }
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the matching heuristics
fn validate_heuristics(config: &HeuristicsConfig) -> Result<(), ConfigError> {
    if let Some(marker) = config
        .contact_markers
        .iter()
        .find(|m| m.trim().is_empty() || m.chars().any(char::is_uppercase))
    {
        return Err(ConfigError::Validation(format!(
            "contact markers must be non-empty and lowercase, got '{}'",
            marker
        )));
    }

    if config.social_media_hosts.iter().any(|h| h.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "social media hosts cannot be empty strings".to_string(),
        ));
    }

    for extension in &config.ignored_extensions {
        if !extension.starts_with('.') || extension.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "ignored extension '{}' must start with '.'",
                extension
            )));
        }
    }

    Ok(())
}

/// Validates input column names
fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    for (key, column) in [
        ("name_column", &config.name_column),
        ("phone_column", &config.phone_column),
        ("website_column", &config.website_column),
    ] {
        if column.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation("output path cannot be empty".to_string()));
    }

    Ok(())
}
