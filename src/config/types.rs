use serde::Deserialize;

/// Main configuration structure for Mailscout
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub heuristics: HeuristicsConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Per-domain crawl budget
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Timeout for a domain's home page (milliseconds)
    #[serde(rename = "home-timeout-ms")]
    pub home_timeout_ms: u64,

    /// Timeout for each follow-on page (milliseconds)
    #[serde(rename = "page-timeout-ms")]
    pub page_timeout_ms: u64,

    /// Maximum number of contact-like pages visited per domain
    #[serde(rename = "max-priority-pages")]
    pub max_priority_pages: usize,

    /// Maximum number of ordinary pages visited per domain
    #[serde(rename = "max-ordinary-pages")]
    pub max_ordinary_pages: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            home_timeout_ms: 30_000,
            page_timeout_ms: 10_000,
            max_priority_pages: 10,
            max_ordinary_pages: 10,
        }
    }
}

/// Which page renderer to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Remote headless browser service returning rendered HTML
    #[default]
    Browser,
    /// Plain HTTP GET, no script execution
    Http,
}

/// Page renderer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub kind: RendererKind,

    /// Base URL of the headless browser service
    pub endpoint: String,

    /// Access token for the browser service, sent as a `token` query parameter
    pub token: Option<String>,

    /// User agent used by the HTTP renderer
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            kind: RendererKind::Browser,
            endpoint: "http://localhost:3000".to_string(),
            token: None,
            user_agent: format!("mailscout/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// String-matching heuristics
///
/// These lists are fuzzy by nature and are kept here so other locales can be
/// added without touching the crawl logic.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// Substrings marking a link as a contact page (matched against the lowercase URL)
    #[serde(rename = "contact-markers")]
    pub contact_markers: Vec<String>,

    /// Host substrings marking a website as a social-media profile
    #[serde(rename = "social-media-hosts")]
    pub social_media_hosts: Vec<String>,

    /// Path suffixes of resources that are never fetched
    #[serde(rename = "ignored-extensions")]
    pub ignored_extensions: Vec<String>,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            contact_markers: vec!["kontakt".to_string(), "contact".to_string()],
            social_media_hosts: vec!["facebook.com".to_string()],
            ignored_extensions: [
                ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".pdf", ".doc", ".docx", ".zip",
                ".rar", ".mp4", ".mp3",
            ]
            .iter()
            .map(|ext| ext.to_string())
            .collect(),
        }
    }
}

/// Column names of the business list
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    #[serde(rename = "name-column")]
    pub name_column: String,

    #[serde(rename = "phone-column")]
    pub phone_column: String,

    #[serde(rename = "website-column")]
    pub website_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            name_column: "name".to_string(),
            phone_column: "phone".to_string(),
            website_column: "website".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the results CSV file (`~` is expanded)
    pub path: String,

    /// Value written in the Email column when nothing was found
    #[serde(rename = "not-found-marker")]
    pub not_found_marker: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "~/Desktop/emails.csv".to_string(),
            not_found_marker: "not found".to_string(),
        }
    }
}
